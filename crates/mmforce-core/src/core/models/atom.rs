use super::ids::AtomId;
use crate::core::utils::elements::{ElementError, ElementProperties};
use nalgebra::{Point3, Vector3};

/// Represents an atom of the evaluated system with its identity and physical state.
///
/// Atoms are plain values owned by the caller. The force-field core only reads
/// them and reports energies and forces as separate values; in particular the
/// velocity is carried along for the caller's integrator but never touched here.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Integer identity, unique within a simulation.
    pub id: AtomId,
    /// Element symbol (e.g. "C", "Cl").
    pub element: String,
    /// Cartesian coordinates.
    pub position: Point3<f64>,
    /// Velocity vector, carried but not mutated by the core.
    pub velocity: Vector3<f64>,
    /// Atomic mass.
    pub mass: f64,
    /// Atomic number of the element.
    pub atomic_number: u32,
    /// Partial charge in elementary charge units.
    pub charge: f64,
}

impl Atom {
    /// Creates a new `Atom` at rest with zero mass, charge and atomic number.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique id of the atom.
    /// * `element` - The element symbol.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(id: AtomId, element: &str, position: Point3<f64>) -> Self {
        Self {
            id,
            element: element.to_string(),
            position,
            velocity: Vector3::zeros(),
            mass: 0.0,
            atomic_number: 0,
            charge: 0.0,
        }
    }

    /// Creates a new `Atom` whose atomic number is taken from an element table.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::NotFound`] if the table does not know `element`.
    /// No default is substituted, since the physical parameters cannot be guessed.
    pub fn from_element<E: ElementProperties + ?Sized>(
        id: AtomId,
        element: &str,
        position: Point3<f64>,
        elements: &E,
    ) -> Result<Self, ElementError> {
        let atomic_number = elements.atomic_number(element)?;
        Ok(Self {
            atomic_number,
            ..Self::new(id, element, position)
        })
    }

    /// Sets the partial charge, consuming and returning the atom.
    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    /// Sets the mass, consuming and returning the atom.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Euclidean distance to another atom.
    #[inline]
    pub fn distance_to(&self, other: &Atom) -> f64 {
        (self.position - other.position).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::elements::StandardElements;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(7, "C", Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.id, 7);
        assert_eq!(atom.element, "C");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.velocity, Vector3::zeros());
        assert_eq!(atom.mass, 0.0);
        assert_eq!(atom.atomic_number, 0);
        assert_eq!(atom.charge, 0.0);
    }

    #[test]
    fn builder_methods_set_charge_and_mass() {
        let atom = Atom::new(0, "O", Point3::origin())
            .with_charge(-0.8)
            .with_mass(15.999);
        assert_eq!(atom.charge, -0.8);
        assert_eq!(atom.mass, 15.999);
    }

    #[test]
    fn from_element_looks_up_atomic_number() {
        let atom = Atom::from_element(3, "N", Point3::origin(), &StandardElements).unwrap();
        assert_eq!(atom.atomic_number, 7);
        assert_eq!(atom.id, 3);
    }

    #[test]
    fn from_element_propagates_unknown_symbol() {
        let result = Atom::from_element(3, "Qq", Point3::origin(), &StandardElements);
        assert!(matches!(result, Err(ElementError::NotFound { .. })));
    }

    #[test]
    fn distance_to_is_symmetric() {
        let a = Atom::new(0, "C", Point3::new(0.0, 0.0, 0.0));
        let b = Atom::new(1, "C", Point3::new(0.0, 3.0, 4.0));
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let mut atom1 = Atom::new(1, "H", Point3::new(0.5, 0.0, 0.0));
        atom1.velocity = Vector3::new(0.1, 0.2, 0.3);
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
