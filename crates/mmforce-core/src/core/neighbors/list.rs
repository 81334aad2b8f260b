use super::search::{BruteForceSearch, NeighborSearch};
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomIndex;
use crate::core::models::space::SimulationSpace;
use crate::core::utils::elements::{ElementError, ElementProperties};

/// Default neighbor-search cutoff, in the length unit of the positions.
pub const DEFAULT_NEIGHBOR_CUTOFF: f64 = 0.55;

/// The atoms of a [`SimulationSpace`] found within a cutoff of some query atom.
///
/// Holds indices into the space rather than copies of the atoms, so reads always
/// see the space's current records.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborList<'a> {
    space: &'a SimulationSpace,
    indices: Vec<AtomIndex>,
}

impl<'a> NeighborList<'a> {
    pub fn new(space: &'a SimulationSpace, indices: Vec<AtomIndex>) -> Self {
        Self { space, indices }
    }

    pub fn space(&self) -> &'a SimulationSpace {
        self.space
    }

    pub fn indices(&self) -> &[AtomIndex] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates over the neighbors in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = (AtomIndex, &'a Atom)> + '_ {
        let space = self.space;
        self.indices
            .iter()
            .filter_map(move |&index| space.atom(index).map(|atom| (index, atom)))
    }

    fn within(&self, atom: &Atom, radius: f64) -> NeighborList<'a> {
        let indices = self
            .iter()
            .filter(|(_, other)| atom.distance_to(other) <= radius)
            .map(|(index, _)| index)
            .collect();
        NeighborList::new(self.space, indices)
    }

    /// Narrows this list to the neighbors within `radius` of `atom` for
    /// electrostatics, without rescanning the space.
    pub fn electrostatic_list(&self, atom: &Atom, radius: f64) -> NeighborList<'a> {
        self.within(atom, radius)
    }

    /// Narrows this list to the neighbors within `radius` of `atom` for
    /// van der Waals interactions, without rescanning the space.
    pub fn vdw_list(&self, atom: &Atom, radius: f64) -> NeighborList<'a> {
        self.within(atom, radius)
    }

    /// [`electrostatic_list`](Self::electrostatic_list) with the Coulomb radius of
    /// the query atom's element.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::NotFound`] if the element table lacks the element.
    pub fn electrostatic_list_for<E: ElementProperties + ?Sized>(
        &self,
        atom: &Atom,
        elements: &E,
    ) -> Result<NeighborList<'a>, ElementError> {
        let radius = elements.coulomb_radius(&atom.element)?;
        Ok(self.electrostatic_list(atom, radius))
    }

    /// [`vdw_list`](Self::vdw_list) with the van der Waals radius of the query
    /// atom's element.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::NotFound`] if the element table lacks the element.
    pub fn vdw_list_for<E: ElementProperties + ?Sized>(
        &self,
        atom: &Atom,
        elements: &E,
    ) -> Result<NeighborList<'a>, ElementError> {
        let radius = elements.vdw_radius(&atom.element)?;
        Ok(self.vdw_list(atom, radius))
    }
}

/// Every atom of `space` other than `atom` (compared by id) whose distance to it
/// is at most `cutoff`.
///
/// This is a linear scan of the whole space; build a
/// [`KdTreeSearch`](super::search::KdTreeSearch) once when querying many atoms.
pub fn neighbor_list<'a>(space: &'a SimulationSpace, atom: &Atom, cutoff: f64) -> NeighborList<'a> {
    BruteForceSearch::new(space).neighbors(atom, cutoff)
}
