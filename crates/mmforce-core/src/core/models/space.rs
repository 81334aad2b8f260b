use super::atom::Atom;
use super::ids::{AtomId, AtomIndex};
use nalgebra::Point3;
use std::collections::HashMap;

/// An ordered sequence of atoms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

/// The finite, non-periodic set of molecules being evaluated.
///
/// All atoms live in this single arena; everything derived from it (neighbor
/// lists, per-atom force arrays) refers back to atoms by [`AtomIndex`] or
/// [`AtomId`] rather than holding copies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationSpace {
    molecules: Vec<Molecule>,
}

impl SimulationSpace {
    /// Creates a new simulation space from a list of molecules.
    pub fn new(molecules: Vec<Molecule>) -> Self {
        Self { molecules }
    }

    /// Returns a slice of all molecules in the space.
    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    /// Retrieves an atom by its index.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the index addresses an atom, otherwise `None`.
    pub fn atom(&self, index: AtomIndex) -> Option<&Atom> {
        self.molecules
            .get(index.molecule)
            .and_then(|m| m.atoms.get(index.atom))
    }

    /// Returns an iterator over all atoms, molecule by molecule, in order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(AtomIndex, &Atom)` pairs.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomIndex, &Atom)> + '_ {
        self.molecules
            .iter()
            .enumerate()
            .flat_map(|(mol_idx, molecule)| {
                molecule
                    .atoms
                    .iter()
                    .enumerate()
                    .map(move |(atom_idx, atom)| (AtomIndex::new(mol_idx, atom_idx), atom))
            })
    }

    /// Total number of atoms across all molecules.
    pub fn atom_count(&self) -> usize {
        self.molecules.iter().map(Molecule::len).sum()
    }

    /// Largest atom id in the space, or `None` when it is empty.
    pub fn max_id(&self) -> Option<AtomId> {
        self.atoms_iter().map(|(_, atom)| atom.id).max()
    }

    /// Builds a lookup map from atom id to its index in the space.
    ///
    /// # Return
    ///
    /// `Err(id)` with the first id that appears twice.
    pub fn index_by_id(&self) -> Result<HashMap<AtomId, AtomIndex>, AtomId> {
        let mut map = HashMap::with_capacity(self.atom_count());
        for (index, atom) in self.atoms_iter() {
            if map.insert(atom.id, index).is_some() {
                return Err(atom.id);
            }
        }
        Ok(map)
    }

    /// Collects positions into an array indexed by atom id.
    ///
    /// The array has length `max_id + 1`; ids not present in the space keep the
    /// origin as a placeholder.
    pub fn positions_by_id(&self) -> Vec<Point3<f64>> {
        let len = self
            .atoms_iter()
            .map(|(_, atom)| atom.id + 1)
            .max()
            .unwrap_or(0);
        let mut positions = vec![Point3::origin(); len];
        for (_, atom) in self.atoms_iter() {
            positions[atom.id] = atom.position;
        }
        positions
    }
}

impl From<Vec<Molecule>> for SimulationSpace {
    fn from(molecules: Vec<Molecule>) -> Self {
        Self::new(molecules)
    }
}
