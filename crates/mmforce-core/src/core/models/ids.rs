/// Integer identity of an atom, unique within a simulation.
///
/// Bonded records, exclusion tables and per-atom parameter tables are all
/// indexed by this id, so ids are expected to be dense (`0..atom_count`).
pub type AtomId = usize;

/// Position of an atom inside a [`SimulationSpace`](super::space::SimulationSpace):
/// the molecule it belongs to and its slot within that molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AtomIndex {
    pub molecule: usize,
    pub atom: usize,
}

impl AtomIndex {
    pub fn new(molecule: usize, atom: usize) -> Self {
        Self { molecule, atom }
    }
}
