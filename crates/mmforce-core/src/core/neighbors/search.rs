use super::list::NeighborList;
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomIndex;
use crate::core::models::space::SimulationSpace;
use kiddo::{KdTree, SquaredEuclidean};
use tracing::debug;

/// Candidate radius padding for tree queries; candidates are re-checked exactly.
const KD_QUERY_PADDING: f64 = 1e-6;

/// A strategy for finding the atoms of one space within a cutoff of a query atom.
///
/// Every implementation honors the same contract: the query atom is skipped by id,
/// the boundary is inclusive (`distance <= cutoff`), and neighbors are reported in
/// space order (molecule by molecule, atom by atom).
pub trait NeighborSearch<'a>: Sync {
    fn space(&self) -> &'a SimulationSpace;

    fn neighbors(&self, atom: &Atom, cutoff: f64) -> NeighborList<'a>;
}

/// Linear scan over every atom of the space.
#[derive(Debug, Clone, Copy)]
pub struct BruteForceSearch<'a> {
    space: &'a SimulationSpace,
}

impl<'a> BruteForceSearch<'a> {
    pub fn new(space: &'a SimulationSpace) -> Self {
        Self { space }
    }
}

impl<'a> NeighborSearch<'a> for BruteForceSearch<'a> {
    fn space(&self) -> &'a SimulationSpace {
        self.space
    }

    fn neighbors(&self, atom: &Atom, cutoff: f64) -> NeighborList<'a> {
        let indices = self
            .space
            .atoms_iter()
            .filter(|(_, other)| other.id != atom.id && atom.distance_to(other) <= cutoff)
            .map(|(index, _)| index)
            .collect();
        NeighborList::new(self.space, indices)
    }
}

/// k-d tree over the positions of a space, built once and queried many times.
pub struct KdTreeSearch<'a> {
    space: &'a SimulationSpace,
    tree: KdTree<f64, 3>,
    indices: Vec<AtomIndex>,
}

impl<'a> KdTreeSearch<'a> {
    pub fn new(space: &'a SimulationSpace) -> Self {
        let (indices, positions): (Vec<AtomIndex>, Vec<[f64; 3]>) = space
            .atoms_iter()
            .map(|(index, atom)| {
                (
                    index,
                    [atom.position.x, atom.position.y, atom.position.z],
                )
            })
            .unzip();

        let tree: KdTree<f64, 3> = (&positions).into();
        debug!(atoms = indices.len(), "Built k-d tree for neighbor search.");

        Self {
            space,
            tree,
            indices,
        }
    }
}

impl<'a> NeighborSearch<'a> for KdTreeSearch<'a> {
    fn space(&self) -> &'a SimulationSpace {
        self.space
    }

    fn neighbors(&self, atom: &Atom, cutoff: f64) -> NeighborList<'a> {
        if self.indices.is_empty() || cutoff.is_nan() || cutoff < 0.0 {
            return NeighborList::new(self.space, Vec::new());
        }

        let query = [atom.position.x, atom.position.y, atom.position.z];
        let padded = cutoff + KD_QUERY_PADDING;

        let mut indices: Vec<AtomIndex> = self
            .tree
            .within_unsorted::<SquaredEuclidean>(&query, padded * padded)
            .into_iter()
            .filter_map(|candidate| self.indices.get(candidate.item as usize).copied())
            .filter(|&index| {
                self.space
                    .atom(index)
                    .is_some_and(|other| other.id != atom.id && atom.distance_to(other) <= cutoff)
            })
            .collect();
        indices.sort_unstable();

        NeighborList::new(self.space, indices)
    }
}
