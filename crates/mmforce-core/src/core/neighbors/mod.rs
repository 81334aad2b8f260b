//! # Neighbor Module
//!
//! Distance-cutoff neighbor lists over a [`SimulationSpace`](crate::core::models::space::SimulationSpace).
//!
//! A [`NeighborList`](list::NeighborList) holds indices into the space, never copies
//! of atoms. Lists come from a [`NeighborSearch`](search::NeighborSearch): the
//! brute-force scan is the reference, and the k-d tree search answers the same
//! queries (inclusive cutoff, query atom skipped by id) in sub-linear time once built.
//!
//! Range-filtered sublists for electrostatics and van der Waals interactions are
//! derived from an existing list without another pass over the space.

pub mod list;
pub mod search;
