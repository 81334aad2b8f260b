//! # Core Module
//!
//! Stateless building blocks of the force field: data models, geometry, potentials,
//! bond-graph analysis and neighbor search.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, molecules, the simulation space and
//!   bonded topology records
//! - **Utilities** ([`utils`]) - Geometry primitives and the element property table
//! - **Energy Calculations** ([`forcefield`]) - Bonded and nonbonded energies and forces
//! - **Connectivity** ([`topology`]) - Bond-graph exclusion tables
//! - **Neighbor Search** ([`neighbors`]) - Cutoff-based neighbor lists
//!
//! Nothing in this layer holds state between calls. Inputs are borrowed, and every
//! result (energies, forces, neighbor lists, exclusion tables) is a new value.

pub mod forcefield;
pub mod models;
pub mod neighbors;
pub mod topology;
pub mod utils;
