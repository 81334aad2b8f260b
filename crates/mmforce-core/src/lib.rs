//! # mmforce
//!
//! Classical molecular-mechanics force-field evaluation: bonded terms (bond stretch,
//! angle bend, dihedral torsion, improper restraint) and nonbonded terms (Lennard-Jones,
//! Coulomb) with paired energy and force formulas over 3D atomic coordinates.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Atom`, `SimulationSpace`,
//!   `Topology`), geometry primitives, the potentials and per-term engines, exclusion
//!   tables and neighbor search.
//!
//! - **[`engine`]: The Logic Core.** Evaluation configuration, the error taxonomy, and
//!   whole-system tasks such as nonbonded force accumulation over neighbor lists.
//!
//! - **[`workflows`]: The Public API.** One-call evaluation of a complete system snapshot.
//!
//! The evaluated system is finite and non-periodic. With the default `parallel` feature,
//! per-term work runs on rayon while reductions keep a fixed order, so results are
//! reproducible bit for bit.

pub mod core;
pub mod engine;
pub mod workflows;
