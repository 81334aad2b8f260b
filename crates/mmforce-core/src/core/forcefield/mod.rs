//! # Force Field Module
//!
//! Classical molecular-mechanics energy and force evaluation for bonded and
//! nonbonded interactions.
//!
//! ## Overview
//!
//! - **Bonded terms**: harmonic bond stretch and angle bend, periodic dihedral
//!   torsion, harmonic improper restraint
//! - **Nonbonded terms**: 12-6 Lennard-Jones and Coulomb electrostatics with a
//!   constant dielectric
//!
//! Every potential comes as an energy formula paired with its first derivative.
//! Near-coincident atoms never produce non-finite values: nonbonded energies fall
//! back to a large finite sentinel and forces to zero.
//!
//! ## Key Components
//!
//! - [`potentials`] - Scalar energy and derivative formulas
//! - [`bonded`] - Bonded energy aggregation and Cartesian bonded forces
//! - [`nonbonded`] - Pairwise Lennard-Jones and Coulomb energies and forces
//! - [`term`] - Energy component records and their aggregation
//! - [`params`] - Per-element Lennard-Jones parameters and combining rules
//!
//! ## Usage
//!
//! ```ignore
//! use mmforce::core::forcefield::bonded::total_bonded_energy;
//!
//! let energy = total_bonded_energy(&topology.bonds, &topology.angles, &topology.dihedrals, &positions)?
//!     .with_impropers(&topology.impropers);
//! ```

pub mod bonded;
pub mod nonbonded;
pub mod params;
pub mod potentials;
pub mod term;
