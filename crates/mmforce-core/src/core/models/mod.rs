//! # Core Models Module
//!
//! This module contains the value types the force-field core evaluates: atoms,
//! molecules, the simulation space that owns them, and the bonded topology records.
//!
//! ## Overview
//!
//! All models are plain, caller-constructed data. The core never mutates them; it
//! reads positions and parameters and returns energies and forces as separate values.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom with identity, element, position, velocity, mass and charge
//! - [`space`] - Molecules and the [`space::SimulationSpace`] arena that holds them
//! - [`topology`] - Bonds, angles, dihedrals and impropers, plus topology validation
//! - [`ids`] - Atom ids and arena indices
//!
//! ## Usage
//!
//! ```ignore
//! use mmforce::core::models::{atom::Atom, space::{Molecule, SimulationSpace}};
//!
//! let atoms = vec![
//!     Atom::new(0, "O", Point3::new(0.0, 0.0, 0.0)).with_charge(-0.8),
//!     Atom::new(1, "H", Point3::new(0.96, 0.0, 0.0)).with_charge(0.4),
//! ];
//! let space = SimulationSpace::new(vec![Molecule::new(atoms)]);
//! ```

pub mod atom;
pub mod ids;
pub mod space;
pub mod topology;
