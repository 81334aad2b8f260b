//! Whole-system computations built from the per-term force-field primitives.
//!
//! Each submodule exposes a `run` entry point that evaluates one kind of
//! interaction for an entire [`SimulationSpace`](crate::core::models::space::SimulationSpace).

pub mod nonbonded_forces;
