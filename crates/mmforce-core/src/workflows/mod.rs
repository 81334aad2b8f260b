//! # Workflows Module
//!
//! High-level entry points that tie the [`engine`](crate::engine) and
//! [`core`](crate::core) layers together.
//!
//! - **Evaluation Workflow** ([`evaluate`]) - Validates a system snapshot, then computes its
//!   bonded and nonbonded energies and the net force on every atom in one call.

pub mod evaluate;
