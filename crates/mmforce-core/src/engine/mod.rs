//! # Engine Module
//!
//! Evaluation settings, the engine error taxonomy, and whole-system tasks that
//! drive the stateless force-field primitives of [`crate::core`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Dielectric, cutoffs, exclusion horizon and neighbor
//!   search backend, loadable from TOML or assembled with a builder
//! - **Error Handling** ([`error`]) - Engine-level errors wrapping the core error types
//! - **Progress Monitoring** ([`progress`]) - Optional callback for workflow phase events
//! - **Tasks** ([`tasks`]) - Whole-system accumulation loops, parallel under the
//!   `parallel` feature with a deterministic reduction order

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
