//! # Utilities
//!
//! Geometry primitives on Cartesian positions, the per-element property table,
//! and the order-preserving parallel map used by the evaluation loops.

pub mod elements;
pub mod geometry;
pub(crate) mod parallel;
