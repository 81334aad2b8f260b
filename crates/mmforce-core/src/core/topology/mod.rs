//! # Topology Module
//!
//! Bond-graph analysis of a system's connectivity.
//!
//! ## Key Components
//!
//! - [`exclusions`] - Minimum hop distances between atoms within a bounded horizon,
//!   used to skip nonbonded pairs already covered by bonded terms
//!
//! ```ignore
//! use mmforce::core::topology::exclusions::{build_exclusion_table, DEFAULT_EXCLUSION_DEPTH};
//!
//! let table = build_exclusion_table(atom_count, &topology.bonds, DEFAULT_EXCLUSION_DEPTH);
//! assert!(table.is_excluded(a, b, 3));
//! ```

pub mod exclusions;
