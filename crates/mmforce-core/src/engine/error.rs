use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::models::ids::AtomId;
use crate::core::models::topology::TopologyError;
use crate::core::utils::elements::ElementError;
use crate::core::utils::geometry::GeometryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid topology: {source}")]
    Topology {
        #[from]
        source: TopologyError,
    },

    #[error("Geometry error: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("Element lookup failed: {source}")]
    Element {
        #[from]
        source: ElementError,
    },

    #[error("Parameter loading failed: {source}")]
    Parameters {
        #[from]
        source: ParamLoadError,
    },

    #[error("No Lennard-Jones parameters for atom {atom_id}")]
    MissingParameters { atom_id: AtomId },

    #[error("Atom id {atom_id} appears more than once in the system")]
    DuplicateAtomId { atom_id: AtomId },

    #[error("Atom ids must cover 0..{atom_count} exactly, but the largest id is {max_id}")]
    SparseAtomIds { max_id: AtomId, atom_count: usize },
}
