use crate::core::models::ids::AtomId;
use crate::core::models::space::SimulationSpace;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Lennard-Jones parameters of one atom.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct LjParams {
    pub sigma: f64,
    pub epsilon: f64,
}

impl LjParams {
    pub fn new(sigma: f64, epsilon: f64) -> Self {
        Self { sigma, epsilon }
    }

    /// Lorentz–Berthelot pair parameters: arithmetic mean sigma, geometric mean epsilon.
    #[inline]
    pub fn combine(&self, other: &LjParams) -> LjParams {
        LjParams {
            sigma: (self.sigma + other.sigma) / 2.0,
            epsilon: (self.epsilon * other.epsilon).sqrt(),
        }
    }
}

/// Lennard-Jones parameters keyed by element symbol.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct LjParamTable {
    #[serde(default)]
    pub lj: HashMap<String, LjParams>,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("No Lennard-Jones parameters for element '{element}' of atom {atom_id}")]
    MissingElement { element: String, atom_id: AtomId },
}

impl LjParamTable {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn insert(&mut self, element: &str, params: LjParams) {
        self.lj.insert(element.to_string(), params);
    }

    pub fn get(&self, element: &str) -> Option<&LjParams> {
        self.lj.get(element)
    }

    /// Expands the table into a per-atom array indexed by atom id.
    ///
    /// Ids absent from the space get `None`.
    pub fn per_atom(&self, space: &SimulationSpace) -> Result<Vec<Option<LjParams>>, ParamLoadError> {
        let len = space
            .atoms_iter()
            .map(|(_, atom)| atom.id + 1)
            .max()
            .unwrap_or(0);
        let mut params = vec![None; len];
        for (_, atom) in space.atoms_iter() {
            let p = self
                .get(&atom.element)
                .ok_or_else(|| ParamLoadError::MissingElement {
                    element: atom.element.clone(),
                    atom_id: atom.id,
                })?;
            params[atom.id] = Some(*p);
        }
        Ok(params)
    }
}
