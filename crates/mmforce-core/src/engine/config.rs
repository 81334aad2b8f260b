use crate::core::forcefield::nonbonded::DEFAULT_DIELECTRIC;
use crate::core::neighbors::list::DEFAULT_NEIGHBOR_CUTOFF;
use crate::core::topology::exclusions::DEFAULT_EXCLUSION_DEPTH;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
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
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Which neighbor search backs the nonbonded pair loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeighborSearchKind {
    #[default]
    BruteForce,
    KdTree,
}

/// Settings for one evaluation of a system snapshot.
///
/// Every field has a default, so a TOML file only needs to name what it changes:
///
/// ```toml
/// dielectric = 4.0
/// coulomb-cutoff = 12.0
/// vdw-cutoff = 8.0
/// neighbor-search = "kd-tree"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Relative dielectric constant of the medium.
    pub dielectric: f64,
    /// Neighbor radius for Coulomb pairs.
    pub coulomb_cutoff: f64,
    /// Neighbor radius for Lennard-Jones pairs.
    pub vdw_cutoff: f64,
    /// Bond-graph depth of the exclusion table.
    pub exclusion_depth: u8,
    /// Pairs within this many bonds are skipped by the nonbonded loop.
    pub exclusion_horizon: u8,
    pub neighbor_search: NeighborSearchKind,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            dielectric: DEFAULT_DIELECTRIC,
            coulomb_cutoff: DEFAULT_NEIGHBOR_CUTOFF,
            vdw_cutoff: DEFAULT_NEIGHBOR_CUTOFF,
            exclusion_depth: DEFAULT_EXCLUSION_DEPTH,
            exclusion_horizon: DEFAULT_EXCLUSION_DEPTH,
            neighbor_search: NeighborSearchKind::default(),
        }
    }
}

impl EvaluationConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive finite number, got {value}"),
                })
            }
        };
        positive("dielectric", self.dielectric)?;
        positive("coulomb-cutoff", self.coulomb_cutoff)?;
        positive("vdw-cutoff", self.vdw_cutoff)?;

        if self.exclusion_horizon > self.exclusion_depth {
            return Err(ConfigError::Invalid {
                field: "exclusion-horizon",
                reason: format!(
                    "{} exceeds the exclusion table depth {}",
                    self.exclusion_horizon, self.exclusion_depth
                ),
            });
        }
        Ok(())
    }

    /// Radius of the single neighbor search that feeds both pair types.
    pub fn search_cutoff(&self) -> f64 {
        self.coulomb_cutoff.max(self.vdw_cutoff)
    }
}

#[derive(Default)]
pub struct EvaluationConfigBuilder {
    dielectric: Option<f64>,
    coulomb_cutoff: Option<f64>,
    vdw_cutoff: Option<f64>,
    exclusion_depth: Option<u8>,
    exclusion_horizon: Option<u8>,
    neighbor_search: Option<NeighborSearchKind>,
}

impl EvaluationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dielectric(mut self, dielectric: f64) -> Self {
        self.dielectric = Some(dielectric);
        self
    }
    pub fn coulomb_cutoff(mut self, cutoff: f64) -> Self {
        self.coulomb_cutoff = Some(cutoff);
        self
    }
    pub fn vdw_cutoff(mut self, cutoff: f64) -> Self {
        self.vdw_cutoff = Some(cutoff);
        self
    }
    pub fn exclusion_depth(mut self, depth: u8) -> Self {
        self.exclusion_depth = Some(depth);
        self
    }
    pub fn exclusion_horizon(mut self, horizon: u8) -> Self {
        self.exclusion_horizon = Some(horizon);
        self
    }
    pub fn neighbor_search(mut self, kind: NeighborSearchKind) -> Self {
        self.neighbor_search = Some(kind);
        self
    }

    /// Fills unset fields with their defaults and validates the result.
    pub fn build(self) -> Result<EvaluationConfig, ConfigError> {
        let defaults = EvaluationConfig::default();
        let config = EvaluationConfig {
            dielectric: self.dielectric.unwrap_or(defaults.dielectric),
            coulomb_cutoff: self.coulomb_cutoff.unwrap_or(defaults.coulomb_cutoff),
            vdw_cutoff: self.vdw_cutoff.unwrap_or(defaults.vdw_cutoff),
            exclusion_depth: self.exclusion_depth.unwrap_or(defaults.exclusion_depth),
            exclusion_horizon: self
                .exclusion_horizon
                .unwrap_or(defaults.exclusion_horizon),
            neighbor_search: self.neighbor_search.unwrap_or(defaults.neighbor_search),
        };
        config.validate()?;
        Ok(config)
    }
}
