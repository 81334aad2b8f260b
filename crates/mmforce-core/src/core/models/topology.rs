use super::ids::AtomId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical bond order, as written in force-field connectivity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Effective number of shared electron pairs; aromatic bonds count as 1.5.
    pub fn multiplicity(self) -> f64 {
        match self {
            Self::Single => 1.0,
            Self::Double => 2.0,
            Self::Triple => 3.0,
            Self::Aromatic => 1.5,
        }
    }

    /// Short token used in connectivity records.
    pub fn token(self) -> &'static str {
        match self {
            Self::Single => "1",
            Self::Double => "2",
            Self::Triple => "3",
            Self::Aromatic => "ar",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized bond order token '{0}'")]
pub struct ParseBondOrderError(pub String);

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "single" => Ok(Self::Single),
            "2" | "double" => Ok(Self::Double),
            "3" | "triple" => Ok(Self::Triple),
            "ar" | "1.5" | "aromatic" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError(s.to_string())),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Harmonic bond stretch between two atoms; also an edge of the bond graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub order: BondOrder,
    pub equilibrium_length: f64,
    pub force_constant: f64,
    pub is_rotatable: bool,
}

impl Bond {
    pub fn new(
        atom1_id: AtomId,
        atom2_id: AtomId,
        equilibrium_length: f64,
        force_constant: f64,
    ) -> Self {
        Self {
            atom1_id,
            atom2_id,
            order: BondOrder::default(),
            equilibrium_length,
            force_constant,
            is_rotatable: false,
        }
    }

    pub fn with_order(mut self, order: BondOrder) -> Self {
        self.order = order;
        self
    }

    pub fn rotatable(mut self, is_rotatable: bool) -> Self {
        self.is_rotatable = is_rotatable;
        self
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }
}

/// Harmonic angle bend; `atom2_id` is the vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub atom3_id: AtomId,
    pub equilibrium_angle: f64, // radians
    pub force_constant: f64,
}

impl Angle {
    pub fn new(
        atom_ids: [AtomId; 3],
        equilibrium_angle: f64,
        force_constant: f64,
    ) -> Self {
        Self {
            atom1_id: atom_ids[0],
            atom2_id: atom_ids[1],
            atom3_id: atom_ids[2],
            equilibrium_angle,
            force_constant,
        }
    }
}

/// Periodic torsion over four sequentially bonded atoms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dihedral {
    pub atom1_id: AtomId,
    pub atom2_id: AtomId,
    pub atom3_id: AtomId,
    pub atom4_id: AtomId,
    pub periodicity: f64,
    pub barrier_height: f64,
    pub phase_offset: f64, // radians
}

impl Dihedral {
    pub fn new(
        atom_ids: [AtomId; 4],
        periodicity: f64,
        barrier_height: f64,
        phase_offset: f64,
    ) -> Self {
        Self {
            atom1_id: atom_ids[0],
            atom2_id: atom_ids[1],
            atom3_id: atom_ids[2],
            atom4_id: atom_ids[3],
            periodicity,
            barrier_height,
            phase_offset,
        }
    }
}

/// Harmonic restraint on a precomputed out-of-plane deviation at one atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Improper {
    pub atom_id: AtomId,
    pub deviation: f64,
    pub force_constant: f64,
}

impl Improper {
    pub fn new(atom_id: AtomId, deviation: f64, force_constant: f64) -> Self {
        Self {
            atom_id,
            deviation,
            force_constant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyRecord {
    Bond(usize),
    Angle(usize),
    Dihedral(usize),
    Improper(usize),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("{record:?} references atom {atom_id}, but the system only has {atom_count} atoms")]
    AtomOutOfRange {
        record: TopologyRecord,
        atom_id: AtomId,
        atom_count: usize,
    },
}

/// All bonded records of one system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    pub bonds: Vec<Bond>,
    pub angles: Vec<Angle>,
    pub dihedrals: Vec<Dihedral>,
    pub impropers: Vec<Improper>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that every record references ids within `0..atom_count`.
    ///
    /// The bonded engine indexes position arrays directly, so callers should run
    /// this once per topology before evaluating.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::AtomOutOfRange`] for the first offending record.
    pub fn validate(&self, atom_count: usize) -> Result<(), TopologyError> {
        let check = |record: TopologyRecord, ids: &[AtomId]| {
            match ids.iter().find(|&&id| id >= atom_count) {
                Some(&atom_id) => Err(TopologyError::AtomOutOfRange {
                    record,
                    atom_id,
                    atom_count,
                }),
                None => Ok(()),
            }
        };

        for (i, b) in self.bonds.iter().enumerate() {
            check(TopologyRecord::Bond(i), &[b.atom1_id, b.atom2_id])?;
        }
        for (i, a) in self.angles.iter().enumerate() {
            check(
                TopologyRecord::Angle(i),
                &[a.atom1_id, a.atom2_id, a.atom3_id],
            )?;
        }
        for (i, d) in self.dihedrals.iter().enumerate() {
            check(
                TopologyRecord::Dihedral(i),
                &[d.atom1_id, d.atom2_id, d.atom3_id, d.atom4_id],
            )?;
        }
        for (i, imp) in self.impropers.iter().enumerate() {
            check(TopologyRecord::Improper(i), &[imp.atom_id])?;
        }
        Ok(())
    }
}
