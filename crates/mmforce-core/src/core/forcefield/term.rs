use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Bonded energy components and their grand total.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BondedEnergy {
    pub bond: f64,
    pub angle: f64,
    pub dihedral: f64,
    pub improper: f64,
    pub total: f64,
}

impl BondedEnergy {
    pub fn new(bond: f64, angle: f64, dihedral: f64, improper: f64) -> Self {
        Self {
            bond,
            angle,
            dihedral,
            improper,
            total: bond + angle + dihedral + improper,
        }
    }
}

impl Add for BondedEnergy {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.bond + rhs.bond,
            self.angle + rhs.angle,
            self.dihedral + rhs.dihedral,
            self.improper + rhs.improper,
        )
    }
}

/// Nonbonded energy components for one pair or a whole system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NonbondedEnergy {
    pub lennard_jones: f64,
    pub coulomb: f64,
    pub total: f64,
}

impl NonbondedEnergy {
    pub fn new(lennard_jones: f64, coulomb: f64) -> Self {
        Self {
            lennard_jones,
            coulomb,
            total: lennard_jones + coulomb,
        }
    }
}

impl Add for NonbondedEnergy {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.lennard_jones + rhs.lennard_jones,
            self.coulomb + rhs.coulomb,
        )
    }
}

impl AddAssign for NonbondedEnergy {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NonbondedEnergy {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, term| acc + term)
    }
}
