pub const COULOMB_CONSTANT: f64 = 332.06; // In kcal·Å/(mol·e²)

/// Pair distances below this are treated as coincident atoms.
pub const SINGULAR_DISTANCE: f64 = 1e-10;
/// Finite energy reported for coincident atoms instead of evaluating a singular formula.
pub const SINGULAR_ENERGY: f64 = 1e10;

#[inline]
pub fn bond_energy(length: f64, equilibrium_length: f64, force_constant: f64) -> f64 {
    let delta = length - equilibrium_length;
    0.5 * force_constant * delta * delta
}

/// `dU/dr` of [`bond_energy`].
#[inline]
pub fn bond_force(length: f64, equilibrium_length: f64, force_constant: f64) -> f64 {
    force_constant * (length - equilibrium_length)
}

#[inline]
pub fn angle_energy(angle: f64, equilibrium_angle: f64, force_constant: f64) -> f64 {
    let delta = angle - equilibrium_angle;
    0.5 * force_constant * delta * delta
}

/// `dU/dθ` of [`angle_energy`].
#[inline]
pub fn angle_torque(angle: f64, equilibrium_angle: f64, force_constant: f64) -> f64 {
    force_constant * (angle - equilibrium_angle)
}

#[inline]
pub fn dihedral_energy(
    dihedral: f64,
    periodicity: f64,
    barrier_height: f64,
    phase_offset: f64,
) -> f64 {
    barrier_height * (1.0 + (periodicity * dihedral - phase_offset).cos())
}

/// `dU/dφ` of [`dihedral_energy`].
#[inline]
pub fn dihedral_torque(
    dihedral: f64,
    periodicity: f64,
    barrier_height: f64,
    phase_offset: f64,
) -> f64 {
    -periodicity * barrier_height * (periodicity * dihedral - phase_offset).sin()
}

#[inline]
pub fn improper_energy(deviation: f64, force_constant: f64) -> f64 {
    0.5 * force_constant * deviation * deviation
}

#[inline]
pub fn lennard_jones_12_6(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    if dist < SINGULAR_DISTANCE {
        return SINGULAR_ENERGY;
    }
    let rho6 = (sigma / dist).powi(6);
    let rho12 = rho6 * rho6;
    4.0 * epsilon * (rho12 - rho6)
}

/// `dU/dr` of [`lennard_jones_12_6`]; zero for coincident atoms.
#[inline]
pub fn lennard_jones_12_6_derivative(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    if dist < SINGULAR_DISTANCE {
        return 0.0;
    }
    let sigma6 = sigma.powi(6);
    let sigma12 = sigma6 * sigma6;
    let r6 = dist.powi(6);
    let r7 = r6 * dist;
    let r13 = r7 * r6;
    4.0 * epsilon * (-12.0 * sigma12 / r13 + 6.0 * sigma6 / r7)
}

#[inline]
pub fn coulomb(dist: f64, q1: f64, q2: f64, dielectric: f64) -> f64 {
    if dist < SINGULAR_DISTANCE {
        return SINGULAR_ENERGY;
    }
    COULOMB_CONSTANT * q1 * q2 / (dielectric * dist)
}

/// `dU/dr` of [`coulomb`]; zero for coincident atoms.
#[inline]
pub fn coulomb_derivative(dist: f64, q1: f64, q2: f64, dielectric: f64) -> f64 {
    if dist < SINGULAR_DISTANCE {
        return 0.0;
    }
    -COULOMB_CONSTANT * q1 * q2 / (dielectric * dist * dist)
}
