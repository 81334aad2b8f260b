use super::potentials;
use super::term::NonbondedEnergy;
use crate::core::models::atom::Atom;
use crate::core::utils::geometry;
use nalgebra::Vector3;

/// Default relative dielectric constant (vacuum).
pub const DEFAULT_DIELECTRIC: f64 = 1.0;

// Pairwise primitives below never consult the exclusion table; skipping bonded
// pairs is the job of the accumulation loop that calls them.

#[inline]
pub fn lennard_jones(a: &Atom, b: &Atom, sigma: f64, epsilon: f64) -> f64 {
    potentials::lennard_jones_12_6(a.distance_to(b), sigma, epsilon)
}

#[inline]
pub fn coulomb(a: &Atom, b: &Atom, dielectric: f64) -> f64 {
    potentials::coulomb(a.distance_to(b), a.charge, b.charge, dielectric)
}

/// Resolves a radial derivative into the force acting on `a`.
#[inline]
fn radial_force<F>(a: &Atom, b: &Atom, derivative: F) -> Vector3<f64>
where
    F: Fn(f64) -> f64,
{
    match geometry::separation(&a.position, &b.position) {
        Some((unit, r)) => -derivative(r) * unit,
        _ => Vector3::zeros(),
    }
}

/// Lennard-Jones force acting on `a` due to `b`.
///
/// Zero when the atoms coincide, even though [`lennard_jones`] reports a large
/// finite energy there.
pub fn lj_force(a: &Atom, b: &Atom, sigma: f64, epsilon: f64) -> Vector3<f64> {
    radial_force(a, b, |r| {
        potentials::lennard_jones_12_6_derivative(r, sigma, epsilon)
    })
}

/// Coulomb force acting on `a` due to `b`; zero when the atoms coincide.
pub fn coulomb_force(a: &Atom, b: &Atom, dielectric: f64) -> Vector3<f64> {
    radial_force(a, b, |r| {
        potentials::coulomb_derivative(r, a.charge, b.charge, dielectric)
    })
}

/// Lennard-Jones and Coulomb energies of one atom pair, with their total.
pub fn nonbonded_energy(
    a: &Atom,
    b: &Atom,
    sigma: f64,
    epsilon: f64,
    dielectric: f64,
) -> NonbondedEnergy {
    NonbondedEnergy::new(
        lennard_jones(a, b, sigma, epsilon),
        coulomb(a, b, dielectric),
    )
}
