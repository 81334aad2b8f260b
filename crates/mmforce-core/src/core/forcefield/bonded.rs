use super::potentials;
use super::term::BondedEnergy;
use crate::core::models::ids::AtomId;
use crate::core::models::topology::{Angle, Bond, Dihedral, Improper};
use crate::core::utils::geometry::{self, DEGENERACY_TOLERANCE, GeometryError};
use crate::core::utils::parallel::map_ordered;
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument, trace};

/// Below this `sin θ` an angle is treated as linear and its gradient as undefined.
const LINEAR_ANGLE_TOLERANCE: f64 = 1e-12;

type Contribution<const N: usize> = [(AtomId, Vector3<f64>); N];

#[inline]
pub fn bond_term_energy(bond: &Bond, positions: &[Point3<f64>]) -> f64 {
    let r = geometry::bond_length(&positions[bond.atom1_id], &positions[bond.atom2_id]);
    potentials::bond_energy(r, bond.equilibrium_length, bond.force_constant)
}

#[inline]
pub fn angle_term_energy(angle: &Angle, positions: &[Point3<f64>]) -> Result<f64, GeometryError> {
    let theta = geometry::angle(
        &positions[angle.atom1_id],
        &positions[angle.atom2_id],
        &positions[angle.atom3_id],
    )?;
    Ok(potentials::angle_energy(
        theta,
        angle.equilibrium_angle,
        angle.force_constant,
    ))
}

#[inline]
pub fn dihedral_term_energy(dihedral: &Dihedral, positions: &[Point3<f64>]) -> f64 {
    let phi = geometry::dihedral(
        &positions[dihedral.atom1_id],
        &positions[dihedral.atom2_id],
        &positions[dihedral.atom3_id],
        &positions[dihedral.atom4_id],
    );
    potentials::dihedral_energy(
        phi,
        dihedral.periodicity,
        dihedral.barrier_height,
        dihedral.phase_offset,
    )
}

/// Sums the bond, angle and dihedral energies of a topology at the given positions.
///
/// `positions` is indexed by atom id. The improper component is always zero here;
/// fold impropers in with [`BondedEnergy::with_impropers`].
///
/// Per-term energies are computed (in parallel with the `parallel` feature) and then
/// summed in input order, so the result does not depend on thread scheduling.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateAngle`] for the first angle, in input order,
/// whose atoms coincide with its vertex.
///
/// # Panics
///
/// Panics if any record references an id outside `positions`.
#[instrument(skip_all, name = "total_bonded_energy")]
pub fn total_bonded_energy(
    bonds: &[Bond],
    angles: &[Angle],
    dihedrals: &[Dihedral],
    positions: &[Point3<f64>],
) -> Result<BondedEnergy, GeometryError> {
    debug!(
        bonds = bonds.len(),
        angles = angles.len(),
        dihedrals = dihedrals.len(),
        "Evaluating bonded energy."
    );

    let bond: f64 = map_ordered(bonds, |b| bond_term_energy(b, positions))
        .iter()
        .sum();

    let angle: f64 = map_ordered(angles, |a| angle_term_energy(a, positions))
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?
        .iter()
        .sum();

    let dihedral: f64 = map_ordered(dihedrals, |d| dihedral_term_energy(d, positions))
        .iter()
        .sum();

    Ok(BondedEnergy::new(bond, angle, dihedral, 0.0))
}

impl BondedEnergy {
    /// Adds the harmonic energy of every improper and refreshes the total.
    pub fn with_impropers(self, impropers: &[Improper]) -> Self {
        let improper: f64 = impropers
            .iter()
            .map(|imp| potentials::improper_energy(imp.deviation, imp.force_constant))
            .sum();
        self + BondedEnergy::new(0.0, 0.0, 0.0, improper)
    }
}

fn bond_forces(bond: &Bond, positions: &[Point3<f64>]) -> Contribution<2> {
    let (i, j) = (bond.atom1_id, bond.atom2_id);
    match geometry::separation(&positions[i], &positions[j]) {
        Some((unit, r)) => {
            let f_i = -potentials::bond_force(r, bond.equilibrium_length, bond.force_constant) * unit;
            [(i, f_i), (j, -f_i)]
        }
        None => {
            trace!(atom1 = i, atom2 = j, "Coincident bonded atoms; bond force set to zero.");
            [(i, Vector3::zeros()), (j, Vector3::zeros())]
        }
    }
}

fn angle_forces(angle: &Angle, positions: &[Point3<f64>]) -> Result<Contribution<3>, GeometryError> {
    let (i, j, k) = (angle.atom1_id, angle.atom2_id, angle.atom3_id);
    let theta = geometry::angle(&positions[i], &positions[j], &positions[k])?;

    let v1 = positions[i] - positions[j];
    let v2 = positions[k] - positions[j];
    let (r1, r2) = (v1.norm(), v2.norm());
    let (u1, u2) = (v1 / r1, v2 / r2);

    let cos_theta = u1.dot(&u2).clamp(-1.0, 1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    if sin_theta < LINEAR_ANGLE_TOLERANCE {
        trace!(vertex = j, "Linear angle; angle force set to zero.");
        return Ok([(i, Vector3::zeros()), (j, Vector3::zeros()), (k, Vector3::zeros())]);
    }

    let du_dtheta = potentials::angle_torque(theta, angle.equilibrium_angle, angle.force_constant);

    // dθ/dp_i and dθ/dp_k; the vertex takes the balancing remainder.
    let grad_i = -(u2 - u1 * cos_theta) / (r1 * sin_theta);
    let grad_k = -(u1 - u2 * cos_theta) / (r2 * sin_theta);

    let f_i = -du_dtheta * grad_i;
    let f_k = -du_dtheta * grad_k;
    Ok([(i, f_i), (j, -(f_i + f_k)), (k, f_k)])
}

fn dihedral_forces(dihedral: &Dihedral, positions: &[Point3<f64>]) -> Contribution<4> {
    let ids = [
        dihedral.atom1_id,
        dihedral.atom2_id,
        dihedral.atom3_id,
        dihedral.atom4_id,
    ];
    let [p1, p2, p3, p4] = ids.map(|id| positions[id]);

    let b1 = p2 - p1;
    let b2 = p3 - p2;
    let b3 = p4 - p3;
    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);

    if n1.norm() < DEGENERACY_TOLERANCE || n2.norm() < DEGENERACY_TOLERANCE {
        trace!(?ids, "Collinear dihedral; torsion force set to zero.");
        return ids.map(|id| (id, Vector3::zeros()));
    }

    let phi = geometry::dihedral(&p1, &p2, &p3, &p4);
    let du_dphi = potentials::dihedral_torque(
        phi,
        dihedral.periodicity,
        dihedral.barrier_height,
        dihedral.phase_offset,
    );

    let b2_len = b2.norm();
    let b2_sq = b2_len * b2_len;
    let g1 = -n1 * (b2_len / n1.norm_squared());
    let g4 = n2 * (b2_len / n2.norm_squared());
    let s1 = b1.dot(&b2) / b2_sq;
    let s3 = b3.dot(&b2) / b2_sq;
    let g2 = -g1 * (1.0 + s1) + g4 * s3;
    let g3 = -g4 * (1.0 + s3) + g1 * s1;

    let grads = [g1, g2, g3, g4];
    std::array::from_fn(|n| (ids[n], -du_dphi * grads[n]))
}

/// Cartesian forces of every bond, angle and dihedral, one vector per position.
///
/// Each contribution is the negative gradient of the corresponding energy term, so
/// the forces of any single term sum to zero. Terms whose gradient is undefined
/// (coincident bonded atoms, linear angles, collinear dihedrals) contribute nothing.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateAngle`] for the first angle whose atoms
/// coincide with its vertex, matching [`total_bonded_energy`].
///
/// # Panics
///
/// Panics if any record references an id outside `positions`.
#[instrument(skip_all, name = "bonded_forces")]
pub fn bonded_forces(
    bonds: &[Bond],
    angles: &[Angle],
    dihedrals: &[Dihedral],
    positions: &[Point3<f64>],
) -> Result<Vec<Vector3<f64>>, GeometryError> {
    let bond_terms = map_ordered(bonds, |b| bond_forces(b, positions));
    let angle_terms = map_ordered(angles, |a| angle_forces(a, positions))
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;
    let dihedral_terms = map_ordered(dihedrals, |d| dihedral_forces(d, positions));

    let mut forces = vec![Vector3::zeros(); positions.len()];
    let contributions = bond_terms
        .iter()
        .flatten()
        .chain(angle_terms.iter().flatten())
        .chain(dihedral_terms.iter().flatten());
    for (id, force) in contributions {
        forces[*id] += force;
    }
    Ok(forces)
}
