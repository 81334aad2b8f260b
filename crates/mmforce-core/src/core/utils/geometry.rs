use nalgebra::{Point3, Vector3};
use thiserror::Error;

/// Vectors and normals shorter than this are treated as zero-length.
pub const DEGENERACY_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error(
        "Degenerate angle geometry: vertex vectors have lengths {first:.3e} and {second:.3e} (atoms coincide)"
    )]
    DegenerateAngle { first: f64, second: f64 },
}

/// Euclidean distance between two points.
#[inline]
pub fn bond_length(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    (p1 - p2).norm()
}

/// Bend angle at the vertex `p2`, in radians within `[0, π]`.
///
/// The dot product of the two normalized rays is clamped to `[-1, 1]` before
/// taking the arc-cosine, so rounding cannot push it outside the domain of `acos`.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateAngle`] when `p1` or `p3` coincides with the
/// vertex, since no angle exists in that case.
pub fn angle(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> Result<f64, GeometryError> {
    let v1 = p1 - p2;
    let v2 = p3 - p2;
    let (len1, len2) = (v1.norm(), v2.norm());

    if len1 < DEGENERACY_TOLERANCE || len2 < DEGENERACY_TOLERANCE {
        return Err(GeometryError::DegenerateAngle {
            first: len1,
            second: len2,
        });
    }

    let cos_theta = (v1 / len1).dot(&(v2 / len2)).clamp(-1.0, 1.0);
    Ok(cos_theta.acos())
}

/// Signed torsion angle between the planes `(p1, p2, p3)` and `(p2, p3, p4)`,
/// in radians within `(−π, π]`.
///
/// Uses the chained bond vectors `b1 = p2 − p1`, `b2 = p3 − p2`, `b3 = p4 − p3`
/// (cis = 0, trans = π). The sign is that of `(n1 × n2) · b2`.
///
/// When three consecutive atoms are collinear one of the plane normals vanishes
/// and the torsion is undefined; this returns exactly `0.0` instead of an error.
pub fn dihedral(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>, p4: &Point3<f64>) -> f64 {
    let b1 = p2 - p1;
    let b2 = p3 - p2;
    let b3 = p4 - p3;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    let (n1_len, n2_len) = (n1.norm(), n2.norm());

    if n1_len < DEGENERACY_TOLERANCE || n2_len < DEGENERACY_TOLERANCE {
        return 0.0;
    }

    let n1 = n1 / n1_len;
    let n2 = n2 / n2_len;

    let magnitude = n1.dot(&n2).clamp(-1.0, 1.0).acos();
    if n1.cross(&n2).dot(&b2) < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Unit vector pointing from `to` towards `from`, together with the distance.
///
/// Returns `None` when the points coincide within [`DEGENERACY_TOLERANCE`].
#[inline]
pub(crate) fn separation(from: &Point3<f64>, to: &Point3<f64>) -> Option<(Vector3<f64>, f64)> {
    let delta = from - to;
    let dist = delta.norm();
    if dist < DEGENERACY_TOLERANCE {
        None
    } else {
        Some((delta / dist, dist))
    }
}
