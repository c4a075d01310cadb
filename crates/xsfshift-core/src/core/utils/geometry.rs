use crate::core::models::lattice::Lattice;
use nalgebra::Vector3;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("Lattice matrix is singular (determinant {determinant:e}); cannot convert to fractional coordinates")]
    SingularLattice { determinant: f64 },
}

/// How a fractional grid offset is reduced to a whole number of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetPolicy {
    /// Drop the fractional part (toward zero).
    #[default]
    Truncate,
    /// Round half away from zero.
    Round,
}

impl OffsetPolicy {
    fn apply(self, value: f64) -> f64 {
        match self {
            OffsetPolicy::Truncate => value.trunc(),
            OffsetPolicy::Round => value.round(),
        }
    }
}

/// Expresses a Cartesian displacement in units of the lattice vectors.
pub fn to_fractional_offset(
    displacement: &Vector3<f64>,
    lattice: &Lattice,
) -> Result<Vector3<f64>, GeometryError> {
    lattice.to_fractional(displacement)
}

/// Converts a fractional displacement into whole grid steps per axis, truncating
/// toward zero.
pub fn to_index_offset(fractional: &Vector3<f64>, sample_counts: [usize; 3]) -> [i64; 3] {
    to_index_offset_with(fractional, sample_counts, OffsetPolicy::Truncate)
}

pub fn to_index_offset_with(
    fractional: &Vector3<f64>,
    sample_counts: [usize; 3],
    policy: OffsetPolicy,
) -> [i64; 3] {
    std::array::from_fn(|axis| policy.apply(fractional[axis] * sample_counts[axis] as f64) as i64)
}

/// The part of the requested displacement that whole grid steps cannot represent,
/// in fractional units.
pub fn offset_remainder(
    fractional: &Vector3<f64>,
    sample_counts: [usize; 3],
    index_offset: [i64; 3],
) -> Vector3<f64> {
    Vector3::from_fn(|axis, _| {
        fractional[axis] - index_offset[axis] as f64 / sample_counts[axis].max(1) as f64
    })
}
