use crate::core::utils::geometry::GeometryError;
use nalgebra::{Matrix3, Vector3};

/// Relative determinant magnitude below which a cell is treated as degenerate.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// The periodic repeat unit of a crystal, stored as a 3×3 matrix whose rows are the
/// lattice vectors in Cartesian coordinates (Angstrom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    matrix: Matrix3<f64>,
}

impl Lattice {
    /// Creates a lattice from a matrix whose rows are the lattice vectors.
    pub fn new(matrix: Matrix3<f64>) -> Self {
        Self { matrix }
    }

    /// Creates a lattice from three row vectors `[a, b, c]`.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self {
            matrix: Matrix3::new(
                rows[0][0], rows[0][1], rows[0][2], //
                rows[1][0], rows[1][1], rows[1][2], //
                rows[2][0], rows[2][1], rows[2][2],
            ),
        }
    }

    /// A simple cubic cell with edge length `a`.
    pub fn cubic(a: f64) -> Self {
        Self::new(Matrix3::from_diagonal_element(a))
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Returns lattice vector `index` (0, 1 or 2) as a column vector.
    pub fn vector(&self, index: usize) -> Vector3<f64> {
        self.matrix.row(index).transpose()
    }

    /// Signed cell volume.
    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    /// Inverts the lattice matrix.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularLattice`] when the lattice vectors are linearly
    /// dependent (including a zero vector) or contain non-finite components.
    pub fn inverse(&self) -> Result<Matrix3<f64>, GeometryError> {
        let determinant = self.determinant();
        let scale: f64 = self.matrix.row_iter().map(|row| row.norm()).product();

        if !determinant.is_finite() || determinant.abs() <= SINGULAR_TOLERANCE * scale {
            return Err(GeometryError::SingularLattice { determinant });
        }

        self.matrix
            .try_inverse()
            .ok_or(GeometryError::SingularLattice { determinant })
    }

    /// Expresses a Cartesian vector in units of the lattice vectors.
    ///
    /// The vector is treated as a row vector right-multiplied by the inverse lattice
    /// matrix, so that `cartesian = Σ fractional[i] * vector(i)`.
    pub fn to_fractional(&self, cartesian: &Vector3<f64>) -> Result<Vector3<f64>, GeometryError> {
        let inverse = self.inverse()?;
        Ok(inverse.transpose() * cartesian)
    }

    /// Inverse of [`Lattice::to_fractional`].
    pub fn to_cartesian(&self, fractional: &Vector3<f64>) -> Vector3<f64> {
        self.matrix.transpose() * fractional
    }
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new(Matrix3::identity())
    }
}
