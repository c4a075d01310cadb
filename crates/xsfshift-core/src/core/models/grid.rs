//! Sampled scalar fields on regular grids.
//!
//! Both grid types store their samples in one flat vector with `x` varying fastest,
//! then `y`, then `z`, i.e. a row-major array of shape `(nz, ny, nx)`. This is the
//! order in which XSF lists its values.

use nalgebra::{Matrix3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid {dims:?} declares {expected} samples but {found} values were given")]
    DimensionMismatch {
        dims: [usize; 3],
        expected: usize,
        found: usize,
    },
    #[error("Grid dimension {dim} along axis {axis} is invalid")]
    InvalidDimension { axis: usize, dim: usize },
}

#[inline]
fn flat_index(dims: [usize; 3], ix: usize, iy: usize, iz: usize) -> usize {
    ix + dims[0] * (iy + dims[1] * iz)
}

fn check_len(dims: [usize; 3], found: usize) -> Result<(), GridError> {
    let expected = dims[0]
        .checked_mul(dims[1])
        .and_then(|n| n.checked_mul(dims[2]));
    match expected {
        Some(expected) if expected == found => Ok(()),
        Some(expected) => Err(GridError::DimensionMismatch {
            dims,
            expected,
            found,
        }),
        None => Err(GridError::InvalidDimension {
            axis: 0,
            dim: dims[0],
        }),
    }
}

/// A sampled field exactly as a periodic volumetric file stores it.
///
/// Along every axis the last sample is a periodic image of the first one, so the
/// `n` samples per axis cover one period with `n - 1` independent points.
#[derive(Debug, Clone, PartialEq)]
pub struct DataGrid {
    counts: [usize; 3],
    origin: Vector3<f64>,
    span: Matrix3<f64>,
    values: Vec<f64>,
}

impl DataGrid {
    /// Creates a grid with sample counts `[nx, ny, nz]`, a Cartesian origin, the spanning
    /// vectors (rows) and `nx * ny * nz` values in file order.
    pub fn new(
        counts: [usize; 3],
        origin: Vector3<f64>,
        span: Matrix3<f64>,
        values: Vec<f64>,
    ) -> Result<Self, GridError> {
        check_len(counts, values.len())?;
        Ok(Self {
            counts,
            origin,
            span,
            values,
        })
    }

    /// Sample counts `[nx, ny, nz]` including the duplicated boundary.
    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    pub fn origin(&self) -> &Vector3<f64> {
        &self.origin
    }

    /// The grid's own spanning vectors, stored as rows.
    pub fn span(&self) -> &Matrix3<f64> {
        &self.span
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        flat_index(self.counts, ix, iy, iz)
    }

    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> Option<f64> {
        if ix >= self.counts[0] || iy >= self.counts[1] || iz >= self.counts[2] {
            return None;
        }
        Some(self.values[self.index(ix, iy, iz)])
    }

    /// Returns `true` when every closing sample equals the first sample of its axis.
    pub fn is_periodic(&self) -> bool {
        let [nx, ny, nz] = self.counts;
        if nx == 0 || ny == 0 || nz == 0 {
            return false;
        }
        (0..nz).all(|iz| {
            (0..ny).all(|iy| {
                (0..nx).all(|ix| {
                    let here = self.values[self.index(ix, iy, iz)];
                    let image = self.values[self.index(
                        ix % (nx - 1).max(1),
                        iy % (ny - 1).max(1),
                        iz % (nz - 1).max(1),
                    )];
                    here == image
                })
            })
        })
    }
}

/// The independent samples of a periodic grid: `n - 1` per axis of the owning
/// [`DataGrid`], without the duplicated closing samples.
#[derive(Debug, Clone, PartialEq)]
pub struct InteriorGrid {
    dims: [usize; 3],
    values: Vec<f64>,
}

impl InteriorGrid {
    pub fn new(dims: [usize; 3], values: Vec<f64>) -> Result<Self, GridError> {
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(GridError::InvalidDimension { axis, dim: 0 });
        }
        check_len(dims, values.len())?;
        Ok(Self { dims, values })
    }

    /// Wraps values already known to match `dims`.
    pub(crate) fn from_parts(dims: [usize; 3], values: Vec<f64>) -> Self {
        debug_assert_eq!(dims[0] * dims[1] * dims[2], values.len());
        Self { dims, values }
    }

    /// Builds a grid by evaluating `f(ix, iy, iz)` at every sample.
    pub fn from_fn(dims: [usize; 3], mut f: impl FnMut(usize, usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(dims[0] * dims[1] * dims[2]);
        for iz in 0..dims[2] {
            for iy in 0..dims[1] {
                for ix in 0..dims[0] {
                    values.push(f(ix, iy, iz));
                }
            }
        }
        Self { dims, values }
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        flat_index(self.dims, ix, iy, iz)
    }

    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> Option<f64> {
        if ix >= self.dims[0] || iy >= self.dims[1] || iz >= self.dims[2] {
            return None;
        }
        Some(self.values[self.index(ix, iy, iz)])
    }

    pub fn statistics(&self) -> GridStatistics {
        GridStatistics::from_values(&self.values)
    }
}

/// Summary of a set of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStatistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

impl GridStatistics {
    pub fn from_values(values: &[f64]) -> Self {
        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );
        Self {
            count: values.len(),
            min,
            max,
            sum,
        }
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}
