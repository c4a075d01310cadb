//! Toroidal shift of periodic sampled fields.
//!
//! A periodic file stores `n` samples per axis of which the last is an image of the
//! first. Shifting that full grid directly would move the duplicate along with the
//! independent samples and leave an inconsistent boundary, so the engine works in three
//! steps: strip the closing samples, rotate the remaining `n - 1` samples per axis, and
//! regenerate the closing samples from the result.

use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::grid::{DataGrid, InteriorGrid};
use nalgebra::{Matrix3, Vector3};
use tracing::trace;

/// Drops the duplicated closing sample along every axis.
///
/// # Errors
///
/// Returns [`EngineError::GridTooSmall`] if any axis has fewer than two samples, since
/// such a grid has no independent interior.
pub fn strip_periodic_boundary(grid: &DataGrid) -> Result<InteriorGrid, EngineError> {
    let counts = grid.counts();
    if let Some(axis) = counts.iter().position(|&n| n < 2) {
        return Err(EngineError::GridTooSmall {
            axis,
            count: counts[axis],
        });
    }
    let dims = [counts[0] - 1, counts[1] - 1, counts[2] - 1];

    let mut values = Vec::with_capacity(dims[0] * dims[1] * dims[2]);
    for iz in 0..dims[2] {
        for iy in 0..dims[1] {
            let start = grid.index(0, iy, iz);
            values.extend_from_slice(&grid.values()[start..start + dims[0]]);
        }
    }
    Ok(InteriorGrid::new(dims, values)?)
}

/// Circularly shifts the interior grid by `offset = [dx, dy, dz]` samples.
///
/// The sample at `(x, y, z)` moves to `((x + dx) mod mx, (y + dy) mod my, (z + dz) mod mz)`
/// where `m` are the interior dimensions. The mapping is a bijection, so the multiset of
/// values is preserved exactly.
pub fn shift(interior: &InteriorGrid, offset: [i64; 3]) -> InteriorGrid {
    shift_with_progress(interior, offset, &ProgressReporter::new())
}

/// Same as [`shift`], reporting one task step per z-plane.
pub fn shift_with_progress(
    interior: &InteriorGrid,
    offset: [i64; 3],
    reporter: &ProgressReporter,
) -> InteriorGrid {
    if interior.is_empty() {
        return interior.clone();
    }
    let dims = interior.dims();
    let [mx, my, mz] = dims;
    let [sx, sy, sz]: [usize; 3] =
        std::array::from_fn(|axis| offset[axis].rem_euclid(dims[axis] as i64) as usize);
    trace!("Reduced shift per axis: [{}, {}, {}]", sx, sy, sz);

    let src = interior.values();
    let mut dst = vec![0.0; src.len()];

    reporter.report(Progress::TaskStart {
        total_steps: mz as u64,
    });
    for z in 0..mz {
        let z_dst = (z + sz) % mz;
        for y in 0..my {
            let y_dst = (y + sy) % my;
            let from = interior.index(0, y, z);
            let to = interior.index(0, y_dst, z_dst);
            let row = &src[from..from + mx];
            let out = &mut dst[to..to + mx];
            // Rotating the row right by sx places row[x] at out[(x + sx) % mx].
            out[sx..].copy_from_slice(&row[..mx - sx]);
            out[..sx].copy_from_slice(&row[mx - sx..]);
        }
        reporter.report(Progress::TaskAdvance { steps: 1 });
    }
    reporter.report(Progress::TaskFinish);

    InteriorGrid::from_parts(dims, dst)
}

/// Rebuilds the full periodic grid from its interior.
///
/// The interior is copied into the low corner of a grid one sample larger per axis; the
/// three closing faces, three closing edges and the closing corner are then filled with
/// the periodic images of the first sample along the respective axes.
pub fn expand_periodic_boundary(
    interior: &InteriorGrid,
    origin: Vector3<f64>,
    span: Matrix3<f64>,
) -> Result<DataGrid, EngineError> {
    if let Some(axis) = interior.dims().iter().position(|&m| m == 0) {
        return Err(EngineError::GridTooSmall { axis, count: 1 });
    }
    let [mx, my, mz] = interior.dims();
    let counts = [mx + 1, my + 1, mz + 1];
    let src = interior.values();

    let mut values = Vec::with_capacity(counts[0] * counts[1] * counts[2]);
    for iz in 0..counts[2] {
        for iy in 0..counts[1] {
            let start = interior.index(0, iy % my, iz % mz);
            let row = &src[start..start + mx];
            values.extend_from_slice(row);
            values.push(row[0]);
        }
    }

    Ok(DataGrid::new(counts, origin, span, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::grid::GridStatistics;

    fn full_grid(counts: [usize; 3], f: impl Fn(usize, usize, usize) -> f64) -> DataGrid {
        let interior = InteriorGrid::from_fn([counts[0] - 1, counts[1] - 1, counts[2] - 1], f);
        expand_periodic_boundary(&interior, Vector3::zeros(), Matrix3::identity()).unwrap()
    }

    fn labelled(dims: [usize; 3]) -> InteriorGrid {
        InteriorGrid::from_fn(dims, |x, y, z| (100 * z + 10 * y + x) as f64)
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut v = values.to_vec();
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v
    }

    #[test]
    fn wraparound_on_2x2x2_interior() {
        // (x, y, z) -> value: (0,0,0)=1, (1,0,0)=2, (0,1,0)=3, (0,0,1)=4, rest distinct.
        let interior = InteriorGrid::new([2, 2, 2], vec![1.0, 2.0, 3.0, 5.0, 4.0, 6.0, 7.0, 8.0])
            .unwrap();
        let shifted = shift(&interior, [1, 0, 0]);
        assert_eq!(shifted.get(0, 0, 0), interior.get(1, 0, 0));
        assert_eq!(shifted.get(1, 0, 0), interior.get(0, 0, 0));
        assert_eq!(shifted.get(0, 1, 0), interior.get(1, 1, 0));
        assert_eq!(shifted.get(0, 0, 1), interior.get(1, 0, 1));
    }

    #[test]
    fn sample_moves_to_offset_position() {
        let interior = labelled([4, 3, 5]);
        let shifted = shift(&interior, [1, 2, -1]);
        for z in 0..5 {
            for y in 0..3 {
                for x in 0..4 {
                    let dst = ((x + 1) % 4, (y + 2) % 3, (z + 4) % 5);
                    assert_eq!(shifted.get(dst.0, dst.1, dst.2), interior.get(x, y, z));
                }
            }
        }
    }

    #[test]
    fn zero_offset_is_identity() {
        let interior = labelled([3, 4, 2]);
        assert_eq!(shift(&interior, [0, 0, 0]), interior);
    }

    #[test]
    fn full_period_offset_is_identity() {
        let interior = labelled([3, 4, 2]);
        assert_eq!(shift(&interior, [3, -8, 6]), interior);
    }

    #[test]
    fn shifts_compose_additively() {
        let interior = labelled([5, 3, 4]);
        let d1 = [2, -1, 3];
        let d2 = [4, 5, -7];
        let twice = shift(&shift(&interior, d1), d2);
        let once = shift(&interior, [d1[0] + d2[0], d1[1] + d2[1], d1[2] + d2[2]]);
        assert_eq!(twice, once);
    }

    #[test]
    fn shift_preserves_value_multiset() {
        let interior = InteriorGrid::from_fn([4, 4, 3], |x, y, z| ((x * 7 + y * 3 + z) % 5) as f64);
        let shifted = shift(&interior, [3, 1, 2]);
        assert_eq!(sorted(shifted.values()), sorted(interior.values()));
        let before = GridStatistics::from_values(interior.values());
        let after = shifted.statistics();
        assert_eq!(before.sum, after.sum);
    }

    #[test]
    fn large_offsets_do_not_overflow() {
        let interior = labelled([3, 3, 3]);
        let shifted = shift(&interior, [i64::MAX, i64::MIN, 0]);
        assert_eq!(shifted.len(), interior.len());
    }

    #[test]
    fn expanded_boundary_repeats_first_sample_on_every_axis() {
        let interior = labelled([3, 2, 4]);
        let grid = expand_periodic_boundary(&interior, Vector3::zeros(), Matrix3::identity())
            .unwrap();
        let [nx, ny, nz] = grid.counts();
        assert_eq!([nx, ny, nz], [4, 3, 5]);

        for z in 0..nz {
            for y in 0..ny {
                assert_eq!(grid.get(nx - 1, y, z), grid.get(0, y, z));
            }
        }
        for z in 0..nz {
            for x in 0..nx {
                assert_eq!(grid.get(x, ny - 1, z), grid.get(x, 0, z));
            }
        }
        for y in 0..ny {
            for x in 0..nx {
                assert_eq!(grid.get(x, y, nz - 1), grid.get(x, y, 0));
            }
        }
        assert_eq!(grid.get(nx - 1, ny - 1, 0), grid.get(0, 0, 0));
        assert_eq!(grid.get(nx - 1, 0, nz - 1), grid.get(0, 0, 0));
        assert_eq!(grid.get(0, ny - 1, nz - 1), grid.get(0, 0, 0));
        assert_eq!(grid.get(nx - 1, ny - 1, nz - 1), grid.get(0, 0, 0));
        assert!(grid.is_periodic());
    }

    #[test]
    fn expanded_interior_is_unchanged() {
        let interior = labelled([3, 2, 4]);
        let grid = expand_periodic_boundary(&interior, Vector3::zeros(), Matrix3::identity())
            .unwrap();
        for z in 0..4 {
            for y in 0..2 {
                for x in 0..3 {
                    assert_eq!(grid.get(x, y, z), interior.get(x, y, z));
                }
            }
        }
    }

    #[test]
    fn strip_inverts_expand() {
        let grid = full_grid([4, 3, 5], |x, y, z| (x + 2 * y + 3 * z) as f64);
        let interior = strip_periodic_boundary(&grid).unwrap();
        assert_eq!(interior.dims(), [3, 2, 4]);
        let again =
            expand_periodic_boundary(&interior, *grid.origin(), *grid.span()).unwrap();
        assert_eq!(again, grid);
    }

    #[test]
    fn repeated_shifts_keep_boundary_consistent() {
        let mut grid = full_grid([5, 4, 3], |x, y, z| (x * 11 + y * 5 + z) as f64);
        for _ in 0..4 {
            let interior = strip_periodic_boundary(&grid).unwrap();
            let shifted = shift(&interior, [1, 2, 1]);
            grid = expand_periodic_boundary(&shifted, *grid.origin(), *grid.span()).unwrap();
            assert!(grid.is_periodic());
        }
    }

    #[test]
    fn strip_rejects_single_sample_axis() {
        let grid = DataGrid::new([2, 1, 2], Vector3::zeros(), Matrix3::identity(), vec![0.0; 4])
            .unwrap();
        assert!(matches!(
            strip_periodic_boundary(&grid),
            Err(EngineError::GridTooSmall { axis: 1, count: 1 })
        ));
    }

    #[test]
    fn progress_reports_one_step_per_plane() {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::sync::Arc;

        let steps = Arc::new(AtomicU64::new(0));
        let counter = steps.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            if let Progress::TaskAdvance { steps } = p {
                counter.fetch_add(steps, Ordering::SeqCst);
            }
        }));
        shift_with_progress(&labelled([2, 2, 6]), [1, 1, 1], &reporter);
        assert_eq!(steps.load(Ordering::SeqCst), 6);
    }
}
