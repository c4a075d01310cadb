pub mod info;
pub mod shift;

/// Largest per-component difference between the grid span and `PRIMVEC` still treated as
/// the same cell.
pub const SPAN_TOLERANCE: f64 = 1e-6;
