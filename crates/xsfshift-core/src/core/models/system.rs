use super::atom::AtomSet;
use super::grid::DataGrid;
use super::lattice::Lattice;

/// A periodic cell together with its atoms and one sampled scalar field.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicSystem {
    pub lattice: Lattice,
    pub atoms: AtomSet,
    pub grid: DataGrid,
}

impl PeriodicSystem {
    pub fn new(lattice: Lattice, atoms: AtomSet, grid: DataGrid) -> Self {
        Self {
            lattice,
            atoms,
            grid,
        }
    }

    /// Returns `true` when the grid's spanning vectors coincide with the lattice to
    /// within `tolerance` (element-wise).
    pub fn grid_matches_lattice(&self, tolerance: f64) -> bool {
        (self.grid.span() - self.lattice.matrix()).amax() <= tolerance
    }
}
