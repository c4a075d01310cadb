use crate::core::models::atom::AtomSet;
use nalgebra::Vector3;

/// Returns a copy of `atoms` with every position moved by `displacement`.
///
/// Positions are not wrapped back into the cell; labels and ordering are unchanged.
pub fn translate(atoms: &AtomSet, displacement: &Vector3<f64>) -> AtomSet {
    let mut moved = atoms.clone();
    translate_in_place(&mut moved, displacement);
    moved
}

pub fn translate_in_place(atoms: &mut AtomSet, displacement: &Vector3<f64>) {
    for position in atoms.positions_mut() {
        *position += displacement;
    }
}
