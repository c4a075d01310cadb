//! # Core Models Module
//!
//! Data structures describing one periodic system read from a volumetric file.
//!
//! - [`lattice`] - The 3×3 cell matrix and its Cartesian/fractional conversions
//! - [`atom`] - Atom records and the ordered [`atom::AtomSet`]
//! - [`grid`] - The sampled scalar field with its duplicated periodic boundary, and the
//!   deduplicated interior grid the shift engine works on
//! - [`system`] - The complete [`system::PeriodicSystem`] combining the three
//!
//! ## Usage
//!
//! ```ignore
//! use xsfshift::core::models::{atom::AtomSet, lattice::Lattice};
//!
//! let lattice = Lattice::cubic(4.0);
//! let mut atoms = AtomSet::new();
//! atoms.add_atom("8", Point3::new(0.0, 0.0, 0.0));
//! ```

pub mod atom;
pub mod grid;
pub mod lattice;
pub mod system;
