//! # Core Module
//!
//! Fundamental building blocks for periodic volumetric data.
//!
//! - **Data Representation** ([`models`]) - Lattice, atoms and sampled grids
//! - **File I/O** ([`io`]) - Reading/writing the XSF volumetric format
//! - **Geometry** ([`utils`]) - Cartesian to fractional to grid-index conversions

pub mod io;
pub mod models;
pub mod utils;
