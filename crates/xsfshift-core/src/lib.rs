//! # xsfshift Core Library
//!
//! Translates periodic volumetric data (electronic densities, potentials) stored in the
//! XCrySDen structure format (XSF) by an arbitrary real-space displacement, wrapping the
//! sampled field around the periodic cell and moving the atoms along with it.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Lattice`, `AtomSet`, `DataGrid`),
//!   lattice geometry, and the XSF codec.
//!
//! - **[`engine`]: The Logic Core.** The periodic shift engine operating on the
//!   deduplicated interior grid, the atom translator, configuration and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into the complete
//!   shift pipeline used by front ends.

pub mod core;
pub mod engine;
pub mod workflows;
