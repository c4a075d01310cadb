//! # Workflows Module
//!
//! Top-level entry points that run a complete procedure on a decoded system.
//!
//! - **Shift Workflow** ([`shift`]) - Converts a Cartesian displacement into grid steps,
//!   shifts the periodic field, translates the atoms and regenerates the periodic boundary.

pub mod shift;
