//! # Engine Module
//!
//! The computational layer of the shifter: everything that transforms a decoded
//! [`PeriodicSystem`](crate::core::models::system::PeriodicSystem) in memory.
//!
//! - **Periodic Shift** ([`shift`]) - Toroidal shift of the deduplicated interior grid and
//!   regeneration of the duplicated periodic boundary
//! - **Atom Translation** ([`translate`]) - Rigid translation of atomic positions
//! - **Configuration** ([`config`]) - Displacement and offset policy for one run
//! - **Progress Monitoring** ([`progress`]) - Progress events for front ends
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod progress;
pub mod shift;
pub mod translate;
