//! Provides input/output functionality for periodic volumetric file formats.
//!
//! Formats are exposed through the [`traits::VolumetricFile`] trait so that callers can
//! read from and write to readers, writers or paths uniformly.

pub mod traits;
pub mod xsf;
