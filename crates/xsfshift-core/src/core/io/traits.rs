use crate::core::models::system::PeriodicSystem;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Defines the interface for reading and writing periodic volumetric file formats.
///
/// Implementors handle the format-specific parsing and serialization; the provided
/// methods add path-based convenience on top.
pub trait VolumetricFile {
    /// Format details that are not part of [`PeriodicSystem`] but are needed to
    /// reproduce the file layout on output.
    type Metadata: Default;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a periodic system from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead)
    -> Result<(PeriodicSystem, Self::Metadata), Self::Error>;

    /// Writes a periodic system and metadata to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        system: &PeriodicSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes a periodic system using default metadata.
    fn write_system_to(system: &PeriodicSystem, writer: &mut impl Write) -> Result<(), Self::Error> {
        Self::write_to(system, &Self::Metadata::default(), writer)
    }

    /// Reads a periodic system from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(PeriodicSystem, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a periodic system and metadata to a file path.
    ///
    /// The whole file is rendered in memory first; the destination is only created
    /// once serialization has succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    fn write_to_path<P: AsRef<Path>>(
        system: &PeriodicSystem,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(system, metadata, &mut buffer)?;
        std::fs::write(path, buffer)?;
        Ok(())
    }
}
