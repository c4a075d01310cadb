//! Reader and writer for the XCrySDen structure format (XSF) with one 3D data grid.
//!
//! The reader does not rely on line structure: the input is split into whitespace
//! separated tokens and every block is located by its marker keyword, after which its
//! fields are consumed positionally.

use crate::core::io::traits::VolumetricFile;
use crate::core::models::atom::AtomSet;
use crate::core::models::grid::{DataGrid, GridError};
use crate::core::models::lattice::Lattice;
use crate::core::models::system::PeriodicSystem;
use nalgebra::{Matrix3, Point3, Vector3};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

const PRIMVEC: &str = "PRIMVEC";
const PRIMCOORD: &str = "PRIMCOORD";
const BEGIN_BLOCK: &str = "BEGIN_BLOCK_DATAGRID_3D";
const END_BLOCK: &str = "END_BLOCK_DATAGRID_3D";
const BEGIN_GRID_PREFIX: &str = "BEGIN_DATAGRID_3D_";
const END_GRID_PREFIX: &str = "END_DATAGRID_3D_";
const DIMENSIONALITY_KEYWORDS: [&str; 4] = ["CRYSTAL", "SLAB", "POLYMER", "MOLECULE"];

const DEFAULT_DIMENSIONALITY: &str = "CRYSTAL";
const DEFAULT_GRID_NAME: &str = "density";

const VALUES_PER_LINE: usize = 4;
const GRID_INDENT: &str = "       ";

#[derive(Debug, Error)]
pub enum XsfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Missing required marker: {0}")]
    MissingMarker(String),
    #[error("Unexpected end of input while reading {context}")]
    UnexpectedEnd { context: &'static str },
    #[error("Invalid {expected} for {context} at token {position} (value: '{value}')")]
    InvalidNumber {
        context: &'static str,
        expected: &'static str,
        position: usize,
        value: String,
    },
    #[error("Data grid declares {expected} values ({dims:?}) but {found} were found")]
    DimensionMismatch {
        dims: [usize; 3],
        expected: usize,
        found: usize,
    },
    #[error("Invalid data grid: {0}")]
    InvalidGrid(GridError),
}

impl XsfError {
    /// `true` for errors caused by malformed input rather than I/O or grid size.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            XsfError::MissingMarker(_)
                | XsfError::UnexpectedEnd { .. }
                | XsfError::InvalidNumber { .. }
                | XsfError::InvalidGrid(_)
        )
    }
}

impl From<GridError> for XsfError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::DimensionMismatch {
                dims,
                expected,
                found,
            } => XsfError::DimensionMismatch {
                dims,
                expected,
                found,
            },
            other => XsfError::InvalidGrid(other),
        }
    }
}

/// Layout details of an XSF file that the writer reproduces.
#[derive(Debug, Clone, PartialEq)]
pub struct XsfMetadata {
    /// `CRYSTAL`, `SLAB`, `POLYMER` or `MOLECULE`.
    pub dimensionality: String,
    /// Name following `BEGIN_BLOCK_DATAGRID_3D`.
    pub block_name: String,
    /// Suffix of `BEGIN_DATAGRID_3D_<name>`.
    pub grid_name: String,
}

impl Default for XsfMetadata {
    fn default() -> Self {
        Self {
            dimensionality: DEFAULT_DIMENSIONALITY.to_string(),
            block_name: DEFAULT_GRID_NAME.to_string(),
            grid_name: DEFAULT_GRID_NAME.to_string(),
        }
    }
}

struct Tokens<'a> {
    tokens: Vec<&'a str>,
    cursor: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = text
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::split_whitespace)
            .collect();
        Self { tokens, cursor: 0 }
    }

    fn position_of(&self, marker: &str) -> Option<usize> {
        self.tokens.iter().position(|&t| t == marker)
    }

    fn seek_after(&mut self, marker: &str) -> Result<(), XsfError> {
        let index = self
            .position_of(marker)
            .ok_or_else(|| XsfError::MissingMarker(marker.to_string()))?;
        self.cursor = index + 1;
        Ok(())
    }

    fn next(&mut self, context: &'static str) -> Result<&'a str, XsfError> {
        let token = self
            .tokens
            .get(self.cursor)
            .copied()
            .ok_or(XsfError::UnexpectedEnd { context })?;
        self.cursor += 1;
        Ok(token)
    }

    fn next_f64(&mut self, context: &'static str) -> Result<f64, XsfError> {
        let position = self.cursor;
        let token = self.next(context)?;
        parse_f64(token, context, position)
    }

    fn next_usize(&mut self, context: &'static str) -> Result<usize, XsfError> {
        let position = self.cursor;
        let token = self.next(context)?;
        token.parse().map_err(|_| XsfError::InvalidNumber {
            context,
            expected: "integer",
            position,
            value: token.to_string(),
        })
    }

    fn next_vector(&mut self, context: &'static str) -> Result<Vector3<f64>, XsfError> {
        Ok(Vector3::new(
            self.next_f64(context)?,
            self.next_f64(context)?,
            self.next_f64(context)?,
        ))
    }

    fn next_matrix(&mut self, context: &'static str) -> Result<Matrix3<f64>, XsfError> {
        let rows = [
            self.next_vector(context)?.transpose(),
            self.next_vector(context)?.transpose(),
            self.next_vector(context)?.transpose(),
        ];
        Ok(Matrix3::from_rows(&rows))
    }
}

fn parse_f64(token: &str, context: &'static str, position: usize) -> Result<f64, XsfError> {
    token.parse().map_err(|_| XsfError::InvalidNumber {
        context,
        expected: "real number",
        position,
        value: token.to_string(),
    })
}

/// Parses XSF text into a periodic system and its layout metadata.
pub fn decode(text: &str) -> Result<(PeriodicSystem, XsfMetadata), XsfError> {
    let mut tokens = Tokens::new(text);
    let mut metadata = XsfMetadata::default();

    tokens.seek_after(PRIMVEC)?;
    let primvec_at = tokens.cursor - 1;
    if let Some(keyword) = tokens.tokens[..primvec_at]
        .iter()
        .rev()
        .find(|t| DIMENSIONALITY_KEYWORDS.contains(*t))
    {
        metadata.dimensionality = keyword.to_string();
    }
    let lattice = Lattice::new(tokens.next_matrix("PRIMVEC lattice vectors")?);

    tokens.seek_after(PRIMCOORD)?;
    let atom_count = tokens.next_usize("PRIMCOORD atom count")?;
    tokens.next("PRIMCOORD multiplicity")?;
    let mut atoms = AtomSet::with_capacity(atom_count);
    for _ in 0..atom_count {
        let label = tokens.next("PRIMCOORD atom label")?;
        let position = tokens.next_vector("PRIMCOORD atom coordinates")?;
        atoms.add_atom(label, Point3::from(position));
    }

    if let Some(index) = tokens.position_of(BEGIN_BLOCK) {
        if let Some(name) = tokens.tokens.get(index + 1) {
            metadata.block_name = name.to_string();
        }
    }

    let grid_at = tokens
        .tokens
        .iter()
        .position(|t| t.starts_with(BEGIN_GRID_PREFIX))
        .ok_or_else(|| {
            XsfError::MissingMarker(format!("{}{}", BEGIN_GRID_PREFIX, DEFAULT_GRID_NAME))
        })?;
    metadata.grid_name = tokens.tokens[grid_at][BEGIN_GRID_PREFIX.len()..].to_string();
    tokens.cursor = grid_at + 1;

    let counts = [
        tokens.next_usize("data grid sample counts")?,
        tokens.next_usize("data grid sample counts")?,
        tokens.next_usize("data grid sample counts")?,
    ];
    let origin = tokens.next_vector("data grid origin")?;
    let span = tokens.next_matrix("data grid spanning vectors")?;

    let end_marker = format!("{}{}", END_GRID_PREFIX, metadata.grid_name);
    let values_start = tokens.cursor;
    let values_end = tokens.tokens[values_start..]
        .iter()
        .position(|&t| t == end_marker)
        .map(|offset| values_start + offset)
        .ok_or_else(|| XsfError::MissingMarker(end_marker.clone()))?;

    let expected = counts
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .ok_or(XsfError::InvalidGrid(GridError::InvalidDimension {
            axis: 0,
            dim: counts[0],
        }))?;
    let found = values_end - values_start;
    if expected != found {
        return Err(XsfError::DimensionMismatch {
            dims: counts,
            expected,
            found,
        });
    }

    let values = tokens.tokens[values_start..values_end]
        .iter()
        .enumerate()
        .map(|(i, token)| parse_f64(token, "data grid values", values_start + i))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Decoded XSF: {} atom(s), grid {:?} ({} values), block '{}', grid '{}'",
        atoms.len(),
        counts,
        values.len(),
        metadata.block_name,
        metadata.grid_name
    );

    let grid = DataGrid::new(counts, origin, span, values)?;
    Ok((PeriodicSystem::new(lattice, atoms, grid), metadata))
}

/// Renders a periodic system as XSF text.
pub fn encode(system: &PeriodicSystem, metadata: &XsfMetadata) -> Result<String, XsfError> {
    let mut buffer = Vec::new();
    write_xsf(system, metadata, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

fn write_rows(writer: &mut impl Write, matrix: &Matrix3<f64>) -> io::Result<()> {
    for row in matrix.row_iter() {
        writeln!(
            writer,
            "    {:11.8}  {:11.8}  {:11.8}",
            row[0], row[1], row[2]
        )?;
    }
    Ok(())
}

fn write_xsf(
    system: &PeriodicSystem,
    metadata: &XsfMetadata,
    writer: &mut impl Write,
) -> io::Result<()> {
    let grid = &system.grid;

    writeln!(writer, " {}", metadata.dimensionality)?;
    writeln!(writer, " {}", PRIMVEC)?;
    write_rows(writer, system.lattice.matrix())?;

    writeln!(writer, " {}", PRIMCOORD)?;
    writeln!(writer, "   {} 1", system.atoms.len())?;
    for atom in &system.atoms {
        writeln!(
            writer,
            "     {}  {:11.8}  {:11.8}  {:11.8}",
            atom.label, atom.position.x, atom.position.y, atom.position.z
        )?;
    }

    writeln!(writer, " {}", BEGIN_BLOCK)?;
    writeln!(writer, "   {}", metadata.block_name)?;
    writeln!(writer, "   {}{}", BEGIN_GRID_PREFIX, metadata.grid_name)?;
    let [nx, ny, nz] = grid.counts();
    writeln!(writer, "     {} {} {}", nx, ny, nz)?;
    let origin = grid.origin();
    writeln!(
        writer,
        "    {:11.8}  {:11.8}  {:11.8}",
        origin.x, origin.y, origin.z
    )?;
    write_rows(writer, grid.span())?;

    // Values are stored z-outer, x-inner, which is the order XSF lists them in.
    write!(writer, "{}", GRID_INDENT)?;
    let mut on_line = 0;
    for value in grid.values() {
        write!(writer, "{:10.8}", value)?;
        on_line += 1;
        if on_line == VALUES_PER_LINE {
            write!(writer, "\n{}", GRID_INDENT)?;
            on_line = 0;
        } else {
            write!(writer, "   ")?;
        }
    }
    if on_line != 0 {
        writeln!(writer)?;
    }

    writeln!(writer, "   {}{}", END_GRID_PREFIX, metadata.grid_name)?;
    writeln!(writer, " {}", END_BLOCK)?;
    Ok(())
}

pub struct XsfFile;

impl VolumetricFile for XsfFile {
    type Metadata = XsfMetadata;
    type Error = XsfError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(PeriodicSystem, Self::Metadata), Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        decode(&text)
    }

    fn write_to(
        system: &PeriodicSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        write_xsf(system, metadata, writer)?;
        Ok(())
    }
}
