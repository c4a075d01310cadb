use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "xsfshift - shift periodic volumetric data (XSF density grids) and their atoms by a real-space vector.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shift the density grid and atoms of an XSF file by a Cartesian displacement.
    Shift(ShiftArgs),
    /// Print a summary of the lattice, atoms and data grid of an XSF file.
    Info(InfoArgs),
}

/// Arguments for the `shift` subcommand.
#[derive(Args, Debug)]
pub struct ShiftArgs {
    /// Path to the input XSF file (e.g., density.xsf).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the shifted output file [default: <input stem>_shifted.xsf].
    ///
    /// The default keeps the input's directory and replaces only its real extension:
    /// `density.xsf` becomes `density_shifted.xsf`, `CHGCAR` becomes `CHGCAR_shifted.xsf`.
    /// The last four characters of the name are not cut off blindly, so inputs without an
    /// `.xsf` extension keep their full name. The suffix can be changed with
    /// `[output] suffix` in the config file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Cartesian displacement DX DY DZ, in the units of the lattice vectors.
    #[arg(
        short,
        long,
        required = true,
        num_args = 3,
        value_names = ["DX", "DY", "DZ"],
        allow_negative_numbers = true
    )]
    pub displacement: Vec<f64>,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Round fractional grid offsets to the nearest sample instead of truncating.
    #[arg(long)]
    pub round: bool,

    /// Shift only the density; leave atomic positions unchanged.
    #[arg(long)]
    pub no_atoms: bool,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the XSF file to inspect.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}
