use crate::cli::ShiftArgs;
use crate::config::PartialShiftConfig;
use crate::error::{CliError, Result};
use crate::commands::SPAN_TOLERANCE;
use crate::utils::progress::ShiftProgress;
use tracing::{info, warn};
use xsfshift::{
    core::io::{traits::VolumetricFile, xsf::XsfFile},
    engine::progress::ProgressReporter,
    workflows,
};

pub fn run(args: ShiftArgs, show_progress: bool) -> Result<()> {
    let partial_config = PartialShiftConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let resolved = partial_config.merge_with_cli(&args)?;

    info!("Loading input density from {:?}", &args.input);
    let (system, metadata) =
        XsfFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;
    info!(
        "Read {} atom(s) and a {:?} sample grid.",
        system.atoms.len(),
        system.grid.counts()
    );
    if !system.grid_matches_lattice(SPAN_TOLERANCE) {
        warn!("Data grid spanning vectors differ from PRIMVEC; offsets use the PRIMVEC lattice.");
    }

    let progress = if show_progress {
        ShiftProgress::stderr()
    } else {
        ShiftProgress::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress.callback());
    let outcome = workflows::shift::run(&system, &resolved.core, &reporter);
    progress.finish();
    let result = outcome?;

    println!(
        "Grid offset (x, y, z): {:?} samples for fractional shift [{:.6}, {:.6}, {:.6}]",
        result.index_offset,
        result.fractional_offset.x,
        result.fractional_offset.y,
        result.fractional_offset.z
    );

    info!("Writing shifted system to {:?}", &resolved.output_path);
    XsfFile::write_to_path(&result.system, &metadata, &resolved.output_path).map_err(|e| {
        CliError::FileWriting {
            path: resolved.output_path.clone(),
            source: e.into(),
        }
    })?;
    println!(
        "✓ Shifted density written to: {}",
        resolved.output_path.display()
    );

    Ok(())
}
