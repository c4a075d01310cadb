use crate::core::models::system::PeriodicSystem;
use crate::core::utils::geometry::{
    offset_remainder, to_fractional_offset, to_index_offset_with,
};
use crate::engine::config::ShiftConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::shift::{expand_periodic_boundary, shift_with_progress, strip_periodic_boundary};
use crate::engine::translate::translate;
use nalgebra::Vector3;
use tracing::{debug, info, instrument, warn};

/// Fractional remainders below this are treated as exact grid steps.
const REMAINDER_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct ShiftResult {
    pub system: PeriodicSystem,
    /// The requested displacement in units of the lattice vectors.
    pub fractional_offset: Vector3<f64>,
    /// Whole grid steps applied along x, y and z.
    pub index_offset: [i64; 3],
    /// Fraction of the requested displacement the grid could not represent.
    pub remainder: Vector3<f64>,
}

#[instrument(skip_all, name = "shift_workflow")]
pub fn run(
    system: &PeriodicSystem,
    config: &ShiftConfig,
    reporter: &ProgressReporter,
) -> Result<ShiftResult, EngineError> {
    // === Phase 1: Displacement to grid steps ===
    let (fractional_offset, index_offset, remainder) =
        reporter.phase("Computing grid offset", || {
            let inverse = system.lattice.inverse()?;
            debug!("Lattice (rows):{}", system.lattice.matrix());
            debug!("Inverse lattice:{}", inverse);

            let fractional = to_fractional_offset(&config.displacement, &system.lattice)?;
            let counts = system.grid.counts();
            let index = to_index_offset_with(&fractional, counts, config.offset_policy);
            let remainder = offset_remainder(&fractional, counts, index);

            debug!(
                "Fractional offset: [{:.8}, {:.8}, {:.8}]",
                fractional.x, fractional.y, fractional.z
            );
            info!(
                "Grid offset {:?} for {:?} samples ({:?} policy).",
                index, counts, config.offset_policy
            );
            if remainder.amax() > REMAINDER_TOLERANCE {
                warn!(
                    "Displacement is not a whole number of grid steps; dropping fractional remainder [{:.3e}, {:.3e}, {:.3e}] from the density shift.",
                    remainder.x, remainder.y, remainder.z
                );
                reporter.report(Progress::Message(format!(
                    "density moves by {:?} grid steps; atoms move by the exact displacement",
                    index
                )));
            }
            Ok::<_, EngineError>((fractional, index, remainder))
        })?;

    // === Phase 2: Toroidal shift of the interior grid ===
    let shifted = reporter.phase("Shifting density", || {
        let interior = strip_periodic_boundary(&system.grid)?;
        debug!("Interior grid dimensions: {:?}", interior.dims());
        Ok::<_, EngineError>(shift_with_progress(&interior, index_offset, reporter))
    })?;

    // === Phase 3: Atom translation ===
    let atoms = if config.translate_atoms {
        reporter.report(Progress::PhaseStart {
            name: "Translating atoms",
        });
        let atoms = translate(&system.atoms, &config.displacement);
        info!("Translated {} atom(s).", atoms.len());
        reporter.report(Progress::PhaseFinish);
        atoms
    } else {
        info!("Atom translation disabled; positions left unchanged.");
        system.atoms.clone()
    };

    // === Phase 4: Periodic boundary regeneration ===
    let grid = reporter.phase("Rebuilding periodic boundary", || {
        expand_periodic_boundary(&shifted, *system.grid.origin(), *system.grid.span())
    })?;

    Ok(ShiftResult {
        system: PeriodicSystem::new(system.lattice, atoms, grid),
        fractional_offset,
        index_offset,
        remainder,
    })
}
