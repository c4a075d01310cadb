use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use xsfshift::engine::progress::{Progress, ProgressCallback};

const SPINNER_TICK: Duration = Duration::from_millis(80);
const PHASE_TEMPLATE: &str = "{prefix:.bold.dim} {spinner:.green} {msg}";
const PLANE_TEMPLATE: &str =
    "{prefix:.bold.dim} {msg} [{bar:32.cyan/blue}] {pos}/{len} z-planes";

/// Terminal view of a shift run: a spinner per workflow phase, switching to a bar over
/// z-planes while the density is being shifted.
///
/// Notices from the workflow are printed above the bar, and every finished phase leaves a
/// `✓` line behind.
#[derive(Clone)]
pub struct ShiftProgress {
    bar: ProgressBar,
    completed: Arc<AtomicUsize>,
}

impl ShiftProgress {
    pub fn stderr() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Tracks events without drawing anything.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(phase_style());
        Self {
            bar,
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn completed_phases(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        let completed = self.completed.clone();

        Box::new(move |event| match event {
            Progress::PhaseStart { name } => {
                let step = completed.load(Ordering::Relaxed) + 1;
                bar.set_style(phase_style());
                bar.set_prefix(format!("[{step}]"));
                bar.set_message(name);
                bar.enable_steady_tick(SPINNER_TICK);
            }
            Progress::TaskStart { total_steps } => {
                bar.disable_steady_tick();
                bar.set_style(plane_style());
                bar.set_length(total_steps);
                bar.set_position(0);
            }
            Progress::TaskAdvance { steps } => bar.inc(steps),
            Progress::TaskFinish => bar.set_style(phase_style()),
            Progress::PhaseFinish => {
                bar.disable_steady_tick();
                completed.fetch_add(1, Ordering::Relaxed);
                bar.println(format!("  ✓ {}", bar.message()));
            }
            Progress::Message(notice) => bar.println(format!("  ! {notice}")),
        })
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn phase_style() -> ProgressStyle {
    ProgressStyle::with_template(PHASE_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn plane_style() -> ProgressStyle {
    ProgressStyle::with_template(PLANE_TEMPLATE)
        .map(|style| style.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
