use crate::cli::ShiftArgs;
use crate::error::{CliError, Result};
use crate::utils::paths;
use nalgebra::Vector3;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use xsfshift::core::utils::geometry::OffsetPolicy;
use xsfshift::engine::config::{ShiftConfig, ShiftConfigBuilder};

pub const DEFAULT_OUTPUT_SUFFIX: &str = "_shifted";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialShiftSection {
    #[serde(rename = "offset-policy")]
    offset_policy: Option<OffsetPolicy>,
    #[serde(rename = "translate-atoms")]
    translate_atoms: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputSection {
    suffix: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialShiftConfig {
    shift: Option<PartialShiftSection>,
    output: Option<PartialOutputSection>,
}

/// Everything the `shift` command needs after merging the config file and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedShift {
    pub core: ShiftConfig,
    pub output_path: PathBuf,
}

impl PartialShiftConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(self, args: &ShiftArgs) -> Result<ResolvedShift> {
        let shift = self.shift.unwrap_or_default();
        let output = self.output.unwrap_or_default();

        let displacement = match args.displacement.as_slice() {
            &[dx, dy, dz] => Vector3::new(dx, dy, dz),
            other => {
                return Err(CliError::Argument(format!(
                    "Displacement needs exactly 3 components, got {}.",
                    other.len()
                )));
            }
        };

        let offset_policy = if args.round {
            OffsetPolicy::Round
        } else {
            shift.offset_policy.unwrap_or_default()
        };
        let translate_atoms = !args.no_atoms && shift.translate_atoms.unwrap_or(true);

        let suffix = output
            .suffix
            .unwrap_or_else(|| DEFAULT_OUTPUT_SUFFIX.to_string());
        if suffix.is_empty() && args.output.is_none() {
            return Err(CliError::Config(
                "`output.suffix` may not be empty unless an explicit output path is given."
                    .to_string(),
            ));
        }
        let output_path = match &args.output {
            Some(path) => path.clone(),
            None => paths::derive_output_path(&args.input, &suffix),
        };

        let core = ShiftConfigBuilder::new()
            .displacement(displacement)
            .offset_policy(offset_policy)
            .translate_atoms(translate_atoms)
            .build()
            .map_err(|e| CliError::Argument(e.to_string()))?;

        Ok(ResolvedShift { core, output_path })
    }
}
