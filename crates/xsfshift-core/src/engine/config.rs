use crate::core::utils::geometry::OffsetPolicy;
use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Displacement components must be finite numbers")]
    NonFiniteDisplacement,
}

/// Parameters of one shift run.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftConfig {
    /// Cartesian displacement in the units of the lattice (Angstrom for XSF).
    pub displacement: Vector3<f64>,
    pub offset_policy: OffsetPolicy,
    /// Whether atomic positions follow the density.
    pub translate_atoms: bool,
}

#[derive(Default)]
pub struct ShiftConfigBuilder {
    displacement: Option<Vector3<f64>>,
    offset_policy: Option<OffsetPolicy>,
    translate_atoms: Option<bool>,
}

impl ShiftConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn displacement(mut self, displacement: Vector3<f64>) -> Self {
        self.displacement = Some(displacement);
        self
    }
    pub fn offset_policy(mut self, policy: OffsetPolicy) -> Self {
        self.offset_policy = Some(policy);
        self
    }
    pub fn translate_atoms(mut self, enabled: bool) -> Self {
        self.translate_atoms = Some(enabled);
        self
    }

    pub fn build(self) -> Result<ShiftConfig, ConfigError> {
        let displacement = self
            .displacement
            .ok_or(ConfigError::MissingParameter("displacement"))?;
        if displacement.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::NonFiniteDisplacement);
        }
        Ok(ShiftConfig {
            displacement,
            offset_policy: self.offset_policy.unwrap_or_default(),
            translate_atoms: self.translate_atoms.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_applies_defaults() {
        let config = ShiftConfigBuilder::new()
            .displacement(Vector3::new(1.0, 2.0, 3.0))
            .build()
            .unwrap();
        assert_eq!(config.displacement, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(config.offset_policy, OffsetPolicy::Truncate);
        assert!(config.translate_atoms);
    }

    #[test]
    fn build_honours_overrides() {
        let config = ShiftConfigBuilder::new()
            .displacement(Vector3::zeros())
            .offset_policy(OffsetPolicy::Round)
            .translate_atoms(false)
            .build()
            .unwrap();
        assert_eq!(config.offset_policy, OffsetPolicy::Round);
        assert!(!config.translate_atoms);
    }

    #[test]
    fn build_requires_displacement() {
        assert_eq!(
            ShiftConfigBuilder::new().build().unwrap_err(),
            ConfigError::MissingParameter("displacement")
        );
    }

    #[test]
    fn build_rejects_non_finite_displacement() {
        let result = ShiftConfigBuilder::new()
            .displacement(Vector3::new(f64::NAN, 0.0, 0.0))
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::NonFiniteDisplacement);
    }
}
