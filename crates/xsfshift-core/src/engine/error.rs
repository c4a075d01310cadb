use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::grid::GridError;
use crate::core::utils::geometry::GeometryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Grid axis {axis} has {count} sample(s); a periodic grid needs at least 2")]
    GridTooSmall { axis: usize, count: usize },

    #[error("Invalid grid: {0}")]
    Grid(#[from] GridError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
