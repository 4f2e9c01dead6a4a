//! tt-tables: offline property table generation.
//!
//! Turns single-point equation-of-state queries into gap-tolerant
//! temperature × pressure grids plus a saturation curve and a
//! (pressure × quality) two-phase surface, and persists them as versioned
//! JSON tables with a derived fluid index.

pub mod config;
pub mod generator;
pub mod grid;
pub mod saturation;
pub mod store;
pub mod table;

pub use config::{GeneratorConfig, GridConfig, SaturationConfig};
pub use generator::{RunSummary, SkippedFluid, TableGenerator};
pub use grid::{PhaseGrids, PropertyGrid, build_phase_grids};
pub use saturation::{SaturationData, SaturationPoint, TwoPhaseSurface, build_saturation};
pub use store::{FluidIndex, TableStore};
pub use table::{Axes, FluidTable, GridCoverage, SCHEMA_VERSION};

pub type TablesResult<T> = Result<T, TablesError>;

#[derive(thiserror::Error, Debug)]
pub enum TablesError {
    #[error("Equation-of-state backend unavailable: {message}")]
    BackendUnavailable { message: String },

    #[error("No fluid keys given and no tables found in {dir}")]
    NoFluidsResolved { dir: std::path::PathBuf },

    #[error("Invalid configuration: {what}")]
    Config { what: String },

    #[error("Invalid table: {what}")]
    InvalidTable { what: String },

    #[error("Invalid fluid key: {key:?}")]
    InvalidKey { key: String },

    #[error("Table not found: {key}")]
    TableNotFound { key: String },

    #[error("Fluid error: {0}")]
    Fluid(#[from] tt_fluids::FluidError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] tt_core::TtError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
