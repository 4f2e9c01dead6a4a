//! Batch table generation.

use crate::config::GeneratorConfig;
use crate::grid::build_phase_grids;
use crate::saturation::build_saturation;
use crate::store::{FluidIndex, TableStore, check_key};
use crate::table::{Axes, FluidTable};
use crate::{TablesError, TablesResult};
use tracing::{debug, info, warn};
use tt_core::timing::StageTiming;
use tt_core::{Axis, Timer};
use tt_fluids::{EosProvider, FluidError, FluidSpec};

/// A fluid left out of a run, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFluid {
    pub key: String,
    pub reason: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Keys written this run, in processing order
    pub written: Vec<String>,
    pub skipped: Vec<SkippedFluid>,
    /// Index rebuilt from disk after the run
    pub index: FluidIndex,
    pub grid_timing: StageTiming,
    pub saturation_timing: StageTiming,
}

/// Generates property tables for fluids served by one provider.
pub struct TableGenerator<P: EosProvider> {
    provider: P,
    config: GeneratorConfig,
    generated_by: String,
}

struct Generated {
    table: FluidTable,
    grid_s: f64,
    saturation_s: f64,
}

impl<P: EosProvider> TableGenerator<P> {
    pub fn new(provider: P, config: GeneratorConfig) -> TablesResult<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            config,
            generated_by: format!("tt-tables {}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Override the `generatedBy` tag written into every table.
    pub fn with_generated_by(mut self, tag: impl Into<String>) -> Self {
        self.generated_by = tag.into();
        self
    }

    /// Temperature and log-pressure axes for a fluid.
    pub fn axes_for(&self, fluid: &FluidSpec) -> TablesResult<Axes> {
        let grid = &self.config.grid;
        let tc = fluid.critical_temperature_k;
        Ok(Axes {
            temperature_k: Axis::linear(
                grid.t_min_over_tc * tc,
                grid.t_max_over_tc * tc,
                grid.temperature_points,
            )?,
            log_p_bar: Axis::linear(grid.log_p_min_bar, grid.log_p_max_bar, grid.pressure_points)?,
        })
    }

    /// Build and validate the table for one key without writing it.
    pub fn generate(&self, key: &str) -> TablesResult<FluidTable> {
        Ok(self.generate_timed(key)?.table)
    }

    fn generate_timed(&self, key: &str) -> TablesResult<Generated> {
        let (fluid, mut handle) = FluidSpec::open(&self.provider, key)?;
        info!(
            fluid = key,
            backend = %fluid.qualified_name,
            tc_k = fluid.critical_temperature_k,
            pc_pa = ?fluid.critical_pressure_pa,
            "generating table"
        );

        let axes = self.axes_for(&fluid)?;

        let timer = Timer::start("grid");
        let grids = build_phase_grids(&mut handle, &axes.temperature_k, &axes.log_p_bar);
        let grid_s = timer.stop();
        let [h_vap, h_liq, s_vap, s_liq] = grids.resolved_counts();
        debug!(fluid = key, h_vap, h_liq, s_vap, s_liq, grid_s, "grids built");

        let timer = Timer::start("saturation");
        let saturation = build_saturation(
            &mut handle,
            fluid.critical_pressure_pa,
            &self.config.saturation,
        )?;
        let saturation_s = timer.stop();

        let table = FluidTable::assemble(
            self.provider.name(),
            &self.generated_by,
            &fluid,
            axes,
            grids,
            saturation,
        );
        table.validate()?;
        Ok(Generated {
            table,
            grid_s,
            saturation_s,
        })
    }

    /// Generate and save tables for `keys`, then rebuild the index.
    ///
    /// With no keys, every table already in `store` is regenerated. Fluids
    /// the backend cannot open and keys that do not name a single table file
    /// are skipped; storage failures abort the run.
    pub fn run(&self, keys: &[String], store: &TableStore) -> TablesResult<RunSummary> {
        self.provider.probe().map_err(|e| match e {
            FluidError::Unavailable { message } => TablesError::BackendUnavailable { message },
            other => TablesError::BackendUnavailable {
                message: other.to_string(),
            },
        })?;

        let keys = if keys.is_empty() {
            let discovered = store.list_keys()?;
            info!(count = discovered.len(), dir = %store.root_dir().display(), "refreshing existing tables");
            discovered
        } else {
            keys.to_vec()
        };
        if keys.is_empty() {
            return Err(TablesError::NoFluidsResolved {
                dir: store.root_dir().to_path_buf(),
            });
        }

        let mut summary = RunSummary::default();
        for key in &keys {
            let generated = match check_key(key).and_then(|()| self.generate_timed(key)) {
                Ok(generated) => generated,
                Err(
                    err @ (TablesError::InvalidKey { .. }
                    | TablesError::Fluid(_)
                    | TablesError::Numeric(_)
                    | TablesError::InvalidTable { .. }),
                ) => {
                    warn!(fluid = %key, error = %err, "skipping fluid");
                    summary.skipped.push(SkippedFluid {
                        key: key.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
                Err(err) => return Err(err),
            };

            let path = store.save_table(&generated.table)?;
            summary.grid_timing.record(generated.grid_s);
            summary.saturation_timing.record(generated.saturation_s);
            info!(
                fluid = %key,
                coverage = %generated.table.coverage(),
                saturation_levels = generated.table.saturation.len(),
                grid_s = generated.grid_s,
                saturation_s = generated.saturation_s,
                path = %path.display(),
                "table written"
            );
            summary.written.push(key.clone());
        }

        summary.index = store.write_index()?;
        info!(
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            indexed = summary.index.fluids.len(),
            "run complete"
        );
        Ok(summary)
    }
}
