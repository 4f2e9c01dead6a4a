//! Versioned per-fluid table and its JSON form.

use crate::grid::{PhaseGrids, PropertyGrid};
use crate::saturation::{SaturationData, SaturationPoint, TwoPhaseSurface};
use crate::{TablesError, TablesResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tt_core::units::pa_to_log10_bar;
use tt_core::{Axis, Tolerances, is_non_decreasing, is_strictly_increasing, nearly_equal};
use tt_fluids::FluidSpec;

/// Wire format version understood by the diagram consumer.
pub const SCHEMA_VERSION: u32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    /// Temperature [K]
    #[serde(rename = "T")]
    pub temperature_k: Axis,
    /// log10(p / bar)
    #[serde(rename = "logPbar")]
    pub log_p_bar: Axis,
}

/// Everything generated for one fluid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluidTable {
    #[serde(rename = "v")]
    pub schema_version: u32,
    pub source: String,
    pub generated_by: String,
    pub fluid_key: String,
    #[serde(rename = "coolprop")]
    pub backend_id: String,
    pub axes: Axes,
    pub h_vap: PropertyGrid,
    pub h_liq: PropertyGrid,
    pub s_vap: PropertyGrid,
    pub s_liq: PropertyGrid,
    #[serde(rename = "sat")]
    pub saturation: Vec<SaturationPoint>,
    pub two_phase: TwoPhaseSurface,
}

/// Resolved cells over all four property grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCoverage {
    pub resolved: usize,
    pub total: usize,
}

impl GridCoverage {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.resolved as f64 / self.total as f64
        }
    }
}

impl fmt::Display for GridCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} cells ({:.1}%)",
            self.resolved,
            self.total,
            100.0 * self.fraction()
        )
    }
}

fn invalid(what: impl Into<String>) -> TablesError {
    TablesError::InvalidTable { what: what.into() }
}

fn cells_finite(rows: &[Vec<Option<f64>>]) -> bool {
    rows.iter().flatten().flatten().all(|v| v.is_finite())
}

impl FluidTable {
    pub fn assemble(
        source: &str,
        generated_by: &str,
        fluid: &FluidSpec,
        axes: Axes,
        grids: PhaseGrids,
        saturation: SaturationData,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            source: source.to_string(),
            generated_by: generated_by.to_string(),
            fluid_key: fluid.key.clone(),
            backend_id: fluid.qualified_name.clone(),
            axes,
            h_vap: grids.vapor_enthalpy,
            h_liq: grids.liquid_enthalpy,
            s_vap: grids.vapor_entropy,
            s_liq: grids.liquid_entropy,
            saturation: saturation.points,
            two_phase: saturation.two_phase,
        }
    }

    fn grids(&self) -> [(&'static str, &PropertyGrid); 4] {
        [
            ("hVap", &self.h_vap),
            ("hLiq", &self.h_liq),
            ("sVap", &self.s_vap),
            ("sLiq", &self.s_liq),
        ]
    }

    pub fn coverage(&self) -> GridCoverage {
        self.grids()
            .iter()
            .fold(GridCoverage { resolved: 0, total: 0 }, |acc, (_, grid)| GridCoverage {
                resolved: acc.resolved + grid.resolved_count(),
                total: acc.total + grid.cell_count(),
            })
    }

    /// Check every structural invariant of the table.
    pub fn validate(&self) -> TablesResult<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(invalid(format!(
                "schema version {} (expected {SCHEMA_VERSION})",
                self.schema_version
            )));
        }
        if self.fluid_key.is_empty() {
            return Err(invalid("empty fluid key"));
        }

        for (name, axis) in [("T", &self.axes.temperature_k), ("logPbar", &self.axes.log_p_bar)] {
            if axis.is_empty() || !axis.is_monotonic() {
                return Err(invalid(format!("axis {name} must be non-empty, finite and increasing")));
            }
        }

        let (n_t, n_p) = (self.axes.temperature_k.len(), self.axes.log_p_bar.len());
        for (name, grid) in self.grids() {
            if !grid.has_shape(n_t, n_p) {
                return Err(invalid(format!("grid {name} is not {n_t}x{n_p}")));
            }
            if !grid.all_finite() {
                return Err(invalid(format!("grid {name} holds a non-finite value")));
            }
        }

        self.validate_saturation()?;
        self.validate_two_phase()
    }

    fn validate_saturation(&self) -> TablesResult<()> {
        for point in &self.saturation {
            let values = [
                point.pressure_pa,
                point.bubble_temperature_k,
                point.dew_temperature_k,
                point.mean_temperature_k,
                point.bubble_enthalpy_kj,
                point.dew_enthalpy_kj,
            ];
            if !values.iter().all(|v| v.is_finite()) || point.pressure_pa <= 0.0 {
                return Err(invalid(format!(
                    "saturation point at P={} Pa is not finite",
                    point.pressure_pa
                )));
            }
        }
        let pressures: Vec<f64> = self.saturation.iter().map(|p| p.pressure_pa).collect();
        if !is_strictly_increasing(&pressures) {
            return Err(invalid("saturation pressures must increase"));
        }
        Ok(())
    }

    fn validate_two_phase(&self) -> TablesResult<()> {
        let surface = &self.two_phase;
        if !surface.quality.iter().all(|q| q.is_finite() && (0.0..=1.0).contains(q))
            || !is_non_decreasing(&surface.quality)
        {
            return Err(invalid("two-phase qualities must be ordered within [0, 1]"));
        }

        if surface.log_p_bar.len() != self.saturation.len() {
            return Err(invalid(format!(
                "two-phase surface has {} pressures for {} saturation points",
                surface.log_p_bar.len(),
                self.saturation.len()
            )));
        }
        let tol = Tolerances::default();
        for (lp, point) in surface.log_p_bar.iter().zip(&self.saturation) {
            if !nearly_equal(*lp, pa_to_log10_bar(point.pressure_pa), tol) {
                return Err(invalid(format!(
                    "two-phase pressure {lp} does not match saturation point P={} Pa",
                    point.pressure_pa
                )));
            }
        }

        let (n_q, n_p) = (surface.quality.len(), surface.log_p_bar.len());
        for (name, rows) in [("T", &surface.temperature_k), ("h", &surface.enthalpy_kj)] {
            if rows.len() != n_q || rows.iter().any(|row| row.len() != n_p) {
                return Err(invalid(format!("two-phase surface {name} is not {n_q}x{n_p}")));
            }
            if !cells_finite(rows) {
                return Err(invalid(format!("two-phase surface {name} holds a non-finite value")));
            }
        }
        Ok(())
    }

    /// Validate and serialize to compact JSON.
    pub fn to_json(&self) -> TablesResult<String> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a persisted table. Does not validate.
    pub fn from_json(json: &str) -> TablesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
