//! Saturation curve and two-phase (pressure × quality) surface.

use crate::TablesResult;
use crate::config::SaturationConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tt_core::units::{j_to_kj, pa_to_log10_bar};
use tt_core::{finite_or_none, geomspace, linspace};
use tt_fluids::{EosBackend, PhaseGuard, PhaseTag};

/// One accepted saturation level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaturationPoint {
    /// Pressure [Pa]
    #[serde(rename = "P")]
    pub pressure_pa: f64,
    /// Bubble point temperature [K]
    #[serde(rename = "TL")]
    pub bubble_temperature_k: f64,
    /// Dew point temperature [K]
    #[serde(rename = "TV")]
    pub dew_temperature_k: f64,
    /// Mean of bubble and dew temperature [K]
    #[serde(rename = "T")]
    pub mean_temperature_k: f64,
    /// Bubble point enthalpy [kJ/kg]
    #[serde(rename = "hL")]
    pub bubble_enthalpy_kj: f64,
    /// Dew point enthalpy [kJ/kg]
    #[serde(rename = "hV")]
    pub dew_enthalpy_kj: f64,
}

/// Temperature and enthalpy over (quality × pressure), indexed `[q][p]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoPhaseSurface {
    #[serde(rename = "q")]
    pub quality: Vec<f64>,
    #[serde(rename = "logPbar")]
    pub log_p_bar: Vec<f64>,
    #[serde(rename = "T")]
    pub temperature_k: Vec<Vec<Option<f64>>>,
    /// kJ/kg
    #[serde(rename = "h")]
    pub enthalpy_kj: Vec<Vec<Option<f64>>>,
}

impl TwoPhaseSurface {
    /// Surface with a quality axis and no pressure columns.
    pub fn empty(quality: Vec<f64>) -> Self {
        let rows = quality.len();
        Self {
            quality,
            log_p_bar: Vec::new(),
            temperature_k: vec![Vec::new(); rows],
            enthalpy_kj: vec![Vec::new(); rows],
        }
    }

    /// Append the column for one pressure level.
    ///
    /// `column` holds one `(T, h)` reading per quality.
    fn push_column(&mut self, log_p_bar: f64, column: &[(Option<f64>, Option<f64>)]) {
        self.log_p_bar.push(log_p_bar);
        for ((t_row, h_row), &(t, h)) in self
            .temperature_k
            .iter_mut()
            .zip(self.enthalpy_kj.iter_mut())
            .zip(column)
        {
            t_row.push(t);
            h_row.push(h);
        }
    }

    pub fn column_count(&self) -> usize {
        self.log_p_bar.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaturationData {
    /// Accepted levels by increasing pressure
    pub points: Vec<SaturationPoint>,
    pub two_phase: TwoPhaseSurface,
}

/// Saturation pressure ladder [Pa], or `None` when it cannot be built.
fn pressure_ladder(p_critical_pa: Option<f64>, cfg: &SaturationConfig) -> TablesResult<Option<Vec<f64>>> {
    let Some(pc) = p_critical_pa.filter(|p| p.is_finite() && *p > 0.0) else {
        return Ok(None);
    };
    let (low, high) = cfg.pressure_bounds(pc);
    if low >= high {
        return Ok(None);
    }
    Ok(Some(geomspace(low, high, cfg.pressure_points)?))
}

/// Sample the saturation curve and two-phase surface.
///
/// Pressure levels where either endpoint (quality 0 or 1) does not resolve
/// are dropped from both outputs. Unresolved interior qualities become
/// absent cells.
pub fn build_saturation<B: EosBackend + ?Sized>(
    backend: &mut B,
    p_critical_pa: Option<f64>,
    cfg: &SaturationConfig,
) -> TablesResult<SaturationData> {
    let quality = linspace(0.0, 1.0, cfg.quality_points)?;
    let mut two_phase = TwoPhaseSurface::empty(quality.clone());
    let mut points = Vec::new();

    let Some(pressures) = pressure_ladder(p_critical_pa, cfg)? else {
        debug!(?p_critical_pa, "saturation ladder unavailable");
        return Ok(SaturationData { points, two_phase });
    };

    let mut guard = PhaseGuard::acquire(backend, PhaseTag::Unconstrained)?;
    let mut column = Vec::with_capacity(quality.len());

    for &p_pa in &pressures {
        column.clear();
        for &q in &quality {
            let reading = match guard.saturation_state(p_pa, q) {
                Ok(r) => (
                    finite_or_none(r.temperature_k),
                    finite_or_none(r.enthalpy_j_per_kg).map(j_to_kj),
                ),
                Err(err) => {
                    debug!(p_pa, q, error = %err, "saturation reading unresolved");
                    (None, None)
                }
            };
            column.push(reading);
        }

        let endpoints = (column.first().copied(), column.last().copied());
        let (Some((Some(t_l), Some(h_l))), Some((Some(t_v), Some(h_v)))) = endpoints else {
            debug!(p_pa, "discarding saturation level with unresolved endpoint");
            continue;
        };

        points.push(SaturationPoint {
            pressure_pa: p_pa,
            bubble_temperature_k: t_l,
            dew_temperature_k: t_v,
            mean_temperature_k: 0.5 * (t_l + t_v),
            bubble_enthalpy_kj: h_l,
            dew_enthalpy_kj: h_v,
        });
        two_phase.push_column(pa_to_log10_bar(p_pa), &column);
    }

    Ok(SaturationData { points, two_phase })
}
