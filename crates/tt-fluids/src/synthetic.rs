//! Closed-form synthetic fluid backend.
//!
//! A toy equation of state with a Clausius–Clapeyron style saturation line,
//! constant heat capacities and a latent heat that vanishes at the critical
//! point. It reproduces the failure structure a real solver shows (no forced
//! phase above the critical pressure, no single-phase state inside the dome)
//! while staying deterministic, and supports injected faults for exercising
//! the sampling logic.

use crate::backend::{EosBackend, EosProvider, SaturationReading};
use crate::error::{FluidError, FluidResult};
use crate::phase::{ForcedPhase, Property};

/// Enthalpy/entropy reference temperature [K].
const T_REF_K: f64 = 273.15;

/// Parameters of a synthetic fluid.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticFluid {
    /// Critical temperature [K]
    pub t_critical_k: f64,
    /// Critical pressure [Pa]
    pub p_critical_pa: f64,
    /// `a` in `T_bubble = Tc / (1 + a·ln(pc/p))`
    pub clapeyron_slope: f64,
    /// Dew minus bubble temperature at zero pressure [K], shrinking to 0 at pc
    pub glide_k: f64,
    /// Latent heat at zero pressure [J/kg], scaled by `sqrt(1 - p/pc)`
    pub latent_heat_j_per_kg: f64,
    /// Liquid heat capacity [J/(kg·K)]
    pub cp_liquid: f64,
    /// Vapor heat capacity [J/(kg·K)]
    pub cp_vapor: f64,
    /// When false, `critical_pressure()` fails.
    pub report_critical_pressure: bool,
    /// Pressure band [Pa] in which the dew point (quality 1) cannot be resolved.
    pub dew_failure: Option<(f64, f64)>,
    /// Quality whose saturation temperature comes back as NaN.
    pub unresolved_quality: Option<f64>,
}

impl SyntheticFluid {
    pub fn water_like() -> Self {
        Self {
            t_critical_k: 647.096,
            p_critical_pa: 22.064e6,
            clapeyron_slope: 0.136,
            glide_k: 0.0,
            latent_heat_j_per_kg: 2.5e6,
            cp_liquid: 4180.0,
            cp_vapor: 2000.0,
            report_critical_pressure: true,
            dew_failure: None,
            unresolved_quality: None,
        }
    }

    pub fn r410a_like() -> Self {
        Self {
            t_critical_k: 344.494,
            p_critical_pa: 4.9012e6,
            clapeyron_slope: 0.142,
            glide_k: 0.1,
            latent_heat_j_per_kg: 2.7e5,
            cp_liquid: 1400.0,
            cp_vapor: 900.0,
            report_critical_pressure: true,
            dew_failure: None,
            unresolved_quality: None,
        }
    }

    pub fn with_glide(mut self, glide_k: f64) -> Self {
        self.glide_k = glide_k;
        self
    }

    pub fn with_dew_failure_between(mut self, p_low_pa: f64, p_high_pa: f64) -> Self {
        self.dew_failure = Some((p_low_pa, p_high_pa));
        self
    }

    pub fn with_unresolved_quality(mut self, quality: f64) -> Self {
        self.unresolved_quality = Some(quality);
        self
    }

    pub fn without_critical_pressure(mut self) -> Self {
        self.report_critical_pressure = false;
        self
    }

    pub fn into_state(self) -> SyntheticState {
        SyntheticState::new(self)
    }

    fn is_subcritical(&self, p_pa: f64) -> bool {
        p_pa < self.p_critical_pa
    }

    /// Bubble and dew temperature [K] at a subcritical pressure.
    pub fn saturation_temperatures(&self, p_pa: f64) -> FluidResult<(f64, f64)> {
        if !(p_pa > 0.0 && self.is_subcritical(p_pa)) {
            return Err(FluidError::backend(format!(
                "no saturation state at P={p_pa} Pa"
            )));
        }
        let t_bubble =
            self.t_critical_k / (1.0 + self.clapeyron_slope * (self.p_critical_pa / p_pa).ln());
        let t_dew = t_bubble + self.glide_k * (1.0 - p_pa / self.p_critical_pa);
        Ok((t_bubble, t_dew))
    }

    /// Latent heat [J/kg] at a subcritical pressure.
    pub fn latent_heat(&self, p_pa: f64) -> f64 {
        self.latent_heat_j_per_kg * (1.0 - p_pa / self.p_critical_pa).max(0.0).sqrt()
    }

    fn liquid(&self, t_k: f64) -> (f64, f64) {
        (
            self.cp_liquid * (t_k - T_REF_K),
            self.cp_liquid * (t_k / T_REF_K).ln(),
        )
    }

    fn vapor(&self, t_k: f64, p_pa: f64, t_bubble: f64, t_dew: f64) -> (f64, f64) {
        let (h_bubble, s_bubble) = self.liquid(t_bubble);
        let latent = self.latent_heat(p_pa);
        (
            h_bubble + latent + self.cp_vapor * (t_k - t_dew),
            s_bubble + latent / t_bubble + self.cp_vapor * (t_k / t_dew).ln(),
        )
    }

    fn supercritical(&self, t_k: f64) -> (f64, f64) {
        let tc = self.t_critical_k;
        if t_k < tc {
            self.liquid(t_k)
        } else {
            let (h_c, s_c) = self.liquid(tc);
            (
                h_c + self.cp_vapor * (t_k - tc),
                s_c + self.cp_vapor * (t_k / tc).ln(),
            )
        }
    }

    /// (h, s) in SI at (P, T), honouring an optional phase constraint.
    fn evaluate_pt(
        &self,
        p_pa: f64,
        t_k: f64,
        phase: Option<ForcedPhase>,
    ) -> FluidResult<(f64, f64)> {
        if !(p_pa.is_finite() && p_pa > 0.0) {
            return Err(FluidError::InvalidArg {
                what: "pressure must be positive and finite",
            });
        }
        if !(t_k.is_finite() && t_k > 0.0) {
            return Err(FluidError::InvalidArg {
                what: "temperature must be positive and finite",
            });
        }

        if !self.is_subcritical(p_pa) {
            return match phase {
                None => Ok(self.supercritical(t_k)),
                Some(_) => Err(FluidError::backend(format!(
                    "phase forcing inconsistent with supercritical state P={p_pa} Pa"
                ))),
            };
        }

        let (t_bubble, t_dew) = self.saturation_temperatures(p_pa)?;
        let liquid_ok = t_k <= t_bubble;
        let vapor_ok = t_k >= t_dew;
        match phase {
            Some(ForcedPhase::Liquid) if liquid_ok => Ok(self.liquid(t_k)),
            Some(ForcedPhase::Gas) if vapor_ok => Ok(self.vapor(t_k, p_pa, t_bubble, t_dew)),
            Some(forced) => Err(FluidError::backend(format!(
                "{forced:?} phase not defined at T={t_k} K, P={p_pa} Pa"
            ))),
            None if liquid_ok => Ok(self.liquid(t_k)),
            None if vapor_ok => Ok(self.vapor(t_k, p_pa, t_bubble, t_dew)),
            None => Err(FluidError::backend(format!(
                "PT inputs inside the two-phase region at T={t_k} K, P={p_pa} Pa"
            ))),
        }
    }

    fn evaluate_pq(&self, p_pa: f64, quality: f64) -> FluidResult<SaturationReading> {
        if !(0.0..=1.0).contains(&quality) {
            return Err(FluidError::InvalidArg {
                what: "quality must be in [0, 1]",
            });
        }
        if let Some((low, high)) = self.dew_failure
            && quality == 1.0
            && (low..=high).contains(&p_pa)
        {
            return Err(FluidError::backend(format!(
                "dew point did not converge at P={p_pa} Pa"
            )));
        }

        let (t_bubble, t_dew) = self.saturation_temperatures(p_pa)?;
        let (h_bubble, _) = self.liquid(t_bubble);
        let mut temperature_k = t_bubble + quality * (t_dew - t_bubble);
        if self
            .unresolved_quality
            .is_some_and(|q| (q - quality).abs() < 1e-12)
        {
            temperature_k = f64::NAN;
        }
        Ok(SaturationReading {
            temperature_k,
            enthalpy_j_per_kg: h_bubble + quality * self.latent_heat(p_pa),
        })
    }
}

/// Stateful handle on a [`SyntheticFluid`], mirroring a solver handle.
#[derive(Debug, Clone)]
pub struct SyntheticState {
    fluid: SyntheticFluid,
    phase: Option<ForcedPhase>,
    reject_forcing: bool,
    current: Option<(f64, f64)>,
    last_p_pa: Option<f64>,
    poison_p_pa: Option<f64>,
    updates: usize,
}

impl SyntheticState {
    pub fn new(fluid: SyntheticFluid) -> Self {
        Self {
            fluid,
            phase: None,
            reject_forcing: false,
            current: None,
            last_p_pa: None,
            poison_p_pa: None,
            updates: 0,
        }
    }

    pub fn fluid(&self) -> &SyntheticFluid {
        &self.fluid
    }

    /// Phase constraint currently applied to the handle.
    pub fn current_phase(&self) -> Option<ForcedPhase> {
        self.phase
    }

    /// Number of (P, T) updates attempted so far, failed ones included.
    pub fn update_count(&self) -> usize {
        self.updates
    }

    /// Make every `specify_phase` call fail.
    pub fn reject_phase_forcing(&mut self, reject: bool) {
        self.reject_forcing = reject;
    }

    /// Return NaN properties for states updated at exactly this pressure.
    pub fn poison_property_at(&mut self, p_pa: f64) {
        self.poison_p_pa = Some(p_pa);
    }
}

impl EosBackend for SyntheticState {
    fn critical_temperature(&self) -> FluidResult<f64> {
        Ok(self.fluid.t_critical_k)
    }

    fn critical_pressure(&self) -> FluidResult<f64> {
        if self.fluid.report_critical_pressure {
            Ok(self.fluid.p_critical_pa)
        } else {
            Err(FluidError::backend("critical pressure not available"))
        }
    }

    fn specify_phase(&mut self, phase: ForcedPhase) -> FluidResult<()> {
        if self.reject_forcing {
            return Err(FluidError::backend("phase specification rejected"));
        }
        self.phase = Some(phase);
        Ok(())
    }

    fn unspecify_phase(&mut self) {
        self.phase = None;
    }

    fn update_pt(&mut self, p_pa: f64, t_k: f64) -> FluidResult<()> {
        self.updates += 1;
        self.last_p_pa = Some(p_pa);
        self.current = None;
        self.current = Some(self.fluid.evaluate_pt(p_pa, t_k, self.phase)?);
        Ok(())
    }

    fn mass_property(&self, property: Property) -> FluidResult<f64> {
        let (h, s) = self.current.ok_or(FluidError::InvalidArg {
            what: "no valid state to read from",
        })?;
        if self.poison_p_pa.is_some() && self.poison_p_pa == self.last_p_pa {
            return Ok(f64::NAN);
        }
        Ok(match property {
            Property::Enthalpy => h,
            Property::Entropy => s,
        })
    }

    fn saturation_state(&mut self, p_pa: f64, quality: f64) -> FluidResult<SaturationReading> {
        self.current = None;
        self.fluid.evaluate_pq(p_pa, quality)
    }
}

/// Provider serving a fixed set of named synthetic fluids.
#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider {
    fluids: Vec<(String, SyntheticFluid)>,
    unavailable: bool,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider knowing "Water" and "R410A".
    pub fn standard() -> Self {
        Self::new()
            .with_fluid("Water", SyntheticFluid::water_like())
            .with_fluid("R410A", SyntheticFluid::r410a_like())
    }

    /// Provider whose `probe` fails.
    pub fn unavailable() -> Self {
        Self {
            fluids: Vec::new(),
            unavailable: true,
        }
    }

    pub fn with_fluid(mut self, backend_name: impl Into<String>, fluid: SyntheticFluid) -> Self {
        let backend_name = backend_name.into();
        self.fluids.retain(|(name, _)| *name != backend_name);
        self.fluids.push((backend_name, fluid));
        self
    }
}

impl EosProvider for SyntheticProvider {
    type Handle = SyntheticState;

    fn name(&self) -> &str {
        "Synthetic"
    }

    fn qualified_name(&self, backend_name: &str) -> String {
        format!("SYN::{backend_name}")
    }

    fn probe(&self) -> FluidResult<()> {
        if self.unavailable {
            return Err(FluidError::Unavailable {
                message: "synthetic backend disabled".to_string(),
            });
        }
        Ok(())
    }

    fn open(&self, backend_name: &str) -> FluidResult<SyntheticState> {
        self.fluids
            .iter()
            .find(|(name, _)| name == backend_name)
            .map(|(_, fluid)| SyntheticState::new(fluid.clone()))
            .ok_or_else(|| FluidError::Init {
                name: backend_name.to_string(),
                message: "unknown synthetic fluid".to_string(),
            })
    }
}
