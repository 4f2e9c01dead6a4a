//! CoolProp backend via `rfluids`.

use crate::backend::{EosBackend, EosProvider, SaturationReading};
use crate::error::{FluidError, FluidResult};
use crate::phase::{ForcedPhase, Property};
use rfluids::io::{FluidInputPair, FluidParam, FluidTrivialParam, Phase};
use rfluids::native::AbstractState;
use std::any::Any;
use std::fmt;
use std::panic::{self, UnwindSafe};

/// Helmholtz-energy equation-of-state backend.
pub const HEOS: &str = "HEOS";

/// Fluid used to check that the CoolProp library is usable.
const PROBE_FLUID: &str = "Water";

fn backend_err(context: &str, err: impl std::fmt::Display) -> FluidError {
    FluidError::Backend {
        message: format!("{context}: {err}"),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "backend panicked".to_string()
    }
}

/// Run a native-library call, turning a panic into an error message.
///
/// The shared library is loaded lazily on first use and a failed load
/// panics instead of returning an error.
fn catch_native<T, E: fmt::Display>(
    op: impl FnOnce() -> Result<T, E> + UnwindSafe,
) -> Result<T, String> {
    match panic::catch_unwind(op) {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

/// Opens CoolProp `AbstractState` handles.
#[derive(Debug, Clone)]
pub struct CoolPropProvider {
    backend: &'static str,
}

impl CoolPropProvider {
    /// Create a provider for the HEOS backend.
    pub fn new() -> Self {
        Self { backend: HEOS }
    }
}

impl Default for CoolPropProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EosProvider for CoolPropProvider {
    type Handle = CoolPropState;

    fn name(&self) -> &str {
        "CoolProp"
    }

    fn qualified_name(&self, backend_name: &str) -> String {
        format!("{}::{}", self.backend, backend_name)
    }

    fn probe(&self) -> FluidResult<()> {
        let backend = self.backend;
        catch_native(|| AbstractState::new(backend, PROBE_FLUID).map(|_| ())).map_err(|message| {
            FluidError::Unavailable {
                message: format!("cannot create {backend}::{PROBE_FLUID}: {message}"),
            }
        })
    }

    fn open(&self, backend_name: &str) -> FluidResult<CoolPropState> {
        let backend = self.backend;
        let state = catch_native(|| AbstractState::new(backend, backend_name)).map_err(|message| {
            FluidError::Init {
                name: self.qualified_name(backend_name),
                message,
            }
        })?;
        Ok(CoolPropState { state })
    }
}

/// A CoolProp `AbstractState` for one fluid.
///
/// The handle is stateful: the last update and any imposed phase persist
/// between calls.
pub struct CoolPropState {
    state: AbstractState,
}

impl EosBackend for CoolPropState {
    fn critical_temperature(&self) -> FluidResult<f64> {
        self.state
            .keyed_output(FluidTrivialParam::TCritical)
            .map_err(|e| backend_err("critical temperature", e))
    }

    fn critical_pressure(&self) -> FluidResult<f64> {
        self.state
            .keyed_output(FluidTrivialParam::PCritical)
            .map_err(|e| backend_err("critical pressure", e))
    }

    fn specify_phase(&mut self, phase: ForcedPhase) -> FluidResult<()> {
        let phase = match phase {
            ForcedPhase::Liquid => Phase::Liquid,
            ForcedPhase::Gas => Phase::Gas,
        };
        self.state
            .specify_phase(phase)
            .map_err(|e| backend_err("specify phase", e))
    }

    fn unspecify_phase(&mut self) {
        self.state.unspecify_phase();
    }

    fn update_pt(&mut self, p_pa: f64, t_k: f64) -> FluidResult<()> {
        self.state
            .update(FluidInputPair::PT, p_pa, t_k)
            .map_err(|e| FluidError::Backend {
                message: format!("PT update at P={p_pa} Pa, T={t_k} K: {e}"),
            })
    }

    fn mass_property(&self, property: Property) -> FluidResult<f64> {
        let param = match property {
            Property::Enthalpy => FluidParam::HMass,
            Property::Entropy => FluidParam::SMass,
        };
        self.state
            .keyed_output(param)
            .map_err(|e| backend_err(property.label(), e))
    }

    fn saturation_state(&mut self, p_pa: f64, quality: f64) -> FluidResult<SaturationReading> {
        self.state
            .update(FluidInputPair::PQ, p_pa, quality)
            .map_err(|e| FluidError::Backend {
                message: format!("PQ update at P={p_pa} Pa, Q={quality}: {e}"),
            })?;
        let temperature_k = self
            .state
            .keyed_output(FluidParam::T)
            .map_err(|e| backend_err("saturation temperature", e))?;
        let enthalpy_j_per_kg = self
            .state
            .keyed_output(FluidParam::HMass)
            .map_err(|e| backend_err("saturation enthalpy", e))?;
        Ok(SaturationReading {
            temperature_k,
            enthalpy_j_per_kg,
        })
    }
}
