//! Equation-of-state backend traits.

use crate::error::FluidResult;
use crate::phase::{ForcedPhase, Property};

/// Raw saturation reading at a given (pressure, quality), SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationReading {
    /// Temperature [K]
    pub temperature_k: f64,
    /// Specific enthalpy [J/kg]
    pub enthalpy_j_per_kg: f64,
}

/// A stateful single-fluid solver handle.
///
/// The phase constraint is sticky: once set it applies to every following
/// update until cleared. Callers go through [`crate::PhaseGuard`] rather than
/// pairing `specify_phase`/`unspecify_phase` by hand.
///
/// All values are SI (Pa, K, J/kg, J/(kg·K)).
pub trait EosBackend {
    /// Critical temperature [K].
    fn critical_temperature(&self) -> FluidResult<f64>;

    /// Critical pressure [Pa].
    fn critical_pressure(&self) -> FluidResult<f64>;

    /// Restrict following updates to a single bulk phase.
    fn specify_phase(&mut self, phase: ForcedPhase) -> FluidResult<()>;

    /// Remove any phase restriction. Must not fail.
    fn unspecify_phase(&mut self);

    /// Update the state from pressure and temperature.
    fn update_pt(&mut self, p_pa: f64, t_k: f64) -> FluidResult<()>;

    /// Read a mass-specific property of the current state.
    fn mass_property(&self, property: Property) -> FluidResult<f64>;

    /// Saturated state at a pressure and vapor quality in `[0, 1]`.
    ///
    /// Saturation states are defined by quality, so no phase constraint is
    /// involved.
    fn saturation_state(&mut self, p_pa: f64, quality: f64) -> FluidResult<SaturationReading>;
}

/// Factory for backend handles.
pub trait EosProvider {
    type Handle: EosBackend;

    /// Source identifier written into tables (e.g. "CoolProp").
    fn name(&self) -> &str;

    /// Fully qualified backend identifier for a fluid (e.g. "HEOS::R410A").
    fn qualified_name(&self, backend_name: &str) -> String;

    /// Check that the backend can be used at all.
    fn probe(&self) -> FluidResult<()>;

    /// Open a fresh handle for a fluid.
    fn open(&self, backend_name: &str) -> FluidResult<Self::Handle>;
}
