//! Per-fluid identity and critical constants.

use crate::backend::{EosBackend, EosProvider};
use crate::catalog::backend_name_for_key;
use crate::error::{FluidError, FluidResult};
use tracing::debug;

/// A fluid ready for table generation.
///
/// Built once per fluid when its backend handle is opened and never changed
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidSpec {
    /// Table key (e.g. "R-410A")
    pub key: String,
    /// Backend fluid name (e.g. "R410A")
    pub backend_name: String,
    /// Fully qualified backend identifier (e.g. "HEOS::R410A")
    pub qualified_name: String,
    /// Critical temperature [K]
    pub critical_temperature_k: f64,
    /// Critical pressure [Pa], if the backend reports one
    pub critical_pressure_pa: Option<f64>,
}

impl FluidSpec {
    /// Resolve `key`, open a backend handle and read the critical constants.
    ///
    /// Fails when the backend does not know the fluid or cannot report a
    /// usable critical temperature. A missing critical pressure is not an
    /// error; it only disables saturation sampling.
    pub fn open<P: EosProvider>(provider: &P, key: &str) -> FluidResult<(Self, P::Handle)> {
        let backend_name = backend_name_for_key(key);
        let qualified_name = provider.qualified_name(&backend_name);

        let handle = provider.open(&backend_name)?;

        let critical_temperature_k = handle
            .critical_temperature()
            .map_err(|e| FluidError::Init {
                name: qualified_name.clone(),
                message: format!("critical temperature unavailable: {e}"),
            })?;
        if !(critical_temperature_k.is_finite() && critical_temperature_k > 0.0) {
            return Err(FluidError::Init {
                name: qualified_name,
                message: format!("invalid critical temperature {critical_temperature_k} K"),
            });
        }

        let critical_pressure_pa = match handle.critical_pressure() {
            Ok(p) if p.is_finite() && p > 0.0 => Some(p),
            Ok(p) => {
                debug!(fluid = %qualified_name, p, "ignoring invalid critical pressure");
                None
            }
            Err(err) => {
                debug!(fluid = %qualified_name, error = %err, "critical pressure unavailable");
                None
            }
        };

        let spec = Self {
            key: key.to_string(),
            backend_name,
            qualified_name,
            critical_temperature_k,
            critical_pressure_pa,
        };
        Ok((spec, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{SyntheticFluid, SyntheticProvider};

    #[test]
    fn resolves_key_and_reads_constants() {
        let provider = SyntheticProvider::standard();
        let (spec, _handle) = FluidSpec::open(&provider, "R-410A").unwrap();
        assert_eq!(spec.key, "R-410A");
        assert_eq!(spec.backend_name, "R410A");
        assert_eq!(spec.qualified_name, "SYN::R410A");
        assert_eq!(spec.critical_temperature_k, 344.494);
        assert_eq!(spec.critical_pressure_pa, Some(4.9012e6));
    }

    #[test]
    fn special_key_resolution() {
        let provider = SyntheticProvider::standard();
        let (spec, _handle) = FluidSpec::open(&provider, "R-718").unwrap();
        assert_eq!(spec.backend_name, "Water");
    }

    #[test]
    fn unknown_fluid_fails_to_open() {
        let provider = SyntheticProvider::standard();
        let err = FluidSpec::open(&provider, "R-9999").unwrap_err();
        assert!(matches!(err, FluidError::Init { ref name, .. } if name == "R9999"));
    }

    #[test]
    fn missing_critical_pressure_is_tolerated() {
        let provider = SyntheticProvider::new().with_fluid(
            "Water",
            SyntheticFluid::water_like().without_critical_pressure(),
        );
        let (spec, _handle) = FluidSpec::open(&provider, "R-718").unwrap();
        assert_eq!(spec.critical_pressure_pa, None);
    }

    #[test]
    fn invalid_critical_temperature_fails() {
        let mut fluid = SyntheticFluid::water_like();
        fluid.t_critical_k = f64::NAN;
        let provider = SyntheticProvider::new().with_fluid("Water", fluid);
        assert!(FluidSpec::open(&provider, "R-718").is_err());
    }
}
