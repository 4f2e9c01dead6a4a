//! Generator configuration.
//!
//! Defaults reproduce the resolution the diagram consumer expects. A YAML
//! file may override any subset of fields.

use crate::{TablesError, TablesResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rectangular (T, log P) grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub temperature_points: usize,
    pub pressure_points: usize,
    /// Lower pressure bound, log10(p / bar). -1.2 ≈ 0.063 bar
    pub log_p_min_bar: f64,
    /// Upper pressure bound, log10(p / bar). 2.3 ≈ 200 bar
    pub log_p_max_bar: f64,
    /// Lower temperature bound as a fraction of the critical temperature
    pub t_min_over_tc: f64,
    /// Upper temperature bound as a fraction of the critical temperature
    pub t_max_over_tc: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            temperature_points: 600,
            pressure_points: 600,
            log_p_min_bar: -1.2,
            log_p_max_bar: 2.3,
            t_min_over_tc: 0.5,
            t_max_over_tc: 1.3,
        }
    }
}

/// Saturation curve and two-phase surface settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SaturationConfig {
    pub pressure_points: usize,
    pub quality_points: usize,
    /// Absolute pressure floor [Pa]
    pub p_floor_pa: f64,
    /// Pressure floor as a fraction of the critical pressure
    pub p_floor_over_pc: f64,
    /// Pressure ceiling as a fraction of the critical pressure
    pub p_ceiling_over_pc: f64,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self {
            pressure_points: 240,
            quality_points: 21,
            p_floor_pa: 2.0e4,
            p_floor_over_pc: 5.0e-4,
            p_ceiling_over_pc: 0.999,
        }
    }
}

impl SaturationConfig {
    /// Geometric ladder bounds [Pa] for a critical pressure.
    pub fn pressure_bounds(&self, p_critical_pa: f64) -> (f64, f64) {
        (
            self.p_floor_pa.max(self.p_floor_over_pc * p_critical_pa),
            self.p_ceiling_over_pc * p_critical_pa,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub grid: GridConfig,
    pub saturation: SaturationConfig,
}

fn config_err(what: impl Into<String>) -> TablesError {
    TablesError::Config { what: what.into() }
}

impl GeneratorConfig {
    pub fn load_yaml(path: &Path) -> TablesResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TablesResult<()> {
        let grid = &self.grid;
        if grid.temperature_points < 2 || grid.pressure_points < 2 {
            return Err(config_err("grid needs at least 2 points per axis"));
        }
        if !(grid.log_p_min_bar.is_finite()
            && grid.log_p_max_bar.is_finite()
            && grid.log_p_min_bar < grid.log_p_max_bar)
        {
            return Err(config_err(format!(
                "grid pressure range [{}, {}] must be finite and increasing",
                grid.log_p_min_bar, grid.log_p_max_bar
            )));
        }
        if !(grid.t_min_over_tc > 0.0
            && grid.t_max_over_tc.is_finite()
            && grid.t_min_over_tc < grid.t_max_over_tc)
        {
            return Err(config_err(format!(
                "grid temperature range [{}, {}]·Tc must be positive and increasing",
                grid.t_min_over_tc, grid.t_max_over_tc
            )));
        }

        let sat = &self.saturation;
        if sat.pressure_points < 2 || sat.quality_points < 2 {
            return Err(config_err(
                "saturation needs at least 2 pressures and 2 qualities",
            ));
        }
        if !(sat.p_floor_pa > 0.0 && sat.p_floor_pa.is_finite()) {
            return Err(config_err("saturation pressure floor must be positive"));
        }
        if !(sat.p_floor_over_pc > 0.0
            && sat.p_ceiling_over_pc <= 1.0
            && sat.p_floor_over_pc < sat.p_ceiling_over_pc)
        {
            return Err(config_err(format!(
                "saturation pressure fractions [{}, {}]·pc must satisfy 0 < floor < ceiling <= 1",
                sat.p_floor_over_pc, sat.p_ceiling_over_pc
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GeneratorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.grid.temperature_points, 600);
        assert_eq!(config.grid.pressure_points, 600);
        assert_eq!(config.saturation.pressure_points, 240);
        assert_eq!(config.saturation.quality_points, 21);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml = "grid:\n  temperature_points: 50\nsaturation:\n  quality_points: 11\n";
        let config: GeneratorConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.grid.temperature_points, 50);
        assert_eq!(config.grid.pressure_points, 600);
        assert_eq!(config.grid.log_p_max_bar, 2.3);
        assert_eq!(config.saturation.quality_points, 11);
        assert_eq!(config.saturation.p_floor_pa, 2.0e4);
    }

    #[test]
    fn unknown_fields_rejected() {
        let yaml = "grid:\n  temprature_points: 50\n";
        assert!(serde_yaml::from_str::<GeneratorConfig>(yaml).is_err());
    }

    #[test]
    fn rejects_degenerate_grid() {
        let mut config = GeneratorConfig::default();
        config.grid.pressure_points = 1;
        assert!(matches!(config.validate(), Err(TablesError::Config { .. })));

        let mut config = GeneratorConfig::default();
        config.grid.log_p_min_bar = 3.0;
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.grid.t_min_over_tc = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_saturation_fractions() {
        let mut config = GeneratorConfig::default();
        config.saturation.p_ceiling_over_pc = 1.5;
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.saturation.p_floor_pa = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn pressure_bounds_use_larger_floor() {
        let sat = SaturationConfig::default();
        // R-410A: 5e-4 · pc ≈ 2450 Pa, below the absolute floor
        let (low, high) = sat.pressure_bounds(4.9012e6);
        assert_eq!(low, 2.0e4);
        assert!((high - 0.999 * 4.9012e6).abs() < 1e-6);
        // A 100 MPa critical pressure lifts the floor above 20 kPa
        let (low, _) = sat.pressure_bounds(100.0e6);
        assert!((low - 5.0e4).abs() < 1e-6);
    }
}
