//! Rectangular temperature × pressure property grids.

use serde::{Deserialize, Serialize};
use tt_core::Axis;
use tt_core::units::log10_bar_to_pa;
use tt_fluids::{EosBackend, PhaseTag, Property, forced_property};

/// 2-D property grid indexed `[temperature][pressure]`.
///
/// `None` marks a point the backend could not resolve for the grid's phase;
/// it is serialized as `null`, never as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyGrid {
    rows: Vec<Vec<Option<f64>>>,
}

impl PropertyGrid {
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    pub fn get(&self, t_index: usize, p_index: usize) -> Option<f64> {
        self.rows.get(t_index)?.get(p_index).copied().flatten()
    }

    /// True when the grid has `n_t` rows of `n_p` cells each.
    pub fn has_shape(&self, n_t: usize, n_p: usize) -> bool {
        self.rows.len() == n_t && self.rows.iter().all(|row| row.len() == n_p)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn resolved_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Every present cell holds a finite value.
    pub fn all_finite(&self) -> bool {
        self.rows.iter().flatten().flatten().all(|v| v.is_finite())
    }
}

/// The four per-phase grids of one fluid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseGrids {
    /// Vapor-forced enthalpy [kJ/kg]
    pub vapor_enthalpy: PropertyGrid,
    /// Liquid-forced enthalpy [kJ/kg]
    pub liquid_enthalpy: PropertyGrid,
    /// Vapor-forced entropy [kJ/(kg·K)]
    pub vapor_entropy: PropertyGrid,
    /// Liquid-forced entropy [kJ/(kg·K)]
    pub liquid_entropy: PropertyGrid,
}

impl PhaseGrids {
    /// Resolved cells per grid, in `[hVap, hLiq, sVap, sLiq]` order.
    pub fn resolved_counts(&self) -> [usize; 4] {
        [
            self.vapor_enthalpy.resolved_count(),
            self.liquid_enthalpy.resolved_count(),
            self.vapor_entropy.resolved_count(),
            self.liquid_entropy.resolved_count(),
        ]
    }
}

/// Sample all four grids over `temperatures` (K) × `log_p_bar` (log10 bar).
///
/// Issues `|T|·|P|·4` forced-phase queries on `backend`.
pub fn build_phase_grids<B: EosBackend + ?Sized>(
    backend: &mut B,
    temperatures: &Axis,
    log_p_bar: &Axis,
) -> PhaseGrids {
    let n_t = temperatures.len();
    let n_p = log_p_bar.len();
    let pressures_pa: Vec<f64> = log_p_bar.values().iter().map(|&lp| log10_bar_to_pa(lp)).collect();

    let mut h_vap = Vec::with_capacity(n_t);
    let mut h_liq = Vec::with_capacity(n_t);
    let mut s_vap = Vec::with_capacity(n_t);
    let mut s_liq = Vec::with_capacity(n_t);

    for &t_k in temperatures.values() {
        let mut row_h_vap = Vec::with_capacity(n_p);
        let mut row_h_liq = Vec::with_capacity(n_p);
        let mut row_s_vap = Vec::with_capacity(n_p);
        let mut row_s_liq = Vec::with_capacity(n_p);

        for &p_pa in &pressures_pa {
            let mut query = |phase, property| forced_property(&mut *backend, t_k, p_pa, phase, property).value();
            row_h_vap.push(query(PhaseTag::Vapor, Property::Enthalpy));
            row_h_liq.push(query(PhaseTag::Liquid, Property::Enthalpy));
            row_s_vap.push(query(PhaseTag::Vapor, Property::Entropy));
            row_s_liq.push(query(PhaseTag::Liquid, Property::Entropy));
        }

        h_vap.push(row_h_vap);
        h_liq.push(row_h_liq);
        s_vap.push(row_s_vap);
        s_liq.push(row_s_liq);
    }

    PhaseGrids {
        vapor_enthalpy: PropertyGrid::from_rows(h_vap),
        liquid_enthalpy: PropertyGrid::from_rows(h_liq),
        vapor_entropy: PropertyGrid::from_rows(s_vap),
        liquid_entropy: PropertyGrid::from_rows(s_liq),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tt_fluids::{SyntheticFluid, SyntheticState};

    fn axes(fluid: &SyntheticFluid, n_t: usize, n_p: usize) -> (Axis, Axis) {
        (
            Axis::linear(0.5 * fluid.t_critical_k, 1.3 * fluid.t_critical_k, n_t).unwrap(),
            Axis::linear(-1.2, 2.3, n_p).unwrap(),
        )
    }

    fn water() -> SyntheticState {
        SyntheticFluid::water_like().into_state()
    }

    #[test]
    fn grids_have_axis_shape() {
        let mut state = water();
        let (t, p) = axes(state.fluid(), 12, 9);
        let grids = build_phase_grids(&mut state, &t, &p);
        for grid in [
            &grids.vapor_enthalpy,
            &grids.liquid_enthalpy,
            &grids.vapor_entropy,
            &grids.liquid_entropy,
        ] {
            assert!(grid.has_shape(12, 9));
            assert!(grid.all_finite());
        }
        assert_eq!(state.current_phase(), None);
    }

    #[test]
    fn liquid_grid_has_gaps_inside_glide_band() {
        let mut state = SyntheticFluid::water_like().with_glide(20.0).into_state();
        let (t, p) = axes(state.fluid(), 60, 60);
        let grids = build_phase_grids(&mut state, &t, &p);
        // Inside the glide band neither phase nor the unconstrained retry resolve.
        let liquid = &grids.liquid_enthalpy;
        assert!(liquid.resolved_count() < liquid.cell_count());
        assert!(liquid.resolved_count() > 0);
    }

    #[test]
    fn hot_low_pressure_liquid_cell_holds_fallback_vapor_value() {
        let mut state = water();
        let t = Axis::from(vec![500.0]);
        let p = Axis::from(vec![0.0]); // 1 bar
        let grids = build_phase_grids(&mut state, &t, &p);
        // Liquid cannot exist at 500 K and 1 bar; the unconstrained retry
        // returns the vapor state and it is recorded in the liquid grid.
        assert_eq!(grids.liquid_enthalpy.get(0, 0), grids.vapor_enthalpy.get(0, 0));
        assert!(grids.liquid_enthalpy.get(0, 0).is_some());
    }

    #[test]
    fn dome_cells_are_absent_not_zero() {
        let mut state = SyntheticFluid::water_like().with_glide(20.0).into_state();
        let (t_bubble, t_dew) = state.fluid().saturation_temperatures(1.0e5).unwrap();
        let t = Axis::from(vec![0.5 * (t_bubble + t_dew)]);
        let p = Axis::from(vec![0.0]);
        let grids = build_phase_grids(&mut state, &t, &p);
        assert_eq!(grids.liquid_enthalpy.get(0, 0), None);
        assert_eq!(grids.vapor_entropy.get(0, 0), None);
        let json = serde_json::to_string(&grids.liquid_enthalpy).unwrap();
        assert_eq!(json, "[[null]]");
    }

    #[test]
    fn pressure_axis_is_converted_from_log_bar() {
        let mut state = water();
        let t = Axis::from(vec![300.0]);
        // 10^-1.2 bar ≈ 6.3 kPa, water at 300 K is liquid there
        let p = Axis::from(vec![-1.2]);
        let grids = build_phase_grids(&mut state, &t, &p);
        let mut direct = water();
        direct.update_pt(log10_bar_to_pa(-1.2), 300.0).unwrap();
        let h = direct.mass_property(Property::Enthalpy).unwrap() / 1000.0;
        assert_eq!(grids.liquid_enthalpy.get(0, 0), Some(h));
    }
}
