//! CoolProp integration tests.
//!
//! These tests verify the CoolProp backend behaves the way table generation
//! relies on. Tolerances are broad to avoid backend version issues.

use tt_fluids::{
    CoolPropProvider, EosBackend, EosProvider, FluidSpec, ForcedPhase, PhaseTag, Property,
    Resolution, forced_property,
};

#[test]
fn probe_succeeds() {
    CoolPropProvider::new().probe().unwrap();
}

#[test]
fn r410a_resolves_to_heos_name() {
    let provider = CoolPropProvider::new();
    let (spec, _handle) = FluidSpec::open(&provider, "R-410A").unwrap();
    assert_eq!(spec.backend_name, "R410A");
    assert_eq!(spec.qualified_name, "HEOS::R410A");
    // R-410A: Tc ≈ 344.5 K, pc ≈ 4.90 MPa
    assert!((spec.critical_temperature_k - 344.5).abs() < 2.0);
    let pc = spec.critical_pressure_pa.unwrap();
    assert!((pc - 4.90e6).abs() < 0.1e6, "pc = {pc}");
}

#[test]
fn unknown_fluid_fails_to_open() {
    let provider = CoolPropProvider::new();
    assert!(FluidSpec::open(&provider, "Unobtainium").is_err());
}

#[test]
fn liquid_water_enthalpy_at_1bar_300k() {
    let provider = CoolPropProvider::new();
    let (_spec, mut handle) = FluidSpec::open(&provider, "R-718").unwrap();
    let h = forced_property(&mut handle, 300.0, 1.0e5, PhaseTag::Liquid, Property::Enthalpy);
    // ≈ 112.6 kJ/kg
    let h = h.value().unwrap();
    assert!(h > 100.0 && h < 125.0, "h = {h} kJ/kg");
}

#[test]
fn vapor_water_entropy_is_above_liquid() {
    let provider = CoolPropProvider::new();
    let (_spec, mut handle) = FluidSpec::open(&provider, "R-718").unwrap();
    let s_liq = forced_property(&mut handle, 350.0, 1.0e5, PhaseTag::Liquid, Property::Entropy);
    let s_vap = forced_property(&mut handle, 400.0, 1.0e5, PhaseTag::Vapor, Property::Entropy);
    let (Resolution::Resolved(s_liq), Resolution::Resolved(s_vap)) = (s_liq, s_vap) else {
        panic!("expected both entropies to resolve");
    };
    assert!(s_liq < s_vap, "s_liq = {s_liq}, s_vap = {s_vap}");
}

#[test]
fn supercritical_point_recovered_by_fallback() {
    let provider = CoolPropProvider::new();
    let (spec, mut handle) = FluidSpec::open(&provider, "R-718").unwrap();
    let t_k = 1.1 * spec.critical_temperature_k;
    let p_pa = 1.5 * spec.critical_pressure_pa.unwrap();
    let h = forced_property(&mut handle, t_k, p_pa, PhaseTag::Liquid, Property::Enthalpy);
    assert!(h.is_resolved());
}

#[test]
fn phase_constraint_does_not_stick() {
    let provider = CoolPropProvider::new();
    let (_spec, mut handle) = FluidSpec::open(&provider, "R-718").unwrap();
    handle.specify_phase(ForcedPhase::Liquid).unwrap();
    let _ = forced_property(&mut handle, 300.0, 1.0e5, PhaseTag::Liquid, Property::Enthalpy);
    // Superheated steam would fail with a sticky liquid constraint.
    handle.update_pt(1.0e5, 500.0).unwrap();
    let h = handle.mass_property(Property::Enthalpy).unwrap();
    assert!(h > 2.8e6 && h < 3.0e6, "h = {h} J/kg");
}

#[test]
fn water_saturation_at_10_bar() {
    let provider = CoolPropProvider::new();
    let (_spec, mut handle) = FluidSpec::open(&provider, "R-718").unwrap();
    let bubble = handle.saturation_state(1.0e6, 0.0).unwrap();
    let dew = handle.saturation_state(1.0e6, 1.0).unwrap();
    // Tsat(10 bar) ≈ 453.0 K
    assert!((bubble.temperature_k - 453.0).abs() < 1.0);
    assert!((dew.temperature_k - bubble.temperature_k).abs() < 1e-6);
    assert!(bubble.enthalpy_j_per_kg < dew.enthalpy_j_per_kg);
}
