// tt-core/src/units.rs

use uom::si::f64::Pressure as UomPressure;

// Public canonical unit type (SI, f64)
pub type Pressure = UomPressure;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

/// Pressure axis value `log10(p / bar)` to pascal.
#[inline]
pub fn log10_bar_to_pa(log_p_bar: f64) -> f64 {
    use uom::si::pressure::pascal;
    bar(10f64.powf(log_p_bar)).get::<pascal>()
}

/// Pascal to the pressure axis value `log10(p / bar)`.
#[inline]
pub fn pa_to_log10_bar(p_pa: f64) -> f64 {
    use uom::si::pressure::bar as bar_unit;
    pa(p_pa).get::<bar_unit>().log10()
}

/// J/kg (or J/(kg·K)) as delivered by the backend to kJ/kg (or kJ/(kg·K)).
#[inline]
pub fn j_to_kj(v: f64) -> f64 {
    v / 1000.0
}
