//! Forced-phase single-point property queries.

use crate::backend::EosBackend;
use crate::error::FluidResult;
use crate::guard::with_phase_constraint;
use crate::phase::{PhaseTag, Property, Resolution};
use tracing::trace;
use tt_core::finite_or_none;
use tt_core::units::j_to_kj;

/// Update by (P, T) and read `property` in kJ units.
fn read_pt<B: EosBackend + ?Sized>(
    backend: &mut B,
    p_pa: f64,
    t_k: f64,
    property: Property,
) -> FluidResult<f64> {
    backend.update_pt(p_pa, t_k)?;
    backend.mass_property(property).map(j_to_kj)
}

/// Query `property` at (`t_k`, `p_pa`) with the backend forced into `phase`.
///
/// If the forced query fails the point is retried once without a phase
/// constraint; this recovers supercritical and phase-boundary points where
/// the forcing, not the physics, was the problem. The retried value is
/// reported under the requested phase. A query that succeeds with a
/// non-finite value is `Unresolved` and is not retried.
///
/// Never fails: a point neither attempt can resolve is `Unresolved`. The
/// backend is left without a phase constraint on return.
pub fn forced_property<B: EosBackend + ?Sized>(
    backend: &mut B,
    t_k: f64,
    p_pa: f64,
    phase: PhaseTag,
    property: Property,
) -> Resolution {
    let forced = with_phase_constraint(backend, phase, |state| read_pt(state, p_pa, t_k, property));
    let err = match forced {
        Ok(value) => return finite_or_none(value).into(),
        Err(err) => err,
    };

    if phase == PhaseTag::Unconstrained {
        trace!(t_k, p_pa, %property, error = %err, "point unresolved");
        return Resolution::Unresolved;
    }

    trace!(t_k, p_pa, %phase, %property, error = %err, "forced query failed, retrying unconstrained");
    match with_phase_constraint(backend, PhaseTag::Unconstrained, |state| {
        read_pt(state, p_pa, t_k, property)
    }) {
        Ok(value) => finite_or_none(value).into(),
        Err(err) => {
            trace!(t_k, p_pa, %phase, %property, error = %err, "point unresolved");
            Resolution::Unresolved
        }
    }
}
