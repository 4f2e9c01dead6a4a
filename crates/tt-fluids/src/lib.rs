//! tt-fluids: equation-of-state access for thermotables.
//!
//! Provides:
//! - Fluid catalog (short table keys to backend fluid names)
//! - `EosBackend` / `EosProvider` traits isolating the solver
//! - `PhaseGuard` scoped phase constraints on a stateful backend handle
//! - Forced-phase property queries with unconstrained fallback
//! - CoolProp backend (via `rfluids`) and a synthetic analytic backend
//!
//! # Architecture
//!
//! Table generation only needs a handful of single-point queries, so the
//! backend is reduced to the `EosBackend` trait. CoolProp is the production
//! implementation. The synthetic backend is a closed-form toy fluid with
//! deterministic gaps, used to exercise the sampling logic without linking
//! a real solver into every test.
//!
//! # Example
//!
//! ```no_run
//! use tt_fluids::{CoolPropProvider, FluidSpec, PhaseTag, Property, forced_property};
//!
//! let provider = CoolPropProvider::new();
//! let (spec, mut handle) = FluidSpec::open(&provider, "R-718").unwrap();
//! let h = forced_property(&mut handle, 300.0, 1.0e5, PhaseTag::Liquid, Property::Enthalpy);
//! println!("{}: h = {:?} kJ/kg", spec.key, h.value());
//! ```

pub mod backend;
pub mod catalog;
pub mod coolprop;
pub mod error;
pub mod fluid;
pub mod guard;
pub mod phase;
pub mod query;
pub mod synthetic;

// Re-exports for ergonomics
pub use backend::{EosBackend, EosProvider, SaturationReading};
pub use catalog::backend_name_for_key;
pub use coolprop::{CoolPropProvider, CoolPropState};
pub use error::{FluidError, FluidResult};
pub use fluid::FluidSpec;
pub use guard::{PhaseGuard, with_phase_constraint};
pub use phase::{ForcedPhase, PhaseTag, Property, Resolution};
pub use query::forced_property;
pub use synthetic::{SyntheticFluid, SyntheticProvider, SyntheticState};
