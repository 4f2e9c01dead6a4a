//! tt-core: shared foundation for thermotables.
//!
//! Contains:
//! - units (uom SI types + the fixed SI/engineering conversions tables use)
//! - numeric (Real + tolerances + float helpers)
//! - grid (linear and geometric sample axes)
//! - timing (wall-clock timers for per-fluid reporting)
//! - error (shared error types)

pub mod error;
pub mod grid;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TtError, TtResult};
pub use grid::{Axis, geomspace, linspace};
pub use numeric::*;
pub use timing::Timer;
