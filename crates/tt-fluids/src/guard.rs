//! Scoped phase constraints.

use crate::backend::EosBackend;
use crate::error::FluidResult;
use crate::phase::PhaseTag;
use std::ops::{Deref, DerefMut};

/// Exclusive borrow of a backend handle with a phase constraint applied.
///
/// The constraint is cleared when the guard drops, on every exit path
/// including early returns and unwinding.
pub struct PhaseGuard<'a, B: EosBackend + ?Sized> {
    backend: &'a mut B,
}

impl<'a, B: EosBackend + ?Sized> PhaseGuard<'a, B> {
    /// Apply `tag` to `backend`.
    ///
    /// `PhaseTag::Unconstrained` clears any constraint left on the handle.
    pub fn acquire(backend: &'a mut B, tag: PhaseTag) -> FluidResult<Self> {
        // Guard exists before the constraint is applied so a failed
        // `specify_phase` is still reset on drop.
        let guard = Self { backend };
        match tag.forced() {
            Some(phase) => guard.backend.specify_phase(phase)?,
            None => guard.backend.unspecify_phase(),
        }
        Ok(guard)
    }
}

impl<B: EosBackend + ?Sized> Deref for PhaseGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.backend
    }
}

impl<B: EosBackend + ?Sized> DerefMut for PhaseGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: EosBackend + ?Sized> Drop for PhaseGuard<'_, B> {
    fn drop(&mut self) {
        self.backend.unspecify_phase();
    }
}

/// Run `op` on `backend` under the phase constraint `tag`.
pub fn with_phase_constraint<B, R, F>(backend: &mut B, tag: PhaseTag, op: F) -> FluidResult<R>
where
    B: EosBackend + ?Sized,
    F: FnOnce(&mut B) -> FluidResult<R>,
{
    let mut guard = PhaseGuard::acquire(backend, tag)?;
    op(&mut *guard)
}
