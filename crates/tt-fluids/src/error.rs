//! Fluid backend errors.

use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while talking to an equation-of-state backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The backend rejected a query (no convergence, undefined state, ...).
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// The backend could not construct a state handle for a fluid.
    #[error("Cannot initialize backend state for '{name}': {message}")]
    Init { name: String, message: String },

    /// The backend cannot be used at all.
    #[error("Equation-of-state backend unavailable: {message}")]
    Unavailable { message: String },
}

impl FluidError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
