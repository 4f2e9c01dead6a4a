//! Phase tags, queried properties and query outcomes.

use std::fmt;

/// Bulk phase a backend can be forced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForcedPhase {
    Liquid,
    Gas,
}

/// Requested phase for a (T, P) property query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseTag {
    Liquid,
    Vapor,
    Unconstrained,
}

impl PhaseTag {
    /// The constraint to impose on the backend, if any.
    pub fn forced(self) -> Option<ForcedPhase> {
        match self {
            Self::Liquid => Some(ForcedPhase::Liquid),
            Self::Vapor => Some(ForcedPhase::Gas),
            Self::Unconstrained => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Liquid => "liq",
            Self::Vapor => "vap",
            Self::Unconstrained => "any",
        }
    }
}

impl fmt::Display for PhaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mass-specific property read after a state update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Specific enthalpy, J/kg from the backend, kJ/kg in tables.
    Enthalpy,
    /// Specific entropy, J/(kg·K) from the backend, kJ/(kg·K) in tables.
    Entropy,
}

impl Property {
    pub fn label(self) -> &'static str {
        match self {
            Self::Enthalpy => "enthalpy",
            Self::Entropy => "entropy",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single-point property query.
///
/// `Unresolved` is an ordinary result, not a failure: large parts of the
/// (T, P) plane have no valid state for a forced phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Resolved(f64),
    Unresolved,
}

impl Resolution {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Resolved(v) => Some(v),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<Option<f64>> for Resolution {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unresolved, Self::Resolved)
    }
}

impl From<Resolution> for Option<f64> {
    fn from(resolution: Resolution) -> Self {
        resolution.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_map_to_backend_phases() {
        assert_eq!(PhaseTag::Liquid.forced(), Some(ForcedPhase::Liquid));
        assert_eq!(PhaseTag::Vapor.forced(), Some(ForcedPhase::Gas));
        assert_eq!(PhaseTag::Unconstrained.forced(), None);
    }

    #[test]
    fn resolution_to_option() {
        let cell: Option<f64> = Resolution::Resolved(4.2).into();
        assert_eq!(cell, Some(4.2));
        assert_eq!(Resolution::Unresolved.value(), None);
        assert!(!Resolution::Unresolved.is_resolved());
        assert_eq!(Resolution::from(Some(1.0)), Resolution::Resolved(1.0));
        assert_eq!(Resolution::from(None), Resolution::Unresolved);
    }
}
