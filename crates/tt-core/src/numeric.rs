/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Keep a value only if it is finite.
///
/// This is the single place where a raw backend float becomes a table cell:
/// NaN and infinities map to `None` and are written as an explicit absence.
#[inline]
pub fn finite_or_none(v: Real) -> Option<Real> {
    v.is_finite().then_some(v)
}

/// True when every element is no smaller than its predecessor.
pub fn is_non_decreasing(values: &[Real]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// True when every element is strictly larger than its predecessor.
pub fn is_strictly_increasing(values: &[Real]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn finite_or_none_drops_non_finite() {
        assert_eq!(finite_or_none(1.5), Some(1.5));
        assert_eq!(finite_or_none(-0.0), Some(-0.0));
        assert_eq!(finite_or_none(Real::NAN), None);
        assert_eq!(finite_or_none(Real::INFINITY), None);
        assert_eq!(finite_or_none(Real::NEG_INFINITY), None);
    }

    #[test]
    fn monotonic_checks() {
        assert!(is_non_decreasing(&[1.0, 1.0, 2.0]));
        assert!(!is_strictly_increasing(&[1.0, 1.0, 2.0]));
        assert!(is_strictly_increasing(&[1.0, 2.0, 3.0]));
        assert!(!is_non_decreasing(&[2.0, 1.0]));
        assert!(is_strictly_increasing(&[4.0]));
        assert!(is_non_decreasing(&[]));
    }
}
