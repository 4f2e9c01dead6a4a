//! Sample axis generation.
//!
//! Produces the 1-D sequences every table is sampled on: evenly spaced
//! (linear) or geometrically spaced (logarithmic) points over a closed
//! interval.

use crate::numeric::{is_non_decreasing, is_strictly_increasing};
use crate::{TtError, TtResult};
use std::fmt;

fn check_bounds(start: f64, end: f64, count: usize, what: &'static str) -> TtResult<()> {
    if count < 1 || !start.is_finite() || !end.is_finite() {
        return Err(TtError::InvalidRange {
            what,
            start,
            end,
            count,
        });
    }
    Ok(())
}

/// `count` values evenly spaced from `start` to `end` inclusive.
///
/// `count == 1` yields `[start]`.
pub fn linspace(start: f64, end: f64, count: usize) -> TtResult<Vec<f64>> {
    check_bounds(start, end, count, "linear spacing")?;
    if count == 1 {
        return Ok(vec![start]);
    }

    let last = (count - 1) as f64;
    Ok((0..count)
        .map(|i| start + (i as f64 / last) * (end - start))
        .collect())
}

/// `count` values evenly spaced in log-space from `start` to `end` inclusive.
///
/// Both bounds must be strictly positive. `count == 1` yields `[start]`.
pub fn geomspace(start: f64, end: f64, count: usize) -> TtResult<Vec<f64>> {
    check_bounds(start, end, count, "geometric spacing")?;
    if start <= 0.0 || end <= 0.0 {
        return Err(TtError::InvalidRange {
            what: "geometric spacing requires positive bounds",
            start,
            end,
            count,
        });
    }
    if count == 1 {
        return Ok(vec![start]);
    }

    Ok(linspace(start.ln(), end.ln(), count)?
        .into_iter()
        .map(f64::exp)
        .collect())
}

/// An ordered, fixed-length sample sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Axis(Vec<f64>);

impl Axis {
    pub fn linear(start: f64, end: f64, count: usize) -> TtResult<Self> {
        linspace(start, end, count).map(Self)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Finite everywhere and non-decreasing; strictly increasing when it has
    /// more than one distinct bound.
    pub fn is_monotonic(&self) -> bool {
        if !self.0.iter().all(|v| v.is_finite()) {
            return false;
        }
        match (self.first(), self.last()) {
            (Some(a), Some(b)) if a != b => is_strictly_increasing(&self.0),
            _ => is_non_decreasing(&self.0),
        }
    }
}

impl From<Vec<f64>> for Axis {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => write!(f, "Axis [{a}, {b}] ({} points)", self.len()),
            _ => write!(f, "Axis (empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_generation() {
        let points = linspace(300.0, 400.0, 5).unwrap();
        assert_eq!(points.len(), 5);
        assert!((points[0] - 300.0).abs() < 1e-9);
        assert!((points[2] - 350.0).abs() < 1e-9);
        assert!((points[4] - 400.0).abs() < 1e-9);
    }

    #[test]
    fn linear_hits_endpoints_exactly() {
        let points = linspace(-1.2, 2.3, 600).unwrap();
        assert_eq!(points[0], -1.2);
        assert_eq!(points[599], 2.3);
    }

    #[test]
    fn geometric_generation() {
        let points = geomspace(1e5, 1e6, 3).unwrap();
        assert_eq!(points.len(), 3);
        assert!((points[0] - 1e5).abs() / 1e5 < 1e-12);
        assert!((points[2] - 1e6).abs() / 1e6 < 1e-12);
        let expected_mid = (1e5_f64 * 1e6_f64).sqrt();
        assert!((points[1] - expected_mid).abs() / expected_mid < 1e-9);
    }

    #[test]
    fn single_point() {
        assert_eq!(linspace(300.0, 400.0, 1).unwrap(), vec![300.0]);
        assert_eq!(geomspace(2.0e4, 4.0e6, 1).unwrap(), vec![2.0e4]);
    }

    #[test]
    fn reject_zero_count() {
        assert!(matches!(
            linspace(0.0, 1.0, 0),
            Err(TtError::InvalidRange { count: 0, .. })
        ));
        assert!(geomspace(1.0, 2.0, 0).is_err());
    }

    #[test]
    fn reject_non_positive_geometric_bounds() {
        assert!(geomspace(0.0, 10.0, 5).is_err());
        assert!(geomspace(-1.0, 10.0, 5).is_err());
        assert!(geomspace(1.0, -10.0, 5).is_err());
    }

    #[test]
    fn reject_non_finite_bounds() {
        assert!(linspace(f64::NAN, 1.0, 3).is_err());
        assert!(geomspace(1.0, f64::INFINITY, 3).is_err());
    }

    #[test]
    fn quality_ladder_is_evenly_spaced() {
        let q = linspace(0.0, 1.0, 21).unwrap();
        assert_eq!(q.len(), 21);
        assert_eq!(q[0], 0.0);
        assert_eq!(q[20], 1.0);
        for (i, v) in q.iter().enumerate() {
            assert!((v - i as f64 * 0.05).abs() < 1e-12);
        }
    }

    #[test]
    fn axis_monotonic() {
        assert!(Axis::linear(1.0, 2.0, 10).unwrap().is_monotonic());
        assert!(Axis::from(geomspace(2.0e4, 4.9e6, 240).unwrap()).is_monotonic());
        assert!(Axis::linear(1.0, 1.0, 1).unwrap().is_monotonic());
        assert!(!Axis::from(vec![1.0, 3.0, 2.0]).is_monotonic());
        assert!(!Axis::from(vec![1.0, f64::NAN]).is_monotonic());
    }

    #[test]
    fn axis_display() {
        let axis = Axis::linear(0.0, 1.0, 3).unwrap();
        assert_eq!(axis.to_string(), "Axis [0, 1] (3 points)");
    }
}
