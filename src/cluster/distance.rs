//! Dissimilarity between two observations.
//!
//! The engine is generic over [`Distance`]; nothing else in the algorithm
//! depends on which metric is plugged in. Any closure of shape
//! `Fn(&[Value], &[Value]) -> f64` is a metric too.

use crate::data::Value;
use crate::error::{Error, Result};

/// A symmetric, non-negative dissimilarity.
pub trait Distance {
    /// Dissimilarity between `a` and `b`.
    fn distance(&self, a: &[Value], b: &[Value]) -> Result<f64>;
}

impl<F> Distance for F
where
    F: Fn(&[Value], &[Value]) -> f64,
{
    #[inline]
    fn distance(&self, a: &[Value], b: &[Value]) -> Result<f64> {
        Ok(self(a, b))
    }
}

/// `Sync` when the `parallel` feature is on (restarts share the metric across
/// threads), no bound otherwise.
#[cfg(feature = "parallel")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "parallel")]
impl<T: Sync + ?Sized> MaybeSync for T {}

/// `Sync` when the `parallel` feature is on (restarts share the metric across
/// threads), no bound otherwise.
#[cfg(not(feature = "parallel"))]
pub trait MaybeSync {}
#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> MaybeSync for T {}

/// Sum of squared differences over numeric coordinates.
///
/// Two non-numeric values contribute nothing. A numeric value paired with a
/// non-numeric one (missing included) is a [`Error::TypeMismatch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

impl Distance for SquaredEuclidean {
    fn distance(&self, a: &[Value], b: &[Value]) -> Result<f64> {
        debug_assert_eq!(a.len(), b.len());
        let mut total = 0.0;
        for (index, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => {
                    let d = x - y;
                    total += d * d;
                }
                (None, None) => {}
                _ => return Err(Error::TypeMismatch { index }),
            }
        }
        Ok(total)
    }
}

/// Sum of absolute differences; pairs that are not both numeric are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Distance for Manhattan {
    fn distance(&self, a: &[Value], b: &[Value]) -> Result<f64> {
        Ok(a.iter()
            .zip(b.iter())
            .filter_map(|(x, y)| Some((x.as_f64()? - y.as_f64()?).abs()))
            .sum())
    }
}
