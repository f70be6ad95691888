//! Observations and the read-only data set the engine consumes.
//!
//! An observation is a fixed-width row of heterogeneous scalars. Only numeric
//! coordinates drive the built-in metric; text and missing values ride along.

use crate::error::{Error, Result};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One scalar attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Numeric attribute.
    Number(f64),
    /// Categorical attribute (string, symbol, ...).
    Text(String),
    /// Absent value. Never numeric.
    Missing,
}

impl Value {
    /// The numeric payload, if any.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(x) => Some(*x),
            _ => None,
        }
    }

    /// Whether this value takes part in numeric arithmetic.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(x) => fmt::Display::fmt(x, f),
            Value::Text(s) => f.pad(s),
            Value::Missing => f.pad("-"),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Number(f64::from(x))
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Number(x as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Missing, Into::into)
    }
}

/// A fixed-width row of values. Centroids share this shape.
pub type Observation = Vec<Value>;

/// Build an all-numeric observation.
pub fn numeric(row: &[f64]) -> Observation {
    row.iter().copied().map(Value::Number).collect()
}

/// Ordered observations plus optional column labels.
///
/// The engine only ever reads a `DataSet`; it can be shared across any number
/// of `fit` calls.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataSet {
    items: Vec<Observation>,
    labels: Option<Vec<String>>,
}

impl DataSet {
    /// Wrap observations, checking that they all have the same width.
    pub fn new(items: Vec<Observation>) -> Result<Self> {
        if let Some(first) = items.first() {
            let width = first.len();
            if let Some(bad) = items.iter().find(|row| row.len() != width) {
                return Err(Error::DimensionMismatch {
                    expected: width,
                    found: bad.len(),
                });
            }
        }
        Ok(Self {
            items,
            labels: None,
        })
    }

    /// Convenience constructor for purely numeric data.
    pub fn from_numeric(rows: &[Vec<f64>]) -> Result<Self> {
        Self::new(rows.iter().map(|r| numeric(r)).collect())
    }

    /// Attach column labels. Their count must match the observation width.
    pub fn with_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if let Some(width) = self.width() {
            if labels.len() != width {
                return Err(Error::DimensionMismatch {
                    expected: width,
                    found: labels.len(),
                });
            }
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// The observations, in data-set order.
    pub fn items(&self) -> &[Observation] {
        &self.items
    }

    /// Column labels, if any were attached.
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no observations.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Observation width, or `None` for an empty set.
    pub fn width(&self) -> Option<usize> {
        self.items.first().map(Vec::len)
    }
}
