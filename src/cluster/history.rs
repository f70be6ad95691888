//! Per-iteration snapshots for diagnostics.

use crate::data::Observation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State of one attempt at the end of an iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HistoryEntry {
    /// Cluster index per observation, in data-set order.
    pub assignments: Vec<usize>,
    /// Centroids after the update step.
    pub centroids: Vec<Observation>,
}

/// Append-only recorder; a no-op unless tracking was requested.
#[derive(Debug, Default)]
pub(crate) struct HistoryRecorder {
    entries: Option<Vec<HistoryEntry>>,
}

impl HistoryRecorder {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            entries: enabled.then(Vec::new),
        }
    }

    pub(crate) fn record(&mut self, assignments: &[usize], centroids: &[Observation]) {
        if let Some(entries) = self.entries.as_mut() {
            entries.push(HistoryEntry {
                assignments: assignments.to_vec(),
                centroids: centroids.to_vec(),
            });
        }
    }

    pub(crate) fn finish(self) -> Option<Vec<HistoryEntry>> {
        self.entries
    }
}
