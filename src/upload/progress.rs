//! Per-batch progress aggregation.

use crate::models::{ProgressTracking, ProgressUpdate};
use std::collections::HashMap;

/// Tracks per-file progress for one in-flight batch and decides when the
/// subscriber should be notified.
///
/// Owned by a single batch invocation; concurrent batches never share one.
pub(crate) struct ProgressAggregator {
    tracking: ProgressTracking,
    per_file: HashMap<String, f64>,
    last_average: u32,
}

impl ProgressAggregator {
    pub(crate) fn new(tracking: ProgressTracking) -> Self {
        Self {
            tracking,
            per_file: HashMap::new(),
            last_average: 0,
        }
    }

    /// Record one progress event and return the update to deliver, or `None`
    /// when notifying would be redundant.
    ///
    /// Individual tracking fires on every event with the live map. The
    /// average-based modes recompute the mean over files that have reported
    /// at least once, quantize down to a multiple of 10, and fire only when
    /// the quantized value moved.
    pub(crate) fn record(&mut self, file_name: &str, percent: f64) -> Option<ProgressUpdate> {
        self.per_file.insert(file_name.to_string(), percent);
        match self.tracking {
            ProgressTracking::Individual => {
                Some(ProgressUpdate::Individual(self.per_file.clone()))
            },
            ProgressTracking::Average | ProgressTracking::Both => {
                let average = self.quantized_average();
                if average == self.last_average {
                    return None;
                }
                self.last_average = average;
                Some(match self.tracking {
                    ProgressTracking::Average => ProgressUpdate::Average(average),
                    _ => ProgressUpdate::Both {
                        average,
                        individual: self.per_file.clone(),
                    },
                })
            },
        }
    }

    /// Mean across reporting files, floored to the nearest multiple of 10.
    fn quantized_average(&self) -> u32 {
        if self.per_file.is_empty() {
            return 0;
        }
        let sum: f64 = self.per_file.values().sum();
        let mean = sum / self.per_file.len() as f64;
        (mean / 10.0).floor() as u32 * 10
    }

    /// Clear all progress state, returning the aggregator to its post-new
    /// condition.
    pub(crate) fn reset(&mut self) {
        self.per_file.clear();
        self.last_average = 0;
    }
}
