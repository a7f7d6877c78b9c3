//! Progress payloads for batch uploads.

use std::collections::HashMap;

/// Which granularity the batch progress subscriber wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressTracking {
    /// A single quantized average across all files.
    Average,
    /// The raw per-file percent map, delivered on every progress event.
    Individual,
    /// Both the quantized average and the per-file map.
    #[default]
    Both,
}

/// One progress notification delivered to a batch subscriber.
///
/// The average is quantized down to the nearest multiple of 10, which bounds
/// average-based notifications to at most 11 per batch. Individual percents
/// are raw floats in `[0, 100]`, keyed by file name; only files whose
/// transport has reported at least one event appear in the map.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    /// Quantized average progress across reporting files.
    Average(u32),
    /// Raw per-file progress.
    Individual(HashMap<String, f64>),
    /// Quantized average plus raw per-file progress.
    Both {
        /// Quantized average across reporting files.
        average: u32,
        /// Raw per-file progress.
        individual: HashMap<String, f64>,
    },
}

impl ProgressUpdate {
    /// The quantized average, when this update carries one.
    pub fn average(&self) -> Option<u32> {
        match self {
            ProgressUpdate::Average(average) | ProgressUpdate::Both { average, .. } => {
                Some(*average)
            },
            ProgressUpdate::Individual(_) => None,
        }
    }

    /// The per-file map, when this update carries one.
    pub fn individual(&self) -> Option<&HashMap<String, f64>> {
        match self {
            ProgressUpdate::Individual(individual)
            | ProgressUpdate::Both { individual, .. } => Some(individual),
            ProgressUpdate::Average(_) => None,
        }
    }
}
