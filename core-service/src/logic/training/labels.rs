//! Label derivation: burned area -> fire / no fire
//!
//! A record counts as a fire when its burned area is strictly greater than
//! the median area of the whole dataset. Records sitting exactly on the
//! median are labeled 0.

use serde::{Deserialize, Serialize};

pub const NO_FIRE: usize = 0;
pub const FIRE: usize = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireLabels {
    pub median_area: f64,
    pub labels: Vec<usize>,
}

impl FireLabels {
    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&l| l == FIRE).count()
    }
}

/// Median with the mean of the two middle values for even lengths
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Binary labels against the dataset-wide median; `None` for no areas
pub fn fire_labels(areas: &[f64]) -> Option<FireLabels> {
    let median_area = median(areas)?;
    let labels = areas
        .iter()
        .map(|&a| if a > median_area { FIRE } else { NO_FIRE })
        .collect();

    Some(FireLabels { median_area, labels })
}
