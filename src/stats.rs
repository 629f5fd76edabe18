//! Interval summary using HdrHistogram
//!
//! Records drawn intervals (milliseconds) so a schedule can be inspected
//! before it runs on a rig: realized mean against the nominal mean, tail
//! percentiles, extremes.
//!
//! # Example
//!
//! ```
//! use trialkit::stats::IntervalSummary;
//!
//! let mut summary = IntervalSummary::new();
//! summary.record(100);
//! summary.record(200);
//! summary.record(300);
//!
//! assert_eq!(summary.len(), 3);
//! assert_eq!(summary.mean(), Some(200.0));
//! ```

use hdrhistogram::Histogram;
use serde::Serialize;

/// Largest interval tracked at full precision (one day in ms)
const MAX_TRACKED: u64 = 86_400_000;

/// Interval histogram with an exact running mean
///
/// Percentiles carry 3 significant digits of precision; count, min, max and
/// mean are exact.
#[derive(Debug)]
pub struct IntervalSummary {
    histogram: Histogram<u64>,
    sum: u128,
    min: Option<u64>,
    max: Option<u64>,
}

/// Serializable view of an [`IntervalSummary`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySnapshot {
    pub count: u64,
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub mean: Option<f64>,
    pub p50: Option<u64>,
    pub p90: Option<u64>,
    pub p99: Option<u64>,
}

impl IntervalSummary {
    pub fn new() -> Self {
        // - Lowest discernible value: 1 ms
        // - Highest trackable value: 1 day
        // - Significant digits: 3
        let histogram = Histogram::new_with_bounds(1, MAX_TRACKED, 3)
            .expect("Failed to create histogram with valid bounds");

        Self {
            histogram,
            sum: 0,
            min: None,
            max: None,
        }
    }

    /// Record one interval
    ///
    /// Values above one day are clamped in the histogram but kept exact in
    /// min, max and mean.
    pub fn record(&mut self, value: u64) {
        let _ = self.histogram.record(value.min(MAX_TRACKED));
        self.sum += u128::from(value);
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Value at `percentile` (0.0 - 100.0), or None if empty
    pub fn percentile(&self, percentile: f64) -> Option<u64> {
        if self.is_empty() {
            return None;
        }
        Some(self.histogram.value_at_percentile(percentile))
    }

    pub fn min(&self) -> Option<u64> {
        self.min
    }

    pub fn max(&self) -> Option<u64> {
        self.max
    }

    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.sum as f64 / self.len() as f64)
    }

    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }

    pub fn snapshot(&self) -> SummarySnapshot {
        SummarySnapshot {
            count: self.len(),
            min: self.min(),
            max: self.max(),
            mean: self.mean(),
            p50: self.percentile(50.0),
            p90: self.percentile(90.0),
            p99: self.percentile(99.0),
        }
    }
}

impl Default for IntervalSummary {
    fn default() -> Self {
        Self::new()
    }
}
