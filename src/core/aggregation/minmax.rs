//! Min/max bounds aggregation
//!
//! Every node keeps the closed interval `[min, max]` of the values written
//! beneath it. Searches use interval intersection, so a needle of `[50, 150]`
//! descends only into subtrees whose bounds touch that range.

use super::Aggregation;
use serde::{Deserialize, Serialize};

/// Upper and lower bounds of observed values
///
/// Overlap is judged on closed intervals: touching bounds count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> MinMax<T> {
    pub fn new(min: T, max: T) -> Self {
        MinMax { min, max }
    }

    /// Degenerate interval holding a single value
    pub fn point(value: T) -> Self {
        MinMax {
            min: value,
            max: value,
        }
    }

    /// Widen the bounds to include `value`
    pub fn include(&mut self, value: T) {
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
    }

    /// True if the two closed intervals share at least one point
    pub fn overlaps(&self, other: &MinMax<T>) -> bool {
        other.min <= self.max && other.max >= self.min
    }

    /// True if `value` lies within `[min, max]`, bounds included
    pub fn contains_value(&self, value: T) -> bool {
        self.max >= value && self.min <= value
    }
}

/// Min/max aggregation policy
///
/// With a baseline, a fresh node starts from `[baseline, baseline]` and the
/// baseline stays inside every summary (a store of strictly positive values
/// seeded with `0.0` reports `min = 0.0`). Without one, a fresh node starts
/// from the first value written to it.
#[derive(Debug, Clone, Copy)]
pub struct MinMaxAggregation<T> {
    baseline: Option<T>,
}

impl<T: PartialOrd + Copy> MinMaxAggregation<T> {
    pub fn new(baseline: T) -> Self {
        MinMaxAggregation {
            baseline: Some(baseline),
        }
    }

    pub fn unseeded() -> Self {
        MinMaxAggregation { baseline: None }
    }

    pub fn baseline(&self) -> Option<T> {
        self.baseline
    }
}

impl<T: PartialOrd + Copy> Aggregation for MinMaxAggregation<T> {
    type Summary = MinMax<T>;
    type Value = T;

    fn fold(&self, existing: Option<MinMax<T>>, value: &T) -> MinMax<T> {
        let mut summary = match (existing, self.baseline) {
            (Some(summary), _) => summary,
            (None, Some(baseline)) => MinMax::point(baseline),
            (None, None) => return MinMax::point(*value),
        };
        summary.include(*value);
        summary
    }

    fn summary_overlaps_summary(&self, needle: &MinMax<T>, haystack: &MinMax<T>) -> bool {
        haystack.overlaps(needle)
    }

    fn summary_overlaps_value(&self, needle: &MinMax<T>, value: &T) -> bool {
        needle.contains_value(*value)
    }
}
