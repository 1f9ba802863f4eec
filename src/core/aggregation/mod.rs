//! Aggregation policies for the pyramid
//!
//! A policy decides two things:
//! - How a raw value is folded into the running summary of a tree node
//! - Whether a search needle may overlap a summary (or a raw value)
//!
//! The second answer is what lets a value-range search skip whole subtrees.

pub mod minmax;

pub use minmax::{MinMax, MinMaxAggregation};

/// Aggregation policy trait
///
/// Implementations must be stateless apart from construction-time
/// configuration, so a single instance can serve every pyramid in a store
/// and be shared by concurrent readers.
///
/// # Contract
///
/// - `fold` is called with `existing = None` exactly once per node, on the
///   first value written beneath it. Absence is a baseline case, not an error.
/// - `fold` must be deterministic and insensitive to write order
///   (associative and commutative in effect). A node summary is the fold of
///   every value beneath it in write order, and two nodes covering the same
///   values must not disagree.
/// - Every summary must be a conservative superset of the values folded into
///   it: if `summary_overlaps_value(needle, v)` holds for some `v` beneath a
///   node, then `summary_overlaps_summary(needle, node_summary)` must hold too.
///   Violating this makes searches silently drop matches.
pub trait Aggregation {
    /// Summary stored at every tree node
    type Summary: Clone;

    /// Raw value written at a position
    type Value: Clone;

    /// Fold a raw value into an existing summary (or start a new one)
    fn fold(&self, existing: Option<Self::Summary>, value: &Self::Value) -> Self::Summary;

    /// Does the needle overlap the summary of a subtree?
    fn summary_overlaps_summary(&self, needle: &Self::Summary, haystack: &Self::Summary) -> bool;

    /// Does the needle match a single raw value?
    fn summary_overlaps_value(&self, needle: &Self::Summary, value: &Self::Value) -> bool;
}
