//! Fixed-capacity aggregation pyramid for one block of positions
//!
//! A pyramid covers `width = 2^height` consecutive positions. Summaries live
//! in a flat implicit-heap array:
//!
//! ```text
//! slot 0            whole-block summary (folded once per write)
//! slot 1            tree root (level 0)
//! slots 2..4        level 1
//! slots 2^L..2^L+1  level L  (2^L nodes)
//! slots w..2w       leaves   (level = height), leaf offset i at slot w + i
//! ```
//!
//! Children of node `n` are `2n` and `2n + 1`, its parent is `n / 2`.
//! The whole array is allocated up front; the shape never changes.

use crate::core::aggregation::Aggregation;
use crate::core::bucket::{Bucket, Entry};
use crate::error::{Result, WaveletError};
use std::ops::RangeInclusive;

/// Largest supported height. `2^31` overflows 32-bit signed alignment math.
pub const MAX_HEIGHT: u32 = 30;

/// Aggregation tree over one block
pub struct Pyramid<A: Aggregation, L> {
    height: u32,
    width: usize,
    stack: Vec<Option<A::Summary>>,
    buckets: Vec<Option<Bucket<A::Value, L>>>,
    occupied: usize,
    entries: usize,
}

impl<A: Aggregation, L> Pyramid<A, L> {
    /// Create an empty pyramid covering `2^height` positions
    pub fn new(height: u32) -> Result<Self> {
        if height > MAX_HEIGHT {
            return Err(WaveletError::InvalidHeight {
                height,
                max: MAX_HEIGHT,
            });
        }

        let width = 1usize << height;
        Ok(Pyramid {
            height,
            width,
            stack: (0..2 * width).map(|_| None).collect(),
            buckets: (0..width).map(|_| None).collect(),
            occupied: 0,
            entries: 0,
        })
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of leaf offsets holding at least one entry
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Total entries written to this pyramid
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Summary of every value written to the block
    pub fn root(&self) -> Option<&A::Summary> {
        self.stack[0].as_ref()
    }

    /// Raw entries at a leaf offset, if anything was written there
    pub fn bucket(&self, offset: usize) -> Option<&Bucket<A::Value, L>> {
        self.buckets.get(offset).and_then(Option::as_ref)
    }

    /// Append a value at `offset` and fold it into every ancestor summary
    pub fn write(&mut self, agg: &A, offset: usize, value: A::Value, log: Option<L>) -> Result<()> {
        if offset >= self.width {
            return Err(WaveletError::out_of_range("pyramid offset", offset, self.width - 1));
        }

        let mut node = self.width + offset;
        while node > 0 {
            fold_into(agg, &mut self.stack[node], &value);
            node /= 2;
        }
        fold_into(agg, &mut self.stack[0], &value);

        let slot = &mut self.buckets[offset];
        if slot.is_none() {
            self.occupied += 1;
        }
        slot.get_or_insert_with(Bucket::new).append(value, log);
        self.entries += 1;

        Ok(())
    }

    /// Summaries at `level` whose nodes cover leaf offsets `left..=right`
    ///
    /// The offsets are rounded out to the level's node granularity, so values
    /// just outside the window that share a node with it are included.
    /// Nodes with nothing written beneath them yield `None`.
    pub fn read_range(
        &self,
        level: u32,
        left: usize,
        right: usize,
    ) -> Result<impl Iterator<Item = Option<&A::Summary>> + '_> {
        let nodes = self.node_range(level, left, right)?;
        Ok(nodes.map(move |node| self.stack[node].as_ref()))
    }

    /// Like [`read_range`](Self::read_range), paired with the first and last
    /// leaf offset each node covers
    pub fn read_spans(
        &self,
        level: u32,
        left: usize,
        right: usize,
    ) -> Result<impl Iterator<Item = (usize, usize, Option<&A::Summary>)> + '_> {
        let nodes = self.node_range(level, left, right)?;
        Ok(nodes.map(move |node| {
            let (first, last) = self.leaf_span(node, level);
            (first, last, self.stack[node].as_ref())
        }))
    }

    /// Raw entries in `left..=right` whose value overlaps `needle`
    ///
    /// Descends from the root, skipping any subtree that lies outside the
    /// window or whose summary does not overlap the needle. Hits come back in
    /// offset order, then write order within a bucket.
    pub fn search_range<'a>(
        &'a self,
        agg: &A,
        left: usize,
        right: usize,
        needle: &A::Summary,
    ) -> Result<Vec<(usize, &'a Entry<A::Value, L>)>> {
        self.check_offset("pyramid left", left)?;
        self.check_offset("pyramid right", right)?;

        let buckets: &'a [Option<Bucket<A::Value, L>>] = &self.buckets;
        let width = self.width;
        let mut hits = Vec::new();
        self.descend(agg, 1, 0, (left, right), needle, self.height, &mut |node, _| {
            let offset = node - width;
            if let Some(bucket) = &buckets[offset] {
                for entry in bucket.iter() {
                    if agg.summary_overlaps_value(needle, &entry.value) {
                        hits.push((offset, entry));
                    }
                }
            }
        });

        Ok(hits)
    }

    /// Nodes at `level` within `left..=right` whose summary overlaps `needle`
    ///
    /// Returns `(first_offset, last_offset, summary)` per surviving node.
    pub fn locate(
        &self,
        agg: &A,
        level: u32,
        left: usize,
        right: usize,
        needle: &A::Summary,
    ) -> Result<Vec<(usize, usize, A::Summary)>> {
        self.check_level(level)?;
        self.check_offset("pyramid left", left)?;
        self.check_offset("pyramid right", right)?;

        let mut found = Vec::new();
        self.descend(agg, 1, 0, (left, right), needle, level, &mut |node, summary| {
            let (first, last) = self.leaf_span(node, level);
            found.push((first, last, summary.clone()));
        });

        Ok(found)
    }

    #[allow(clippy::too_many_arguments)]
    fn descend<F>(
        &self,
        agg: &A,
        node: usize,
        level: u32,
        window: (usize, usize),
        needle: &A::Summary,
        stop: u32,
        visit: &mut F,
    ) where
        F: FnMut(usize, &A::Summary),
    {
        let Some(summary) = self.stack[node].as_ref() else {
            return;
        };

        let (first, last) = self.leaf_span(node, level);
        if last < window.0 || first > window.1 {
            return;
        }
        if !agg.summary_overlaps_summary(needle, summary) {
            return;
        }

        if level == stop {
            visit(node, summary);
            return;
        }

        self.descend(agg, 2 * node, level + 1, window, needle, stop, visit);
        self.descend(agg, 2 * node + 1, level + 1, window, needle, stop, visit);
    }

    /// Map leaf offsets to the node index range at `level`
    fn node_range(&self, level: u32, left: usize, right: usize) -> Result<RangeInclusive<usize>> {
        self.check_offset("pyramid left", left)?;
        self.check_offset("pyramid right", right)?;
        self.check_level(level)?;

        let folds = self.height - level;
        Ok(((left + self.width) >> folds)..=((right + self.width) >> folds))
    }

    /// First and last leaf offset beneath `node`, which sits at `level`
    fn leaf_span(&self, node: usize, level: u32) -> (usize, usize) {
        let shift = self.height - level;
        let first = (node - (1usize << level)) << shift;
        (first, first + (1usize << shift) - 1)
    }

    fn check_offset(&self, what: &'static str, offset: usize) -> Result<()> {
        if offset >= self.width {
            return Err(WaveletError::out_of_range(what, offset, self.width - 1));
        }
        Ok(())
    }

    fn check_level(&self, level: u32) -> Result<()> {
        if level > self.height {
            return Err(WaveletError::out_of_range("pyramid level", level, self.height));
        }
        Ok(())
    }
}

fn fold_into<A: Aggregation>(agg: &A, slot: &mut Option<A::Summary>, value: &A::Value) {
    *slot = Some(agg.fold(slot.take(), value));
}
