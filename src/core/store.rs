//! Block-partitioned store
//!
//! The unbounded position space is cut into blocks of `alignment = 2^height`
//! positions. Each occupied block owns one [`Pyramid`], created on first
//! write and never removed. Range reads and searches walk the blocks that
//! overlap the query window in ascending order and stitch the per-block
//! results together.
//!
//! Blocks that were never written are skipped: they contribute nothing, not
//! placeholder summaries. Callers must expect sparse results.

use crate::core::aggregation::Aggregation;
use crate::core::config::StoreConfig;
use crate::core::pyramid::{Pyramid, MAX_HEIGHT};
use crate::error::{Result, WaveletError};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry as BlockEntry;
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

/// A summary together with the absolute positions its node covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span<S> {
    /// First position covered by the node
    pub first: i64,
    /// Last position covered by the node (inclusive)
    pub last: i64,
    /// `None` when nothing was written beneath the node
    pub summary: Option<S>,
}

/// A raw entry matched by [`Store::find_in_range`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Found<V, L> {
    pub position: i64,
    pub value: V,
    pub log: Option<L>,
}

/// Store statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub height: u32,
    /// Positions per block
    pub alignment: i64,
    /// Blocks with a pyramid
    pub blocks: usize,
    /// Positions holding at least one entry
    pub occupied_positions: usize,
    /// Total entries written
    pub entries: usize,
}

/// Per-block slice of a query window
struct BlockWindow<'a, A: Aggregation, L> {
    block: i64,
    pyramid: &'a Pyramid<A, L>,
    left: usize,
    right: usize,
}

/// Time-series store with one aggregation pyramid per occupied block
///
/// `L` is the log payload kept alongside each raw value.
///
/// # Examples
///
/// ```
/// use wavelet_db::{MinMax, MinMaxAggregation, Store};
///
/// # fn main() -> wavelet_db::Result<()> {
/// let mut store: Store<_, &str> = Store::new(5, MinMaxAggregation::new(0.0))?;
/// store.write_entry(3, 12.5, Some("sensor warm"))?;
/// store.write_entry(40, -3.0, None)?;
///
/// // one summary per block at level 0
/// let roots = store.read_range(0, 63, 0)?;
/// assert_eq!(roots.len(), 2);
///
/// let hot = store.find_in_range(0, 63, &MinMax::new(10.0, 20.0))?;
/// assert_eq!(hot[0].position, 3);
/// # Ok(())
/// # }
/// ```
pub struct Store<A: Aggregation, L = ()> {
    height: u32,
    alignment: i64,
    aggregation: A,
    blocks: BTreeMap<i64, Pyramid<A, L>>,
}

impl<A: Aggregation, L> Store<A, L> {
    /// Create an empty store whose blocks span `2^height` positions
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeight` if `height` exceeds 30.
    pub fn new(height: u32, aggregation: A) -> Result<Self> {
        if height > MAX_HEIGHT {
            return Err(WaveletError::InvalidHeight {
                height,
                max: MAX_HEIGHT,
            });
        }

        let alignment = 1i64 << height;
        info!(
            "Creating store with pyramid height {} ({} positions per block)",
            height, alignment
        );

        Ok(Store {
            height,
            alignment,
            aggregation,
            blocks: BTreeMap::new(),
        })
    }

    pub fn with_config(config: &StoreConfig, aggregation: A) -> Result<Self> {
        config.validate()?;
        Self::new(config.height, aggregation)
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Positions per block
    pub fn alignment(&self) -> i64 {
        self.alignment
    }

    pub fn aggregation(&self) -> &A {
        &self.aggregation
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Pyramid for a block index, if that block was ever written
    pub fn block(&self, index: i64) -> Option<&Pyramid<A, L>> {
        self.blocks.get(&index)
    }

    /// Append a value at `position`
    ///
    /// The block's pyramid is created on first use. Earlier writes at the
    /// same position are kept; this one is appended after them.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for negative positions.
    pub fn write_entry(&mut self, position: i64, value: A::Value, log: Option<L>) -> Result<()> {
        if position < 0 {
            return Err(WaveletError::out_of_range("position", position, 0));
        }

        let (block, offset) = self.split(position);
        trace!(position, block, offset, "write entry");

        let pyramid = match self.blocks.entry(block) {
            BlockEntry::Occupied(entry) => entry.into_mut(),
            BlockEntry::Vacant(entry) => {
                debug!("Creating pyramid for block {}", block);
                entry.insert(Pyramid::new(self.height)?)
            }
        };

        pyramid.write(&self.aggregation, offset, value, log)
    }

    /// Summaries at `level` covering `start..=end`, in position order
    ///
    /// Level 0 yields one summary per occupied block; level `height` yields
    /// one per position. Query edges are rounded out to the level's node
    /// granularity, so neighbouring values may be included; read at level
    /// `height` for exact attribution.
    ///
    /// # Errors
    ///
    /// `InvalidRange` if `start > end`, `OutOfRange` if `level > height`.
    pub fn read_range(&self, start: i64, end: i64, level: u32) -> Result<Vec<Option<A::Summary>>> {
        self.check_level(level)?;

        let mut result = Vec::new();
        for window in self.windows(start, end)? {
            let summaries = window.pyramid.read_range(level, window.left, window.right)?;
            result.extend(summaries.map(|summary| summary.cloned()));
        }

        Ok(result)
    }

    /// Like [`read_range`](Self::read_range), with the positions each summary covers
    pub fn read_spans(&self, start: i64, end: i64, level: u32) -> Result<Vec<Span<A::Summary>>> {
        self.check_level(level)?;

        let mut result = Vec::new();
        for window in self.windows(start, end)? {
            let base = window.block * self.alignment;
            let spans = window.pyramid.read_spans(level, window.left, window.right)?;
            result.extend(spans.map(|(first, last, summary)| Span {
                first: base + first as i64,
                last: base + last as i64,
                summary: summary.cloned(),
            }));
        }

        Ok(result)
    }

    /// Raw entries in `start..=end` whose value overlaps `needle`
    ///
    /// Blocks whose root summary misses the needle are skipped without
    /// descending. Results are ordered by position, then write order.
    /// Returns an empty vector when nothing matches.
    pub fn find_in_range(&self, start: i64, end: i64, needle: &A::Summary) -> Result<Vec<Found<A::Value, L>>>
    where
        L: Clone,
    {
        let mut found = Vec::new();
        for window in self.windows(start, end)? {
            if !self.root_overlaps(&window, needle) {
                continue;
            }

            let base = window.block * self.alignment;
            let hits = window
                .pyramid
                .search_range(&self.aggregation, window.left, window.right, needle)?;
            found.extend(hits.into_iter().map(|(offset, entry)| Found {
                position: base + offset as i64,
                value: entry.value.clone(),
                log: entry.log.clone(),
            }));
        }

        Ok(found)
    }

    /// Spans at `level` in `start..=end` whose summary overlaps `needle`
    ///
    /// The coarse form of [`find_in_range`](Self::find_in_range): it narrows
    /// down where matches may be without touching raw entries.
    pub fn locate(&self, start: i64, end: i64, level: u32, needle: &A::Summary) -> Result<Vec<Span<A::Summary>>> {
        self.check_level(level)?;

        let mut result = Vec::new();
        for window in self.windows(start, end)? {
            if !self.root_overlaps(&window, needle) {
                continue;
            }

            let base = window.block * self.alignment;
            let nodes = window
                .pyramid
                .locate(&self.aggregation, level, window.left, window.right, needle)?;
            result.extend(nodes.into_iter().map(|(first, last, summary)| Span {
                first: base + first as i64,
                last: base + last as i64,
                summary: Some(summary),
            }));
        }

        Ok(result)
    }

    pub fn stats(&self) -> StoreStats {
        let (occupied_positions, entries) = self
            .blocks
            .values()
            .fold((0, 0), |(occupied, entries), pyramid| {
                (occupied + pyramid.occupied(), entries + pyramid.entries())
            });

        StoreStats {
            height: self.height,
            alignment: self.alignment,
            blocks: self.blocks.len(),
            occupied_positions,
            entries,
        }
    }

    fn root_overlaps(&self, window: &BlockWindow<'_, A, L>, needle: &A::Summary) -> bool {
        match window.pyramid.root() {
            Some(root) if self.aggregation.summary_overlaps_summary(needle, root) => true,
            _ => {
                debug!("Skipping block {}: root summary does not overlap", window.block);
                false
            }
        }
    }

    /// Occupied blocks overlapping `start..=end` with their local offset windows
    ///
    /// Negative positions hold no data, so the window is clipped at 0.
    fn windows(&self, start: i64, end: i64) -> Result<Vec<BlockWindow<'_, A, L>>> {
        if start > end {
            return Err(WaveletError::InvalidRange { start, end });
        }
        if end < 0 {
            return Ok(Vec::new());
        }

        let (min_block, min_offset) = self.split(start.max(0));
        let (max_block, max_offset) = self.split(end);
        let last_offset = (self.alignment - 1) as usize;

        Ok(self
            .blocks
            .range(min_block..=max_block)
            .map(|(&block, pyramid)| BlockWindow {
                block,
                pyramid,
                left: if block == min_block { min_offset } else { 0 },
                right: if block == max_block { max_offset } else { last_offset },
            })
            .collect())
    }

    /// Split a non-negative position into `(block, offset)`
    fn split(&self, position: i64) -> (i64, usize) {
        (position / self.alignment, (position % self.alignment) as usize)
    }

    fn check_level(&self, level: u32) -> Result<()> {
        if level > self.height {
            return Err(WaveletError::out_of_range("level", level, self.height));
        }
        Ok(())
    }
}
