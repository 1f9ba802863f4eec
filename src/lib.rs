//! # Wavelet DB - Multi-Resolution Time-Series Store
//!
//! `wavelet-db` keeps raw values per integer position (a logical timestamp)
//! and maintains an aggregation pyramid over fixed-size blocks of positions,
//! so range queries can be answered at any level of detail without rescanning
//! raw data.
//!
//! - **Blocks** of `2^height` positions, each with its own pyramid, created on first write
//! - **Pyramids** keep one summary per binary-tree node, updated leaf to root on every write
//! - **Level reads** return the summaries at a chosen tree depth across a position range
//! - **Value searches** descend only into subtrees whose summary may contain the needle
//! - **Pluggable policies** via the [`Aggregation`] trait ([`MinMaxAggregation`] included)
//!
//! The store is append-only: nothing is deleted, updated or compacted.
//!
//! ## Quick Start
//!
//! ```rust
//! use wavelet_db::{MinMax, MinMaxAggregation, Result, Store};
//!
//! # fn main() -> Result<()> {
//! // 2^5 = 32 positions per block
//! let mut store: Store<_, &str> = Store::new(5, MinMaxAggregation::new(0.0))?;
//!
//! store.write_entry(0, 1.3, Some("boot"))?;
//! store.write_entry(20, 100.0, Some("spike"))?;
//! store.write_entry(32, 200.0, None)?;
//!
//! // Coarsest view: one min/max per block
//! let blocks = store.read_range(0, 64, 0)?;
//! assert_eq!(blocks.len(), 2);
//!
//! // Finest view: one summary per position of the first block
//! let leaves = store.read_range(0, 31, 5)?;
//! assert_eq!(leaves.len(), 32);
//!
//! // Raw entries in a time window and a value range
//! let spikes = store.find_in_range(0, 40, &MinMax::new(50.0, 150.0))?;
//! assert_eq!(spikes[0].log, Some("spike"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout
//!
//! ```text
//! positions  0 ............ 31 | 32 ............ 63 | ...
//!            block 0            | block 1            |
//!
//! level 0           [root]               one summary per block
//! level 1       [ . ]    [ . ]
//! ...
//! level h   [.][.][.] ... [.][.]         one summary per position
//!           bucket per position          raw (value, log) entries
//! ```
//!
//! Reads at level `L` round the query edges out to the nodes at that level,
//! so values just outside the window can be included. Use
//! [`Store::read_spans`] to see exactly which positions each summary covers.
//!
//! ## Concurrency
//!
//! [`Store`] is single-threaded (`&mut self` for writes). Wrap it in a
//! [`SharedStore`] to share it between threads behind one read/write lock.

pub mod core;
pub mod error;

pub use crate::core::{
    aggregation::{Aggregation, MinMax, MinMaxAggregation},
    bucket::{Bucket, Entry},
    config::StoreConfig,
    pyramid::{Pyramid, MAX_HEIGHT},
    shared::SharedStore,
    store::{Found, Span, Store, StoreStats},
};
pub use crate::error::{Result, WaveletError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
