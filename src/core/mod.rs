//! Core storage layer
//!
//! - [`aggregation`] - Aggregation policy trait and the min/max reference policy
//! - [`bucket`] - Raw values written at one position
//! - [`pyramid`] - Fixed-capacity aggregation tree over one block
//! - [`store`] - Block-partitioned store routing writes, reads and searches
//! - [`shared`] - Lock-guarded handle for multi-threaded use
//! - [`config`] - Store configuration

pub mod aggregation;
pub mod bucket;
pub mod config;
pub mod pyramid;
pub mod shared;
pub mod store;

pub use aggregation::{Aggregation, MinMax, MinMaxAggregation};
pub use bucket::{Bucket, Entry};
pub use config::StoreConfig;
pub use pyramid::{Pyramid, MAX_HEIGHT};
pub use shared::SharedStore;
pub use store::{Found, Span, Store, StoreStats};
