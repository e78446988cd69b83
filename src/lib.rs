//! Parallel min/mean/max aggregation of `<key>;<value>` measurement files.
//!
//! The input buffer is cut into line-aligned chunks that feed a pool of
//! workers over a bounded queue. Each worker owns an open-addressing table
//! keyed by a rolling hash of the key bytes; the tables are merged once at
//! the end and rendered sorted by key.

pub mod chunker;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod merge;
pub mod parser;
pub mod report;
pub mod table;
pub mod worker;

pub use config::Config;
pub use engine::aggregate;
pub use error::{Error, Result};
pub use merge::GlobalTable;
