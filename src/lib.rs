//! cmm — Concrete maturity monitor
//!
//! Fetches the temperature logger's text feed, parses it into records and
//! derives the dashboard projections. The layers live in workspace crates and
//! are re-exported here so integration tests and benches can reach them
//! through one path.
//!
//! # Architecture
//!
//! ```text
//! FeedSource ──► parse_feed ──► RecordStore ──► derive::* ──► API / Poller
//!                                                   │
//!                                       TimeCompare ┘ (display only)
//! ```

pub use cmm_api as api;
pub use cmm_core as core;
pub use cmm_feeds as feeds;

pub use cmm_core::{
    parse_feed, parse_line, CompareScaled, LineRejection, RealtimeRecord, RecordStore,
    TimeCompare,
};
pub use cmm_feeds::{fetch_records, FeedError, FeedSource};
