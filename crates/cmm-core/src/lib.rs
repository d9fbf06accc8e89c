//! cmm-core — concrete maturity monitor core library.
//!
//! This crate holds everything between the raw feed text and the JSON a
//! dashboard renders: the record type, the fault-tolerant line parser, the
//! per-fetch record store, one derivation function per projection, and the
//! display-side time-compare scaler.
//!
//! # Pipeline
//!
//! ```text
//! feed text ──► parser ──► RecordStore ──► derive::* ──► (caller) TimeCompare
//! ```
//!
//! Everything here is synchronous and free of shared state. Fetching lives in
//! `cmm-feeds`; serving lives in `cmm-api`.

pub mod compare;
pub mod config;
pub mod derive;
pub mod labels;
pub mod parser;
pub mod store;
pub mod types;
pub mod window;

pub use compare::{CompareScaled, TimeCompare};
pub use parser::{parse_feed, parse_line, LineRejection};
pub use store::RecordStore;
pub use types::RealtimeRecord;
