//! Shared test utilities for cmm integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Every helper is deterministic: feeds are static text and
//! timing-sensitive tests run under `tokio::time::pause()`.

#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fake_feed_server;
pub mod fixtures;
pub mod static_feed;

pub use builders::*;
pub use fixtures::*;
pub use static_feed::*;
