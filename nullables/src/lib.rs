//! Nullable infrastructure for deterministic testing.
//!
//! The explorer is the only external dependency of an analysis, and it sits
//! behind the [`FeedSource`](fundflow_explorer::FeedSource) trait. This crate
//! provides a test-friendly implementation that:
//! - Returns scripted batches and failures per category
//! - Can add artificial latency to exercise the concurrent fan-out
//! - Records every call for assertions
//! - Never touches the network
//!
//! Usage: hand a `NullFeedSource` to the fetcher in place of the HTTP client.

pub mod feed;

pub use feed::NullFeedSource;
