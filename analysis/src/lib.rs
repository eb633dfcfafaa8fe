//! Fund-flow analysis pipeline.
//!
//! A request fans out to the five category feeds concurrently
//! ([`ConcurrentFetcher`]), the joined [`FeedCollection`] is folded by
//! counterparty in one direction ([`aggregate`]), and the resulting buckets
//! are filtered, sorted and truncated ([`filter_sort_limit`]).
//! [`AnalysisService`] runs the whole pipeline and records metrics.

pub mod aggregator;
pub mod collection;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod metrics;
pub mod service;
pub mod spans;

pub use aggregator::{aggregate, aggregate_in, Aggregation, CounterpartyAggregate, Direction, NormalizedTransaction};
pub use collection::FeedCollection;
pub use error::{AnalysisError, FetchError};
pub use fetcher::ConcurrentFetcher;
pub use filter::{filter_sort_limit, FilterParams, SortField, DEFAULT_LIMIT};
pub use metrics::AnalysisMetrics;
pub use service::AnalysisService;
