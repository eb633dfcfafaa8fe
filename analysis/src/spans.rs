//! Span constructors shared by the analysis pipeline, so every analysis and
//! feed fetch can be filtered and correlated by the same names and fields.

use crate::aggregator::Direction;
use fundflow_explorer::FeedRequest;
use fundflow_types::Category;
use tracing::{debug_span, info_span, Span};

/// Span covering one analysis request end to end.
pub fn analysis_span(direction: Direction, request: &FeedRequest) -> Span {
    info_span!(
        "analysis",
        direction = %direction,
        address = %request.address,
        chain = %request.chain
    )
}

/// Span covering a single category fetch.
pub fn feed_fetch_span(category: Category) -> Span {
    debug_span!("feed_fetch", category = %category)
}
