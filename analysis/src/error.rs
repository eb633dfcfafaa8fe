use crate::collection::FeedCollection;
use fundflow_types::Category;
use thiserror::Error;

/// One or more category feeds failed.
///
/// Carries the partially filled collection; the categories that did succeed
/// are still populated, but callers must not serve them.
///
/// Each cause is flattened into the message and no `source()` is exposed.
/// The typed [`ExplorerError`](fundflow_explorer::ExplorerError) per
/// category is in `partial().errors`.
#[derive(Debug, Error)]
#[error("failed to fetch feeds: {summary}")]
pub struct FetchError {
    summary: String,
    partial: Box<FeedCollection>,
}

impl FetchError {
    pub fn new(partial: FeedCollection) -> Self {
        let summary = partial
            .errors
            .iter()
            .map(|(category, error)| format!("{category}: {error}"))
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            summary,
            partial: Box::new(partial),
        }
    }

    pub fn failed_categories(&self) -> Vec<Category> {
        self.partial.failed_categories()
    }

    pub fn partial(&self) -> &FeedCollection {
        &self.partial
    }

    pub fn into_partial(self) -> FeedCollection {
        *self.partial
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("fetch stage: {0}")]
    Fetch(#[from] FetchError),
}
