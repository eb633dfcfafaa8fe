//! Concurrent fan-out over the five category feeds.

use crate::collection::FeedCollection;
use crate::error::FetchError;
use crate::spans::feed_fetch_span;

use fundflow_explorer::{ExplorerError, FeedRequest, FeedSource};
use fundflow_types::Category;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn, Instrument};

/// Issues one fetch per category in parallel and joins the results.
///
/// Each fetch runs in its own task. The collection lock is taken only to
/// store a finished result, never across network I/O. All five tasks are
/// awaited; a failure does not cancel the others.
#[derive(Clone)]
pub struct ConcurrentFetcher {
    source: Arc<dyn FeedSource>,
}

impl ConcurrentFetcher {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self { source }
    }

    /// Fetch every category for `request`.
    ///
    /// Fails if any category failed; the error names each of them and keeps
    /// the partially filled collection.
    pub async fn fetch_all(&self, request: &FeedRequest) -> Result<FeedCollection, FetchError> {
        let collection = Arc::new(Mutex::new(FeedCollection::default()));
        let mut handles = Vec::with_capacity(Category::ALL.len());

        for category in Category::ALL {
            let source = Arc::clone(&self.source);
            let request = request.clone();
            let collection = Arc::clone(&collection);

            let task = async move {
                let outcome = match source.fetch(category, &request).await {
                    Ok(batch) if batch.category() == category => Ok(batch),
                    Ok(batch) => Err(ExplorerError::Malformed(format!(
                        "{category} feed answered with {} records",
                        batch.category()
                    ))),
                    Err(e) => Err(e),
                };

                match outcome {
                    Ok(batch) => {
                        debug!(records = batch.len(), "feed fetched");
                        collection.lock().await.assign(batch);
                    }
                    Err(e) => {
                        warn!(error = %e, "feed fetch failed");
                        collection.lock().await.record_failure(category, e);
                    }
                }
            };
            handles.push((category, tokio::spawn(task.instrument(feed_fetch_span(category)))));
        }

        for (category, handle) in handles {
            if let Err(e) = handle.await {
                warn!(%category, error = %e, "feed task did not complete");
                collection
                    .lock()
                    .await
                    .record_failure(category, ExplorerError::Unavailable(format!("fetch task failed: {e}")));
            }
        }

        let collection = std::mem::take(&mut *collection.lock().await);
        if collection.is_complete() {
            Ok(collection)
        } else {
            Err(FetchError::new(collection))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fundflow_explorer::FeedBatch;

    /// Answers every category with a native batch.
    struct MislabelledSource;

    #[async_trait]
    impl FeedSource for MislabelledSource {
        async fn fetch(&self, _category: Category, _request: &FeedRequest) -> Result<FeedBatch, ExplorerError> {
            Ok(FeedBatch::empty(Category::Native))
        }
    }

    fn request() -> FeedRequest {
        FeedRequest::new(
            fundflow_types::Address::parse("0x00000000219ab540356cbb839cbe05303d7705fa").unwrap(),
            fundflow_types::ChainId::MAINNET,
        )
    }

    #[tokio::test]
    async fn mislabelled_batches_are_malformed() {
        let fetcher = ConcurrentFetcher::new(Arc::new(MislabelledSource));
        let err = fetcher.fetch_all(&request()).await.unwrap_err();
        assert_eq!(
            err.failed_categories(),
            vec![
                Category::Internal,
                Category::FungibleToken,
                Category::NonFungibleToken,
                Category::SemiFungibleToken
            ]
        );
        assert!(matches!(
            err.partial().errors.get(&Category::Internal),
            Some(ExplorerError::Malformed(_))
        ));
    }
}
