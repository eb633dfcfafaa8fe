//! Nullable feed source: scripted replies instead of HTTP.

use async_trait::async_trait;
use fundflow_explorer::{ExplorerError, FeedBatch, FeedRequest, FeedSource};
use fundflow_types::Category;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A feed source that answers from a script.
///
/// Categories with nothing scripted answer with an empty batch.
pub struct NullFeedSource {
    replies: HashMap<Category, Result<FeedBatch, ExplorerError>>,
    delays: HashMap<Category, Duration>,
    /// Every `(category, request)` received, in arrival order.
    calls: Mutex<Vec<(Category, FeedRequest)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl NullFeedSource {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Script the batch returned for the batch's own category.
    pub fn with_batch(mut self, batch: FeedBatch) -> Self {
        self.replies.insert(batch.category(), Ok(batch));
        self
    }

    /// Script a failure for `category`.
    pub fn with_failure(mut self, category: Category, error: ExplorerError) -> Self {
        self.replies.insert(category, Err(error));
        self
    }

    /// Delay the reply for `category`.
    pub fn with_delay(mut self, category: Category, delay: Duration) -> Self {
        self.delays.insert(category, delay);
        self
    }

    /// Delay every category by the same amount.
    pub fn with_uniform_delay(mut self, delay: Duration) -> Self {
        for category in Category::ALL {
            self.delays.insert(category, delay);
        }
        self
    }

    /// All calls received so far (for assertions).
    pub fn calls(&self) -> Vec<(Category, FeedRequest)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Categories requested so far, in arrival order.
    pub fn requested_categories(&self) -> Vec<Category> {
        self.calls().into_iter().map(|(c, _)| c).collect()
    }

    /// Highest number of fetches that were in progress at the same time.
    pub fn max_concurrency(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for NullFeedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedSource for NullFeedSource {
    async fn fetch(&self, category: Category, request: &FeedRequest) -> Result<FeedBatch, ExplorerError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((category, request.clone()));
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&category) {
            tokio::time::sleep(*delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.replies.get(&category) {
            Some(reply) => reply.clone(),
            None => Ok(FeedBatch::empty(category)),
        }
    }
}
