//! The seam between fetching account history and analysing it.

use crate::error::ExplorerError;
use crate::records::FeedBatch;
use crate::request::FeedRequest;
use async_trait::async_trait;
use fundflow_types::Category;

/// Fetches one category of account history.
///
/// Implementations must return a batch whose [`FeedBatch::category`] equals
/// the requested `category`.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, category: Category, request: &FeedRequest) -> Result<FeedBatch, ExplorerError>;
}
