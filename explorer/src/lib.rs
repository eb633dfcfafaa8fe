//! Block-explorer feed sources.
//!
//! An explorer exposes one account-history feed per transaction category
//! (native, internal, and three token standards). This crate models:
//! - [`FeedRequest`]: the validated request descriptor shared by all feeds
//! - typed upstream records and the [`FeedBatch`] sum type that carries them
//! - the [`FeedSource`] trait, the seam between fetching and aggregation
//! - [`ExplorerClient`]: the HTTP implementation against an Etherscan-style API

pub mod client;
pub mod error;
pub mod records;
pub mod request;
pub mod source;

pub use client::ExplorerClient;
pub use error::ExplorerError;
pub use records::{
    FeedBatch, InternalTransfer, MultiTokenTransfer, NativeTransfer, NftTransfer, TokenTransfer,
    TransferRecord,
};
pub use request::{FeedRequest, DEFAULT_PAGE_SIZE, UNBOUNDED_END_BLOCK};
pub use source::FeedSource;
