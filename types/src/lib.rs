//! Fundamental types for fund-flow analysis.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, chain identifiers, transaction categories, sort orders,
//! timestamps, and amount normalization.

pub mod address;
pub mod amount;
pub mod category;
pub mod chain;
pub mod error;
pub mod order;
pub mod time;

pub use address::Address;
pub use amount::{normalize, normalize_native, NATIVE_DECIMALS, NON_FUNGIBLE_UNIT};
pub use category::Category;
pub use chain::ChainId;
pub use error::TypesError;
pub use order::SortOrder;
pub use time::Timestamp;
