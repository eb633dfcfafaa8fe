//! Error type shared by the primitive types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("malformed amount: {0:?} is not a base-10 integer")]
    MalformedAmount(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unsupported chain id: {0}")]
    UnsupportedChain(u64),
}
