//! Chain identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// Chain ids the explorer's multichain API serves.
const SUPPORTED_CHAIN_IDS: &[u64] = &[
    1, 11155111, 17000, 2741, 11124, 33111, 33139, 42170, 42161, 421614, 43114, 43113, 8453,
    84532, 80094, 80069, 199, 1028, 81457, 168587773, 56, 97, 44787, 42220, 25, 252, 2522, 100,
    59144, 59141, 5000, 5003, 4352, 43521, 1287, 1284, 1285, 10, 11155420, 80002, 137, 2442, 1101,
    534352, 534351, 57054, 146, 50104, 531050104, 1923, 1924, 167009, 167000, 130, 1301, 1111,
    1112, 480, 4801, 660279, 37714555429, 51, 50, 324, 300,
];

/// Identifies which EVM chain an address is analysed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ChainId(u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const MAINNET: Self = Self(1);

    /// Validate a numeric chain id against the supported set.
    pub fn new(id: u64) -> Result<Self, TypesError> {
        if Self::is_supported(id) {
            Ok(Self(id))
        } else {
            Err(TypesError::UnsupportedChain(id))
        }
    }

    pub fn is_supported(id: u64) -> bool {
        SUPPORTED_CHAIN_IDS.contains(&id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::MAINNET
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for ChainId {
    type Error = TypesError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ChainId> for u64 {
    fn from(c: ChainId) -> Self {
        c.0
    }
}
