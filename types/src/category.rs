//! Transaction categories served by the explorer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five independent transaction feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Top-level native-currency transactions.
    Native,
    /// Value moved by contract execution (message calls).
    Internal,
    /// ERC-20 style fungible token transfers.
    FungibleToken,
    /// ERC-721 style non-fungible token transfers.
    NonFungibleToken,
    /// ERC-1155 style semi-fungible token transfers.
    SemiFungibleToken,
}

impl Category {
    /// Every category, in fixed slot order.
    pub const ALL: [Category; 5] = [
        Category::Native,
        Category::Internal,
        Category::FungibleToken,
        Category::NonFungibleToken,
        Category::SemiFungibleToken,
    ];

    /// The explorer `action` query value for this feed.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Native => "txlist",
            Self::Internal => "txlistinternal",
            Self::FungibleToken => "tokentx",
            Self::NonFungibleToken => "tokennfttx",
            Self::SemiFungibleToken => "token1155tx",
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Internal => "internal",
            Self::FungibleToken => "fungible-token",
            Self::NonFungibleToken => "non-fungible-token",
            Self::SemiFungibleToken => "semi-fungible-token",
        }
    }

    /// Whether amounts of this category count toward a counterparty's
    /// running total. Token amounts are kept in the transaction history only.
    pub fn contributes_to_total(&self) -> bool {
        matches!(self, Self::Native | Self::Internal)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
