//! Typed records returned by the five account-history feeds.
//!
//! Numeric fields arrive as decimal strings. Amounts, decimals and
//! timestamps are kept raw here so that one bad record can be skipped
//! during aggregation without failing the whole feed.

use fundflow_types::{normalize, normalize_native, Category, Timestamp, TypesError, NON_FUNGIBLE_UNIT};
use serde::{Deserialize, Serialize};

/// A plain value transfer (`txlist`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeTransfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub is_error: String,
    pub contract_address: String,
}

/// A contract-initiated value transfer (`txlistinternal`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternalTransfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub is_error: String,
    pub contract_address: String,
}

/// A fungible token transfer (`tokentx`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenTransfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub contract_address: String,
    pub token_symbol: String,
    pub token_decimal: String,
}

/// A non-fungible token transfer (`tokennfttx`). Always one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NftTransfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub contract_address: String,
    #[serde(rename = "tokenID")]
    pub token_id: String,
    pub token_symbol: String,
}

/// A semi-fungible (multi-token) transfer (`token1155tx`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MultiTokenTransfer {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub contract_address: String,
    #[serde(rename = "tokenID")]
    pub token_id: String,
    pub token_value: String,
    pub token_decimal: String,
}

/// Common view over every feed's record type.
pub trait TransferRecord {
    const CATEGORY: Category;

    fn sender(&self) -> &str;
    fn to(&self) -> &str;
    fn contract_address(&self) -> &str;
    fn hash(&self) -> &str;
    fn raw_timestamp(&self) -> &str;

    /// Amount scaled by the record's decimal exponent.
    fn normalized_amount(&self) -> Result<f64, TypesError>;

    /// Whether the provider flagged the transaction as failed.
    fn failed(&self) -> bool {
        false
    }

    /// The receiving endpoint. Contract creations carry an empty `to`, in
    /// which case the created contract is the recipient.
    fn recipient(&self) -> &str {
        if self.to().is_empty() {
            self.contract_address()
        } else {
            self.to()
        }
    }

    fn timestamp(&self) -> Option<Timestamp> {
        self.raw_timestamp().trim().parse().ok().map(Timestamp::new)
    }
}

fn error_flag_set(flag: &str) -> bool {
    !matches!(flag.trim(), "" | "0")
}

fn token_decimals(raw: &str) -> Result<u32, TypesError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .map_err(|_| TypesError::MalformedAmount(raw.to_string()))
}

macro_rules! common_accessors {
    () => {
        fn sender(&self) -> &str {
            &self.from
        }

        fn to(&self) -> &str {
            &self.to
        }

        fn contract_address(&self) -> &str {
            &self.contract_address
        }

        fn hash(&self) -> &str {
            &self.hash
        }

        fn raw_timestamp(&self) -> &str {
            &self.time_stamp
        }
    };
}

impl TransferRecord for NativeTransfer {
    const CATEGORY: Category = Category::Native;
    common_accessors!();

    fn normalized_amount(&self) -> Result<f64, TypesError> {
        normalize_native(&self.value)
    }

    fn failed(&self) -> bool {
        error_flag_set(&self.is_error)
    }
}

impl TransferRecord for InternalTransfer {
    const CATEGORY: Category = Category::Internal;
    common_accessors!();

    fn normalized_amount(&self) -> Result<f64, TypesError> {
        normalize_native(&self.value)
    }

    fn failed(&self) -> bool {
        error_flag_set(&self.is_error)
    }
}

impl TransferRecord for TokenTransfer {
    const CATEGORY: Category = Category::FungibleToken;
    common_accessors!();

    fn normalized_amount(&self) -> Result<f64, TypesError> {
        normalize(&self.value, token_decimals(&self.token_decimal)?)
    }
}

impl TransferRecord for NftTransfer {
    const CATEGORY: Category = Category::NonFungibleToken;
    common_accessors!();

    fn normalized_amount(&self) -> Result<f64, TypesError> {
        Ok(NON_FUNGIBLE_UNIT)
    }
}

impl TransferRecord for MultiTokenTransfer {
    const CATEGORY: Category = Category::SemiFungibleToken;
    common_accessors!();

    fn normalized_amount(&self) -> Result<f64, TypesError> {
        normalize(&self.token_value, token_decimals(&self.token_decimal)?)
    }
}

/// One category's records, tagged by category.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedBatch {
    Native(Vec<NativeTransfer>),
    Internal(Vec<InternalTransfer>),
    FungibleToken(Vec<TokenTransfer>),
    NonFungibleToken(Vec<NftTransfer>),
    SemiFungibleToken(Vec<MultiTokenTransfer>),
}

impl FeedBatch {
    pub fn empty(category: Category) -> Self {
        match category {
            Category::Native => Self::Native(Vec::new()),
            Category::Internal => Self::Internal(Vec::new()),
            Category::FungibleToken => Self::FungibleToken(Vec::new()),
            Category::NonFungibleToken => Self::NonFungibleToken(Vec::new()),
            Category::SemiFungibleToken => Self::SemiFungibleToken(Vec::new()),
        }
    }

    /// Decode a provider `result` array into the record type of `category`.
    pub fn decode(category: Category, result: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match category {
            Category::Native => Self::Native(serde_json::from_value(result)?),
            Category::Internal => Self::Internal(serde_json::from_value(result)?),
            Category::FungibleToken => Self::FungibleToken(serde_json::from_value(result)?),
            Category::NonFungibleToken => Self::NonFungibleToken(serde_json::from_value(result)?),
            Category::SemiFungibleToken => Self::SemiFungibleToken(serde_json::from_value(result)?),
        })
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Native(_) => Category::Native,
            Self::Internal(_) => Category::Internal,
            Self::FungibleToken(_) => Category::FungibleToken,
            Self::NonFungibleToken(_) => Category::NonFungibleToken,
            Self::SemiFungibleToken(_) => Category::SemiFungibleToken,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Native(v) => v.len(),
            Self::Internal(v) => v.len(),
            Self::FungibleToken(v) => v.len(),
            Self::NonFungibleToken(v) => v.len(),
            Self::SemiFungibleToken(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
