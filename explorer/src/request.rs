//! The request descriptor shared by every category feed.

use fundflow_types::{Address, Category, ChainId, SortOrder};

/// Default number of records per page when `offset` is absent or non-positive.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// End block sent upstream when the caller asked for no upper bound.
pub const UNBOUNDED_END_BLOCK: u64 = 99_999_999;

/// Everything a feed needs to query one category of account history.
///
/// Block bounds, page and offset are kept exactly as the caller supplied them;
/// the `effective_*` accessors apply the defaulting rules when the request is
/// mapped onto an upstream query.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedRequest {
    pub address: Address,
    pub chain: ChainId,
    /// Optional token contract filter, honoured by the token feeds.
    pub contract_address: Option<Address>,
    pub start_block: i64,
    /// Negative means "no upper bound".
    pub end_block: i64,
    /// 1-based; zero or negative is treated as page 1.
    pub page: i64,
    /// Page size; zero or negative is treated as [`DEFAULT_PAGE_SIZE`].
    pub offset: i64,
    pub sort: SortOrder,
    /// Per-request provider credential overriding the process-wide key.
    pub api_key: Option<String>,
}

impl FeedRequest {
    /// A request for the full history of `address` on `chain`, first page,
    /// newest first.
    pub fn new(address: Address, chain: ChainId) -> Self {
        Self {
            address,
            chain,
            contract_address: None,
            start_block: 0,
            end_block: -1,
            page: 1,
            offset: i64::from(DEFAULT_PAGE_SIZE),
            sort: SortOrder::Desc,
            api_key: None,
        }
    }

    pub fn with_blocks(mut self, start_block: i64, end_block: i64) -> Self {
        self.start_block = start_block;
        self.end_block = end_block;
        self
    }

    pub fn with_page(mut self, page: i64, offset: i64) -> Self {
        self.page = page;
        self.offset = offset;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_contract(mut self, contract: Address) -> Self {
        self.contract_address = Some(contract);
        self
    }

    pub fn effective_start_block(&self) -> u64 {
        u64::try_from(self.start_block).unwrap_or(0)
    }

    pub fn effective_end_block(&self) -> u64 {
        u64::try_from(self.end_block).unwrap_or(UNBOUNDED_END_BLOCK)
    }

    pub fn effective_page(&self) -> u32 {
        if self.page <= 0 {
            1
        } else {
            u32::try_from(self.page).unwrap_or(u32::MAX)
        }
    }

    pub fn effective_offset(&self) -> u32 {
        if self.offset <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            u32::try_from(self.offset).unwrap_or(u32::MAX)
        }
    }

    /// The credential to send: the per-request override if present and
    /// non-empty, otherwise `default_key`.
    pub fn api_key_or<'a>(&'a self, default_key: &'a str) -> &'a str {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => default_key,
        }
    }

    /// Upstream query pairs for one category.
    pub fn query_pairs(&self, category: Category, default_key: &str) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("chainid", self.chain.to_string()),
            ("module", "account".to_string()),
            ("action", category.action().to_string()),
            ("address", self.address.to_string()),
        ];
        if let Some(contract) = &self.contract_address {
            if category != Category::Native && category != Category::Internal {
                pairs.push(("contractaddress", contract.to_string()));
            }
        }
        pairs.extend([
            ("startblock", self.effective_start_block().to_string()),
            ("endblock", self.effective_end_block().to_string()),
            ("page", self.effective_page().to_string()),
            ("offset", self.effective_offset().to_string()),
            ("sort", self.sort.as_str().to_string()),
            ("apikey", self.api_key_or(default_key).to_string()),
        ]);
        pairs
    }
}
