//! Query-string parsing for the analysis endpoints.
//!
//! Every parameter is optional except `address`; an empty value counts as
//! absent. Anything present but unparsable rejects the request before any
//! upstream call is made.

use crate::error::RpcError;
use fundflow_analysis::{FilterParams, SortField, DEFAULT_LIMIT};
use fundflow_explorer::{FeedRequest, DEFAULT_PAGE_SIZE};
use fundflow_types::{Address, ChainId, SortOrder};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

/// Raw query parameters of `/beneficiary` and `/payer`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    pub address: Option<String>,
    pub chainid: Option<String>,
    pub contractaddress: Option<String>,
    pub sblock: Option<String>,
    pub eblock: Option<String>,
    pub page: Option<String>,
    pub offset: Option<String>,
    pub sort: Option<String>,
    pub sort_by: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub limit: Option<String>,
    pub with_zero_txs: Option<String>,
    pub apikey: Option<String>,
}

fn present(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().filter(|s| !s.is_empty())
}

fn parse_number<T>(name: &str, raw: &Option<String>) -> Result<Option<T>, RpcError>
where
    T: FromStr,
    T::Err: Display,
{
    present(raw)
        .map(|s| {
            s.parse::<T>()
                .map_err(|e| RpcError::InvalidRequest(format!("invalid {name} {s:?}: {e}")))
        })
        .transpose()
}

fn parse_amount(name: &str, raw: &Option<String>) -> Result<Option<f64>, RpcError> {
    match parse_number::<f64>(name, raw)? {
        Some(v) if v.is_nan() => Err(RpcError::InvalidRequest(format!("invalid {name}: not a number"))),
        other => Ok(other),
    }
}

/// Boolean spellings accepted for `with_zero_txs`.
fn parse_flag(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl AnalysisQuery {
    /// Validate and split into the upstream request and the result filter.
    pub fn into_params(self, default_chain: ChainId) -> Result<(FeedRequest, FilterParams), RpcError> {
        let address = present(&self.address)
            .ok_or_else(|| RpcError::InvalidRequest("address parameter is required".into()))?;
        let address = Address::parse(address)?;

        let chain = match parse_number::<u64>("chainid", &self.chainid)? {
            Some(id) => ChainId::new(id)?,
            None => default_chain,
        };

        let sort = present(&self.sort)
            .map(SortOrder::parse_lenient)
            .unwrap_or_default();

        let mut request = FeedRequest::new(address, chain)
            .with_blocks(
                parse_number("sblock", &self.sblock)?.unwrap_or(0),
                parse_number("eblock", &self.eblock)?.unwrap_or(-1),
            )
            .with_page(
                parse_number("page", &self.page)?.unwrap_or(1),
                parse_number("offset", &self.offset)?
                    .unwrap_or(i64::from(DEFAULT_PAGE_SIZE)),
            )
            .with_sort(sort);
        if let Some(key) = present(&self.apikey) {
            request = request.with_api_key(key);
        }
        if let Some(contract) = present(&self.contractaddress) {
            request = request.with_contract(Address::parse(contract)?);
        }

        let sort_field = match present(&self.sort_by) {
            Some(s) => SortField::parse(s)
                .ok_or_else(|| RpcError::InvalidRequest(format!("unsupported sort_by {s:?}")))?,
            None => SortField::Amount,
        };

        let include_zero = match present(&self.with_zero_txs) {
            Some(s) => parse_flag(s)
                .ok_or_else(|| RpcError::InvalidRequest(format!("invalid with_zero_txs {s:?}")))?,
            None => true,
        };

        let limit = match parse_number::<i64>("limit", &self.limit)? {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
            _ => DEFAULT_LIMIT,
        };

        let filter = FilterParams {
            min_amount: parse_amount("min", &self.min)?.unwrap_or(0.0),
            max_amount: parse_amount("max", &self.max)?.filter(|max| *max >= 0.0),
            include_zero,
            sort_field,
            sort_order: sort,
            limit,
        };

        Ok((request, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x00000000219ab540356cbb839cbe05303d7705fa";

    fn query() -> AnalysisQuery {
        AnalysisQuery {
            address: Some(ADDR.into()),
            ..Default::default()
        }
    }

    fn invalid(q: AnalysisQuery) -> String {
        match q.into_params(ChainId::MAINNET) {
            Err(RpcError::InvalidRequest(msg)) => msg,
            other => panic!("expected invalid request, got {other:?}"),
        }
    }

    #[test]
    fn defaults() {
        let (request, filter) = query().into_params(ChainId::MAINNET).unwrap();
        assert_eq!(request.chain, ChainId::MAINNET);
        assert_eq!(request.start_block, 0);
        assert_eq!(request.end_block, -1);
        assert_eq!(request.page, 1);
        assert_eq!(request.offset, 100);
        assert_eq!(request.sort, SortOrder::Desc);
        assert_eq!(request.api_key, None);
        assert_eq!(filter, FilterParams::default());
    }

    #[test]
    fn full_parameter_set() {
        let q = AnalysisQuery {
            chainid: Some("137".into()),
            sblock: Some("100".into()),
            eblock: Some("200".into()),
            page: Some("2".into()),
            offset: Some("50".into()),
            sort: Some("ASC".into()),
            sort_by: Some("amount".into()),
            min: Some("0.1".into()),
            max: Some("10".into()),
            limit: Some("5".into()),
            with_zero_txs: Some("F".into()),
            apikey: Some("CALLER".into()),
            ..query()
        };
        let (request, filter) = q.into_params(ChainId::MAINNET).unwrap();
        assert_eq!(request.chain.as_u64(), 137);
        assert_eq!((request.start_block, request.end_block), (100, 200));
        assert_eq!((request.page, request.offset), (2, 50));
        assert_eq!(request.sort, SortOrder::Asc);
        assert_eq!(request.api_key.as_deref(), Some("CALLER"));
        assert_eq!(filter.min_amount, 0.1);
        assert_eq!(filter.max_amount, Some(10.0));
        assert_eq!(filter.limit, 5);
        assert!(!filter.include_zero);
        assert_eq!(filter.sort_order, SortOrder::Asc);
    }

    #[test]
    fn negative_max_and_non_positive_limit_fall_back() {
        let q = AnalysisQuery {
            max: Some("-1".into()),
            limit: Some("0".into()),
            sort: Some("sideways".into()),
            ..query()
        };
        let (request, filter) = q.into_params(ChainId::MAINNET).unwrap();
        assert_eq!(filter.max_amount, None);
        assert_eq!(filter.limit, DEFAULT_LIMIT);
        assert_eq!(request.sort, SortOrder::Desc);
    }

    #[test]
    fn empty_values_count_as_absent() {
        let q = AnalysisQuery {
            chainid: Some(String::new()),
            min: Some(String::new()),
            ..query()
        };
        assert!(q.into_params(ChainId::MAINNET).is_ok());
    }

    #[test]
    fn missing_or_bad_address_is_rejected() {
        assert!(invalid(AnalysisQuery::default()).contains("address"));
        let q = AnalysisQuery {
            address: Some("0x1234".into()),
            ..Default::default()
        };
        assert!(invalid(q).contains("address"));
    }

    #[test]
    fn unparsable_values_are_rejected() {
        let cases = [
            AnalysisQuery { chainid: Some("one".into()), ..query() },
            AnalysisQuery { chainid: Some("999999".into()), ..query() },
            AnalysisQuery { sblock: Some("1.5".into()), ..query() },
            AnalysisQuery { page: Some("x".into()), ..query() },
            AnalysisQuery { min: Some("lots".into()), ..query() },
            AnalysisQuery { max: Some("NaN".into()), ..query() },
            AnalysisQuery { limit: Some("ten".into()), ..query() },
            AnalysisQuery { with_zero_txs: Some("yes".into()), ..query() },
            AnalysisQuery { sort_by: Some("date".into()), ..query() },
        ];
        for q in cases {
            invalid(q);
        }
    }

    #[test]
    fn flag_spellings() {
        for s in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_flag(s), Some(true), "{s}");
        }
        for s in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_flag(s), Some(false), "{s}");
        }
        assert_eq!(parse_flag("tRuE"), None);
    }

    #[test]
    fn contract_filter_is_validated() {
        let q = AnalysisQuery {
            contractaddress: Some("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".into()),
            ..query()
        };
        let (request, _) = q.into_params(ChainId::MAINNET).unwrap();
        assert!(request.contract_address.is_some());

        let q = AnalysisQuery {
            contractaddress: Some("usdc".into()),
            ..query()
        };
        invalid(q);
    }
}
