//! Post-aggregation filtering, ordering and truncation.

use crate::aggregator::CounterpartyAggregate;
use fundflow_types::SortOrder;

/// Result count used when the caller gives none.
pub const DEFAULT_LIMIT: usize = 100;

/// Field results are ordered by. Only the running total is supported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Amount,
}

impl SortField {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "amount" => Some(Self::Amount),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilterParams {
    pub min_amount: f64,
    /// `None` is unbounded.
    pub max_amount: Option<f64>,
    /// Keep counterparties whose running total is exactly zero.
    pub include_zero: bool,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub limit: usize,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_amount: 0.0,
            max_amount: None,
            include_zero: true,
            sort_field: SortField::Amount,
            sort_order: SortOrder::Desc,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FilterParams {
    fn keeps(&self, aggregate: &CounterpartyAggregate) -> bool {
        let total = aggregate.amount;
        if !self.include_zero && total == 0.0 {
            return false;
        }
        if total < self.min_amount {
            return false;
        }
        !matches!(self.max_amount, Some(max) if total > max)
    }
}

/// Drop out-of-range totals, stable-sort by total, then keep at most
/// `params.limit` entries.
pub fn filter_sort_limit(
    aggregates: impl IntoIterator<Item = CounterpartyAggregate>,
    params: &FilterParams,
) -> Vec<CounterpartyAggregate> {
    let mut kept: Vec<_> = aggregates.into_iter().filter(|a| params.keeps(a)).collect();

    match params.sort_field {
        SortField::Amount => kept.sort_by(|a, b| {
            let ord = a.amount.total_cmp(&b.amount);
            match params.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }),
    }

    kept.truncate(params.limit);
    kept
}
