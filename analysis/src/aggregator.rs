//! Directional aggregation of a joined collection by counterparty.

use crate::collection::FeedCollection;
use chrono::{Local, TimeZone};
use fundflow_explorer::TransferRecord;
use fundflow_types::{Address, Category};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Which side of a transfer the queried address must be on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The queried address sent; counterparties are beneficiaries.
    Outgoing,
    /// The queried address received; counterparties are payers.
    Incoming,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outgoing => "outgoing",
            Self::Incoming => "incoming",
        }
    }

    /// The other endpoint of `record`, if it moves funds in this direction
    /// relative to `query`.
    pub fn counterparty<'r, R: TransferRecord>(&self, query: &Address, record: &'r R) -> Option<&'r str> {
        match self {
            Self::Outgoing if query.matches(record.sender()) => Some(record.recipient()),
            Self::Incoming if query.matches(record.recipient()) => Some(record.sender()),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transfer in a counterparty's history.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedTransaction {
    pub amount: f64,
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`.
    pub datetime: String,
    pub hash: String,
}

/// Running total and history for one counterparty.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterpartyAggregate {
    /// Spelling of the first record seen for this counterparty.
    pub address: String,
    /// Sum of native and internal amounts only.
    pub amount: f64,
    pub transactions: Vec<NormalizedTransaction>,
}

impl CounterpartyAggregate {
    fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            amount: 0.0,
            transactions: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregation {
    /// Buckets keyed by lowercase counterparty address.
    pub counterparties: BTreeMap<String, CounterpartyAggregate>,
    /// Records dropped because their amount or timestamp was unusable.
    pub skipped: BTreeMap<Category, u64>,
}

impl Aggregation {
    pub fn skipped_total(&self) -> u64 {
        self.skipped.values().sum()
    }

    pub fn into_aggregates(self) -> Vec<CounterpartyAggregate> {
        self.counterparties.into_values().collect()
    }

    fn fold<R, Tz>(&mut self, query: &Address, records: &[R], direction: Direction, tz: &Tz)
    where
        R: TransferRecord,
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        for record in records {
            if record.failed() {
                continue;
            }
            let Some(counterparty) = direction.counterparty(query, record) else {
                continue;
            };

            let amount = match record.normalized_amount() {
                Ok(amount) => amount,
                Err(e) => {
                    warn!(category = %R::CATEGORY, hash = record.hash(), error = %e, "skipping record");
                    *self.skipped.entry(R::CATEGORY).or_default() += 1;
                    continue;
                }
            };
            let Some(datetime) = record.timestamp().and_then(|ts| ts.format_in(tz)) else {
                warn!(
                    category = %R::CATEGORY,
                    hash = record.hash(),
                    timestamp = record.raw_timestamp(),
                    "skipping record with unusable timestamp"
                );
                *self.skipped.entry(R::CATEGORY).or_default() += 1;
                continue;
            };

            let bucket = self
                .counterparties
                .entry(counterparty.to_ascii_lowercase())
                .or_insert_with(|| CounterpartyAggregate::new(counterparty));
            if R::CATEGORY.contributes_to_total() {
                bucket.amount += amount;
            }
            bucket.transactions.push(NormalizedTransaction {
                amount,
                datetime,
                hash: record.hash().to_string(),
            });
        }
    }
}

/// Fold `collection` into per-counterparty buckets, rendering times in the
/// local zone.
pub fn aggregate(query: &Address, collection: &FeedCollection, direction: Direction) -> Aggregation {
    aggregate_in(query, collection, direction, &Local)
}

/// [`aggregate`] with an explicit time zone for the rendered timestamps.
pub fn aggregate_in<Tz>(query: &Address, collection: &FeedCollection, direction: Direction, tz: &Tz) -> Aggregation
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut aggregation = Aggregation::default();
    aggregation.fold(query, &collection.native, direction, tz);
    aggregation.fold(query, &collection.internal, direction, tz);
    aggregation.fold(query, &collection.fungible, direction, tz);
    aggregation.fold(query, &collection.non_fungible, direction, tz);
    aggregation.fold(query, &collection.semi_fungible, direction, tz);
    aggregation
}
