//! End-to-end analysis: fetch, aggregate, filter.

use crate::aggregator::{aggregate, CounterpartyAggregate, Direction};
use crate::error::AnalysisError;
use crate::fetcher::ConcurrentFetcher;
use crate::filter::{filter_sort_limit, FilterParams};
use crate::metrics::AnalysisMetrics;
use crate::spans::analysis_span;

use fundflow_explorer::{FeedRequest, FeedSource};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, Instrument};

pub struct AnalysisService {
    fetcher: ConcurrentFetcher,
    metrics: Arc<AnalysisMetrics>,
}

impl AnalysisService {
    pub fn new(source: Arc<dyn FeedSource>, metrics: Arc<AnalysisMetrics>) -> Self {
        Self {
            fetcher: ConcurrentFetcher::new(source),
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<AnalysisMetrics> {
        &self.metrics
    }

    /// Counterparties that received funds from `request.address`.
    pub async fn analyze_beneficiaries(
        &self,
        request: &FeedRequest,
        filter: &FilterParams,
    ) -> Result<Vec<CounterpartyAggregate>, AnalysisError> {
        self.analyze(Direction::Outgoing, request, filter).await
    }

    /// Counterparties that sent funds to `request.address`.
    pub async fn analyze_payers(
        &self,
        request: &FeedRequest,
        filter: &FilterParams,
    ) -> Result<Vec<CounterpartyAggregate>, AnalysisError> {
        self.analyze(Direction::Incoming, request, filter).await
    }

    /// Run the full pipeline in one direction.
    ///
    /// Any failed category fails the whole analysis; partial data is never
    /// returned.
    pub async fn analyze(
        &self,
        direction: Direction,
        request: &FeedRequest,
        filter: &FilterParams,
    ) -> Result<Vec<CounterpartyAggregate>, AnalysisError> {
        let span = analysis_span(direction, request);
        async {
            self.metrics.analyses.with_label_values(&[direction.as_str()]).inc();

            let started = Instant::now();
            let fetched = self.fetcher.fetch_all(request).await;
            self.metrics
                .fetch_duration_ms
                .observe(started.elapsed().as_secs_f64() * 1000.0);

            let collection = fetched.inspect_err(|e| {
                for category in e.failed_categories() {
                    self.metrics.fetch_failures.with_label_values(&[category.as_str()]).inc();
                }
            })?;

            let aggregation = aggregate(&request.address, &collection, direction);
            for (category, count) in &aggregation.skipped {
                self.metrics
                    .skipped_records
                    .with_label_values(&[category.as_str()])
                    .inc_by(*count);
            }

            let fetched_records = collection.total_records();
            let counterparties = aggregation.counterparties.len();
            let result = filter_sort_limit(aggregation.into_aggregates(), filter);
            info!(
                fetched_records,
                counterparties,
                returned = result.len(),
                "analysis complete"
            );
            Ok::<_, AnalysisError>(result)
        }
        .instrument(span)
        .await
    }
}
