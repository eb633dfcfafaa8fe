//! Request handlers and response bodies.

use crate::error::RpcError;
use crate::query::AnalysisQuery;
use crate::server::RpcState;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use fundflow_analysis::{CounterpartyAggregate, NormalizedTransaction};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ── Response bodies ──────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionDto {
    pub tx_amount: f64,
    pub date_time: String,
    pub transaction_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryDto {
    pub beneficiary_address: String,
    pub amount: f64,
    pub transactions: Vec<TransactionDto>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayerDto {
    pub payer_address: String,
    pub amount: f64,
    pub transactions: Vec<TransactionDto>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse<T> {
    pub message: String,
    pub data: Vec<T>,
}

impl<T> AnalysisResponse<T> {
    pub fn success(data: Vec<T>) -> Self {
        Self {
            message: "success".to_string(),
            data,
        }
    }
}

impl From<NormalizedTransaction> for TransactionDto {
    fn from(tx: NormalizedTransaction) -> Self {
        Self {
            tx_amount: tx.amount,
            date_time: tx.datetime,
            transaction_id: tx.hash,
        }
    }
}

impl From<CounterpartyAggregate> for BeneficiaryDto {
    fn from(agg: CounterpartyAggregate) -> Self {
        Self {
            beneficiary_address: agg.address,
            amount: agg.amount,
            transactions: agg.transactions.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CounterpartyAggregate> for PayerDto {
    fn from(agg: CounterpartyAggregate) -> Self {
        Self {
            payer_address: agg.address,
            amount: agg.amount,
            transactions: agg.transactions.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// `GET /beneficiary`
pub async fn beneficiaries(
    State(state): State<Arc<RpcState>>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<AnalysisResponse<BeneficiaryDto>>, RpcError> {
    let (request, filter) = query.into_params(state.default_chain)?;
    let result = state.service.analyze_beneficiaries(&request, &filter).await?;
    Ok(Json(AnalysisResponse::success(
        result.into_iter().map(Into::into).collect(),
    )))
}

/// `GET /payer`
pub async fn payers(
    State(state): State<Arc<RpcState>>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<AnalysisResponse<PayerDto>>, RpcError> {
    let (request, filter) = query.into_params(state.default_chain)?;
    let result = state.service.analyze_payers(&request, &filter).await?;
    Ok(Json(AnalysisResponse::success(
        result.into_iter().map(Into::into).collect(),
    )))
}

/// `GET /metrics`
pub async fn metrics(State(state): State<Arc<RpcState>>) -> Result<impl IntoResponse, RpcError> {
    let body = state
        .service
        .metrics()
        .encode()
        .map_err(|e| RpcError::Metrics(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}
