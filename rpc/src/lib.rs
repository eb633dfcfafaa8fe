//! HTTP server for fund-flow analysis.
//!
//! Provides endpoints for:
//! - `GET /beneficiary`: counterparties that received funds from an address
//! - `GET /payer`: counterparties that sent funds to an address
//! - `GET /metrics`: Prometheus text exposition

pub mod error;
pub mod handlers;
pub mod query;
pub mod server;

pub use error::RpcError;
pub use handlers::{AnalysisResponse, BeneficiaryDto, PayerDto, TransactionDto};
pub use query::AnalysisQuery;
pub use server::{router, RpcServer, RpcState};
