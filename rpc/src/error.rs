//! RPC error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fundflow_analysis::AnalysisError;
use fundflow_types::TypesError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("metrics error: {0}")]
    Metrics(String),

    #[error("server error: {0}")]
    Server(String),
}

impl From<TypesError> for RpcError {
    fn from(e: TypesError) -> Self {
        RpcError::InvalidRequest(e.to_string())
    }
}

impl From<std::io::Error> for RpcError {
    fn from(e: std::io::Error) -> Self {
        RpcError::Server(e.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RpcError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            RpcError::Analysis(e) => {
                error!(error = %e, "analysis failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to analyze transactions".to_string(),
                )
            }
            RpcError::Metrics(msg) | RpcError::Server(msg) => {
                error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}
