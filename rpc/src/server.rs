//! Axum-based HTTP server.

use crate::error::RpcError;
use crate::handlers;

use axum::routing::get;
use axum::Router;
use fundflow_analysis::AnalysisService;
use fundflow_types::ChainId;
use std::future::Future;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// State shared by every handler.
pub struct RpcState {
    pub service: AnalysisService,
    /// Chain used when a request carries no `chainid`.
    pub default_chain: ChainId,
}

impl RpcState {
    pub fn new(service: AnalysisService, default_chain: ChainId) -> Self {
        Self {
            service,
            default_chain,
        }
    }
}

/// Build the router. Methods other than GET get 405 from axum's method
/// routing.
pub fn router(state: Arc<RpcState>) -> Router {
    Router::new()
        .route("/beneficiary", get(handlers::beneficiaries))
        .route("/payer", get(handlers::payers))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct RpcServer {
    pub listen_addr: String,
    pub port: u16,
    pub state: Arc<RpcState>,
}

impl RpcServer {
    pub fn new(listen_addr: impl Into<String>, port: u16, state: Arc<RpcState>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            port,
            state,
        }
    }

    /// Serve until the process is stopped.
    pub async fn start(&self) -> Result<(), RpcError> {
        self.start_with_shutdown(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn start_with_shutdown<F>(&self, shutdown: F) -> Result<(), RpcError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("{}:{}", self.listen_addr, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(%addr, "RPC server listening");
        axum::serve(listener, router(self.state.clone()))
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("RPC server stopped");
        Ok(())
    }
}
