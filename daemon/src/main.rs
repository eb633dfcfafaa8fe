//! fundflow daemon: serves beneficiary/payer analysis over HTTP, or runs a
//! single analysis from the command line.

mod config;

use anyhow::Context;
use clap::Parser;
use config::DaemonConfig;
use fundflow_analysis::{AnalysisMetrics, AnalysisService};
use fundflow_explorer::ExplorerClient;
use fundflow_rpc::{AnalysisQuery, AnalysisResponse, BeneficiaryDto, PayerDto, RpcServer, RpcState};
use fundflow_utils::LogFormat;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fundflow-daemon", about = "Ethereum fund-flow analysis service")]
struct Cli {
    /// Explorer API key (process-wide default).
    #[arg(long, env = "ETHERSCAN_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Explorer API endpoint.
    #[arg(long, env = "ETHERSCAN_BASE_URL", global = true)]
    base_url: Option<String>,

    /// HTTP server port.
    #[arg(long, env = "FUNDFLOW_RPC_PORT", global = true)]
    port: Option<u16>,

    /// Chain analysed when a request names none.
    #[arg(long, global = true)]
    chain_id: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "FUNDFLOW_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve,
    /// Run one analysis and print the JSON result.
    Analyze(AnalyzeArgs),
}

/// Same parameters as the HTTP endpoints, validated the same way.
#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Address to analyse.
    #[arg(long)]
    address: String,

    /// Report payers (incoming) instead of beneficiaries (outgoing).
    #[arg(long)]
    payers: bool,

    #[arg(long)]
    chainid: Option<String>,
    /// Restrict token feeds to one contract.
    #[arg(long)]
    contract: Option<String>,
    #[arg(long)]
    sblock: Option<String>,
    #[arg(long)]
    eblock: Option<String>,
    #[arg(long)]
    page: Option<String>,
    #[arg(long)]
    offset: Option<String>,
    /// "asc" or "desc".
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    min: Option<String>,
    #[arg(long)]
    max: Option<String>,
    #[arg(long)]
    limit: Option<String>,
    #[arg(long)]
    with_zero_txs: Option<String>,
}

impl AnalyzeArgs {
    fn into_query(self) -> AnalysisQuery {
        AnalysisQuery {
            address: Some(self.address),
            chainid: self.chainid,
            contractaddress: self.contract,
            sblock: self.sblock,
            eblock: self.eblock,
            page: self.page,
            offset: self.offset,
            sort: self.sort,
            sort_by: None,
            min: self.min,
            max: self.max,
            limit: self.limit,
            with_zero_txs: self.with_zero_txs,
            apikey: None,
        }
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<DaemonConfig> {
    let mut config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => DaemonConfig::default(),
    };

    if let Some(key) = &cli.api_key {
        config.explorer_api_key = key.clone();
    }
    if let Some(url) = &cli.base_url {
        config.explorer_base_url = url.clone();
    }
    if let Some(port) = cli.port {
        config.rpc_port = port;
    }
    if let Some(chain_id) = cli.chain_id {
        config.default_chain_id = chain_id;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    config.validate()?;
    Ok(config)
}

fn build_service(config: &DaemonConfig) -> AnalysisService {
    let client = ExplorerClient::with_timeout(
        config.explorer_base_url.clone(),
        config.explorer_api_key.clone(),
        config.request_timeout(),
    );
    AnalysisService::new(Arc::new(client), Arc::new(AnalysisMetrics::new()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    fundflow_utils::init_logging(config.log_format, &config.log_level);

    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let default_chain = config.default_chain()?;
    let service = build_service(&config);

    match cli.command {
        Command::Serve => {
            tracing::info!(
                explorer = %config.explorer_base_url,
                chain = %default_chain,
                "Starting fundflow daemon on {}:{}",
                config.listen_addr,
                config.rpc_port,
            );
            let state = Arc::new(RpcState::new(service, default_chain));
            let server = RpcServer::new(config.listen_addr.clone(), config.rpc_port, state);
            server.start_with_shutdown(shutdown_signal()).await?;
            tracing::info!("fundflow daemon exited cleanly");
        }
        Command::Analyze(args) => {
            let payers = args.payers;
            let (request, filter) = args.into_query().into_params(default_chain)?;
            let output = if payers {
                let result = service.analyze_payers(&request, &filter).await?;
                let data: Vec<PayerDto> = result.into_iter().map(Into::into).collect();
                serde_json::to_string_pretty(&AnalysisResponse::success(data))?
            } else {
                let result = service.analyze_beneficiaries(&request, &filter).await?;
                let data: Vec<BeneficiaryDto> = result.into_iter().map(Into::into).collect();
                serde_json::to_string_pretty(&AnalysisResponse::success(data))?
            };
            println!("{output}");
        }
    }

    Ok(())
}
