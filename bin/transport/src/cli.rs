//! Contains the transport CLI.

use crate::flags::{GlobalArgs, IngestArgs, RpcArgs, SequencerArgs};
use anyhow::{Context, Result};
use clap::Parser;
use futures::future::OptionFuture;
use kona_cli::{cli_styles, init_prometheus_server, init_tracing_subscriber};
use kona_transport_rpc::{
    FallbackHandler, FullnodeHandler, RpcServer, TransportRpc, UpstreamHandler,
};
use kona_transport_service::{L2IngestionService, RpcBlockSource};
use kona_transport_storage::TransportDb;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// The rollup data transport layer.
///
/// Ingests observed rollup blocks into a store with separate confirmed and unconfirmed
/// tracks, and serves the store over JSON-RPC.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub(crate) struct Cli {
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub(crate) global: GlobalArgs,
    /// RPC server arguments.
    #[command(flatten)]
    pub(crate) rpc: RpcArgs,
    /// Ingestion arguments.
    #[command(flatten)]
    pub(crate) ingest: IngestArgs,
    /// Sequencer override arguments.
    #[command(flatten)]
    pub(crate) sequencer: SequencerArgs,
}

impl Cli {
    /// Runs the CLI.
    pub(crate) fn run(self) -> Result<()> {
        self.init_stack()?;
        Self::tokio_runtime()?.block_on(self.start())
    }

    /// Initializes the tracing stack and the Prometheus metrics recorder.
    fn init_stack(&self) -> Result<()> {
        init_tracing_subscriber(self.global.v, None::<EnvFilter>)?;

        let metrics = &self.global.metrics;
        if metrics.enabled {
            init_prometheus_server(metrics.addr, metrics.port)?;
            kona_transport_rpc::Metrics::init();
            kona_transport_service::Metrics::init();
        }
        Ok(())
    }

    /// Creates a new default tokio multi-thread [Runtime](tokio::runtime::Runtime) with all
    /// features enabled.
    fn tokio_runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
        tokio::runtime::Builder::new_multi_thread().enable_all().build()
    }

    /// Opens the store and runs the RPC server and the ingestion service until ctrl-c is
    /// pressed or ingestion fails.
    async fn start(self) -> Result<()> {
        let db = Arc::new(
            TransportDb::new(&self.global.db_path)
                .with_context(|| format!("opening store at {}", self.global.db_path.display()))?,
        );
        let cancellation = CancellationToken::new();

        let store = TransportRpc::new(Arc::clone(&db));
        let handler: Box<dyn FullnodeHandler> = match self.rpc.upstream_url.clone() {
            Some(url) => {
                info!(target: "transport", %url, "Forwarding unsupported methods upstream");
                Box::new(FallbackHandler::new(store, UpstreamHandler::new_http(url)))
            }
            None => Box::new(store),
        };
        let server = RpcServer::new(self.rpc.config(), handler).launch(cancellation.clone()).await?;

        let ingestion = match self.ingest.l2_rpc_url.clone() {
            Some(url) => {
                let config = self.ingest.config(self.global.l2_chain_id, &self.sequencer);
                let service = L2IngestionService::new(
                    RpcBlockSource::new_http(url),
                    Arc::clone(&db),
                    config,
                    cancellation.clone(),
                );
                Some(tokio::spawn(service.start()))
            }
            None => {
                warn!(target: "transport", "No L2 RPC URL configured, ingestion is disabled");
                None
            }
        };
        let ingestion_done = async {
            match OptionFuture::from(ingestion).await {
                Some(result) => result,
                None => futures::future::pending().await,
            }
        };

        let outcome: Result<()> = tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                info!(target: "transport", "Received ctrl-c, shutting down");
                signal.map_err(Into::into)
            }
            result = ingestion_done => match result {
                Ok(result) => result.map_err(Into::into),
                Err(err) => Err(err.into()),
            },
        };

        cancellation.cancel();
        server.stopped().await?;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_full_command() {
        let cli = Cli::try_parse_from([
            "kona-transport",
            "-vv",
            "--l2-chain-id",
            "420",
            "--l2",
            "http://localhost:8545",
            "--rpc.port",
            "8080",
            "--rpc.upstream-url",
            "http://localhost:8546",
            "--metrics.enabled",
        ])
        .unwrap();

        assert_eq!(cli.global.v, 2);
        assert_eq!(cli.global.l2_chain_id, 420);
        assert_eq!(cli.rpc.config().socket.port(), 8080);
        assert!(cli.rpc.upstream_url.is_some());
        assert!(cli.ingest.l2_rpc_url.is_some());
        assert!(cli.global.metrics.enabled);
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
