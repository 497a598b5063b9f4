//! HTTP transport for the dispatch server.

use crate::{
    DEFAULT_REQUEST_TIMEOUT, Dispatcher, FullnodeHandler, JsonRpcResponse, Metrics, RpcErrorKind,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::Value;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;

/// The default maximum size of a request body, in bytes.
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// The RPC server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcConfig {
    /// The socket address to listen on.
    pub socket: SocketAddr,
    /// The deadline for each request.
    pub request_timeout: Duration,
    /// The maximum size of a request body, in bytes.
    pub max_body_size: usize,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            socket: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8545),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

/// A JSON-RPC server accepting `POST /` with a single envelope or a batch.
#[derive(Debug)]
pub struct RpcServer<H> {
    config: RpcConfig,
    handler: H,
}

/// A handle to a running [`RpcServer`].
#[derive(Debug)]
pub struct RpcServerHandle {
    local_addr: SocketAddr,
    task: JoinHandle<std::io::Result<()>>,
}

impl RpcServerHandle {
    /// Returns the address the server is bound to.
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Waits for the server to shut down.
    pub async fn stopped(self) -> std::io::Result<()> {
        self.task.await.map_err(std::io::Error::other)?
    }
}

/// Serves one request body.
///
/// A body the transport refuses to buffer, such as one over the size limit, keeps the HTTP
/// status of the rejection but still carries a JSON-RPC `INVALID_REQUEST` error.
async fn handle<H: FullnodeHandler>(
    State(dispatcher): State<Arc<Dispatcher<H>>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match body {
        Ok(body) => Json(dispatcher.dispatch_body(&body).await).into_response(),
        Err(rejection) => {
            debug!(target: "transport_rpc", %rejection, "Rejected request body");
            Metrics::record(Some(RpcErrorKind::InvalidRequest));
            let error = JsonRpcResponse::error(Value::Null, RpcErrorKind::InvalidRequest);
            (rejection.status(), Json(error)).into_response()
        }
    }
}

impl<H> RpcServer<H>
where
    H: FullnodeHandler + 'static,
{
    /// Creates a new [`RpcServer`].
    pub const fn new(config: RpcConfig, handler: H) -> Self {
        Self { config, handler }
    }

    /// Builds the [`Router`] serving the dispatcher.
    pub fn router(self) -> Router {
        let dispatcher = Dispatcher::new(self.handler, self.config.request_timeout);
        Router::new()
            .route("/", post(handle::<H>))
            .layer(DefaultBodyLimit::max(self.config.max_body_size))
            .with_state(Arc::new(dispatcher))
    }

    /// Binds the configured socket and serves requests until `cancellation` fires.
    pub async fn launch(self, cancellation: CancellationToken) -> std::io::Result<RpcServerHandle> {
        let listener = TcpListener::bind(self.config.socket).await?;
        let local_addr = listener.local_addr()?;
        info!(target: "transport_rpc", %local_addr, "RPC server listening");

        let app = self.router();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { cancellation.cancelled().await })
                .await
                .inspect(|_| info!(target: "transport_rpc", "RPC server stopped"))
                .inspect_err(|err| error!(target: "transport_rpc", %err, "RPC server failed"))
        });

        Ok(RpcServerHandle { local_addr, task })
    }
}
