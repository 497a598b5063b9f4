#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/op-rs/kona/main/assets/square.png",
    html_favicon_url = "https://raw.githubusercontent.com/op-rs/kona/main/assets/favicon.ico",
    issue_tracker_base_url = "https://github.com/op-rs/kona/issues/"
)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod errors;
pub use errors::{HandlerError, REVERT_ERROR_CODE, REVERT_ERROR_MESSAGE, RpcErrorKind};

mod envelope;
pub use envelope::{JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse, ResponsePayload};

mod handler;
pub use handler::{FallbackHandler, FullnodeHandler};

mod dispatch;
pub use dispatch::{DEFAULT_REQUEST_TIMEOUT, Dispatcher, RpcResponseBody};

mod metrics;
pub use metrics::Metrics;

mod server;
pub use server::{DEFAULT_MAX_BODY_SIZE, RpcConfig, RpcServer, RpcServerHandle};

mod transport;
pub use transport::{MAX_RANGE_SIZE, SyncStatus, TransportRpc};

mod upstream;
pub use upstream::UpstreamHandler;
