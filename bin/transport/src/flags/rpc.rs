//! RPC server arguments.

use clap::Parser;
use kona_transport_rpc::{DEFAULT_MAX_BODY_SIZE, RpcConfig};
use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};
use url::Url;

/// Arguments of the JSON-RPC server.
#[derive(Parser, Clone, Debug)]
pub(crate) struct RpcArgs {
    /// The address the RPC server listens on.
    #[arg(long = "rpc.addr", default_value = "0.0.0.0", env = "KONA_TRANSPORT_RPC_ADDR")]
    pub(crate) addr: IpAddr,
    /// The port the RPC server listens on.
    #[arg(long = "rpc.port", default_value = "8545", env = "KONA_TRANSPORT_RPC_PORT")]
    pub(crate) port: u16,
    /// The deadline of a single request, in seconds.
    #[arg(long = "rpc.timeout", default_value = "30", env = "KONA_TRANSPORT_RPC_TIMEOUT")]
    pub(crate) timeout_secs: u64,
    /// The maximum size of a request body, in bytes.
    #[arg(
        long = "rpc.max-body-size",
        default_value_t = DEFAULT_MAX_BODY_SIZE,
        env = "KONA_TRANSPORT_RPC_MAX_BODY_SIZE"
    )]
    pub(crate) max_body_size: usize,
    /// An execution node serving every method the transport store does not.
    #[arg(long = "rpc.upstream-url", env = "KONA_TRANSPORT_RPC_UPSTREAM_URL")]
    pub(crate) upstream_url: Option<Url>,
}

impl RpcArgs {
    /// Returns the [`RpcConfig`] described by the arguments.
    pub(crate) const fn config(&self) -> RpcConfig {
        RpcConfig {
            socket: SocketAddr::new(self.addr, self.port),
            request_timeout: Duration::from_secs(self.timeout_secs),
            max_body_size: self.max_body_size,
        }
    }
}
