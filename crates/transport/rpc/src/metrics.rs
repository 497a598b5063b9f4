//! Metrics for the dispatch server.

use crate::RpcErrorKind;

/// Container for the dispatch server's metric names.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the counter of handled requests, labelled by outcome.
    pub const RPC_REQUESTS: &'static str = "kona_transport_rpc_requests";

    /// Outcome label of a successful request.
    const SUCCESS: &'static str = "success";

    /// Describes and zeroes the dispatch server metrics.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::RPC_REQUESTS,
            metrics::Unit::Count,
            "Number of JSON-RPC requests handled by the transport server, by outcome",
        );
    }

    fn zero() {
        metrics::counter!(Self::RPC_REQUESTS, "outcome" => Self::SUCCESS).increment(0);
        for kind in [
            RpcErrorKind::ParseError,
            RpcErrorKind::InvalidRequest,
            RpcErrorKind::MethodNotFound,
            RpcErrorKind::InvalidParams,
            RpcErrorKind::Revert,
            RpcErrorKind::Internal,
        ] {
            metrics::counter!(Self::RPC_REQUESTS, "outcome" => kind.as_str()).increment(0);
        }
    }

    /// Records the outcome of a single request.
    pub(crate) fn record(outcome: Option<RpcErrorKind>) {
        let label = outcome.as_ref().map_or(Self::SUCCESS, RpcErrorKind::as_str);
        metrics::counter!(Self::RPC_REQUESTS, "outcome" => label).increment(1);
    }
}
