//! Forwards requests to an upstream execution node.

use crate::{FullnodeHandler, HandlerError, REVERT_ERROR_CODE};
use alloy_rpc_client::ReqwestClient;
use alloy_transport::{RpcError, TransportErrorKind};
use async_trait::async_trait;
use jsonrpsee::types::ErrorCode;
use serde_json::Value;
use url::Url;

/// The code geth uses for reverted calls.
const GETH_REVERT_CODE: i64 = 3;

/// The message prefix geth uses for reverted calls.
const EXECUTION_REVERTED: &str = "execution reverted";

/// A [`FullnodeHandler`] that forwards every request to an upstream execution node and
/// classifies its error responses.
#[derive(Debug, Clone)]
pub struct UpstreamHandler {
    rpc: ReqwestClient,
}

impl UpstreamHandler {
    /// Creates a new [`UpstreamHandler`] talking to `url` over HTTP.
    pub fn new_http(url: Url) -> Self {
        Self { rpc: ReqwestClient::new_http(url) }
    }
}

/// Maps an upstream failure onto a [`HandlerError`].
pub(crate) fn classify(err: RpcError<TransportErrorKind>) -> HandlerError {
    let Some(payload) = err.as_error_resp() else {
        return HandlerError::Internal(err.to_string());
    };

    let code = payload.code;
    let message = payload.message.to_string();
    if code == i64::from(ErrorCode::MethodNotFound.code()) {
        HandlerError::UnsupportedMethod(message)
    } else if code == i64::from(ErrorCode::InvalidParams.code()) {
        HandlerError::InvalidParams(message)
    } else if code == GETH_REVERT_CODE ||
        code == i64::from(REVERT_ERROR_CODE) ||
        message.starts_with(EXECUTION_REVERTED)
    {
        HandlerError::Revert(message)
    } else {
        HandlerError::Internal(format!("upstream error {code}: {message}"))
    }
}

#[async_trait]
impl FullnodeHandler for UpstreamHandler {
    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, HandlerError> {
        trace!(target: "transport_rpc", %method, "Forwarding request upstream");
        self.rpc.request::<_, Value>(method.to_string(), params).await.map_err(classify)
    }
}
