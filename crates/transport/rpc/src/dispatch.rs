//! Request dispatch.

use crate::{
    FullnodeHandler, HandlerError, JsonRpcRequest, JsonRpcResponse, Metrics, RpcErrorKind,
};
use futures::{FutureExt, future::join_all};
use serde::Serialize;
use serde_json::Value;
use std::{panic::AssertUnwindSafe, time::Duration};

/// The default deadline for a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The body of a response to a single or batched request.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RpcResponseBody {
    /// The response to a single envelope.
    Single(JsonRpcResponse),
    /// The responses to a batch, in request order.
    Batch(Vec<JsonRpcResponse>),
}

/// Validates envelopes and forwards them to a [`FullnodeHandler`].
///
/// Every request is bounded by a deadline and isolated from panics in the handler, so a
/// single bad request can only ever fail itself.
#[derive(Debug)]
pub struct Dispatcher<H> {
    handler: H,
    request_timeout: Duration,
}

impl<H> Dispatcher<H> {
    /// Creates a new [`Dispatcher`].
    pub const fn new(handler: H, request_timeout: Duration) -> Self {
        Self { handler, request_timeout }
    }
}

impl<H: FullnodeHandler> Dispatcher<H> {
    /// Dispatches a raw request body.
    pub async fn dispatch_body(&self, body: &[u8]) -> RpcResponseBody {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => self.dispatch(value).await,
            Err(err) => {
                debug!(target: "transport_rpc", %err, "Received malformed JSON body");
                Metrics::record(Some(RpcErrorKind::ParseError));
                RpcResponseBody::Single(JsonRpcResponse::error(
                    Value::Null,
                    RpcErrorKind::ParseError,
                ))
            }
        }
    }

    /// Dispatches a parsed request, which is either one envelope or an array of them.
    ///
    /// Batch elements run concurrently. [`join_all`] yields results in input order, so each
    /// response keeps the position of its request.
    pub async fn dispatch(&self, value: Value) -> RpcResponseBody {
        match value {
            Value::Array(elements) => {
                trace!(target: "transport_rpc", size = elements.len(), "Dispatching batch");
                let responses =
                    join_all(elements.into_iter().map(|element| self.dispatch_single(element)))
                        .await;
                RpcResponseBody::Batch(responses)
            }
            single => RpcResponseBody::Single(self.dispatch_single(single).await),
        }
    }

    /// Dispatches one envelope. Nested arrays are rejected as invalid requests.
    pub async fn dispatch_single(&self, value: Value) -> JsonRpcResponse {
        let Some(JsonRpcRequest { id, method, params }) = JsonRpcRequest::from_value(value) else {
            debug!(target: "transport_rpc", "Received request of unsupported format");
            Metrics::record(Some(RpcErrorKind::InvalidRequest));
            return JsonRpcResponse::error(Value::Null, RpcErrorKind::InvalidRequest);
        };

        match self.execute(&method, params).await {
            Ok(result) => {
                Metrics::record(None);
                JsonRpcResponse::success(id, result)
            }
            Err(err) => {
                let kind = err.kind();
                match kind {
                    RpcErrorKind::Internal => {
                        error!(target: "transport_rpc", %method, %err, "Uncaught error handling request");
                    }
                    _ => {
                        debug!(target: "transport_rpc", %method, %err, "Request failed");
                    }
                }
                Metrics::record(Some(kind));
                JsonRpcResponse::error(id, err.to_error_object())
            }
        }
    }

    async fn execute(&self, method: &str, params: Value) -> Result<Value, HandlerError> {
        let execution = AssertUnwindSafe(self.handler.handle_request(method, params)).catch_unwind();

        match tokio::time::timeout(self.request_timeout, execution).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err(HandlerError::Internal(format!("handler panicked on {method}"))),
            Err(_) => Err(HandlerError::Internal(format!(
                "{method} timed out after {:?}",
                self.request_timeout
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::tests::MockHandler;
    use serde_json::json;

    fn dispatcher() -> Dispatcher<MockHandler> {
        Dispatcher::new(MockHandler, Duration::from_millis(200))
    }

    fn to_json(body: RpcResponseBody) -> Value {
        serde_json::to_value(body).unwrap()
    }

    #[tokio::test]
    async fn test_success_echoes_id() {
        let body = dispatcher()
            .dispatch(json!({"jsonrpc": "2.0", "id": "abc", "method": "echo", "params": [1, 2]}))
            .await;

        assert_eq!(to_json(body), json!({"jsonrpc": "2.0", "id": "abc", "result": [1, 2]}));
    }

    #[tokio::test]
    async fn test_unregistered_method() {
        let body = dispatcher().dispatch(json!({"id": 11, "method": "foo_bar", "params": []})).await;

        let json = to_json(body);
        assert_eq!(json["id"], json!(11));
        assert_eq!(json["error"]["code"], json!(-32601));
    }

    #[tokio::test]
    async fn test_malformed_envelope_has_null_id() {
        let body = dispatcher().dispatch(json!({"id": 4, "method": ["echo"]})).await;

        let json = to_json(body);
        assert_eq!(json["id"], Value::Null);
        assert_eq!(json["error"]["code"], json!(-32600));
    }

    #[tokio::test]
    async fn test_parse_error() {
        let json = to_json(dispatcher().dispatch_body(b"{not json").await);

        assert_eq!(json["id"], Value::Null);
        assert_eq!(json["error"]["code"], json!(-32700));
    }

    #[tokio::test]
    async fn test_batch_preserves_positions() {
        let body = dispatcher()
            .dispatch(json!([
                {"id": 1, "method": "echo", "params": "a"},
                {"id": 2, "method": "internal"},
                {"id": 3, "method": "echo", "params": "c"},
            ]))
            .await;

        let json = to_json(body);
        let responses = json.as_array().unwrap();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0], json!({"jsonrpc": "2.0", "id": 1, "result": "a"}));
        assert_eq!(responses[1]["id"], json!(2));
        assert_eq!(responses[1]["error"]["code"], json!(-32603));
        assert_eq!(responses[2], json!({"jsonrpc": "2.0", "id": 3, "result": "c"}));
    }

    #[tokio::test]
    async fn test_batch_edge_cases() {
        assert_eq!(to_json(dispatcher().dispatch(json!([])).await), json!([]));

        let json = to_json(dispatcher().dispatch(json!([[{"id": 1, "method": "echo"}]])).await);
        assert_eq!(json[0]["error"]["code"], json!(-32600));
    }

    #[tokio::test]
    async fn test_revert_message_preserved() {
        let json = to_json(dispatcher().dispatch(json!({"id": 1, "method": "revert"})).await);

        assert_eq!(json["error"]["code"], json!(-32015));
        assert_eq!(json["error"]["message"], json!("insufficient balance"));
    }

    #[tokio::test]
    async fn test_internal_message_suppressed() {
        let json = to_json(dispatcher().dispatch(json!({"id": 1, "method": "internal"})).await);

        assert_eq!(json["error"]["code"], json!(-32603));
        assert_eq!(json["error"]["message"], json!("Internal error"));
    }

    #[tokio::test]
    async fn test_invalid_params() {
        let json = to_json(dispatcher().dispatch(json!({"id": 1, "method": "bad_params"})).await);

        assert_eq!(json["error"]["code"], json!(-32602));
    }

    #[tokio::test]
    async fn test_timeout_and_panic_are_internal() {
        let json = to_json(
            dispatcher()
                .dispatch(json!([
                    {"id": 1, "method": "sleep"},
                    {"id": 2, "method": "panic"},
                    {"id": 3, "method": "echo", "params": true},
                ]))
                .await,
        );

        assert_eq!(json[0]["error"]["code"], json!(-32603));
        assert_eq!(json[1]["error"]["code"], json!(-32603));
        assert_eq!(json[2]["result"], json!(true));
    }
}
