//! JSON-RPC 2.0 envelope types.

use jsonrpsee::types::ErrorObjectOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// The protocol version carried by every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// A validated request envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonRpcRequest {
    /// The request id, or `null` when absent.
    pub id: Value,
    /// The method name.
    pub method: String,
    /// The raw parameters, or `null` when absent.
    pub params: Value,
}

impl JsonRpcRequest {
    /// Validates `value` against the minimal JSON-RPC 2.0 shape.
    ///
    /// The envelope must be an object with a string `method`. `jsonrpc`, when present, must be
    /// `"2.0"`, and `id`, when present, must be a string, a number or `null`.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut object) = value else {
            return None;
        };

        if !has_valid_version(&object) {
            return None;
        }

        let id = match object.remove("id") {
            None => Value::Null,
            Some(id @ (Value::String(_) | Value::Number(_) | Value::Null)) => id,
            Some(_) => return None,
        };

        let Some(Value::String(method)) = object.remove("method") else {
            return None;
        };

        let params = object.remove("params").unwrap_or(Value::Null);
        Some(Self { id, method, params })
    }
}

fn has_valid_version(object: &Map<String, Value>) -> bool {
    object.get("jsonrpc").is_none_or(|version| version == JSONRPC_VERSION)
}

/// The outcome carried by a [`JsonRpcResponse`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePayload {
    /// The method succeeded.
    Result(Value),
    /// The request failed.
    Error(ErrorObjectOwned),
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    /// Always [`JSONRPC_VERSION`].
    pub jsonrpc: &'static str,
    /// The id of the request, or `null` if it could not be determined.
    pub id: Value,
    /// The result or error.
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

impl JsonRpcResponse {
    /// Builds a success response.
    pub const fn success(id: Value, result: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, id, payload: ResponsePayload::Result(result) }
    }

    /// Builds an error response.
    pub fn error(id: Value, error: impl Into<ErrorObjectOwned>) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, id, payload: ResponsePayload::Error(error.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RpcErrorKind;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_valid_envelope() {
        let request = JsonRpcRequest::from_value(
            json!({"jsonrpc": "2.0", "id": 7, "method": "eth_chainId", "params": []}),
        )
        .unwrap();

        assert_eq!(request.id, json!(7));
        assert_eq!(request.method, "eth_chainId");
        assert_eq!(request.params, json!([]));
    }

    #[test]
    fn test_minimal_envelope() {
        let request = JsonRpcRequest::from_value(json!({"method": "foo_bar"})).unwrap();

        assert_eq!(request.id, Value::Null);
        assert_eq!(request.params, Value::Null);
    }

    #[rstest]
    #[case::not_object(json!("eth_chainId"))]
    #[case::missing_method(json!({"id": 1}))]
    #[case::method_not_string(json!({"id": 1, "method": 5}))]
    #[case::wrong_version(json!({"jsonrpc": "1.0", "id": 1, "method": "foo"}))]
    #[case::object_id(json!({"id": {"a": 1}, "method": "foo"}))]
    #[case::array_id(json!({"id": [1], "method": "foo"}))]
    fn test_invalid_envelope(#[case] value: Value) {
        assert_eq!(JsonRpcRequest::from_value(value), None);
    }

    #[test]
    fn test_response_shapes() {
        let ok = serde_json::to_value(JsonRpcResponse::success(json!("a"), json!(1))).unwrap();
        assert_eq!(ok, json!({"jsonrpc": "2.0", "id": "a", "result": 1}));

        let err = serde_json::to_value(JsonRpcResponse::error(
            Value::Null,
            RpcErrorKind::InvalidRequest,
        ))
        .unwrap();
        assert_eq!(
            err,
            json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32600, "message": "Invalid request"}
            })
        );
    }
}
