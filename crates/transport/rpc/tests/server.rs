//! End to end tests of the HTTP dispatch server.

use alloy_primitives::B256;
use kona_transport_rpc::{
    DEFAULT_MAX_BODY_SIZE, FallbackHandler, FullnodeHandler, HandlerError, RpcConfig, RpcServer, RpcServerHandle,
    TransportRpc,
};
use kona_transport_storage::{EntryWriter, TransportDb};
use kona_transport_types::StateRootEntry;
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Stands in for an upstream execution node.
#[derive(Debug)]
struct Execution;

#[async_trait::async_trait]
impl FullnodeHandler for Execution {
    async fn handle_request(&self, method: &str, _: Value) -> Result<Value, HandlerError> {
        match method {
            "eth_chainId" => Ok(json!("0x1a4")),
            "eth_sendRawTransaction" => Err(HandlerError::Revert("insufficient balance".into())),
            "eth_call" => Err(HandlerError::Internal("state trie corrupted at 0xdead".into())),
            _ => Err(HandlerError::UnsupportedMethod(method.to_string())),
        }
    }
}

async fn launch() -> (TempDir, CancellationToken, RpcServerHandle) {
    launch_with_body_limit(DEFAULT_MAX_BODY_SIZE).await
}

async fn launch_with_body_limit(
    max_body_size: usize,
) -> (TempDir, CancellationToken, RpcServerHandle) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let db = TransportDb::new(temp_dir.path()).expect("Failed to open transport store");
    db.put_unconfirmed(&[StateRootEntry::unconfirmed(0, B256::repeat_byte(7))]).unwrap();

    let handler = FallbackHandler::new(TransportRpc::new(Arc::new(db)), Execution);
    let config = RpcConfig {
        socket: "127.0.0.1:0".parse().unwrap(),
        request_timeout: Duration::from_secs(5),
        max_body_size,
    };

    let cancellation = CancellationToken::new();
    let handle = RpcServer::new(config, handler).launch(cancellation.clone()).await.unwrap();
    (temp_dir, cancellation, handle)
}

async fn post(handle: &RpcServerHandle, body: impl Into<reqwest::Body>) -> Value {
    let response = reqwest::Client::new()
        .post(format!("http://{}/", handle.local_addr()))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_single_requests() {
    let (_dir, cancellation, handle) = launch().await;

    let chain_id =
        post(&handle, json!({"jsonrpc": "2.0", "id": 1, "method": "eth_chainId"}).to_string())
            .await;
    assert_eq!(chain_id, json!({"jsonrpc": "2.0", "id": 1, "result": "0x1a4"}));

    let root = post(
        &handle,
        json!({"jsonrpc": "2.0", "id": "r", "method": "transport_getStateRootByIndex", "params": [0]})
            .to_string(),
    )
    .await;
    assert_eq!(root["result"]["value"], json!(B256::repeat_byte(7)));
    assert_eq!(root["result"]["confirmed"], json!(false));

    let missing =
        post(&handle, json!({"id": 2, "method": "foo_bar", "params": []}).to_string()).await;
    assert_eq!(missing["id"], json!(2));
    assert_eq!(missing["error"]["code"], json!(-32601));

    let garbage = post(&handle, "{\"id\": 3,").await;
    assert_eq!(garbage["id"], Value::Null);
    assert_eq!(garbage["error"]["code"], json!(-32700));

    cancellation.cancel();
    handle.stopped().await.unwrap();
}

#[tokio::test]
async fn test_batch_request() {
    let (_dir, cancellation, handle) = launch().await;

    let responses = post(
        &handle,
        json!([
            {"jsonrpc": "2.0", "id": 1, "method": "eth_chainId"},
            {"jsonrpc": "2.0", "id": 2, "method": "eth_sendRawTransaction", "params": ["0x00"]},
            {"jsonrpc": "2.0", "id": 3, "method": "eth_call", "params": []},
            {"jsonrpc": "2.0", "id": 4},
        ])
        .to_string(),
    )
    .await;

    let responses = responses.as_array().unwrap();
    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["result"], json!("0x1a4"));

    assert_eq!(responses[1]["id"], json!(2));
    assert_eq!(responses[1]["error"]["code"], json!(-32015));
    assert_eq!(responses[1]["error"]["message"], json!("insufficient balance"));

    assert_eq!(responses[2]["id"], json!(3));
    assert_eq!(responses[2]["error"]["code"], json!(-32603));
    assert!(!responses[2]["error"]["message"].as_str().unwrap().contains("0xdead"));

    assert_eq!(responses[3]["id"], Value::Null);
    assert_eq!(responses[3]["error"]["code"], json!(-32600));

    cancellation.cancel();
    handle.stopped().await.unwrap();
}

#[tokio::test]
async fn test_oversized_body_is_rejected_as_invalid_request() {
    let (_dir, cancellation, handle) = launch_with_body_limit(256).await;

    let batch: Vec<Value> = (0..32)
        .map(|id| json!({"jsonrpc": "2.0", "id": id, "method": "eth_chainId"}))
        .collect();
    let response = reqwest::Client::new()
        .post(format!("http://{}/", handle.local_addr()))
        .header("content-type", "application/json")
        .body(Value::Array(batch).to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["jsonrpc"], json!("2.0"));
    assert_eq!(body["id"], Value::Null);
    assert_eq!(body["error"]["code"], json!(-32600));

    // Bodies under the limit are still served.
    let chain_id =
        post(&handle, json!({"jsonrpc": "2.0", "id": 1, "method": "eth_chainId"}).to_string())
            .await;
    assert_eq!(chain_id["result"], json!("0x1a4"));

    cancellation.cancel();
    handle.stopped().await.unwrap();
}
