//! Serves transport store entries over JSON-RPC.

use crate::{FullnodeHandler, HandlerError};
use async_trait::async_trait;
use kona_transport_storage::{EntryReader, StorageError, SyncCursorStorage};
use kona_transport_types::{StateRootEntry, TransactionEntry};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{fmt::Debug, sync::Arc};

/// The largest number of entries a single range query may return.
pub const MAX_RANGE_SIZE: u64 = 1000;

/// A block number or entry index parameter, given either as a JSON number or as a hex
/// quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum IndexParam {
    Number(u64),
    Quantity(#[serde(with = "alloy_serde::quantity")] u64),
}

impl From<IndexParam> for u64 {
    fn from(param: IndexParam) -> Self {
        match param {
            IndexParam::Number(n) | IndexParam::Quantity(n) => n,
        }
    }
}

/// Ingestion progress as reported by `transport_syncStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    /// The highest rollup block ingested so far.
    pub highest_synced_block: Option<u64>,
    /// The index of the latest stored transaction.
    pub latest_transaction_index: Option<u64>,
    /// The index of the latest stored state root.
    pub latest_state_root_index: Option<u64>,
}

/// A [`FullnodeHandler`] answering `transport_*` queries out of the transport store.
///
/// Entries are read confirmed-first, so a served entry is never an unconfirmed value
/// shadowing a confirmed one. Missing entries are returned as `null`.
#[derive(Debug)]
pub struct TransportRpc<DB> {
    db: Arc<DB>,
}

impl<DB> TransportRpc<DB> {
    /// Creates a new [`TransportRpc`] over `db`.
    pub const fn new(db: Arc<DB>) -> Self {
        Self { db }
    }
}

impl<DB> Clone for TransportRpc<DB> {
    fn clone(&self) -> Self {
        Self { db: Arc::clone(&self.db) }
    }
}

impl<DB> TransportRpc<DB>
where
    DB: Send + Sync + 'static,
{
    /// Runs a store read on the blocking pool.
    ///
    /// MDBX reads are synchronous, so they must not hold an executor thread. The request
    /// deadline keeps running while the read is in flight.
    async fn read<T, F>(&self, f: F) -> Result<Value, HandlerError>
    where
        T: Serialize + Send + 'static,
        F: FnOnce(&DB) -> Result<T, StorageError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let value = tokio::task::spawn_blocking(move || f(&*db))
            .await
            .map_err(|err| HandlerError::Internal(err.to_string()))?;
        to_result(value)
    }
}

fn sync_status<DB>(db: &DB) -> Result<SyncStatus, StorageError>
where
    DB: EntryReader<TransactionEntry> + EntryReader<StateRootEntry> + SyncCursorStorage,
{
    let latest_transaction = EntryReader::<TransactionEntry>::latest_entry(db)?;
    let latest_state_root = EntryReader::<StateRootEntry>::latest_entry(db)?;

    Ok(SyncStatus {
        highest_synced_block: db.highest_synced_block()?,
        latest_transaction_index: latest_transaction.map(|entry| entry.index),
        latest_state_root_index: latest_state_root.map(|entry| entry.index),
    })
}

fn parse_params<T: DeserializeOwned>(method: &str, params: Value) -> Result<T, HandlerError> {
    serde_json::from_value(params)
        .map_err(|err| HandlerError::InvalidParams(format!("{method}: {err}")))
}

/// Accepts both an omitted and an empty parameter list.
fn expect_no_params(method: &str, params: &Value) -> Result<(), HandlerError> {
    match params {
        Value::Null => Ok(()),
        Value::Array(params) if params.is_empty() => Ok(()),
        _ => Err(HandlerError::InvalidParams(format!("{method}: expected no parameters"))),
    }
}

fn parse_range(method: &str, params: Value) -> Result<(u64, u64), HandlerError> {
    let (start, end): (IndexParam, IndexParam) = parse_params(method, params)?;
    let (start, end) = (u64::from(start), u64::from(end));

    if end.saturating_sub(start) > MAX_RANGE_SIZE {
        return Err(HandlerError::InvalidParams(format!(
            "{method}: range {start}..{end} exceeds {MAX_RANGE_SIZE} entries"
        )));
    }
    Ok((start, end))
}

fn to_result<T: Serialize>(value: Result<T, StorageError>) -> Result<Value, HandlerError> {
    let value = value.map_err(|err| HandlerError::Internal(err.to_string()))?;
    serde_json::to_value(value).map_err(|err| HandlerError::Internal(err.to_string()))
}

#[async_trait]
impl<DB> FullnodeHandler for TransportRpc<DB>
where
    DB: EntryReader<TransactionEntry>
        + EntryReader<StateRootEntry>
        + SyncCursorStorage
        + Debug
        + Send
        + Sync
        + 'static,
{
    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, HandlerError> {
        match method {
            "transport_getTransactionByIndex" => {
                let (index,): (IndexParam,) = parse_params(method, params)?;
                self.read(move |db| EntryReader::<TransactionEntry>::get_entry(db, index.into()))
                    .await
            }
            "transport_getStateRootByIndex" => {
                let (index,): (IndexParam,) = parse_params(method, params)?;
                self.read(move |db| EntryReader::<StateRootEntry>::get_entry(db, index.into()))
                    .await
            }
            "transport_getLatestTransaction" => {
                expect_no_params(method, &params)?;
                self.read(EntryReader::<TransactionEntry>::latest_entry).await
            }
            "transport_getLatestStateRoot" => {
                expect_no_params(method, &params)?;
                self.read(EntryReader::<StateRootEntry>::latest_entry).await
            }
            "transport_getTransactionsByRange" => {
                let (start, end) = parse_range(method, params)?;
                self.read(move |db| {
                    EntryReader::<TransactionEntry>::entries_in_range(db, start, end)
                })
                .await
            }
            "transport_getStateRootsByRange" => {
                let (start, end) = parse_range(method, params)?;
                self.read(move |db| EntryReader::<StateRootEntry>::entries_in_range(db, start, end))
                    .await
            }
            "transport_syncStatus" => {
                expect_no_params(method, &params)?;
                self.read(sync_status).await
            }
            _ => Err(HandlerError::UnsupportedMethod(method.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use crate::{Dispatcher, RpcResponseBody};
    use kona_transport_storage::{EntryWriter, TransportDb};
    use rstest::rstest;
    use serde_json::json;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn setup() -> (TempDir, TransportRpc<TransportDb>) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let db = TransportDb::new(temp_dir.path()).expect("Failed to open transport store");

        db.put_unconfirmed(&[
            StateRootEntry::unconfirmed(0, B256::repeat_byte(0)),
            StateRootEntry::unconfirmed(1, B256::repeat_byte(1)),
            StateRootEntry::unconfirmed(2, B256::repeat_byte(2)),
        ])
        .unwrap();
        db.put_confirmed(&[StateRootEntry::unconfirmed(1, B256::repeat_byte(0xff))], 6).unwrap();
        db.set_highest_synced_block(3).unwrap();

        (temp_dir, TransportRpc::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn test_get_by_index_prefers_confirmed() {
        let (_dir, rpc) = setup();

        let entry = rpc.handle_request("transport_getStateRootByIndex", json!([1])).await.unwrap();
        assert_eq!(entry["confirmed"], json!(true));
        assert_eq!(entry["batchIndex"], json!(6));
        assert_eq!(entry["value"], json!(B256::repeat_byte(0xff)));

        let entry =
            rpc.handle_request("transport_getStateRootByIndex", json!(["0x2"])).await.unwrap();
        assert_eq!(entry["index"], json!(2));
    }

    #[tokio::test]
    async fn test_missing_entry_is_null() {
        let (_dir, rpc) = setup();

        let entry = rpc.handle_request("transport_getTransactionByIndex", json!([9])).await;
        assert_eq!(entry, Ok(Value::Null));
        let latest = rpc.handle_request("transport_getLatestTransaction", Value::Null).await;
        assert_eq!(latest, Ok(Value::Null));
    }

    #[tokio::test]
    async fn test_range_and_status() {
        let (_dir, rpc) = setup();

        let range =
            rpc.handle_request("transport_getStateRootsByRange", json!([0, 3])).await.unwrap();
        assert_eq!(range.as_array().unwrap().len(), 3);

        let status = rpc.handle_request("transport_syncStatus", json!([])).await.unwrap();
        assert_eq!(
            status,
            json!({
                "highestSyncedBlock": 3,
                "latestTransactionIndex": null,
                "latestStateRootIndex": 2,
            })
        );
    }

    #[rstest]
    #[case::missing_index("transport_getStateRootByIndex", json!([]))]
    #[case::not_a_number("transport_getStateRootByIndex", json!(["seven"]))]
    #[case::extra_params("transport_getLatestStateRoot", json!([1]))]
    #[case::range_too_large("transport_getStateRootsByRange", json!([0, 5000]))]
    #[tokio::test]
    async fn test_invalid_params(#[case] method: &str, #[case] params: Value) {
        let (_dir, rpc) = setup();

        assert!(matches!(
            rpc.handle_request(method, params).await,
            Err(HandlerError::InvalidParams(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let (_dir, rpc) = setup();

        assert_eq!(
            rpc.handle_request("eth_chainId", Value::Null).await,
            Err(HandlerError::UnsupportedMethod("eth_chainId".to_string()))
        );
    }

    /// A store whose range reads block their thread for a long time.
    #[derive(Debug)]
    struct SlowRangeDb;

    const SLOW_READ: Duration = Duration::from_secs(3);

    impl<E> EntryReader<E> for SlowRangeDb {
        fn get_entry(&self, _: u64) -> Result<Option<E>, StorageError> {
            Ok(None)
        }

        fn latest_entry(&self) -> Result<Option<E>, StorageError> {
            Ok(None)
        }

        fn entries_in_range(&self, _: u64, _: u64) -> Result<Vec<E>, StorageError> {
            std::thread::sleep(SLOW_READ);
            Ok(Vec::new())
        }
    }

    impl SyncCursorStorage for SlowRangeDb {
        fn highest_synced_block(&self) -> Result<Option<u64>, StorageError> {
            Ok(Some(1))
        }

        fn set_highest_synced_block(&self, _: u64) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_slow_read_does_not_block_deadline_or_batch() {
        let rpc = TransportRpc::new(Arc::new(SlowRangeDb));
        let dispatcher = Dispatcher::new(rpc, Duration::from_millis(200));

        let started = Instant::now();
        let body = dispatcher
            .dispatch(json!([
                {
                    "jsonrpc": "2.0",
                    "id": 1,
                    "method": "transport_getStateRootsByRange",
                    "params": [0, 1000],
                },
                {"jsonrpc": "2.0", "id": 2, "method": "transport_syncStatus"},
            ]))
            .await;
        assert!(started.elapsed() < SLOW_READ);

        let RpcResponseBody::Batch(responses) = body else { panic!("expected a batch response") };
        let responses = serde_json::to_value(responses).unwrap();
        assert_eq!(responses[0]["id"], json!(1));
        assert_eq!(responses[0]["error"]["code"], json!(-32603));
        assert_eq!(responses[1]["id"], json!(2));
        assert_eq!(responses[1]["result"]["highestSyncedBlock"], json!(1));
    }
}
