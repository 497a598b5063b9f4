//! Observed blocks as returned by `eth_getBlockByNumber(n, true)` on an l2geth node.

use crate::QueueOrigin;
use alloy_primitives::{B256, Bytes, U256};
use serde::{Deserialize, Serialize};

/// An observed rollup block.
///
/// Only the fields needed for ingestion are kept, everything else in the response is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawL2Block {
    /// The rollup block number.
    #[serde(default, with = "alloy_serde::quantity::opt", skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// The state root after executing the block.
    pub state_root: B256,
    /// The transactions in the block.
    #[serde(default)]
    pub transactions: Vec<RawL2Transaction>,
}

/// An observed rollup transaction, including the rollup-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawL2Transaction {
    /// The explicit transaction index. Older nodes do not report it.
    #[serde(default, with = "alloy_serde::quantity::opt")]
    pub index: Option<u64>,
    /// The value transferred.
    pub value: U256,
    /// The rollup block number containing the transaction.
    #[serde(with = "alloy_serde::quantity")]
    pub block_number: u64,
    /// The base chain block number attached to the transaction.
    #[serde(with = "alloy_serde::quantity")]
    pub l1_block_number: u64,
    /// The base chain timestamp attached to the transaction.
    #[serde(with = "alloy_serde::quantity")]
    pub l1_timestamp: u64,
    /// Where the transaction came from.
    pub queue_origin: QueueOrigin,
    /// The gas limit.
    #[serde(with = "alloy_serde::quantity")]
    pub gas: u64,
    /// The gas price.
    #[serde(default)]
    pub gas_price: Option<U256>,
    /// The account nonce.
    #[serde(with = "alloy_serde::quantity")]
    pub nonce: u64,
    /// The EIP-155 encoded recovery id.
    #[serde(default, with = "alloy_serde::quantity::opt")]
    pub v: Option<u64>,
    /// The `r` signature component, as reported (possibly shorter than 32 bytes).
    #[serde(default)]
    pub r: Option<String>,
    /// The `s` signature component, as reported (possibly shorter than 32 bytes).
    #[serde(default)]
    pub s: Option<String>,
    /// The recipient. Absent for contract creation.
    #[serde(default)]
    pub to: Option<String>,
    /// The calldata.
    pub input: Bytes,
    /// The base chain sender of an enqueued transaction.
    #[serde(default)]
    pub l1_tx_origin: Option<String>,
    /// The explicit queue index of an enqueued transaction. Older nodes do not report it.
    #[serde(default, with = "alloy_serde::quantity::opt")]
    pub queue_index: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_l2geth_block() {
        let raw = r#"{
            "number": "0x69",
            "hash": "0x1111111111111111111111111111111111111111111111111111111111111111",
            "stateRoot": "0x2222222222222222222222222222222222222222222222222222222222222222",
            "transactions": [{
                "blockNumber": "0x69",
                "gas": "0x5208",
                "gasPrice": "0x3b9aca00",
                "input": "0x",
                "nonce": "0x7",
                "to": null,
                "value": "0xde0b6b3a7640000",
                "v": "0x1c",
                "r": "0xabc",
                "s": "0x1",
                "queueOrigin": "sequencer",
                "l1TxOrigin": null,
                "l1BlockNumber": "0x10",
                "l1Timestamp": "0x5f5e100",
                "index": null,
                "queueIndex": null
            }]
        }"#;

        let block: RawL2Block = serde_json::from_str(raw).unwrap();
        assert_eq!(block.number, Some(105));
        assert_eq!(block.transactions.len(), 1);

        let tx = &block.transactions[0];
        assert_eq!(tx.index, None);
        assert_eq!(tx.block_number, 105);
        assert_eq!(tx.l1_block_number, 16);
        assert_eq!(tx.l1_timestamp, 100_000_000);
        assert_eq!(tx.queue_origin, QueueOrigin::Sequencer);
        assert_eq!(tx.gas, 21_000);
        assert_eq!(tx.nonce, 7);
        assert_eq!(tx.v, Some(28));
        assert_eq!(tx.r.as_deref(), Some("0xabc"));
        assert_eq!(tx.to, None);
        assert!(tx.input.is_empty());
    }

    #[test]
    fn test_missing_state_root_fails() {
        let raw = r#"{ "transactions": [] }"#;
        assert!(serde_json::from_str::<RawL2Block>(raw).is_err());
    }
}
