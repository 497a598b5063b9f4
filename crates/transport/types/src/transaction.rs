//! Transaction entries and the decoded sequencer payload they may carry.

use crate::{EntryKind, QueueOrigin, TransportEntry};
use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

/// The signature of a user-signed sequencer transaction.
///
/// `v` is the recovery id with the EIP-155 chain binding removed. `r` and `s` are always
/// exactly 32 bytes, left padded with zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerSignature {
    /// The recovery id.
    pub v: u64,
    /// The `r` component of the signature.
    pub r: B256,
    /// The `s` component of the signature.
    pub s: B256,
}

/// The user-signed transaction payload inside a sequencer-origin [`TransactionEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedSequencerBatchTransaction {
    /// The signature of the transaction.
    pub sig: SequencerSignature,
    /// The value transferred.
    pub value: U256,
    /// The gas limit chosen by the user.
    pub gas_limit: u64,
    /// The gas price chosen by the user.
    pub gas_price: U256,
    /// The account nonce.
    pub nonce: u64,
    /// The recipient, or the zero address for contract creation.
    pub target: Address,
    /// The calldata.
    pub data: Bytes,
}

/// A single observed rollup transaction.
///
/// Exactly one of `decoded` and `queue_index` is set, depending on the `queue_origin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    /// The position of the transaction in the rollup chain.
    pub index: u64,
    /// The batch the transaction was confirmed in.
    pub batch_index: Option<u64>,
    /// The value transferred.
    pub value: U256,
    /// The base chain block number observed alongside the transaction.
    pub block_number: u64,
    /// The base chain timestamp observed alongside the transaction.
    pub timestamp: u64,
    /// Where the transaction came from.
    pub queue_origin: QueueOrigin,
    /// Whether the transaction has been confirmed on the base chain.
    pub confirmed: bool,
    /// The gas limit the transaction executes with.
    pub gas_limit: u64,
    /// The contract that executes `data`.
    pub target: Address,
    /// The base chain sender, for enqueued transactions.
    pub origin: Option<Address>,
    /// The encoded transaction to execute.
    pub data: Bytes,
    /// The decoded user transaction, for sequencer transactions.
    pub decoded: Option<DecodedSequencerBatchTransaction>,
    /// The position in the base chain queue, for enqueued transactions.
    pub queue_index: Option<u64>,
}

impl TransactionEntry {
    /// Returns whether the origin-specific fields match the [`QueueOrigin`].
    pub const fn has_consistent_origin(&self) -> bool {
        match self.queue_origin {
            QueueOrigin::Sequencer => {
                self.decoded.is_some() && self.queue_index.is_none() && self.origin.is_none()
            }
            QueueOrigin::L1 => self.decoded.is_none() && self.queue_index.is_some(),
        }
    }
}

impl TransportEntry for TransactionEntry {
    const KIND: EntryKind = EntryKind::Transaction;

    fn index(&self) -> u64 {
        self.index
    }

    fn batch_index(&self) -> Option<u64> {
        self.batch_index
    }

    fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    fn into_confirmed(self, batch_index: u64) -> Self {
        Self { batch_index: Some(batch_index), confirmed: true, ..self }
    }
}
