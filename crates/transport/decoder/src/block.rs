//! Decoding of observed rollup blocks.

use crate::{DecodeError, checksum_address, encode_sequencer_transaction, pad_hex_32};
use alloy_primitives::Address;
use kona_transport_types::{
    DecodedSequencerBatchTransaction, QueueOrigin, RawL2Block, RawL2Transaction,
    SequencerConfig, SequencerSignature, StateRootEntry, TransactionEntry,
};

/// The entries decoded from one observed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBlock {
    /// The transaction entry.
    pub transaction: TransactionEntry,
    /// The state root entry, sharing the transaction's index.
    pub state_root: StateRootEntry,
}

/// Decodes an observed block into a [`TransactionEntry`] and a [`StateRootEntry`].
///
/// Both entries are unconfirmed. Only the first transaction of the block is decoded.
pub fn decode_block(
    block: &RawL2Block,
    chain_id: u64,
    config: &SequencerConfig,
) -> Result<DecodedBlock, DecodeError> {
    let tx = block.transactions.first().ok_or(DecodeError::MissingTransaction)?;
    let index = transaction_index(tx)?;

    let transaction = match tx.queue_origin {
        QueueOrigin::Sequencer => decode_sequencer_transaction(tx, index, chain_id, config)?,
        QueueOrigin::L1 => decode_enqueued_transaction(tx, index)?,
    };

    trace!(
        target: "transport_decoder",
        index,
        queue_origin = %tx.queue_origin,
        "Decoded block"
    );

    Ok(DecodedBlock { transaction, state_root: StateRootEntry::unconfirmed(index, block.state_root) })
}

/// Returns the transaction index, falling back to `blockNumber - 1` for nodes that do not
/// report one.
pub const fn transaction_index(tx: &RawL2Transaction) -> Result<u64, DecodeError> {
    match tx.index {
        Some(index) => Ok(index),
        None => match tx.block_number.checked_sub(1) {
            Some(index) => Ok(index),
            None => Err(DecodeError::IndexUnderflow),
        },
    }
}

/// Strips the EIP-155 chain binding from `v`.
///
/// No validation happens here: a signature for another chain yields a meaningless value rather
/// than an error.
pub const fn recover_v(v: u64, chain_id: u64) -> u64 {
    v.wrapping_sub(chain_id.wrapping_mul(2)).wrapping_sub(35)
}

fn decode_sequencer_transaction(
    tx: &RawL2Transaction,
    index: u64,
    chain_id: u64,
    config: &SequencerConfig,
) -> Result<TransactionEntry, DecodeError> {
    let v = tx.v.ok_or(DecodeError::MissingField("v"))?;
    let r = pad_hex_32("r", tx.r.as_deref().ok_or(DecodeError::MissingField("r"))?)?;
    let s = pad_hex_32("s", tx.s.as_deref().ok_or(DecodeError::MissingField("s"))?)?;
    let gas_price = tx.gas_price.ok_or(DecodeError::MissingField("gasPrice"))?;
    let target = match tx.to.as_deref() {
        Some(to) => checksum_address("to", to)?,
        None => Address::ZERO,
    };

    let decoded = DecodedSequencerBatchTransaction {
        sig: SequencerSignature { v: recover_v(v, chain_id), r, s },
        value: tx.value,
        gas_limit: tx.gas,
        gas_price,
        nonce: tx.nonce,
        target,
        data: tx.input.clone(),
    };
    let data = encode_sequencer_transaction(&decoded, v);

    Ok(TransactionEntry {
        index,
        batch_index: None,
        value: tx.value,
        block_number: tx.l1_block_number,
        timestamp: tx.l1_timestamp,
        queue_origin: QueueOrigin::Sequencer,
        confirmed: false,
        gas_limit: config.gas_limit,
        target: config.entrypoint,
        origin: None,
        data,
        decoded: Some(decoded),
        queue_index: None,
    })
}

fn decode_enqueued_transaction(
    tx: &RawL2Transaction,
    index: u64,
) -> Result<TransactionEntry, DecodeError> {
    let to = tx.to.as_deref().ok_or(DecodeError::MissingField("to"))?;
    let origin = tx.l1_tx_origin.as_deref().ok_or(DecodeError::MissingField("l1TxOrigin"))?;

    Ok(TransactionEntry {
        index,
        batch_index: None,
        value: tx.value,
        block_number: tx.l1_block_number,
        timestamp: tx.l1_timestamp,
        queue_origin: QueueOrigin::L1,
        confirmed: false,
        gas_limit: tx.gas,
        target: checksum_address("to", to)?,
        origin: Some(checksum_address("l1TxOrigin", origin)?),
        data: tx.input.clone(),
        decoded: None,
        // Older nodes do not report the queue index, the nonce carries it instead.
        queue_index: Some(tx.queue_index.unwrap_or(tx.nonce)),
    })
}
