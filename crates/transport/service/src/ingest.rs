//! Ingestion of a single observed block.

use crate::IngestError;
use kona_transport_decoder::{DecodedBlock, decode_block};
use kona_transport_storage::{EntryWriter, SyncCursorStorage};
use kona_transport_types::{RawL2Block, SequencerConfig, StateRootEntry, TransactionEntry};
use std::slice;

/// Decodes `block` and stores its entries as unconfirmed.
///
/// The block is decoded before anything is written, so a malformed block leaves the store
/// untouched. The transaction is written first, then the state root, then the sync cursor is
/// advanced. Every write is an idempotent upsert by index, so a block whose ingestion failed
/// halfway can simply be ingested again.
pub fn ingest_block<DB>(
    db: &DB,
    block: &RawL2Block,
    chain_id: u64,
    config: &SequencerConfig,
) -> Result<DecodedBlock, IngestError>
where
    DB: EntryWriter<TransactionEntry> + EntryWriter<StateRootEntry> + SyncCursorStorage,
{
    let number = block_number(block);
    let decoded = decode_block(block, chain_id, config)
        .map_err(|source| IngestError::Decode { number: number.unwrap_or_default(), source })?;

    EntryWriter::<TransactionEntry>::put_unconfirmed(db, slice::from_ref(&decoded.transaction))?;
    EntryWriter::<StateRootEntry>::put_unconfirmed(db, slice::from_ref(&decoded.state_root))?;
    if let Some(number) = number {
        db.set_highest_synced_block(number)?;
    }

    debug!(
        target: "transport_ingest",
        block = ?number,
        index = decoded.transaction.index,
        queue_origin = %decoded.transaction.queue_origin,
        "Ingested block"
    );
    Ok(decoded)
}

/// The rollup block number, taken from the block or else from its first transaction.
fn block_number(block: &RawL2Block) -> Option<u64> {
    block.number.or_else(|| block.transactions.first().map(|tx| tx.block_number))
}
