//! Provider for ingestion progress markers.

use crate::{
    error::StorageError,
    models::{HIGHEST_SYNCED_BLOCK_KEY, StoredEntry, SyncCursors},
};
use reth_db_api::transaction::{DbTx, DbTxMut};
use tracing::error;

/// Reads and writes the [`SyncCursors`] table within a transaction.
#[derive(Debug)]
pub(crate) struct SyncCursorProvider<'tx, TX> {
    tx: &'tx TX,
}

impl<'tx, TX> SyncCursorProvider<'tx, TX> {
    pub(crate) const fn new(tx: &'tx TX) -> Self {
        Self { tx }
    }
}

impl<TX: DbTx> SyncCursorProvider<'_, TX> {
    pub(crate) fn highest_synced_block(&self) -> Result<Option<u64>, StorageError> {
        let block = self.tx.get::<SyncCursors>(HIGHEST_SYNCED_BLOCK_KEY).inspect_err(|err| {
            error!(target: "transport_storage", ?err, "Failed to read sync cursor");
        })?;
        Ok(block.map(|StoredEntry(number)| number))
    }
}

impl<TX: DbTxMut + DbTx> SyncCursorProvider<'_, TX> {
    pub(crate) fn set_highest_synced_block(&self, block_number: u64) -> Result<(), StorageError> {
        self.tx
            .put::<SyncCursors>(HIGHEST_SYNCED_BLOCK_KEY, StoredEntry(block_number))
            .inspect_err(|err| {
                error!(
                    target: "transport_storage",
                    block_number,
                    ?err,
                    "Failed to write sync cursor"
                );
            })?;
        Ok(())
    }
}
