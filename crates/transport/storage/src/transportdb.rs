//! Main database access structure and transaction contexts.

use crate::{
    error::StorageError,
    models::{StoredEntryKind, Tables},
    providers::{EntryProvider, SyncCursorProvider},
    traits::{EntryReader, EntryWriter, SyncCursorStorage},
};
use kona_transport_types::{EntryKind, StateRootEntry, TransactionEntry, TransportEntry};
use reth_db::{
    ClientVersion, DatabaseEnv,
    mdbx::{DatabaseArguments, init_db_for},
};
use reth_db_api::{
    database::Database,
    transaction::{DbTx, DbTxMut},
};
use std::path::Path;
use tracing::{debug, info};

/// Manages the database environment for the transport store.
///
/// Confirmed and unconfirmed entries live in separate tables. Every write runs in a single
/// read-write transaction that is only committed on success, so readers observe either all of
/// a write or none of it.
#[derive(Debug)]
pub struct TransportDb {
    env: DatabaseEnv,
}

impl TransportDb {
    /// Creates or opens a database environment at the given path.
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        let env = init_db_for::<_, Tables>(path, DatabaseArguments::new(ClientVersion::default()))?;
        info!(target: "transport_storage", path = %path.display(), "Opened transport store");
        Ok(Self { env })
    }

    /// Runs `f` in a read-write transaction and commits only if it succeeds.
    fn write<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&<DatabaseEnv as Database>::TXMut) -> Result<T, StorageError>,
    {
        let tx = self.env.tx_mut()?;
        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                tx.abort();
                Err(err)
            }
        }
    }

    /// Promotes the unconfirmed entry of `kind` at `index` into the confirmed track.
    pub fn confirm(
        &self,
        kind: EntryKind,
        index: u64,
        batch_index: u64,
    ) -> Result<(), StorageError> {
        match kind {
            EntryKind::Transaction => {
                EntryWriter::<TransactionEntry>::confirm(self, index, batch_index).map(|_| ())
            }
            EntryKind::StateRoot => {
                EntryWriter::<StateRootEntry>::confirm(self, index, batch_index).map(|_| ())
            }
        }
    }
}

impl<E: StoredEntryKind> EntryReader<E> for TransportDb {
    fn get_entry(&self, index: u64) -> Result<Option<E>, StorageError> {
        self.env.view(|tx| EntryProvider::<_, E>::new(tx).get_entry(index))?
    }

    fn latest_entry(&self) -> Result<Option<E>, StorageError> {
        self.env.view(|tx| EntryProvider::<_, E>::new(tx).latest_entry())?
    }

    fn entries_in_range(&self, start: u64, end: u64) -> Result<Vec<E>, StorageError> {
        self.env.view(|tx| EntryProvider::<_, E>::new(tx).entries_in_range(start, end))?
    }
}

impl<E: StoredEntryKind> EntryWriter<E> for TransportDb {
    fn put_unconfirmed(&self, entries: &[E]) -> Result<(), StorageError> {
        if entries.is_empty() {
            return Ok(());
        }
        self.write(|tx| EntryProvider::<_, E>::new(tx).put_unconfirmed(entries))
    }

    fn put_confirmed(&self, entries: &[E], batch_index: u64) -> Result<(), StorageError> {
        if entries.is_empty() {
            return Ok(());
        }
        self.write(|tx| EntryProvider::<_, E>::new(tx).put_confirmed(entries, batch_index))?;
        debug!(
            target: "transport_storage",
            kind = %E::KIND,
            count = entries.len(),
            batch_index,
            "Stored confirmed entries"
        );
        Ok(())
    }

    fn confirm(&self, index: u64, batch_index: u64) -> Result<E, StorageError> {
        let entry = self.write(|tx| EntryProvider::<_, E>::new(tx).confirm(index, batch_index))?;
        debug!(
            target: "transport_storage",
            kind = %E::KIND,
            index = entry.index(),
            batch_index,
            "Confirmed entry"
        );
        Ok(entry)
    }
}

impl SyncCursorStorage for TransportDb {
    fn highest_synced_block(&self) -> Result<Option<u64>, StorageError> {
        self.env.view(|tx| SyncCursorProvider::new(tx).highest_synced_block())?
    }

    fn set_highest_synced_block(&self, block_number: u64) -> Result<(), StorageError> {
        self.write(|tx| SyncCursorProvider::new(tx).set_highest_synced_block(block_number))
    }
}
