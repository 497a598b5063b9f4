//! Provider for entry-related database operations.

use crate::{
    error::StorageError,
    models::{StoredEntry, StoredEntryKind},
};
use core::marker::PhantomData;
use reth_db_api::{
    cursor::DbCursorRO,
    table::Table,
    transaction::{DbTx, DbTxMut},
};
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Provides access to the confirmed and unconfirmed tracks of one entry kind within a
/// transaction.
#[derive(Debug)]
pub(crate) struct EntryProvider<'tx, TX, E> {
    tx: &'tx TX,
    _entry: PhantomData<E>,
}

impl<'tx, TX, E> EntryProvider<'tx, TX, E> {
    /// Creates a new [`EntryProvider`] instance.
    pub(crate) const fn new(tx: &'tx TX) -> Self {
        Self { tx, _entry: PhantomData }
    }
}

impl<TX, E> EntryProvider<'_, TX, E>
where
    TX: DbTx,
    E: StoredEntryKind,
{
    fn get_from<T>(&self, index: u64) -> Result<Option<E>, StorageError>
    where
        T: Table<Key = u64, Value = StoredEntry<E>>,
    {
        let entry = self.tx.get::<T>(index).inspect_err(|err| {
            error!(
                target: "transport_storage",
                table = T::NAME,
                index,
                ?err,
                "Failed to read entry"
            );
        })?;
        Ok(entry.map(|StoredEntry(entry)| entry))
    }

    fn last_index_of<T>(&self) -> Result<Option<u64>, StorageError>
    where
        T: Table<Key = u64, Value = StoredEntry<E>>,
    {
        let mut cursor = self.tx.cursor_read::<T>().inspect_err(|err| {
            error!(target: "transport_storage", table = T::NAME, ?err, "Failed to get cursor");
        })?;

        let last = cursor.last().inspect_err(|err| {
            error!(target: "transport_storage", table = T::NAME, ?err, "Failed to seek to last entry");
        })?;
        Ok(last.map(|(index, _)| index))
    }

    fn range_of<T>(
        &self,
        start: u64,
        end: u64,
        into: &mut BTreeMap<u64, E>,
    ) -> Result<(), StorageError>
    where
        T: Table<Key = u64, Value = StoredEntry<E>>,
    {
        let mut cursor = self.tx.cursor_read::<T>()?;
        let walker = cursor.walk_range(start..end).inspect_err(|err| {
            error!(
                target: "transport_storage",
                table = T::NAME,
                start,
                end,
                ?err,
                "Failed to walk entry range"
            );
        })?;

        for row in walker {
            let (index, StoredEntry(entry)) = row?;
            into.insert(index, entry);
        }
        Ok(())
    }

    /// Gets the confirmed entry at `index`.
    pub(crate) fn confirmed(&self, index: u64) -> Result<Option<E>, StorageError> {
        self.get_from::<E::Confirmed>(index)
    }

    /// Gets the entry at `index`, preferring the confirmed track.
    pub(crate) fn get_entry(&self, index: u64) -> Result<Option<E>, StorageError> {
        if let Some(entry) = self.confirmed(index)? {
            return Ok(Some(entry));
        }
        self.get_from::<E::Unconfirmed>(index)
    }

    /// Gets the entry with the highest index across both tracks.
    pub(crate) fn latest_entry(&self) -> Result<Option<E>, StorageError> {
        let confirmed = self.last_index_of::<E::Confirmed>()?;
        let unconfirmed = self.last_index_of::<E::Unconfirmed>()?;

        match confirmed.max(unconfirmed) {
            Some(index) => self.get_entry(index),
            None => Ok(None),
        }
    }

    /// Gets every entry in `start..end`, preferring the confirmed track per index.
    pub(crate) fn entries_in_range(&self, start: u64, end: u64) -> Result<Vec<E>, StorageError> {
        if start >= end {
            return Ok(Vec::new());
        }

        let mut entries = BTreeMap::new();
        self.range_of::<E::Unconfirmed>(start, end, &mut entries)?;
        // Confirmed rows are written last so they replace unconfirmed rows at the same index.
        self.range_of::<E::Confirmed>(start, end, &mut entries)?;
        Ok(entries.into_values().collect())
    }
}

impl<TX, E> EntryProvider<'_, TX, E>
where
    TX: DbTxMut + DbTx,
    E: StoredEntryKind,
{
    /// Upserts `entries` into the unconfirmed track.
    pub(crate) fn put_unconfirmed(&self, entries: &[E]) -> Result<(), StorageError> {
        for entry in entries {
            self.tx.put::<E::Unconfirmed>(entry.index(), StoredEntry(entry.clone())).inspect_err(
                |err| {
                    error!(
                        target: "transport_storage",
                        kind = %E::KIND,
                        index = entry.index(),
                        ?err,
                        "Failed to write unconfirmed entry"
                    );
                },
            )?;
        }

        debug!(
            target: "transport_storage",
            kind = %E::KIND,
            count = entries.len(),
            "Stored unconfirmed entries"
        );
        Ok(())
    }

    /// Writes `entry` into the confirmed track, stamped with `batch_index`.
    ///
    /// Returns the stored entry. Earlier writes in the same transaction are visible, so a
    /// conflicting duplicate within one batch is detected as well.
    pub(crate) fn put_confirmed_entry(
        &self,
        entry: E,
        batch_index: u64,
    ) -> Result<E, StorageError> {
        let index = entry.index();
        let entry = entry.into_confirmed(batch_index);

        match self.confirmed(index)? {
            Some(existing) if existing == entry => {
                debug!(
                    target: "transport_storage",
                    kind = %E::KIND,
                    index,
                    batch_index,
                    "Entry already confirmed"
                );
                return Ok(existing);
            }
            Some(existing) => {
                warn!(
                    target: "transport_storage",
                    kind = %E::KIND,
                    index,
                    ?existing,
                    incoming = ?entry,
                    "Conflicting confirmed entry"
                );
                return Err(StorageError::ConfirmedConflict { kind: E::KIND, index });
            }
            None => {}
        }

        self.tx.put::<E::Confirmed>(index, StoredEntry(entry.clone())).inspect_err(|err| {
            error!(
                target: "transport_storage",
                kind = %E::KIND,
                index,
                ?err,
                "Failed to write confirmed entry"
            );
        })?;
        Ok(entry)
    }

    /// Writes `entries` into the confirmed track, stamped with `batch_index`.
    pub(crate) fn put_confirmed(&self, entries: &[E], batch_index: u64) -> Result<(), StorageError> {
        for entry in entries {
            self.put_confirmed_entry(entry.clone(), batch_index)?;
        }
        Ok(())
    }

    /// Promotes the unconfirmed entry at `index` into the confirmed track.
    pub(crate) fn confirm(&self, index: u64, batch_index: u64) -> Result<E, StorageError> {
        let entry = self.get_from::<E::Unconfirmed>(index)?.ok_or_else(|| {
            warn!(
                target: "transport_storage",
                kind = %E::KIND,
                index,
                "No unconfirmed entry to confirm"
            );
            StorageError::EntryNotFound(format!("unconfirmed {} at index {index}", E::KIND))
        })?;
        self.put_confirmed_entry(entry, batch_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tables;
    use alloy_primitives::B256;
    use kona_transport_types::{StateRootEntry, TransportEntry};
    use reth_db::{
        ClientVersion, DatabaseEnv,
        mdbx::{DatabaseArguments, init_db_for},
    };
    use reth_db_api::database::Database;
    use tempfile::TempDir;

    fn setup_db() -> (TempDir, DatabaseEnv) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let db = init_db_for::<_, Tables>(
            temp_dir.path(),
            DatabaseArguments::new(ClientVersion::default()),
        )
        .expect("Failed to init database");
        (temp_dir, db)
    }

    fn root(index: u64, byte: u8) -> StateRootEntry {
        StateRootEntry::unconfirmed(index, B256::repeat_byte(byte))
    }

    #[test]
    fn test_conflicting_duplicate_within_batch() {
        let (_dir, db) = setup_db();
        let tx = db.tx_mut().expect("Failed to start RW tx");
        let provider = EntryProvider::<_, StateRootEntry>::new(&tx);

        let err = provider.put_confirmed(&[root(1, 1), root(1, 2)], 4).unwrap_err();
        assert!(matches!(err, StorageError::ConfirmedConflict { index: 1, .. }));
    }

    #[test]
    fn test_range_prefers_confirmed() {
        let (_dir, db) = setup_db();
        let tx = db.tx_mut().expect("Failed to start RW tx");
        let provider = EntryProvider::<_, StateRootEntry>::new(&tx);

        provider.put_unconfirmed(&[root(0, 1), root(1, 1), root(2, 1), root(5, 1)]).unwrap();
        provider.put_confirmed(&[root(1, 9)], 0).unwrap();

        let entries = provider.entries_in_range(0, 5).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], root(0, 1));
        assert_eq!(entries[1], root(1, 9).into_confirmed(0));
        assert_eq!(entries[2], root(2, 1));

        assert!(provider.entries_in_range(5, 5).unwrap().is_empty());
        assert_eq!(provider.latest_entry().unwrap(), Some(root(5, 1)));
    }
}
