use crate::StorageError;

/// Read access to one entry kind.
///
/// Every read resolves an index against the confirmed track first and falls back to the
/// unconfirmed track, so an unconfirmed observation never hides a confirmed entry.
pub trait EntryReader<E> {
    /// Returns the entry at `index`, if any.
    fn get_entry(&self, index: u64) -> Result<Option<E>, StorageError>;

    /// Returns the entry with the highest index across both tracks, if any.
    fn latest_entry(&self) -> Result<Option<E>, StorageError>;

    /// Returns all entries in `start..end`, in ascending index order.
    fn entries_in_range(&self, start: u64, end: u64) -> Result<Vec<E>, StorageError>;
}

/// Write access to one entry kind.
pub trait EntryWriter<E> {
    /// Upserts `entries` into the unconfirmed track.
    ///
    /// All entries become visible together once the call returns.
    fn put_unconfirmed(&self, entries: &[E]) -> Result<(), StorageError>;

    /// Writes `entries` into the confirmed track, stamped with `batch_index`.
    ///
    /// Confirming an index again with an identical entry is a no-op. If any index is already
    /// confirmed with a different entry, nothing is written and
    /// [`StorageError::ConfirmedConflict`] is returned.
    fn put_confirmed(&self, entries: &[E], batch_index: u64) -> Result<(), StorageError>;

    /// Promotes the unconfirmed entry at `index` into the confirmed track.
    ///
    /// Returns the confirmed entry.
    fn confirm(&self, index: u64, batch_index: u64) -> Result<E, StorageError>;
}

/// Tracks how far ingestion has progressed.
pub trait SyncCursorStorage {
    /// Returns the highest rollup block number that has been ingested.
    fn highest_synced_block(&self) -> Result<Option<u64>, StorageError>;

    /// Records `block_number` as the highest ingested rollup block.
    fn set_highest_synced_block(&self, block_number: u64) -> Result<(), StorageError>;
}
