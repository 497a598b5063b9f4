use kona_transport_types::EntryKind;
use reth_db_api::DatabaseError;
use thiserror::Error;

/// Errors that may occur while interacting with the transport store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database returned an error.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// The database environment could not be opened.
    #[error("Failed to initialize database: {0}")]
    Init(#[from] eyre::Report),

    /// The expected entry was not found in the database.
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// A different entry is already confirmed at the index.
    #[error("Conflicting confirmed {kind} entry at index {index}")]
    ConfirmedConflict {
        /// The kind of the entry.
        kind: EntryKind,
        /// The index of the entry.
        index: u64,
    },
}
