//! Promotion of unconfirmed entries once their batch lands on the base chain.

use kona_transport_storage::{EntryWriter, StorageError};
use kona_transport_types::{EntryKind, StateRootEntry, TransactionEntry};
use serde::{Deserialize, Serialize};

/// A request to confirm the entry of `kind` at `index` as part of `batch_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    /// The entry index.
    pub index: u64,
    /// The batch the entry was submitted in.
    pub batch_index: u64,
    /// The kind of the entry.
    pub kind: EntryKind,
}

/// Confirms every request in order, stopping at the first failure.
///
/// Requests before the failing one stay confirmed. A conflicting confirmation is surfaced
/// as [`StorageError::ConfirmedConflict`] and never resolved silently.
pub fn confirm_entries<DB>(db: &DB, requests: &[ConfirmationRequest]) -> Result<(), StorageError>
where
    DB: EntryWriter<TransactionEntry> + EntryWriter<StateRootEntry>,
{
    for request in requests {
        let ConfirmationRequest { index, batch_index, kind } = *request;
        let confirmed = match kind {
            EntryKind::Transaction => {
                EntryWriter::<TransactionEntry>::confirm(db, index, batch_index).map(|_| ())
            }
            EntryKind::StateRoot => {
                EntryWriter::<StateRootEntry>::confirm(db, index, batch_index).map(|_| ())
            }
        };

        if let Err(err) = confirmed {
            error!(
                target: "transport_ingest",
                %kind,
                index,
                batch_index,
                %err,
                "Failed to confirm entry"
            );
            return Err(err);
        }
    }

    info!(target: "transport_ingest", count = requests.len(), "Confirmed entries");
    Ok(())
}
