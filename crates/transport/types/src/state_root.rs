//! Contains the [`StateRootEntry`] type.

use crate::{EntryKind, TransportEntry};
use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// The state root observed after a rollup block, paired with the
/// [`TransactionEntry`](crate::TransactionEntry) of the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRootEntry {
    /// The position of the state root in the rollup chain.
    pub index: u64,
    /// The batch the state root was confirmed in.
    pub batch_index: Option<u64>,
    /// The state root.
    pub value: B256,
    /// Whether the state root has been confirmed on the base chain.
    pub confirmed: bool,
}

impl StateRootEntry {
    /// Creates a new unconfirmed [`StateRootEntry`].
    pub const fn unconfirmed(index: u64, value: B256) -> Self {
        Self { index, batch_index: None, value, confirmed: false }
    }
}

impl TransportEntry for StateRootEntry {
    const KIND: EntryKind = EntryKind::StateRoot;

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
