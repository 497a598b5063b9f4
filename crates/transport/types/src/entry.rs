//! Behaviour shared by every entry kind written to the transport store.

use core::fmt::Debug;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The kind of a transport entry.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    /// A [`TransactionEntry`](crate::TransactionEntry).
    #[display("transaction")]
    Transaction,
    /// A [`StateRootEntry`](crate::StateRootEntry).
    #[display("state root")]
    StateRoot,
}

/// An entry that is stored by index and moves from the unconfirmed to the confirmed track once
/// its batch has been submitted to the base chain.
pub trait TransportEntry: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// The kind of this entry.
    const KIND: EntryKind;

    /// Returns the index of the entry.
    fn index(&self) -> u64;

    /// Returns the batch index, if the entry has been confirmed.
    fn batch_index(&self) -> Option<u64>;

    /// Returns whether the entry has been confirmed.
    fn is_confirmed(&self) -> bool;

    /// Consumes the entry and returns it stamped with the given `batch_index` and marked as
    /// confirmed.
    fn into_confirmed(self, batch_index: u64) -> Self;
}
