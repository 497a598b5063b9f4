//! Tables holding transport entries.
//!
//! Each entry kind has a confirmed and an unconfirmed table, keyed by entry index. Keys are
//! big-endian encoded, so cursors iterate in index order.

use super::StoredEntry;
use kona_transport_types::{StateRootEntry, TransactionEntry};
use reth_db_api::table::Table;
use serde::{Deserialize, Serialize};

/// Transaction entries confirmed on the base chain.
///
/// - **Key**: `u64` (entry index)
/// - **Value**: [`StoredEntry<TransactionEntry>`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ConfirmedTransactions;

impl Table for ConfirmedTransactions {
    const NAME: &'static str = "confirmed_transactions";
    const DUPSORT: bool = false;
    type Key = u64;
    type Value = StoredEntry<TransactionEntry>;
}

/// Transaction entries observed on the rollup chain but not yet confirmed.
///
/// - **Key**: `u64` (entry index)
/// - **Value**: [`StoredEntry<TransactionEntry>`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UnconfirmedTransactions;

impl Table for UnconfirmedTransactions {
    const NAME: &'static str = "unconfirmed_transactions";
    const DUPSORT: bool = false;
    type Key = u64;
    type Value = StoredEntry<TransactionEntry>;
}

/// State root entries confirmed on the base chain.
///
/// - **Key**: `u64` (entry index)
/// - **Value**: [`StoredEntry<StateRootEntry>`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ConfirmedStateRoots;

impl Table for ConfirmedStateRoots {
    const NAME: &'static str = "confirmed_state_roots";
    const DUPSORT: bool = false;
    type Key = u64;
    type Value = StoredEntry<StateRootEntry>;
}

/// State root entries observed on the rollup chain but not yet confirmed.
///
/// - **Key**: `u64` (entry index)
/// - **Value**: [`StoredEntry<StateRootEntry>`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UnconfirmedStateRoots;

impl Table for UnconfirmedStateRoots {
    const NAME: &'static str = "unconfirmed_state_roots";
    const DUPSORT: bool = false;
    type Key = u64;
    type Value = StoredEntry<StateRootEntry>;
}
