//! Ingestion progress markers.

use super::StoredEntry;
use reth_db_api::table::Table;
use serde::{Deserialize, Serialize};

/// Key of the highest rollup block ingested so far.
pub(crate) const HIGHEST_SYNCED_BLOCK_KEY: u64 = 0;

/// Named progress markers.
///
/// - **Key**: `u64` (cursor id)
/// - **Value**: [`StoredEntry<u64>`] (block number)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct SyncCursors;

impl Table for SyncCursors {
    const NAME: &'static str = "sync_cursors";
    const DUPSORT: bool = false;
    type Key = u64;
    type Value = StoredEntry<u64>;
}
