//! Database table schemas used by the transport store.
//!
//! This module defines the value types, keys, and table layouts for all data
//! persisted by the transport layer.
//!
//! The tables are registered using [`reth_db_api::table::TableInfo`] and grouped into a
//! [`reth_db_api::TableSet`] for database initialization via Reth's storage-api.

use bytes::BufMut;
use core::fmt::Debug;
use kona_transport_types::{StateRootEntry, TransactionEntry, TransportEntry};
use reth_db_api::{
    DatabaseError,
    table::{Compress, Decompress, Table},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

mod entries;
pub use entries::{
    ConfirmedStateRoots, ConfirmedTransactions, UnconfirmedStateRoots, UnconfirmedTransactions,
};

mod cursor;
pub(crate) use cursor::HIGHEST_SYNCED_BLOCK_KEY;
pub use cursor::SyncCursors;

/// A value stored in one of the transport tables.
///
/// Values are encoded as JSON, which keeps optional nested payloads and variable length byte
/// fields self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredEntry<T>(pub T);

impl<T> Compress for StoredEntry<T>
where
    T: Serialize + Debug + Send + Sync,
{
    type Compressed = Vec<u8>;

    fn compress_to_buf<B: BufMut + AsMut<[u8]>>(&self, buf: &mut B) {
        // Stored values are plain data without non-string map keys, so encoding cannot fail.
        let _ = serde_json::to_writer(buf.writer(), &self.0);
    }
}

impl<T> Decompress for StoredEntry<T>
where
    T: DeserializeOwned + Debug + Send + Sync,
{
    fn decompress(value: &[u8]) -> Result<Self, DatabaseError> {
        serde_json::from_slice(value).map(Self).map_err(|_| DatabaseError::Decode)
    }
}

/// An entry kind with a confirmed and an unconfirmed table.
///
/// The two tables are physically separate, so a write to one track can never clobber the
/// other.
pub trait StoredEntryKind: TransportEntry + Serialize + DeserializeOwned {
    /// The table holding confirmed entries.
    type Confirmed: Table<Key = u64, Value = StoredEntry<Self>>;
    /// The table holding unconfirmed entries.
    type Unconfirmed: Table<Key = u64, Value = StoredEntry<Self>>;
}

impl StoredEntryKind for TransactionEntry {
    type Confirmed = ConfirmedTransactions;
    type Unconfirmed = UnconfirmedTransactions;
}

impl StoredEntryKind for StateRootEntry {
    type Confirmed = ConfirmedStateRoots;
    type Unconfirmed = UnconfirmedStateRoots;
}

/// Implements [`reth_db_api::table::TableInfo`] for one or more table types that implement
/// [`reth_db_api::table::Table`].
macro_rules! impl_table_info {
    ($($table:ty),+ $(,)?) => {
        $(
            impl reth_db_api::table::TableInfo for $table
            where
                $table: reth_db_api::table::Table,
            {
                fn name(&self) -> &'static str {
                    <$table as reth_db_api::table::Table>::NAME
                }

                fn is_dupsort(&self) -> bool {
                    <$table as reth_db_api::table::Table>::DUPSORT
                }
            }
        )+
    };
}

/// Declares a struct representing a collection of tables and implements [`reth_db_api::TableSet`]
/// for it.
///
/// The resulting struct can be passed to Reth's `init_db_for::<_, YourTableSet>()`
/// to initialize only the specified tables.
macro_rules! impl_table_set {
    (
        $(#[$outer:meta])*
        $set_name:ident, $($table:ty),+ $(,)?
    ) => {
        $(#[$outer])*
        #[derive(Debug)]
        pub(crate) struct $set_name;

        impl reth_db_api::TableSet for $set_name {
            fn tables() -> Box<dyn Iterator<Item = Box<dyn reth_db_api::table::TableInfo>>> {
                Box::new(vec![
                    $(
                        Box::new(<$table>::default()) as Box<dyn reth_db_api::table::TableInfo>
                    ),*
                ].into_iter())
            }
        }
    };
}

impl_table_info!(
    ConfirmedTransactions,
    UnconfirmedTransactions,
    ConfirmedStateRoots,
    UnconfirmedStateRoots,
    SyncCursors,
);

impl_table_set!(
    /// Every table of the transport store.
    Tables,
    ConfirmedTransactions,
    UnconfirmedTransactions,
    ConfirmedStateRoots,
    UnconfirmedStateRoots,
    SyncCursors,
);
