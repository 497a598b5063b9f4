#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/op-rs/kona/main/assets/square.png",
    html_favicon_url = "https://raw.githubusercontent.com/op-rs/kona/main/assets/favicon.ico",
    issue_tracker_base_url = "https://github.com/op-rs/kona/issues/"
)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::StorageError;

mod models;
pub use models::{
    ConfirmedStateRoots, ConfirmedTransactions, StoredEntry, StoredEntryKind, SyncCursors,
    UnconfirmedStateRoots, UnconfirmedTransactions,
};

mod providers;

mod traits;
pub use traits::{EntryReader, EntryWriter, SyncCursorStorage};

mod transportdb;
pub use transportdb::TransportDb;
