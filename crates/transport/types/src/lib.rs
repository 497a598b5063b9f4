#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/op-rs/kona/main/assets/square.png",
    html_favicon_url = "https://raw.githubusercontent.com/op-rs/kona/main/assets/favicon.ico",
    issue_tracker_base_url = "https://github.com/op-rs/kona/issues/"
)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod entry;
pub use entry::{EntryKind, TransportEntry};

mod origin;
pub use origin::QueueOrigin;

mod transaction;
pub use transaction::{DecodedSequencerBatchTransaction, SequencerSignature, TransactionEntry};

mod state_root;
pub use state_root::StateRootEntry;

mod raw;
pub use raw::{RawL2Block, RawL2Transaction};

mod config;
pub use config::{SEQUENCER_ENTRYPOINT_ADDRESS, SEQUENCER_GAS_LIMIT, SequencerConfig};
