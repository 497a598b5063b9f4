#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/op-rs/kona/main/assets/square.png",
    html_favicon_url = "https://raw.githubusercontent.com/op-rs/kona/main/assets/favicon.ico",
    issue_tracker_base_url = "https://github.com/op-rs/kona/issues/"
)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod errors;
pub use errors::{BlockSourceError, IngestError};

mod source;
pub use source::{BlockSource, RpcBlockSource};

mod ingest;
pub use ingest::ingest_block;

mod confirm;
pub use confirm::{ConfirmationRequest, confirm_entries};

mod metrics;
pub use metrics::Metrics;

mod service;
pub use service::{
    DEFAULT_BLOCKS_PER_POLL, DEFAULT_POLL_INTERVAL, DEFAULT_START_BLOCK, IngestionConfig,
    L2IngestionService,
};
