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
pub use errors::DecodeError;

mod block;
pub use block::{DecodedBlock, decode_block, recover_v, transaction_index};

mod encode;
pub use encode::encode_sequencer_transaction;

mod utils;
pub use utils::{checksum_address, pad_hex_32};
