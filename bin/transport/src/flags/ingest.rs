//! Ingestion service arguments.

use crate::flags::SequencerArgs;
use clap::Parser;
use kona_transport_service::{DEFAULT_BLOCKS_PER_POLL, DEFAULT_START_BLOCK, IngestionConfig};
use std::time::Duration;
use url::Url;

/// Arguments of the ingestion service.
#[derive(Parser, Clone, Debug)]
pub(crate) struct IngestArgs {
    /// URL of the rollup node to ingest blocks from. Ingestion is disabled when unset.
    #[arg(long = "l2.rpc-url", visible_alias = "l2", env = "KONA_TRANSPORT_L2_RPC_URL")]
    pub(crate) l2_rpc_url: Option<Url>,
    /// The interval between polls, in milliseconds.
    #[arg(
        long = "ingest.poll-interval",
        default_value = "5000",
        env = "KONA_TRANSPORT_INGEST_POLL_INTERVAL"
    )]
    pub(crate) poll_interval_ms: u64,
    /// The maximum number of blocks ingested per poll.
    #[arg(
        long = "ingest.blocks-per-poll",
        default_value_t = DEFAULT_BLOCKS_PER_POLL,
        env = "KONA_TRANSPORT_INGEST_BLOCKS_PER_POLL"
    )]
    pub(crate) blocks_per_poll: u64,
    /// The first block to ingest into an empty store.
    #[arg(
        long = "ingest.start-block",
        default_value_t = DEFAULT_START_BLOCK,
        env = "KONA_TRANSPORT_INGEST_START_BLOCK"
    )]
    pub(crate) start_block: u64,
}

impl IngestArgs {
    /// Returns the [`IngestionConfig`] described by the arguments.
    pub(crate) fn config(&self, chain_id: u64, sequencer: &SequencerArgs) -> IngestionConfig {
        IngestionConfig {
            sequencer: sequencer.config(),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            blocks_per_poll: self.blocks_per_poll,
            start_block: self.start_block,
            ..IngestionConfig::new(chain_id)
        }
    }
}
