//! The polling ingestion service.

use crate::{BlockSource, IngestError, Metrics, ingest_block};
use kona_transport_storage::{EntryWriter, StorageError, SyncCursorStorage};
use kona_transport_types::{SequencerConfig, StateRootEntry, TransactionEntry};
use std::{fmt::Debug, sync::Arc, time::Duration};
use tokio::{
    select,
    time::{MissedTickBehavior, interval},
};
use tokio_util::sync::CancellationToken;

/// The default interval between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// The default maximum number of blocks ingested per poll.
pub const DEFAULT_BLOCKS_PER_POLL: u64 = 1000;

/// The default first block to ingest. The rollup genesis block carries no transaction.
pub const DEFAULT_START_BLOCK: u64 = 1;

/// Configuration of the [`L2IngestionService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionConfig {
    /// The rollup chain id, used to recover sequencer signatures.
    pub chain_id: u64,
    /// The sequencer overrides applied while decoding.
    pub sequencer: SequencerConfig,
    /// The interval between polls.
    pub poll_interval: Duration,
    /// The maximum number of blocks ingested per poll.
    pub blocks_per_poll: u64,
    /// The first block to ingest when the store is empty.
    pub start_block: u64,
}

impl IngestionConfig {
    /// Creates a new [`IngestionConfig`] for `chain_id` with default settings.
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            sequencer: SequencerConfig::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            blocks_per_poll: DEFAULT_BLOCKS_PER_POLL,
            start_block: DEFAULT_START_BLOCK,
        }
    }
}

/// Polls a [`BlockSource`] and ingests every new block into the transport store.
///
/// Ingestion resumes from the store's sync cursor. Source failures are retried on the next
/// poll. A block that fails to decode halts progress at that block until it is delivered
/// correctly. Storage failures stop the service, as the ledger cannot be trusted afterwards.
#[derive(Debug)]
pub struct L2IngestionService<S, DB> {
    source: S,
    db: Arc<DB>,
    config: IngestionConfig,
    cancellation: CancellationToken,
}

impl<S, DB> L2IngestionService<S, DB>
where
    S: BlockSource,
    DB: EntryWriter<TransactionEntry>
        + EntryWriter<StateRootEntry>
        + SyncCursorStorage
        + Debug
        + Send
        + Sync,
{
    /// Creates a new [`L2IngestionService`].
    pub const fn new(
        source: S,
        db: Arc<DB>,
        config: IngestionConfig,
        cancellation: CancellationToken,
    ) -> Self {
        Self { source, db, config, cancellation }
    }

    /// Returns the next block to ingest.
    pub fn next_block(&self) -> Result<u64, StorageError> {
        let next = self.db.highest_synced_block()?.map_or(0, |number| number.saturating_add(1));
        Ok(next.max(self.config.start_block))
    }

    /// Ingests up to `blocks_per_poll` blocks between the sync cursor and the source head.
    ///
    /// Returns the number of blocks ingested.
    pub async fn poll(&self) -> Result<u64, IngestError> {
        let head = self.source.latest_block_number().await?;
        let next = self.next_block()?;
        if next > head {
            trace!(target: "transport_ingest", head, next, "No new blocks");
            return Ok(0);
        }

        let last = head.min(next.saturating_add(self.config.blocks_per_poll.max(1) - 1));
        let mut ingested = 0;
        for number in next..=last {
            let Some(block) = self.source.block_by_number(number).await? else {
                debug!(target: "transport_ingest", number, "Block not yet available");
                break;
            };

            ingest_block(&*self.db, &block, self.config.chain_id, &self.config.sequencer)?;
            Metrics::record_ingested(number);
            ingested += 1;
        }

        debug!(target: "transport_ingest", from = next, ingested, head, "Ingestion poll complete");
        Ok(ingested)
    }

    /// Runs the polling loop until cancelled or until the store fails.
    pub async fn start(self) -> Result<(), IngestError> {
        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            target: "transport_ingest",
            chain_id = self.config.chain_id,
            interval_ms = self.config.poll_interval.as_millis(),
            blocks_per_poll = self.config.blocks_per_poll,
            "Starting ingestion service"
        );

        loop {
            select! {
                _ = self.cancellation.cancelled() => {
                    info!(
                        target: "transport_ingest",
                        "Received shutdown signal. Exiting ingestion service."
                    );
                    return Ok(());
                }
                _ = ticker.tick() => {
                    match self.poll().await {
                        Ok(_) => {}
                        Err(err @ IngestError::Source(_)) => {
                            Metrics::record_error("source");
                            warn!(
                                target: "transport_ingest",
                                %err,
                                "Failed to poll block source, will retry on next interval"
                            );
                        }
                        Err(err @ IngestError::Decode { .. }) => {
                            Metrics::record_error("decode");
                            warn!(
                                target: "transport_ingest",
                                %err,
                                "Failed to decode block, will retry on next interval"
                            );
                        }
                        Err(err @ IngestError::Storage(_)) => {
                            Metrics::record_error("storage");
                            error!(
                                target: "transport_ingest",
                                %err,
                                "Transport store failed, stopping ingestion"
                            );
                            return Err(err);
                        }
                    }
                }
            }
        }
    }
}
