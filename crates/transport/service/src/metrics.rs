//! Metrics for the ingestion service.

/// Container for the ingestion service's metric names.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the counter of ingested blocks.
    pub const INGESTED_BLOCKS: &'static str = "kona_transport_ingested_blocks";
    /// Identifier for the counter of failed polls, labelled by reason.
    pub const INGEST_ERRORS: &'static str = "kona_transport_ingest_errors";
    /// Identifier for the gauge of the highest ingested rollup block.
    pub const HIGHEST_SYNCED_BLOCK: &'static str = "kona_transport_highest_synced_block";

    /// Describes and zeroes the ingestion metrics.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::INGESTED_BLOCKS,
            metrics::Unit::Count,
            "Number of rollup blocks ingested into the transport store",
        );
        metrics::describe_counter!(
            Self::INGEST_ERRORS,
            metrics::Unit::Count,
            "Number of failed ingestion polls, by reason",
        );
        metrics::describe_gauge!(
            Self::HIGHEST_SYNCED_BLOCK,
            "Highest rollup block ingested into the transport store",
        );
    }

    fn zero() {
        metrics::counter!(Self::INGESTED_BLOCKS).increment(0);
        for reason in ["source", "decode", "storage"] {
            metrics::counter!(Self::INGEST_ERRORS, "reason" => reason).increment(0);
        }
        metrics::gauge!(Self::HIGHEST_SYNCED_BLOCK).set(0.0);
    }

    pub(crate) fn record_ingested(number: u64) {
        metrics::counter!(Self::INGESTED_BLOCKS).increment(1);
        metrics::gauge!(Self::HIGHEST_SYNCED_BLOCK).set(number as f64);
    }

    pub(crate) fn record_error(reason: &'static str) {
        metrics::counter!(Self::INGEST_ERRORS, "reason" => reason).increment(1);
    }
}
