//! Sequencer re-targeting configuration.

use alloy_primitives::{Address, address};
use serde::{Deserialize, Serialize};

/// The gas limit that every sequencer transaction entry executes with.
pub const SEQUENCER_GAS_LIMIT: u64 = 11_000_000;

/// The sequencer entrypoint contract that re-encoded sequencer transactions are sent to.
pub const SEQUENCER_ENTRYPOINT_ADDRESS: Address =
    address!("4200000000000000000000000000000000000005");

/// Overrides applied to the `gasLimit` and `target` of sequencer transaction entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequencerConfig {
    /// The gas limit of a sequencer transaction entry.
    pub gas_limit: u64,
    /// The entrypoint contract targeted by a sequencer transaction entry.
    pub entrypoint: Address,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self { gas_limit: SEQUENCER_GAS_LIMIT, entrypoint: SEQUENCER_ENTRYPOINT_ADDRESS }
    }
}
