//! Sequencer override arguments.

use alloy_primitives::Address;
use clap::Parser;
use kona_transport_types::{SEQUENCER_ENTRYPOINT_ADDRESS, SEQUENCER_GAS_LIMIT, SequencerConfig};

/// Overrides applied to decoded sequencer transactions.
#[derive(Parser, Clone, Debug)]
pub(crate) struct SequencerArgs {
    /// The gas limit assigned to sequencer transaction entries.
    #[arg(
        long = "sequencer.gas-limit",
        default_value_t = SEQUENCER_GAS_LIMIT,
        env = "KONA_TRANSPORT_SEQUENCER_GAS_LIMIT"
    )]
    pub(crate) gas_limit: u64,
    /// The entrypoint contract targeted by sequencer transaction entries.
    #[arg(
        long = "sequencer.entrypoint",
        default_value_t = SEQUENCER_ENTRYPOINT_ADDRESS,
        env = "KONA_TRANSPORT_SEQUENCER_ENTRYPOINT"
    )]
    pub(crate) entrypoint: Address,
}

impl SequencerArgs {
    /// Returns the [`SequencerConfig`] described by the arguments.
    pub(crate) const fn config(&self) -> SequencerConfig {
        SequencerConfig { gas_limit: self.gas_limit, entrypoint: self.entrypoint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_sequencer_args_default_to_protocol_constants() {
        let args = SequencerArgs::try_parse_from(["test"]).unwrap();
        assert_eq!(args.config(), SequencerConfig::default());
    }

    #[test]
    fn test_sequencer_args_override() {
        let args = SequencerArgs::try_parse_from([
            "test",
            "--sequencer.gas-limit",
            "9000000",
            "--sequencer.entrypoint",
            "0x4200000000000000000000000000000000000042",
        ])
        .unwrap();

        assert_eq!(
            args.config(),
            SequencerConfig {
                gas_limit: 9_000_000,
                entrypoint: address!("4200000000000000000000000000000000000042"),
            }
        );
    }
}
