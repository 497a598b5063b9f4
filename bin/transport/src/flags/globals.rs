//! Global arguments for the CLI.

use clap::{ArgAction, Parser};
use kona_cli::MetricsArgs;
use std::path::PathBuf;

/// Global arguments for the CLI.
#[derive(Parser, Clone, Debug)]
pub(crate) struct GlobalArgs {
    /// Verbosity level (0-4).
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub(crate) v: u8,
    /// The L2 chain ID, used to recover sequencer signatures.
    #[arg(long, short = 'c', env = "KONA_TRANSPORT_L2_CHAIN_ID")]
    pub(crate) l2_chain_id: u64,
    /// Directory of the transport store.
    #[arg(long = "db.path", default_value = "transport-db", env = "KONA_TRANSPORT_DB_PATH")]
    pub(crate) db_path: PathBuf,
    /// Prometheus CLI arguments.
    #[command(flatten)]
    pub(crate) metrics: MetricsArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::try_parse_from(["test", "-vvv", "-c", "420", "--db.path", "/data"])
            .unwrap();

        assert_eq!(args.v, 3);
        assert_eq!(args.l2_chain_id, 420);
        assert_eq!(args.db_path, PathBuf::from("/data"));
        assert!(!args.metrics.enabled);
    }

    #[test]
    fn test_chain_id_is_required() {
        assert!(GlobalArgs::try_parse_from(["test"]).is_err());
    }
}
