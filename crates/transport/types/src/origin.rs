//! Contains the [`QueueOrigin`] type.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Where a rollup transaction entered the chain from.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueOrigin {
    /// Submitted directly to the sequencer.
    #[display("sequencer")]
    Sequencer,
    /// Enqueued on the base chain.
    #[display("l1")]
    L1,
}
