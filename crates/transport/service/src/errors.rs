//! Error types for the transport services.

use alloy_transport::{RpcError, TransportErrorKind};
use kona_transport_decoder::DecodeError;
use kona_transport_storage::StorageError;
use thiserror::Error;

/// An error returned by a [`BlockSource`](crate::BlockSource).
#[derive(Debug, Error)]
pub enum BlockSourceError {
    /// The RPC request failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// The source cannot serve blocks right now.
    #[error("Block source unavailable: {0}")]
    Unavailable(String),
}

/// An error raised while ingesting blocks.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The block source failed. Retried on the next poll.
    #[error(transparent)]
    Source(#[from] BlockSourceError),
    /// A block could not be decoded. Nothing from the block was written.
    #[error("Failed to decode block {number}: {source}")]
    Decode {
        /// The rollup block number.
        number: u64,
        /// The decode failure.
        source: DecodeError,
    },
    /// The store failed. Fatal for the service.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
