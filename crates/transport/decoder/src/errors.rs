//! Contains the error type for block decoding.

use thiserror::Error;

/// An error returned when an observed block cannot be decoded.
///
/// A decode error is fatal for the block it was raised for. Nothing from that block is written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The block has no transaction to decode.
    #[error("Block contains no transactions")]
    MissingTransaction,
    /// A field required by the transaction's queue origin is missing.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// The legacy index fallback was applied to rollup block zero.
    #[error("Cannot derive a transaction index from block number 0")]
    IndexUnderflow,
    /// An address is not valid hex or has a bad checksum.
    #[error("Invalid address in {field}: {value}")]
    InvalidAddress {
        /// The field holding the address.
        field: &'static str,
        /// The raw value.
        value: String,
    },
    /// A signature component is not valid hex or is longer than 32 bytes.
    #[error("Invalid signature component {field}: {value}")]
    InvalidSignatureComponent {
        /// The signature component.
        field: &'static str,
        /// The raw value.
        value: String,
    },
}
