//! Normalization helpers for raw hex values.

use crate::DecodeError;
use alloy_primitives::{Address, B256, hex};

/// Left-pads a hex string of at most 32 bytes to exactly 32 bytes.
///
/// Signature components are reported as quantities, so they may be shorter than 32 bytes and
/// may have an odd number of nibbles.
pub fn pad_hex_32(field: &'static str, value: &str) -> Result<B256, DecodeError> {
    let invalid = || DecodeError::InvalidSignatureComponent { field, value: value.to_string() };

    let digits = value.strip_prefix("0x").unwrap_or(value);
    if digits.len() > 64 {
        return Err(invalid());
    }

    let padded = format!("{digits:0>64}");
    hex::decode_to_array::<_, 32>(padded).map(B256::from).map_err(|_| invalid())
}

/// Parses an address, rejecting mixed-case input whose checksum does not match.
///
/// All-lowercase and all-uppercase input carry no checksum and are accepted as is. The returned
/// [`Address`] serializes in checksum form.
pub fn checksum_address(field: &'static str, value: &str) -> Result<Address, DecodeError> {
    let invalid = || DecodeError::InvalidAddress { field, value: value.to_string() };

    let digits = value.strip_prefix("0x").unwrap_or(value);
    if digits.len() != 40 {
        return Err(invalid());
    }

    let address = digits.parse::<Address>().map_err(|_| invalid())?;

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None)[2..] != *digits {
        return Err(invalid());
    }

    Ok(address)
}
