//! Re-encoding of sequencer transactions.

use alloy_primitives::{Bytes, U256};
use alloy_rlp::{Encodable, Header};
use kona_transport_types::DecodedSequencerBatchTransaction;

/// Encodes a decoded sequencer transaction as a signed EIP-155 legacy transaction.
///
/// The signature is written with the raw `v` exactly as observed, not the recovery id stored in
/// the decoded payload. Contract creations are encoded with the zero address as recipient.
pub fn encode_sequencer_transaction(tx: &DecodedSequencerBatchTransaction, v: u64) -> Bytes {
    let r = U256::from_be_bytes(tx.sig.r.0);
    let s = U256::from_be_bytes(tx.sig.s.0);

    let payload_length = tx.nonce.length() +
        tx.gas_price.length() +
        tx.gas_limit.length() +
        tx.target.length() +
        tx.value.length() +
        tx.data.length() +
        v.length() +
        r.length() +
        s.length();
    let header = Header { list: true, payload_length };

    let mut out = Vec::with_capacity(header.length_with_payload());
    header.encode(&mut out);
    tx.nonce.encode(&mut out);
    tx.gas_price.encode(&mut out);
    tx.gas_limit.encode(&mut out);
    tx.target.encode(&mut out);
    tx.value.encode(&mut out);
    tx.data.encode(&mut out);
    v.encode(&mut out);
    r.encode(&mut out);
    s.encode(&mut out);
    out.into()
}
