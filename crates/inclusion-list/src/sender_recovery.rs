//! ECDSA sender recovery for inclusion list transactions.
//!
//! Recovery goes through libsecp256k1 rather than the pure-Rust k256 path
//! alloy uses by default; inclusion lists and candidate blocks are recovered
//! on every slot, so the cheaper path matters.

use alloy_consensus::{
    Transaction,
    TxEnvelope,
};
use alloy_primitives::{
    Address,
    keccak256,
};
use secp256k1::{
    Message,
    Secp256k1,
    ecdsa::{
        RecoverableSignature,
        RecoveryId,
    },
};

use crate::{
    constants::SECP256K1N_HALF,
    error::RecoveryError,
};

/// Derives the signer of a transaction.
///
/// Implementations carry whatever chain configuration defines the signing
/// domain.
pub trait SenderRecovery {
    fn recover_sender(&self, envelope: &TxEnvelope) -> Result<Address, RecoveryError>;
}

impl<T: SenderRecovery + ?Sized> SenderRecovery for &T {
    fn recover_sender(&self, envelope: &TxEnvelope) -> Result<Address, RecoveryError> {
        (**self).recover_sender(envelope)
    }
}

/// Recovers senders with libsecp256k1.
///
/// When `chain_id` is set, replay-protected transactions signed for any
/// other chain are rejected. Unprotected legacy transactions carry no chain
/// id and are accepted on any chain.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Recovery {
    chain_id: Option<u64>,
}

impl Secp256k1Recovery {
    pub fn new(chain_id: Option<u64>) -> Self {
        Self { chain_id }
    }
}

impl SenderRecovery for Secp256k1Recovery {
    fn recover_sender(&self, envelope: &TxEnvelope) -> Result<Address, RecoveryError> {
        if let (Some(expected), Some(actual)) = (self.chain_id, envelope.chain_id()) {
            if expected != actual {
                return Err(RecoveryError::ChainIdMismatch { expected, actual });
            }
        }

        recover_sender(envelope)
    }
}

/// Recovers the sender address from a transaction envelope using secp256k1.
pub fn recover_sender(envelope: &TxEnvelope) -> Result<Address, RecoveryError> {
    let secp = Secp256k1::verification_only();

    let msg_hash = envelope.signature_hash();
    let signature = envelope.signature();

    if signature.s() > SECP256K1N_HALF {
        return Err(RecoveryError::HighS);
    }

    // `v()` is the y parity for every envelope type, legacy included.
    let recovery_id = if signature.v() { 1 } else { 0 };

    let mut sig_bytes = [0u8; 64];
    sig_bytes[0..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
    sig_bytes[32..64].copy_from_slice(&signature.s().to_be_bytes::<32>());

    let recovery_id =
        RecoveryId::from_i32(recovery_id).map_err(|_| RecoveryError::InvalidSignature)?;
    let rec_sig = RecoverableSignature::from_compact(&sig_bytes, recovery_id)
        .map_err(|_| RecoveryError::InvalidSignature)?;

    let message = Message::from_digest(msg_hash.0);
    let pubkey = secp
        .recover_ecdsa(&message, &rec_sig)
        .map_err(|_| RecoveryError::InvalidSignature)?;

    // keccak256 of the uncompressed key without the 0x04 prefix, last 20 bytes.
    let pubkey_bytes = pubkey.serialize_uncompressed();
    let hash = keccak256(&pubkey_bytes[1..]);
    Ok(Address::from_slice(&hash[12..]))
}
