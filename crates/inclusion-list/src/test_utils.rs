//! Helpers for building signed transactions and inclusion lists in tests.

use alloy_consensus::{
    SignableTransaction,
    Transaction,
    TxEip1559,
    TxEip4844,
    TxEip4844Variant,
    TxEnvelope,
    TxLegacy,
};
use alloy_primitives::{
    Address,
    B256,
    TxKind,
    U256,
    address,
};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

use crate::primitives::{
    InclusionList,
    InclusionListEntry,
};

pub const GWEI: u128 = 1_000_000_000;

/// Recipient used by every generated transaction.
pub const RECIPIENT: Address = address!("1111111111111111111111111111111111111111");

/// Deterministic signer derived from a one-byte seed.
pub fn signer(seed: u8) -> PrivateKeySigner {
    let mut key_bytes = [0u8; 32];
    key_bytes[31] = seed;
    PrivateKeySigner::from_slice(&key_bytes).expect("seed produces a valid key")
}

/// Knobs for generated transactions.
#[derive(Clone, Copy, Debug)]
pub struct TxParams {
    pub nonce: u64,
    pub gas_limit: u64,
    pub max_fee_per_gas: u128,
    pub chain_id: u64,
    pub value: u64,
}

impl Default for TxParams {
    fn default() -> Self {
        Self {
            nonce: 0,
            gas_limit: 100_000,
            max_fee_per_gas: 2 * GWEI,
            chain_id: 1,
            value: 100,
        }
    }
}

/// A signed EIP-1559 transfer.
pub fn eip1559_tx(signer: &PrivateKeySigner, params: TxParams) -> TxEnvelope {
    let tx = TxEip1559 {
        chain_id: params.chain_id,
        nonce: params.nonce,
        gas_limit: params.gas_limit,
        max_fee_per_gas: params.max_fee_per_gas,
        max_priority_fee_per_gas: GWEI / 10,
        to: TxKind::Call(RECIPIENT),
        value: U256::from(params.value),
        access_list: Default::default(),
        input: Default::default(),
    };
    let signature = signer
        .sign_hash_sync(&tx.signature_hash())
        .expect("signing succeeds");
    TxEnvelope::Eip1559(tx.into_signed(signature))
}

/// A signed EIP-155 legacy transfer. `max_fee_per_gas` becomes the gas price.
pub fn legacy_tx(signer: &PrivateKeySigner, params: TxParams) -> TxEnvelope {
    sign_legacy(signer, Some(params.chain_id), params)
}

/// A signed pre-EIP-155 legacy transfer, valid on any chain.
pub fn unprotected_legacy_tx(signer: &PrivateKeySigner, params: TxParams) -> TxEnvelope {
    sign_legacy(signer, None, params)
}

fn sign_legacy(signer: &PrivateKeySigner, chain_id: Option<u64>, params: TxParams) -> TxEnvelope {
    let tx = TxLegacy {
        chain_id,
        nonce: params.nonce,
        gas_price: params.max_fee_per_gas,
        gas_limit: params.gas_limit,
        to: TxKind::Call(RECIPIENT),
        value: U256::from(params.value),
        input: Default::default(),
    };
    let signature = signer
        .sign_hash_sync(&tx.signature_hash())
        .expect("signing succeeds");
    TxEnvelope::Legacy(tx.into_signed(signature))
}

/// A signed EIP-4844 blob transaction without sidecar.
pub fn blob_tx(signer: &PrivateKeySigner, params: TxParams) -> TxEnvelope {
    let tx: TxEip4844Variant = TxEip4844Variant::TxEip4844(TxEip4844 {
        chain_id: params.chain_id,
        nonce: params.nonce,
        gas_limit: params.gas_limit,
        max_fee_per_gas: params.max_fee_per_gas,
        max_priority_fee_per_gas: GWEI / 10,
        to: RECIPIENT,
        value: U256::from(params.value),
        access_list: Default::default(),
        blob_versioned_hashes: vec![B256::with_last_byte(1)],
        max_fee_per_blob_gas: GWEI,
        input: Default::default(),
    });
    let signature = signer
        .sign_hash_sync(&tx.signature_hash())
        .expect("signing succeeds");
    TxEnvelope::Eip4844(tx.into_signed(signature))
}

/// Summary entry matching a transaction's signer and gas limit.
pub fn entry_for(signer: &PrivateKeySigner, tx: &TxEnvelope) -> InclusionListEntry {
    InclusionListEntry::new(signer.address(), tx.gas_limit())
}

/// `count` sequential-nonce transactions from one signer, starting at
/// `start_nonce`, with matching summary entries.
pub fn sequential_list(
    signer: &PrivateKeySigner,
    count: usize,
    start_nonce: u64,
    params: impl Fn(usize) -> TxParams,
) -> InclusionList {
    let mut list = InclusionList::default();
    for i in 0..count {
        let tx = eip1559_tx(
            signer,
            TxParams {
                nonce: start_nonce + i as u64,
                ..params(i)
            },
        );
        list.summary.push(entry_for(signer, &tx));
        list.transactions.push(tx);
    }
    list
}
