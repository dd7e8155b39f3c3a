//! JSON fixtures describing an inclusion list, its parent context and
//! optionally a candidate block.

use std::{
    collections::HashMap,
    fs,
    path::Path,
};

use alloy_consensus::{
    Header,
    TxEnvelope,
};
use alloy_eips::eip2718::Decodable2718;
use alloy_primitives::{
    Address,
    Bytes,
};
use anyhow::{
    Context,
    bail,
};
use inclusion_list::{
    ChainSpec,
    ExclusionList,
    InclusionList,
    InclusionListEntry,
    VerifierConfig,
};
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub chain: ChainSpec,
    #[serde(default)]
    pub config: VerifierConfig,
    pub parent: ParentHeader,
    pub list: ListFixture,
    /// Account nonces after the parent block. Missing accounts are at zero.
    #[serde(default)]
    pub nonces: HashMap<Address, u64>,
    #[serde(default)]
    pub block: Option<BlockFixture>,
}

/// The parent header fields base fee derivation reads.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentHeader {
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    #[serde(default)]
    pub base_fee_per_gas: Option<u64>,
}

impl ParentHeader {
    pub fn to_header(&self) -> Header {
        Header {
            number: self.number,
            gas_limit: self.gas_limit,
            gas_used: self.gas_used,
            base_fee_per_gas: self.base_fee_per_gas,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListFixture {
    pub summary: Vec<InclusionListEntry>,
    /// EIP-2718 encoded signed transactions.
    pub transactions: Vec<Bytes>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockFixture {
    #[serde(default)]
    pub exclusions: ExclusionList,
    #[serde(default)]
    pub parent_transactions: Vec<Bytes>,
    pub transactions: Vec<Bytes>,
}

impl Fixture {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing fixture {}", path.display()))
    }

    pub fn inclusion_list(&self) -> anyhow::Result<InclusionList> {
        let transactions = decode_transactions(&self.list.transactions).context("list.transactions")?;
        Ok(InclusionList::new(self.list.summary.clone(), transactions))
    }
}

/// Decodes EIP-2718 envelopes, rejecting trailing bytes.
pub fn decode_transactions(raw: &[Bytes]) -> anyhow::Result<Vec<TxEnvelope>> {
    raw.iter()
        .enumerate()
        .map(|(index, bytes)| {
            let mut buf = bytes.as_ref();
            let envelope = TxEnvelope::decode_2718(&mut buf)
                .with_context(|| format!("decoding transaction {index}"))?;
            if !buf.is_empty() {
                bail!("transaction {index} has {} trailing bytes", buf.len());
            }
            Ok(envelope)
        })
        .collect()
}
