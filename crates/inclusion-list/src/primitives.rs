use alloy_consensus::{
    Transaction,
    TxEnvelope,
};
use alloy_primitives::Address;
use serde::{
    Deserialize,
    Serialize,
};

/// A declared obligation: `address` must get a transaction with at least
/// `gas_limit` gas included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionListEntry {
    pub address: Address,
    pub gas_limit: u64,
}

impl InclusionListEntry {
    pub const fn new(address: Address, gas_limit: u64) -> Self {
        Self { address, gas_limit }
    }
}

/// Summary entries paired positionally with the signed transactions they
/// describe.
#[derive(Clone, Debug, Default)]
pub struct InclusionList {
    pub summary: Vec<InclusionListEntry>,
    pub transactions: Vec<TxEnvelope>,
}

impl InclusionList {
    pub fn new(summary: Vec<InclusionListEntry>, transactions: Vec<TxEnvelope>) -> Self {
        Self {
            summary,
            transactions,
        }
    }

    /// Number of summary entries, i.e. obligations the list imposes.
    pub fn len(&self) -> usize {
        self.summary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }

    /// Sum of the transactions' gas limits, saturating at `u64::MAX`.
    pub fn total_gas(&self) -> u64 {
        self.transactions
            .iter()
            .fold(0u64, |acc, tx| acc.saturating_add(tx.gas_limit()))
    }
}

/// Indices into the parent block's transactions that already satisfied part
/// of the inclusion list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionList(Vec<usize>);

impl ExclusionList {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for ExclusionList {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl FromIterator<usize> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_entry_serde_uses_camel_case() {
        let entry = InclusionListEntry::new(address!("1111111111111111111111111111111111111111"), 100_000);
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["gasLimit"], 100_000);
        assert_eq!(json["address"], "0x1111111111111111111111111111111111111111");

        let decoded: InclusionListEntry = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_exclusion_list_is_a_plain_array() {
        let exclusions: ExclusionList = serde_json::from_str("[0, 3, 3]").unwrap();
        assert_eq!(exclusions.iter().collect::<Vec<_>>(), vec![0, 3, 3]);
        assert_eq!(exclusions.len(), 3);
        assert!(ExclusionList::default().is_empty());
    }
}
