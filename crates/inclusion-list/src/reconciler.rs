//! Block-level inclusion list reconciliation.
//!
//! Every summary entry is an obligation. Obligations are either discharged by
//! parent block transactions named in the exclusion list, or by a contiguous
//! prefix of the candidate block made of the list's own transactions.

use std::collections::{
    HashMap,
    HashSet,
    VecDeque,
};

use alloy_consensus::{
    Transaction,
    TxEnvelope,
};
use alloy_primitives::{
    Address,
    B256,
};
use tracing::{
    debug,
    instrument,
    trace,
};

use crate::{
    chain::ChainSpec,
    error::{
        MissingInclusion,
        ValidationError,
    },
    metrics,
    primitives::{
        ExclusionList,
        InclusionList,
    },
    sender_recovery::{
        Secp256k1Recovery,
        SenderRecovery,
    },
};

/// Outstanding gas-limit obligations per sender, in summary order.
#[derive(Debug)]
struct Obligations {
    queues: HashMap<Address, VecDeque<u64>>,
}

impl Obligations {
    fn from_list(list: &InclusionList) -> Self {
        let mut queues: HashMap<Address, VecDeque<u64>> = HashMap::new();
        for entry in &list.summary {
            queues.entry(entry.address).or_default().push_back(entry.gas_limit);
        }
        Self { queues }
    }

    fn front(&self, sender: &Address) -> Option<u64> {
        self.queues.get(sender).and_then(|queue| queue.front().copied())
    }

    fn pop(&mut self, sender: &Address) -> Option<u64> {
        self.queues.get_mut(sender).and_then(VecDeque::pop_front)
    }
}

/// Checks candidate blocks against an accepted inclusion list.
#[derive(Clone, Debug, Default)]
pub struct BlockReconciler<R = Secp256k1Recovery> {
    recovery: R,
}

impl BlockReconciler {
    pub fn from_chain_spec(chain: &ChainSpec) -> Self {
        Self::new(Secp256k1Recovery::new(chain.chain_id))
    }
}

impl<R: SenderRecovery> BlockReconciler<R> {
    pub fn new(recovery: R) -> Self {
        Self { recovery }
    }

    /// Checks that `current_txs` fulfils every obligation of `list` that the
    /// parent transactions at `exclusions` did not already fulfil.
    ///
    /// `list` must have passed [`crate::InclusionListValidator::validate`];
    /// size, fee and nonce checks are not repeated here.
    #[instrument(
        name = "reconcile_inclusion_list",
        skip_all,
        fields(
            len = list.summary.len(),
            exclusions = exclusions.len(),
            block_txs = current_txs.len()
        ),
        level = "debug"
    )]
    pub fn reconcile(
        &self,
        list: &InclusionList,
        exclusions: &ExclusionList,
        parent_txs: &[TxEnvelope],
        current_txs: &[TxEnvelope],
    ) -> Result<(), ValidationError> {
        let result = self.check(list, exclusions, parent_txs, current_txs);
        match &result {
            Ok(()) => metrics::record_accepted(metrics::RECONCILER),
            Err(err) => {
                debug!(reason = err.reason(), "IL reconciliation failed: {err}");
                metrics::record_rejection(metrics::RECONCILER, err);
            }
        }
        result
    }

    fn check(
        &self,
        list: &InclusionList,
        exclusions: &ExclusionList,
        parent_txs: &[TxEnvelope],
        current_txs: &[TxEnvelope],
    ) -> Result<(), ValidationError> {
        let mut obligations = Obligations::from_list(list);
        let il_hashes: HashSet<B256> = list.transactions.iter().map(|tx| *tx.tx_hash()).collect();
        let required = list.summary.len();
        let mut satisfied = 0usize;

        for index in exclusions.iter() {
            let tx = parent_txs
                .get(index)
                .ok_or(ValidationError::ExclusionIndexOutOfRange {
                    index,
                    len: parent_txs.len(),
                })?;
            let sender = self
                .recovery
                .recover_sender(tx)
                .map_err(|source| ValidationError::InvalidTx { index, source })?;

            if obligations.pop(&sender).is_none() {
                return Err(ValidationError::MissingSummaryEntry { index, sender });
            }
            satisfied += 1;
        }
        trace!(satisfied, required, "Exclusion list applied");

        let mut block = current_txs.iter().enumerate();
        while satisfied < required {
            let Some((index, tx)) = block.next() else {
                return Err(ValidationError::MissingInclusionInBlock(
                    MissingInclusion::BlockExhausted {
                        outstanding: required - satisfied,
                    },
                ));
            };

            let sender = self
                .recovery
                .recover_sender(tx)
                .map_err(|source| ValidationError::InvalidTx { index, source })?;

            let Some(declared) = obligations.front(&sender) else {
                return Err(ValidationError::MissingInclusionInBlock(
                    MissingInclusion::NoObligation { index, sender },
                ));
            };

            if tx.gas_limit() < declared {
                return Err(ValidationError::InvalidGasLimit {
                    index,
                    gas_limit: tx.gas_limit(),
                    declared,
                });
            }

            let hash = *tx.tx_hash();
            if !il_hashes.contains(&hash) {
                return Err(ValidationError::MissingInclusionInBlock(
                    MissingInclusion::NotInList { index, hash },
                ));
            }

            obligations.pop(&sender);
            satisfied += 1;
        }

        debug!(required, "IL satisfied by block");
        Ok(())
    }
}
