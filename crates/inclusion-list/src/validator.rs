//! Standalone inclusion list validation.
//!
//! Checks run in a fixed order and stop at the first violation. The cheap
//! size checks come before any signature is recovered, so an oversized or
//! malformed list costs nothing to reject.

use std::collections::HashMap;

use alloy_consensus::{
    Header,
    Transaction,
    TxType,
};
use alloy_primitives::{
    Address,
    U256,
};
use tracing::{
    debug,
    instrument,
    trace,
};

use crate::{
    chain::{
        BaseFeeOracle,
        ChainSpec,
        Eip1559BaseFee,
    },
    config::VerifierConfig,
    error::{
        ConfigError,
        ValidationError,
        VerifierError,
    },
    metrics,
    nonce::NonceSource,
    primitives::InclusionList,
    sender_recovery::{
        Secp256k1Recovery,
        SenderRecovery,
    },
};

/// Validates inclusion lists against the parent block.
#[derive(Clone, Debug)]
pub struct InclusionListValidator<R = Secp256k1Recovery, B = Eip1559BaseFee> {
    config: VerifierConfig,
    recovery: R,
    base_fee: B,
}

impl InclusionListValidator {
    /// Validator with the default collaborators for `chain`.
    pub fn from_chain_spec(config: VerifierConfig, chain: &ChainSpec) -> Result<Self, ConfigError> {
        Self::new(
            config,
            Secp256k1Recovery::new(chain.chain_id),
            Eip1559BaseFee::from_chain_spec(chain),
        )
    }
}

impl<R, B> InclusionListValidator<R, B>
where
    R: SenderRecovery,
    B: BaseFeeOracle,
{
    /// Fails if `config` does not pass [`VerifierConfig::validate`].
    pub fn new(config: VerifierConfig, recovery: R, base_fee: B) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validate()?,
            recovery,
            base_fee,
        })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Validates `list` for inclusion in the child of `parent`.
    ///
    /// `nonces` must reflect account state after `parent`. Lookups are cached
    /// for the duration of this call only.
    #[instrument(
        name = "validate_inclusion_list",
        skip_all,
        fields(len = list.summary.len(), parent = parent.number),
        level = "debug"
    )]
    pub fn validate<N: NonceSource>(
        &self,
        list: &InclusionList,
        parent: &Header,
        nonces: &N,
    ) -> Result<(), VerifierError<N::Error>> {
        let result = self.check(list, parent, nonces);
        match &result {
            Ok(()) => metrics::record_accepted(metrics::VALIDATOR),
            Err(VerifierError::Invalid(err)) => {
                debug!(reason = err.reason(), "IL verification failed: {err}");
                metrics::record_rejection(metrics::VALIDATOR, err);
            }
            Err(VerifierError::NonceLookup(err)) => {
                debug!("IL verification aborted: nonce lookup failed: {err}");
                metrics::record_nonce_lookup_failure();
            }
        }
        result
    }

    fn check<N: NonceSource>(
        &self,
        list: &InclusionList,
        parent: &Header,
        nonces: &N,
    ) -> Result<(), VerifierError<N::Error>> {
        if list.summary.len() != list.transactions.len() {
            return Err(ValidationError::SizeMismatch {
                summary: list.summary.len(),
                transactions: list.transactions.len(),
            }
            .into());
        }

        if list.summary.len() > self.config.max_transactions_per_list {
            return Err(ValidationError::SizeExceeded {
                len: list.summary.len(),
                max: self.config.max_transactions_per_list,
            }
            .into());
        }

        let base_fee = self.base_fee.next_base_fee(parent)?;
        let min_fee_cap = self.config.fee_multiplier.minimum_fee_cap(base_fee);
        trace!(base_fee, %min_fee_cap, "Derived fee cap threshold");

        let mut nonce_cache: HashMap<Address, u64> = HashMap::with_capacity(list.summary.len());
        let mut total_gas = 0u64;

        for (index, (entry, tx)) in list.summary.iter().zip(&list.transactions).enumerate() {
            let tx_type = tx.tx_type();
            if tx_type == TxType::Eip4844 {
                return Err(ValidationError::UnsupportedTxType { index, tx_type }.into());
            }

            total_gas = total_gas.saturating_add(tx.gas_limit());
            if total_gas > self.config.max_gas_per_list {
                return Err(ValidationError::GasLimitExceeded {
                    index,
                    total: total_gas,
                    max: self.config.max_gas_per_list,
                }
                .into());
            }

            let sender = self
                .recovery
                .recover_sender(tx)
                .map_err(|source| ValidationError::InvalidTx { index, source })?;

            if entry.address != sender {
                return Err(ValidationError::SenderMismatch {
                    index,
                    expected: entry.address,
                    recovered: sender,
                }
                .into());
            }

            let expected = match nonce_cache.get(&sender) {
                Some(nonce) => *nonce,
                None => nonces.nonce(sender).map_err(VerifierError::NonceLookup)?,
            };
            if tx.nonce() != expected {
                return Err(ValidationError::IncorrectNonce {
                    index,
                    sender,
                    expected,
                    actual: tx.nonce(),
                }
                .into());
            }
            let next = expected.checked_add(1).ok_or(ValidationError::NonceOverflow {
                index,
                sender,
                nonce: expected,
            })?;
            nonce_cache.insert(sender, next);

            let fee_cap = tx.max_fee_per_gas();
            if U256::from(fee_cap) < min_fee_cap {
                return Err(ValidationError::InsufficientGasFeeCap {
                    index,
                    fee_cap,
                    min_fee_cap,
                }
                .into());
            }
        }

        debug!(len = list.summary.len(), gas = total_gas, "IL verified successfully");
        Ok(())
    }
}
