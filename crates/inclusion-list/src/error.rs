use alloy_consensus::TxType;
use alloy_primitives::{
    Address,
    B256,
    U256,
};
use thiserror::Error;

/// Reasons an inclusion list, or a block checked against one, is rejected.
///
/// Every variant is a final judgement of the inputs it was given. Nothing
/// here is retriable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("summary has {summary} entries but the list carries {transactions} transactions")]
    SizeMismatch { summary: usize, transactions: usize },
    #[error("inclusion list has {len} entries, maximum is {max}")]
    SizeExceeded { len: usize, max: usize },
    #[error("transaction {index} has unsupported type {tx_type}")]
    UnsupportedTxType { index: usize, tx_type: TxType },
    #[error("cumulative gas limit {total} at transaction {index} exceeds maximum {max}")]
    GasLimitExceeded { index: usize, total: u64, max: u64 },
    #[error("unable to recover sender of transaction {index}: {source}")]
    InvalidTx {
        index: usize,
        #[source]
        source: RecoveryError,
    },
    #[error("summary entry {index} declares {expected} but transaction was signed by {recovered}")]
    SenderMismatch {
        index: usize,
        expected: Address,
        recovered: Address,
    },
    #[error("transaction {index} from {sender} has nonce {actual}, expected {expected}")]
    IncorrectNonce {
        index: usize,
        sender: Address,
        expected: u64,
        actual: u64,
    },
    /// The transaction matches its account nonce, but that nonce is
    /// `u64::MAX` and cannot be incremented (EIP-2681).
    #[error("transaction {index} from {sender} uses nonce {nonce}, which has no successor")]
    NonceOverflow {
        index: usize,
        sender: Address,
        nonce: u64,
    },
    #[error("transaction {index} fee cap {fee_cap} is below the required {min_fee_cap}")]
    InsufficientGasFeeCap {
        index: usize,
        fee_cap: u128,
        min_fee_cap: U256,
    },
    #[error("parent block {number} is past London but has no base fee")]
    MissingBaseFee { number: u64 },
    #[error("exclusion index {index} is out of range for a parent block of {len} transactions")]
    ExclusionIndexOutOfRange { index: usize, len: usize },
    #[error("excluded parent transaction {index} from {sender} has no matching summary entry")]
    MissingSummaryEntry { index: usize, sender: Address },
    #[error("inclusion list not satisfied by block: {0}")]
    MissingInclusionInBlock(MissingInclusion),
    #[error("transaction {index} gas limit {gas_limit} is below the declared {declared}")]
    InvalidGasLimit {
        index: usize,
        gas_limit: u64,
        declared: u64,
    },
}

impl ValidationError {
    /// Stable label used for log fields and metric labels.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::SizeMismatch { .. } => "size_mismatch",
            Self::SizeExceeded { .. } => "size_exceeded",
            Self::UnsupportedTxType { .. } => "unsupported_tx_type",
            Self::GasLimitExceeded { .. } => "gas_limit_exceeded",
            Self::InvalidTx { .. } => "invalid_tx",
            Self::SenderMismatch { .. } => "sender_mismatch",
            Self::IncorrectNonce { .. } => "incorrect_nonce",
            Self::NonceOverflow { .. } => "nonce_overflow",
            Self::InsufficientGasFeeCap { .. } => "insufficient_gas_fee_cap",
            Self::MissingBaseFee { .. } => "missing_base_fee",
            Self::ExclusionIndexOutOfRange { .. } => "exclusion_index_out_of_range",
            Self::MissingSummaryEntry { .. } => "missing_summary_entry",
            Self::MissingInclusionInBlock(_) => "missing_inclusion_in_block",
            Self::InvalidGasLimit { .. } => "invalid_gas_limit",
        }
    }
}

/// Why the current block failed to carry an outstanding obligation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingInclusion {
    #[error("transaction {index} from {sender} has no outstanding summary entry")]
    NoObligation { index: usize, sender: Address },
    #[error("transaction {index} ({hash}) is not part of the inclusion list")]
    NotInList { index: usize, hash: B256 },
    #[error("block ended with {outstanding} obligations outstanding")]
    BlockExhausted { outstanding: usize },
}

/// Errors surfaced by [`crate::InclusionListValidator::validate`].
///
/// `E` is the error type of the injected nonce source. A failed lookup is a
/// transient infrastructure problem and not a verdict on the list.
#[derive(Debug, Error)]
pub enum VerifierError<E> {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("nonce lookup failed: {0}")]
    NonceLookup(#[source] E),
}

impl<E> VerifierError<E> {
    /// Whether the list itself was judged invalid.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::NonceLookup(_) => None,
        }
    }
}

/// Sender recovery failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("signature s value is in the upper half of the curve order")]
    HighS,
    #[error("transaction chain id {actual} does not match expected {expected}")]
    ChainIdMismatch { expected: u64, actual: u64 },
}

/// Invalid [`crate::VerifierConfig`] values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_verifier_error_distinguishes_nonce_lookup() {
        let invalid: VerifierError<Infallible> = ValidationError::SizeExceeded { len: 17, max: 16 }.into();
        assert!(invalid.is_invalid());
        assert_eq!(invalid.as_validation().map(ValidationError::reason), Some("size_exceeded"));

        let lookup: VerifierError<std::io::Error> =
            VerifierError::NonceLookup(std::io::Error::other("state unavailable"));
        assert!(!lookup.is_invalid());
        assert!(lookup.as_validation().is_none());
        assert_eq!(lookup.to_string(), "nonce lookup failed: state unavailable");
    }

    #[test]
    fn test_missing_inclusion_display() {
        let err = ValidationError::MissingInclusionInBlock(MissingInclusion::BlockExhausted { outstanding: 2 });
        assert_eq!(
            err.to_string(),
            "inclusion list not satisfied by block: block ended with 2 obligations outstanding"
        );
        assert_eq!(err.reason(), "missing_inclusion_in_block");
    }
}
