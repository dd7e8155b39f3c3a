//! Inclusion list verification.
//!
//! An inclusion list is published by a committee ahead of block construction
//! and names transactions the next builder has to include. This crate checks
//! two things:
//!
//! - [`InclusionListValidator`] decides whether a received list is well formed
//!   and economically valid against the parent block and account nonces.
//! - [`BlockReconciler`] decides whether a candidate block, together with the
//!   parent transactions named by an [`ExclusionList`], satisfies a list that
//!   was already accepted by the validator.
//!
//! Both are pure, synchronous checks. Sender recovery, base fee derivation and
//! nonce lookups are injected through the [`SenderRecovery`],
//! [`BaseFeeOracle`] and [`NonceSource`] traits; the defaults
//! ([`Secp256k1Recovery`], [`Eip1559BaseFee`]) cover Ethereum mainnet rules.

pub mod chain;
pub mod config;
pub mod constants;
pub mod error;
pub mod fee;
pub mod nonce;
pub mod primitives;
pub mod reconciler;
pub mod sender_recovery;
pub mod validator;

mod metrics;

#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use chain::{
    BaseFeeOracle,
    ChainSpec,
    Eip1559BaseFee,
};
pub use config::VerifierConfig;
pub use error::{
    ConfigError,
    MissingInclusion,
    RecoveryError,
    ValidationError,
    VerifierError,
};
pub use nonce::{
    NonceFn,
    NonceSource,
};
pub use primitives::{
    ExclusionList,
    InclusionList,
    InclusionListEntry,
};
pub use reconciler::BlockReconciler;
pub use sender_recovery::{
    Secp256k1Recovery,
    SenderRecovery,
};
pub use validator::InclusionListValidator;
