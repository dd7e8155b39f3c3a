use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    constants::{
        MAX_GAS_PER_INCLUSION_LIST,
        MAX_TRANSACTIONS_PER_INCLUSION_LIST,
    },
    error::ConfigError,
    fee::FeeMultiplier,
};

/// Protocol limits applied by [`crate::InclusionListValidator`].
///
/// Defaults are the protocol constants; overriding them is only meant for
/// devnets and tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifierConfig {
    /// Maximum number of summary entries (and transactions) per list.
    #[serde(default = "default_max_transactions_per_list")]
    pub max_transactions_per_list: usize,
    /// Maximum cumulative gas limit of the list's transactions.
    #[serde(default = "default_max_gas_per_list")]
    pub max_gas_per_list: u64,
    /// Multiplier applied to the expected base fee to get the minimum fee cap.
    #[serde(default)]
    pub fee_multiplier: FeeMultiplier,
}

fn default_max_transactions_per_list() -> usize {
    MAX_TRANSACTIONS_PER_INCLUSION_LIST
}

fn default_max_gas_per_list() -> u64 {
    MAX_GAS_PER_INCLUSION_LIST
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_transactions_per_list: default_max_transactions_per_list(),
            max_gas_per_list: default_max_gas_per_list(),
            fee_multiplier: FeeMultiplier::default(),
        }
    }
}

impl VerifierConfig {
    /// Validates a configuration loaded from disk or built by hand.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_transactions_per_list == 0 {
            return Err(ConfigError::InvalidConfig(
                "max_transactions_per_list must be positive".to_string(),
            ));
        }
        if self.max_gas_per_list == 0 {
            return Err(ConfigError::InvalidConfig(
                "max_gas_per_list must be positive".to_string(),
            ));
        }
        if self.fee_multiplier.denominator == 0 {
            return Err(ConfigError::InvalidConfig(
                "fee_multiplier denominator must be non-zero".to_string(),
            ));
        }
        if self.fee_multiplier.numerator < self.fee_multiplier.denominator {
            return Err(ConfigError::InvalidConfig(
                "fee_multiplier must be at least 1".to_string(),
            ));
        }

        Ok(self)
    }
}
