//! Chain configuration and base fee derivation.
//!
//! The block an inclusion list targets has not been revealed when the list is
//! validated, so its base fee is derived from the parent header.

use alloy_consensus::Header;
use alloy_eips::eip1559::{
    BaseFeeParams,
    INITIAL_BASE_FEE,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::ValidationError;

/// Derives the expected base fee of the child of `parent`.
pub trait BaseFeeOracle {
    fn next_base_fee(&self, parent: &Header) -> Result<u64, ValidationError>;
}

impl<T: BaseFeeOracle + ?Sized> BaseFeeOracle for &T {
    fn next_base_fee(&self, parent: &Header) -> Result<u64, ValidationError> {
        (**self).next_base_fee(parent)
    }
}

/// Chain parameters the verifier depends on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSpec {
    /// Signing domain. `None` accepts any chain id.
    #[serde(default = "default_chain_id")]
    pub chain_id: Option<u64>,
    /// First block with an EIP-1559 base fee.
    #[serde(default)]
    pub london_block: u64,
    #[serde(default = "default_max_change_denominator")]
    pub base_fee_max_change_denominator: u128,
    #[serde(default = "default_elasticity_multiplier")]
    pub elasticity_multiplier: u128,
}

fn default_chain_id() -> Option<u64> {
    Some(1)
}

fn default_max_change_denominator() -> u128 {
    BaseFeeParams::ethereum().max_change_denominator
}

fn default_elasticity_multiplier() -> u128 {
    BaseFeeParams::ethereum().elasticity_multiplier
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            london_block: 0,
            base_fee_max_change_denominator: default_max_change_denominator(),
            elasticity_multiplier: default_elasticity_multiplier(),
        }
    }
}

impl ChainSpec {
    pub fn base_fee_params(&self) -> BaseFeeParams {
        BaseFeeParams::new(
            self.base_fee_max_change_denominator,
            self.elasticity_multiplier,
        )
    }
}

/// EIP-1559 base fee rules.
#[derive(Clone, Copy, Debug)]
pub struct Eip1559BaseFee {
    params: BaseFeeParams,
    london_block: u64,
}

impl Eip1559BaseFee {
    pub fn new(params: BaseFeeParams, london_block: u64) -> Self {
        Self {
            params,
            london_block,
        }
    }

    pub fn from_chain_spec(chain: &ChainSpec) -> Self {
        Self::new(chain.base_fee_params(), chain.london_block)
    }
}

impl Default for Eip1559BaseFee {
    fn default() -> Self {
        Self::from_chain_spec(&ChainSpec::default())
    }
}

impl BaseFeeOracle for Eip1559BaseFee {
    fn next_base_fee(&self, parent: &Header) -> Result<u64, ValidationError> {
        // The first London block starts from the initial base fee.
        if parent.number < self.london_block {
            return Ok(INITIAL_BASE_FEE);
        }

        parent
            .next_block_base_fee(self.params)
            .ok_or(ValidationError::MissingBaseFee {
                number: parent.number,
            })
    }
}
