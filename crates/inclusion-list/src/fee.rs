//! Exact fee cap threshold arithmetic.
//!
//! Inclusion list transactions must be willing to pay at least 1.125x the
//! expected base fee of the block they land in. The multiplier is kept as a
//! fraction and evaluated in `U256` so every client reaches the same verdict
//! at the boundary.

use alloy_primitives::U256;
use serde::{
    Deserialize,
    Serialize,
};

use crate::constants::{
    FEE_MULTIPLIER_DENOMINATOR,
    FEE_MULTIPLIER_NUMERATOR,
};

/// Rational multiplier applied to the expected base fee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeMultiplier {
    pub numerator: u64,
    pub denominator: u64,
}

impl FeeMultiplier {
    /// 9/8, the protocol multiplier.
    pub const INCLUSION_LIST: Self = Self {
        numerator: FEE_MULTIPLIER_NUMERATOR,
        denominator: FEE_MULTIPLIER_DENOMINATOR,
    };

    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Smallest integer fee cap that is not below `base_fee * multiplier`.
    ///
    /// For an integer `fee_cap`, `fee_cap >= ceil(x)` is equivalent to
    /// `fee_cap >= x`, so comparing against this value is exact.
    ///
    /// A zero denominator yields `U256::MAX`, a threshold nothing meets.
    /// Validators never see one: their constructors run
    /// [`crate::VerifierConfig::validate`].
    pub fn minimum_fee_cap(&self, base_fee: u64) -> U256 {
        if self.denominator == 0 {
            return U256::MAX;
        }
        let denominator = U256::from(self.denominator);
        let scaled = U256::from(base_fee) * U256::from(self.numerator);
        (scaled + denominator - U256::from(1)) / denominator
    }
}

impl Default for FeeMultiplier {
    fn default() -> Self {
        Self::INCLUSION_LIST
    }
}
