use alloy_primitives::{
    U256,
    uint,
};

/// Maximum number of transactions a single inclusion list may carry.
pub const MAX_TRANSACTIONS_PER_INCLUSION_LIST: usize = 16;

/// Maximum cumulative gas limit of all transactions in an inclusion list (2^21).
pub const MAX_GAS_PER_INCLUSION_LIST: u64 = 2_097_152;

/// Numerator of the fee cap multiplier applied to the expected base fee.
pub const FEE_MULTIPLIER_NUMERATOR: u64 = 9;

/// Denominator of the fee cap multiplier. 9/8 = 1.125.
pub const FEE_MULTIPLIER_DENOMINATOR: u64 = 8;

/// Half of the secp256k1 curve order. Signatures with a larger `s` are
/// malleable and rejected since Homestead.
pub const SECP256K1N_HALF: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);
