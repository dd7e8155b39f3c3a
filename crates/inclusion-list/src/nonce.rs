use std::{
    collections::HashMap,
    convert::Infallible,
};

use alloy_primitives::Address;

/// Read-only view of account nonces at the parent block.
pub trait NonceSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Next nonce the account is expected to use.
    fn nonce(&self, address: Address) -> Result<u64, Self::Error>;
}

impl<T: NonceSource + ?Sized> NonceSource for &T {
    type Error = T::Error;

    fn nonce(&self, address: Address) -> Result<u64, Self::Error> {
        (**self).nonce(address)
    }
}

/// In-memory snapshot. Unknown accounts have nonce zero.
impl NonceSource for HashMap<Address, u64> {
    type Error = Infallible;

    fn nonce(&self, address: Address) -> Result<u64, Self::Error> {
        Ok(self.get(&address).copied().unwrap_or_default())
    }
}

/// Adapts a fallible closure into a [`NonceSource`].
pub struct NonceFn<F>(pub F);

impl<F, E> NonceSource for NonceFn<F>
where
    F: Fn(Address) -> Result<u64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn nonce(&self, address: Address) -> Result<u64, Self::Error> {
        (self.0)(address)
    }
}
