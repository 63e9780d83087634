use std::fmt;

use private::Sealed;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::engine::Vault;

#[derive(Debug, Default, ZeroizeOnDrop)]
pub struct NoPassword;

#[derive(Zeroize, ZeroizeOnDrop)]
pub struct WithPassword(Vec<u8>);

impl fmt::Debug for WithPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WithPassword(<redacted>)")
    }
}

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoPassword {}
impl Sealed for WithPassword {}

/// A builder for the [`Vault`] codec.
///
/// The password is copied into the builder and cleared from memory when the builder is
/// consumed or dropped.
#[allow(private_bounds)]
#[derive(Debug)]
pub struct VaultBuilder<P: Sealed + ZeroizeOnDrop = NoPassword> {
    password: P,
}

impl Default for VaultBuilder {
    fn default() -> Self {
        Self { password: NoPassword }
    }
}

impl VaultBuilder {
    /// Creates a new empty builder.
    ///
    /// # Results
    /// Returns a fresh [`VaultBuilder`] with no password configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the password used to derive keys for every envelope.
    ///
    /// An empty password is treated as no password at all: encryption and decryption
    /// will fail with [`VaultError::MissingPassword`](crate::VaultError::MissingPassword).
    #[must_use]
    pub fn password(self, password: impl AsRef<[u8]>) -> VaultBuilder<WithPassword> {
        VaultBuilder { password: WithPassword(password.as_ref().to_vec()) }
    }

    /// Finalizes a codec without a password.
    ///
    /// Every encrypt and decrypt call on such a codec reports a missing password.
    #[must_use]
    pub fn build(self) -> Vault {
        Vault::from_password(None)
    }
}

impl VaultBuilder<WithPassword> {
    /// Finalizes the codec and clears the builder's copy of the password.
    #[must_use]
    pub fn build(mut self) -> Vault {
        let password = Zeroizing::new(std::mem::take(&mut self.password.0));
        Vault::from_password(Some(password))
    }
}
