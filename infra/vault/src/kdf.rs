//! Password-based key derivation.
//!
//! A single PBKDF2-HMAC-SHA256 pass stretches `(password, salt)` into 80 bytes that are
//! split positionally into the AES key, the HMAC key and the CTR nonce:
//!
//! ```text
//! [CIPHER KEY(32)][MAC KEY(32)][NONCE(16)]
//! ```
//!
//! [`derive_keys`] is the only implementation. [`derive_keys_async`] runs the very same
//! function on Tokio's blocking pool so async callers are not stalled by the iteration count.

use std::fmt;

use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Result, VaultError};
use crate::types::{CIPHER_KEY_LEN, DERIVED_LEN, KDF_ITERATIONS, MAC_KEY_LEN, NONCE_LEN};

/// Key material derived from a password and a salt.
///
/// Cleared from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeys {
    cipher_key: [u8; CIPHER_KEY_LEN],
    mac_key: [u8; MAC_KEY_LEN],
    nonce: [u8; NONCE_LEN],
}

impl DerivedKeys {
    /// AES-256 key.
    #[must_use]
    pub const fn cipher_key(&self) -> &[u8; CIPHER_KEY_LEN] {
        &self.cipher_key
    }

    /// HMAC-SHA256 key.
    #[must_use]
    pub const fn mac_key(&self) -> &[u8; MAC_KEY_LEN] {
        &self.mac_key
    }

    /// Initial CTR counter block.
    #[must_use]
    pub const fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }
}

impl fmt::Debug for DerivedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKeys").finish_non_exhaustive()
    }
}

/// Derives the cipher key, MAC key and nonce for `salt`.
///
/// Deterministic: the same password and salt always yield the same keys.
#[must_use]
pub fn derive_keys(password: &[u8], salt: &[u8]) -> DerivedKeys {
    let mut okm = Zeroizing::new([0u8; DERIVED_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, KDF_ITERATIONS, okm.as_mut_slice());

    let (cipher_key, rest) = okm.split_at(CIPHER_KEY_LEN);
    let (mac_key, nonce) = rest.split_at(MAC_KEY_LEN);

    let mut keys =
        DerivedKeys { cipher_key: [0; CIPHER_KEY_LEN], mac_key: [0; MAC_KEY_LEN], nonce: [0; NONCE_LEN] };
    keys.cipher_key.copy_from_slice(cipher_key);
    keys.mac_key.copy_from_slice(mac_key);
    keys.nonce.copy_from_slice(nonce);
    keys
}

/// Derives keys without blocking the calling task.
///
/// Takes ownership of the inputs because they move onto the blocking pool; pass a
/// [`Zeroizing`] buffer to have the password copy cleared afterwards.
///
/// # Panics
/// Panics if called outside of a Tokio runtime.
///
/// # Errors
/// Returns [`VaultError::Internal`] if the blocking task panicked or was cancelled.
pub async fn derive_keys_async<P, S>(password: P, salt: S) -> Result<DerivedKeys>
where
    P: AsRef<[u8]> + Send + 'static,
    S: AsRef<[u8]> + Send + 'static,
{
    tokio::task::spawn_blocking(move || derive_keys(password.as_ref(), salt.as_ref()))
        .await
        .map_err(|e| VaultError::Internal {
            message: e.to_string().into(),
            context: Some("Key derivation task failed".into()),
        })
}
