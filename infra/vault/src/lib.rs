//! An Ansible-compatible vault codec.
//!
//! This crate encrypts secrets into `$ANSIBLE_VAULT` text envelopes and decrypts them
//! back, interoperating byte for byte with envelopes produced by Ansible itself.
//!
//! ## Envelope Format
//!
//! ```text
//! $ANSIBLE_VAULT;1.1;AES256
//! $ANSIBLE_VAULT;1.2;AES256;<identifier>
//! <hex body, 80 characters per line>
//! ```
//!
//! The body is the hex encoding of three hex-encoded components joined by `\n`:
//!
//! ```text
//! hex( hex(SALT(32)) "\n" hex(HMAC(32)) "\n" hex(CIPHERTEXT(N)) )
//! ```
//!
//! ## Cryptography
//!
//! * PBKDF2-HMAC-SHA256 with 10 000 iterations stretches `(password, salt)` into 80 bytes,
//!   split into the AES key, the HMAC key and the CTR nonce (see [`kdf`]).
//! * The plaintext is PKCS#7-padded to 16 bytes (see [`padding`]) and encrypted with
//!   AES-256-CTR.
//! * HMAC-SHA256 authenticates the ciphertext. The MAC is verified in constant time before
//!   anything is decrypted.
//!
//! A fresh random salt is drawn for every encryption, so two envelopes of the same secret
//! never look alike.
//!
//! ## Examples
//!
//! ### Async usage
//! ```rust
//! use ansible_vault::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), VaultError> {
//! let vault = Vault::new("pa$$w0rd");
//!
//! let envelope = vault.encrypt("password: superSecret123!", None).await?;
//! assert!(is_vault(&envelope));
//!
//! let secret = vault.decrypt(&envelope, None).await?;
//! assert_eq!(secret.as_deref(), Some("password: superSecret123!"));
//! # Ok(())
//! # }
//! ```

mod builder;
mod cipher;
mod engine;
mod error;
mod types;

pub mod envelope;
pub mod hexlify;
pub mod kdf;
pub mod padding;

pub use builder::{NoPassword, VaultBuilder, WithPassword};
pub use engine::Vault;
pub use envelope::{Header, Payload, Version, is_vault};
pub use error::{Result, VaultError, VaultErrorExt};

/// Envelope and key-derivation constants.
pub mod consts {
    pub use crate::types::{
        BLOCK_SIZE, CIPHER_KEY_LEN, CIPHER_NAME, DERIVED_LEN, HEADER_SEPARATOR, KDF_ITERATIONS,
        LINE_WIDTH, MAC_KEY_LEN, MAC_LEN, NONCE_LEN, SALT_LEN, VAULT_TAG,
    };
}

pub mod prelude {
    pub use crate::engine::Vault;
    pub use crate::envelope::is_vault;
    pub use crate::error::{VaultError, VaultErrorExt};
}
