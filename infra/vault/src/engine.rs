use std::fmt;
use std::sync::Arc;

use getrandom::fill;
use tracing::{debug, instrument, warn};
use zeroize::Zeroizing;

use crate::builder::VaultBuilder;
use crate::cipher;
use crate::envelope::{Header, Payload, pack, unpack};
use crate::error::{Result, VaultError, VaultErrorExt};
use crate::kdf::{DerivedKeys, derive_keys, derive_keys_async};
use crate::types::SALT_LEN;

struct VaultInner {
    password: Option<Zeroizing<Vec<u8>>>,
}

impl VaultInner {
    fn password(&self) -> Result<&[u8]> {
        self.password
            .as_deref()
            .map(Vec::as_slice)
            .ok_or_else(|| VaultError::MissingPassword { context: None })
    }
}

/// An Ansible-compatible vault codec bound to one password.
///
/// `Vault` wraps its state in an [`Arc`], making it cheaply clonable and safe to share
/// across threads or asynchronous tasks. It holds no per-call state: every encryption draws
/// a fresh random salt and derives fresh keys.
///
/// Each operation comes in four flavours: text or bytes, async or `_sync`. The async ones
/// move key derivation onto Tokio's blocking pool and must run inside a Tokio runtime.
///
/// ### Example
/// ```rust
/// use ansible_vault::prelude::*;
///
/// # fn main() -> Result<(), VaultError> {
/// let vault = Vault::new("pa$$w0rd");
///
/// let envelope = vault.encrypt_sync("password: superSecret123!", Some("prod"))?;
/// assert!(envelope.starts_with("$ANSIBLE_VAULT;1.2;AES256;prod\n"));
///
/// let secret = vault.decrypt_sync(&envelope, Some("prod"))?;
/// assert_eq!(secret.as_deref(), Some("password: superSecret123!"));
///
/// // A filter naming another identifier skips the envelope.
/// assert_eq!(vault.decrypt_sync(&envelope, Some("dev"))?, None);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Vault {
    inner: Arc<VaultInner>,
}

impl fmt::Debug for Vault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vault")
            .field("password", &self.inner.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Vault {
    /// Creates a codec for `password`.
    ///
    /// Shorthand for `Vault::builder().password(password).build()`.
    #[must_use]
    pub fn new(password: impl AsRef<[u8]>) -> Self {
        Self::builder().password(password).build()
    }

    /// Returns a new [`VaultBuilder`] to configure the codec.
    #[must_use]
    pub fn builder() -> VaultBuilder {
        VaultBuilder::new()
    }

    pub(crate) fn from_password(password: Option<Zeroizing<Vec<u8>>>) -> Self {
        let password = password.filter(|p| !p.is_empty());
        Self { inner: Arc::new(VaultInner { password }) }
    }

    /// Returns `true` if the codec was configured with a non-empty password.
    #[must_use]
    pub fn has_password(&self) -> bool {
        self.inner.password.is_some()
    }

    // --- Encryption ---

    /// Encrypts `secret` into envelope text.
    ///
    /// `identifier` selects format `1.2` and is written into the header; `None` or an empty
    /// identifier produces a `1.1` envelope.
    ///
    /// # Errors
    /// * [`VaultError::InvalidConfiguration`] If the identifier can't be stored in a header.
    /// * [`VaultError::MissingPassword`] If the codec has no password.
    /// * [`VaultError::Internal`] If the system RNG or the blocking pool fails.
    pub async fn encrypt(&self, secret: &str, identifier: Option<&str>) -> Result<String> {
        self.encrypt_bytes(secret.as_bytes(), identifier).await
    }

    /// Blocking variant of [`Vault::encrypt`].
    ///
    /// # Errors
    /// Same as [`Vault::encrypt`].
    pub fn encrypt_sync(&self, secret: &str, identifier: Option<&str>) -> Result<String> {
        self.encrypt_bytes_sync(secret.as_bytes(), identifier)
    }

    /// Encrypts arbitrary bytes into envelope text.
    ///
    /// # Errors
    /// Same as [`Vault::encrypt`].
    #[instrument(level = "debug", skip_all, fields(identifier = ?identifier))]
    pub async fn encrypt_bytes(&self, secret: &[u8], identifier: Option<&str>) -> Result<String> {
        let header = Header::new(identifier)?;
        let password = Zeroizing::new(self.inner.password()?.to_vec());
        let salt = random_salt()?;

        let keys = derive_keys_async(password, salt).await?;
        Self::seal(&header, &keys, &salt, secret)
    }

    /// Blocking variant of [`Vault::encrypt_bytes`].
    ///
    /// # Errors
    /// Same as [`Vault::encrypt`].
    pub fn encrypt_bytes_sync(&self, secret: &[u8], identifier: Option<&str>) -> Result<String> {
        let header = Header::new(identifier)?;
        let password = self.inner.password()?;
        let salt = random_salt()?;

        let keys = derive_keys(password, &salt);
        Self::seal(&header, &keys, &salt, secret)
    }

    // --- Decryption ---

    /// Decrypts envelope text back into the original secret.
    ///
    /// When `identifier` is given and does not match the envelope's header the envelope is
    /// skipped and `Ok(None)` is returned. `None` or an empty identifier accepts any envelope.
    ///
    /// # Errors
    /// * [`VaultError::BadHeader`] If the first line is not a supported vault header.
    /// * [`VaultError::InvalidVault`] If the body is structurally broken.
    /// * [`VaultError::MissingPassword`] If the codec has no password.
    /// * [`VaultError::Integrity`] If the password is wrong or the envelope was tampered with.
    /// * [`VaultError::Encoding`] If the secret is not valid UTF-8.
    /// * [`VaultError::Internal`] If the blocking pool fails.
    pub async fn decrypt(&self, envelope: &str, identifier: Option<&str>) -> Result<Option<String>> {
        self.decrypt_bytes(envelope, identifier).await?.map(into_text).transpose()
    }

    /// Blocking variant of [`Vault::decrypt`].
    ///
    /// # Errors
    /// Same as [`Vault::decrypt`].
    pub fn decrypt_sync(&self, envelope: &str, identifier: Option<&str>) -> Result<Option<String>> {
        self.decrypt_bytes_sync(envelope, identifier)?.map(into_text).transpose()
    }

    /// Decrypts envelope text into raw bytes, without UTF-8 validation.
    ///
    /// # Errors
    /// Same as [`Vault::decrypt`], except [`VaultError::Encoding`].
    #[instrument(level = "debug", skip_all, fields(identifier = ?identifier))]
    pub async fn decrypt_bytes(&self, envelope: &str, identifier: Option<&str>) -> Result<Option<Vec<u8>>> {
        let Some(payload) = Self::select(envelope, identifier)? else {
            return Ok(None);
        };
        let password = Zeroizing::new(self.inner.password()?.to_vec());

        let keys = derive_keys_async(password, payload.salt.clone()).await?;
        Self::open(&keys, &payload).map(Some)
    }

    /// Blocking variant of [`Vault::decrypt_bytes`].
    ///
    /// # Errors
    /// Same as [`Vault::decrypt_bytes`].
    pub fn decrypt_bytes_sync(&self, envelope: &str, identifier: Option<&str>) -> Result<Option<Vec<u8>>> {
        let Some(payload) = Self::select(envelope, identifier)? else {
            return Ok(None);
        };
        let password = self.inner.password()?;

        let keys = derive_keys(password, &payload.salt);
        Self::open(&keys, &payload).map(Some)
    }

    // --- Internals ---

    fn seal(header: &Header, keys: &DerivedKeys, salt: &[u8], secret: &[u8]) -> Result<String> {
        let sealed = cipher::seal(keys, secret)?;
        let payload = Payload { salt: salt.to_vec(), mac: sealed.mac, ciphertext: sealed.ciphertext };

        debug!(version = %header.version(), len = payload.ciphertext.len(), "Sealed vault");
        Ok(pack(header, &payload))
    }

    fn select(envelope: &str, identifier: Option<&str>) -> Result<Option<Payload>> {
        let payload = unpack(envelope, identifier)?;
        if payload.is_none() {
            debug!(filter = ?identifier, "Vault identifier does not match, skipping");
        }
        Ok(payload)
    }

    fn open(keys: &DerivedKeys, payload: &Payload) -> Result<Vec<u8>> {
        cipher::open(keys, &payload.mac, &payload.ciphertext).inspect_err(|e| {
            if matches!(e, VaultError::Integrity { .. }) {
                warn!("Vault integrity check failed");
            }
        })
    }
}

fn random_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    fill(&mut salt).map_err(|e| VaultError::Internal {
        message: e.to_string().into(),
        context: Some("System RNG unavailable for salt generation".into()),
    })?;
    Ok(salt)
}

fn into_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| e.utf8_error()).context("Decrypted secret is not UTF-8")
}
