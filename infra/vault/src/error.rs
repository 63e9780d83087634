//! # Vault Errors
//!
//! This module defines the [`VaultError`] enum and [`Result`] type used throughout
//! the crate for reporting envelope, integrity and configuration failures.
//!
//! An identifier mismatch on decryption is not an error: it is reported as
//! `Ok(None)` by the decrypt operations.

use std::borrow::Cow;
use std::str::Utf8Error;

/// A specialized [`Result`] type for vault operations.
pub type Result<T, E = VaultError> = std::result::Result<T, E>;

/// A specialized [`VaultError`] enum for vault-related failures.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// The codec was constructed without a password (or with an empty one).
    #[error("No password{}", format_context(.context))]
    MissingPassword { context: Option<Cow<'static, str>> },

    /// The first line is missing, malformed, or names an unsupported version or cipher.
    #[error("Bad vault header{}: {message}", format_context(.context))]
    BadHeader { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The body does not decode into exactly three non-empty hex groups.
    #[error("Invalid vault{}: {message}", format_context(.context))]
    InvalidVault { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The recomputed HMAC does not match the stored one.
    ///
    /// This usually indicates a wrong password or tampered data. Nothing has been
    /// decrypted when this error is returned.
    #[error("Integrity check failed{}: {message}", format_context(.context))]
    Integrity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure when the codec or one of its inputs is incorrectly configured.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The decrypted secret is not valid UTF-8.
    #[error("Encoding error{}: {source}", format_context(.context))]
    Encoding { source: Utf8Error, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues (RNG, task join, cipher setup).
    #[error("Internal vault error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl VaultError {
    pub(crate) fn bad_header(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadHeader { message: message.into(), context: None }
    }

    pub(crate) fn invalid_vault(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidVault { message: message.into(), context: None }
    }

    pub(crate) fn invalid_configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidConfiguration { message: message.into(), context: None }
    }
}

/// Attaches a human-readable context to a failing [`Result`].
pub trait VaultErrorExt<T> {
    /// Sets the context of the contained [`VaultError`].
    ///
    /// # Errors
    /// Returns the original error with its context replaced.
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> VaultErrorExt<T> for Result<T> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                VaultError::MissingPassword { context: c }
                | VaultError::BadHeader { context: c, .. }
                | VaultError::InvalidVault { context: c, .. }
                | VaultError::Integrity { context: c, .. }
                | VaultError::InvalidConfiguration { context: c, .. }
                | VaultError::Encoding { context: c, .. }
                | VaultError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> VaultErrorExt<T> for std::result::Result<T, Utf8Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
        self.map_err(|source| VaultError::Encoding { source, context: Some(context.into()) })
    }
}

impl From<Utf8Error> for VaultError {
    #[inline]
    fn from(source: Utf8Error) -> Self {
        Self::Encoding { source, context: None }
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
