//! AES-256-CTR + HMAC-SHA256 with encrypt-then-MAC discipline.
//!
//! The MAC always covers the ciphertext. On the way back the MAC is verified first and
//! nothing is decrypted unless it matches.

use aes::cipher::{KeyIvInit, StreamCipher};
use hmac::Mac;
use zeroize::Zeroizing;

use crate::error::{Result, VaultError};
use crate::kdf::DerivedKeys;
use crate::padding::{pad, unpad};
use crate::types::{Aes256Ctr, BLOCK_SIZE, HmacSha256};

/// Output of [`seal`]: the ciphertext and its HMAC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sealed {
    pub(crate) mac: Vec<u8>,
    pub(crate) ciphertext: Vec<u8>,
}

/// Pads, encrypts and authenticates `plaintext`.
pub(crate) fn seal(keys: &DerivedKeys, plaintext: &[u8]) -> Result<Sealed> {
    let mut buf = Zeroizing::new(Vec::with_capacity(plaintext.len() + BLOCK_SIZE));
    buf.extend_from_slice(plaintext);
    buf.extend_from_slice(&pad(plaintext.len(), BLOCK_SIZE)?);

    apply_keystream(keys, &mut buf)?;
    let ciphertext = std::mem::take(&mut *buf);
    let mac = mac_for(keys, &ciphertext)?.finalize().into_bytes().to_vec();

    Ok(Sealed { mac, ciphertext })
}

/// Verifies `mac` over `ciphertext`, then decrypts and unpads.
///
/// Padding is removed leniently; a plaintext without valid padding is returned as is.
pub(crate) fn open(keys: &DerivedKeys, mac: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    mac_for(keys, ciphertext)?.verify_slice(mac).map_err(|_| VaultError::Integrity {
        message: "HMAC mismatch".into(),
        context: Some("wrong password or tampered vault".into()),
    })?;

    let mut buf = ciphertext.to_vec();
    apply_keystream(keys, &mut buf)?;

    let len = unpad(&buf, BLOCK_SIZE).len();
    buf.truncate(len);
    Ok(buf)
}

fn apply_keystream(keys: &DerivedKeys, buf: &mut [u8]) -> Result<()> {
    let mut cipher =
        Aes256Ctr::new_from_slices(keys.cipher_key(), keys.nonce()).map_err(|_| VaultError::Internal {
            message: "Invalid key or nonce length".into(),
            context: Some("AES-256-CTR".into()),
        })?;
    cipher.apply_keystream(buf);
    Ok(())
}

fn mac_for(keys: &DerivedKeys, ciphertext: &[u8]) -> Result<HmacSha256> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(keys.mac_key()).map_err(|_| {
        VaultError::Internal { message: "Invalid key length".into(), context: Some("HMAC-SHA256".into()) }
    })?;
    mac.update(ciphertext);
    Ok(mac)
}
