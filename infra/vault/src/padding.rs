//! PKCS#7-style block padding.
//!
//! [`unpad`] is lenient: a buffer whose trailing bytes do not form valid padding is
//! returned unchanged instead of being rejected. Tampering is caught by the MAC, never
//! by the padding check.

use crate::error::{Result, VaultError};

/// Largest block size whose pad count can be written into the pad bytes.
const MAX_BLOCK_SIZE: usize = 256;

/// Returns the padding bytes to append to a message of `message_len` bytes.
///
/// The result is `block_size - (message_len % block_size)` bytes long and every byte
/// holds that count, so an aligned message still receives one full block of padding.
///
/// # Errors
/// Returns [`VaultError::InvalidConfiguration`] if `block_size` is zero or larger than 256.
///
/// # Example
/// ```rust
/// use ansible_vault::padding::pad;
///
/// assert_eq!(pad(11, 16).unwrap(), vec![5u8; 5]);
/// assert_eq!(pad(16, 16).unwrap(), vec![16u8; 16]);
/// ```
pub fn pad(message_len: usize, block_size: usize) -> Result<Vec<u8>> {
    if block_size == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(VaultError::invalid_configuration(format!(
            "Can't pad blocks of {block_size} bytes, block size must be within 1..={MAX_BLOCK_SIZE}"
        )));
    }

    let pad_len = block_size - (message_len % block_size);
    // A full 256-byte pad wraps to 0x00.
    #[allow(clippy::cast_possible_truncation)]
    let byte = pad_len as u8;

    Ok(vec![byte; pad_len])
}

/// Strips PKCS#7 padding from `padded`, or returns it untouched if the padding looks wrong.
///
/// The last byte is read as the pad length `n`. The input is returned unchanged when
/// `n` exceeds `block_size` or the buffer, or when any of the last `n` bytes differs
/// from `n`. This never fails.
#[must_use]
pub fn unpad(padded: &[u8], block_size: usize) -> &[u8] {
    let Some(&last) = padded.last() else {
        return padded;
    };

    let pad_len = usize::from(last);
    if pad_len > block_size || pad_len > padded.len() {
        return padded;
    }

    let (message, padding) = padded.split_at(padded.len() - pad_len);
    if padding.iter().all(|&b| b == last) { message } else { padded }
}
