//! Lowercase hex transcoding used by the envelope body.
//!
//! Decoding is permissive: invalid digits turn into garbage bytes rather than
//! errors, and the damage is caught later by the structural checks or the MAC.

/// Encodes `bytes` as lowercase hex, two digits per byte.
#[must_use]
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Decodes hex text two characters at a time.
///
/// Each pair is read as a base-16 prefix: an invalid second digit keeps the value of the
/// first one, and an invalid first digit decodes the pair to `0x00`. A trailing lone digit
/// decodes as a single nibble.
#[must_use]
pub fn from_hex(text: impl AsRef<[u8]>) -> Vec<u8> {
    text.as_ref()
        .chunks(2)
        .map(|pair| match *pair {
            [hi, lo] => match (nibble(hi), nibble(lo)) {
                (Some(hi), Some(lo)) => (hi << 4) | lo,
                (Some(hi), None) => hi,
                (None, _) => 0,
            },
            [single] => nibble(single).unwrap_or(0),
            _ => 0,
        })
        .collect()
}

#[inline]
fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
