//! # Envelope
//!
//! Text framing of a vault: one header line followed by the body, hex-encoded twice and
//! wrapped at 80 columns.
//!
//! ```text
//! $ANSIBLE_VAULT;1.2;AES256;<identifier>
//! hex( hex(SALT) "\n" hex(MAC) "\n" hex(CIPHERTEXT) )   wrapped at 80 characters
//! ```
//!
//! Version `1.1` carries no identifier. Version `1.2` always does.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VaultError};
use crate::hexlify::{from_hex, to_hex};
use crate::types::{CIPHER_NAME, HEADER_SEPARATOR, LINE_WIDTH, VAULT_TAG};

/// Envelope format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// `1.1`: no identifier.
    V1_1,
    /// `1.2`: header carries an identifier.
    V1_2,
}

impl Version {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1.1" => Ok(Self::V1_1),
            "1.2" => Ok(Self::V1_2),
            other => Err(VaultError::bad_header(format!("unsupported version '{other}'"))),
        }
    }
}

/// Parsed first line of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    version: Version,
    identifier: Option<String>,
}

impl Header {
    /// Builds the header used for encryption.
    ///
    /// An identifier selects version `1.2`; `None` or an empty identifier selects `1.1`.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if the identifier contains `;`, control
    /// characters or surrounding whitespace, since it could not be read back from the header.
    pub fn new(identifier: Option<&str>) -> Result<Self> {
        match identifier.filter(|id| !id.is_empty()) {
            None => Ok(Self { version: Version::V1_1, identifier: None }),
            Some(id) if id.trim() != id || id.contains(|c: char| c == HEADER_SEPARATOR || c.is_control()) => {
                Err(VaultError::invalid_configuration(format!(
                    "Identifier {id:?} can't be stored in a vault header"
                )))
            },
            Some(id) => Ok(Self { version: Version::V1_2, identifier: Some(id.to_owned()) }),
        }
    }

    /// Parses and validates a header line.
    ///
    /// # Errors
    /// Returns [`VaultError::BadHeader`] if the tag, version or cipher is wrong, if a `1.2`
    /// header lacks its identifier, or if a `1.1` header carries extra fields.
    pub fn parse(line: &str) -> Result<Self> {
        let mut fields = line.trim().split(HEADER_SEPARATOR);

        if fields.next() != Some(VAULT_TAG) {
            return Err(VaultError::bad_header(format!("missing {VAULT_TAG} tag")));
        }

        let version: Version =
            fields.next().ok_or_else(|| VaultError::bad_header("missing version"))?.parse()?;

        match fields.next() {
            Some(CIPHER_NAME) => {},
            Some(other) => {
                return Err(VaultError::bad_header(format!("unsupported cipher '{other}'")));
            },
            None => return Err(VaultError::bad_header("missing cipher")),
        }

        let identifier = match (version, fields.next()) {
            (Version::V1_1, None) => None,
            (Version::V1_2, Some(id)) if !id.is_empty() => Some(id.to_owned()),
            (Version::V1_1, Some(_)) => {
                return Err(VaultError::bad_header("identifier requires version 1.2"));
            },
            (Version::V1_2, _) => return Err(VaultError::bad_header("missing vault identifier")),
        };

        if fields.next().is_some() {
            return Err(VaultError::bad_header("unexpected trailing fields"));
        }

        Ok(Self { version, identifier })
    }

    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Returns `true` if this header is selected by the identifier `filter`.
    ///
    /// No filter (or an empty one) selects every header. A `1.1` header has no identifier
    /// and is therefore never selected by a non-empty filter.
    #[must_use]
    pub fn matches(&self, filter: Option<&str>) -> bool {
        filter.filter(|f| !f.is_empty()).is_none_or(|f| self.identifier() == Some(f))
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = HEADER_SEPARATOR;
        write!(f, "{VAULT_TAG}{sep}{}{sep}{CIPHER_NAME}", self.version)?;
        if let Some(id) = &self.identifier {
            write!(f, "{sep}{id}")?;
        }
        Ok(())
    }
}

impl FromStr for Header {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The three binary components carried by an envelope body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub salt: Vec<u8>,
    pub mac: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

/// Renders `header` and `payload` as envelope text.
///
/// The output has no trailing newline.
#[must_use]
pub fn pack(header: &Header, payload: &Payload) -> String {
    let inner = format!(
        "{}\n{}\n{}",
        to_hex(&payload.salt),
        to_hex(&payload.mac),
        to_hex(&payload.ciphertext)
    );
    let body = to_hex(inner);

    let mut out = header.to_string();
    out.reserve(body.len() + body.len() / LINE_WIDTH + 1);
    let mut rest = body.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(LINE_WIDTH));
        out.push('\n');
        out.push_str(line);
        rest = tail;
    }
    out
}

/// Parses envelope text into its [`Payload`].
///
/// Both `\n` and `\r\n` line endings are accepted, as is whitespace around each line.
/// Returns `Ok(None)` when `identifier` is given and does not select the header.
///
/// # Errors
/// * [`VaultError::BadHeader`] If the first line is not a valid vault header.
/// * [`VaultError::InvalidVault`] If the body does not decode into exactly three non-empty groups.
pub fn unpack(text: &str, identifier: Option<&str>) -> Result<Option<Payload>> {
    let mut lines = text.lines().map(str::trim);

    let header = Header::parse(lines.next().ok_or_else(|| VaultError::bad_header("empty vault"))?)?;
    if !header.matches(identifier) {
        return Ok(None);
    }

    let body: String = lines.collect();
    let inner = from_hex(body);
    let mut groups = inner.split(|&b| b == b'\n').map(|g| g.strip_suffix(b"\r").unwrap_or(g));

    let (Some(salt), Some(mac), Some(ciphertext), None) =
        (groups.next(), groups.next(), groups.next(), groups.next())
    else {
        return Err(VaultError::invalid_vault("expected salt, hmac and ciphertext"));
    };

    if salt.is_empty() || mac.is_empty() || ciphertext.is_empty() {
        return Err(VaultError::invalid_vault("empty salt, hmac or ciphertext"));
    }

    Ok(Some(Payload { salt: from_hex(salt), mac: from_hex(mac), ciphertext: from_hex(ciphertext) }))
}

/// Returns `true` if the first line of `text` is a valid vault header.
#[must_use]
pub fn is_vault(text: &str) -> bool {
    text.lines().next().is_some_and(|line| Header::parse(line).is_ok())
}
