use aes::Aes256;
use hmac::Hmac;
use sha2::Sha256;

// --- Aliases ---

/// AES-256 in counter mode with a 128-bit big-endian counter seeded from the derived nonce.
pub(crate) type Aes256Ctr = ctr::Ctr128BE<Aes256>;

pub(crate) type HmacSha256 = Hmac<Sha256>;

// --- Envelope format constants ---

/// Literal tag opening every vault header.
pub const VAULT_TAG: &str = "$ANSIBLE_VAULT";

/// The only supported cipher name, as advertised in the header.
pub const CIPHER_NAME: &str = "AES256";

/// Header field separator.
pub const HEADER_SEPARATOR: char = ';';

/// Maximum number of characters per body line.
pub const LINE_WIDTH: usize = 80;

// --- Key derivation ---

/// Random salt length, persisted in every envelope.
pub const SALT_LEN: usize = 32;

/// PBKDF2-HMAC-SHA256 iteration count.
pub const KDF_ITERATIONS: u32 = 10_000;

/// AES-256 key length.
pub const CIPHER_KEY_LEN: usize = 32;

/// HMAC-SHA256 key length.
pub const MAC_KEY_LEN: usize = 32;

/// CTR initial counter block length.
pub const NONCE_LEN: usize = 16;

/// Total PBKDF2 output: `[cipher key][mac key][nonce]`.
pub const DERIVED_LEN: usize = CIPHER_KEY_LEN + MAC_KEY_LEN + NONCE_LEN;

// --- Cipher ---

/// AES block size used for padding.
pub const BLOCK_SIZE: usize = 16;

/// HMAC-SHA256 output length.
pub const MAC_LEN: usize = 32;
