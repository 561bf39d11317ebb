//! Provider public key and its colon-grouped hex rendering.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Length of a DNSCrypt provider public key (Ed25519).
pub const PUBLIC_KEY_LEN: usize = 32;

/// Hex digits per group in the rendered key.
const GROUP_WIDTH: usize = 4;
/// At most this many groups are followed by a colon.
const MAX_SEPARATORS: usize = 15;

/// Raw provider public key. `Display` renders `ABCD:EF01:...` (uppercase,
/// 4-digit groups); `FromStr` accepts that form back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderPublicKey([u8; PUBLIC_KEY_LEN]);

impl ProviderPublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl fmt::Display for ProviderPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_hex(&hex::encode_upper(self.0)))
    }
}

/// Inserts a colon after each complete 4-digit group, for the first 15 groups only.
pub(crate) fn group_hex(hex: &str) -> String {
    let chars: Vec<char> = hex.chars().collect();
    let mut out = String::with_capacity(hex.len() + MAX_SEPARATORS);
    for (i, group) in chars.chunks(GROUP_WIDTH).enumerate() {
        out.extend(group);
        if group.len() == GROUP_WIDTH && i < MAX_SEPARATORS {
            out.push(':');
        }
    }
    out
}

/// Rejected rendered key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("invalid hex: {0}")]
    Hex(String),
    #[error("key is {0} bytes, expected 32")]
    Length(usize),
}

impl FromStr for ProviderPublicKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| *c != ':').collect();
        let bytes = hex::decode(&digits).map_err(|e| KeyParseError::Hex(e.to_string()))?;
        let key: [u8; PUBLIC_KEY_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyParseError::Length(bytes.len()))?;
        Ok(Self(key))
    }
}
