//! DNSCrypt stamp decoding.
//!
//! Only the provider public key and provider name are recovered. The
//! decoded stamp is split on the 0x20 byte; the last segment holds the
//! 32-byte key, one length byte and the provider name.

mod key;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::StampError;

pub use key::{KeyParseError, ProviderPublicKey, PUBLIC_KEY_LEN};

/// Scheme token in front of every stamp.
pub const STAMP_PREFIX: &str = "sdns://";

/// URL-safe alphabet; padding is optional and derived from the payload length.
const STAMP_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Fields recovered from a stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedStamp {
    pub public_key: ProviderPublicKey,
    pub provider_name: String,
}

/// Decodes `sdns://<base64url>` into provider key and name.
pub fn decode_stamp(stamp: &str) -> Result<DecodedStamp, StampError> {
    let payload = stamp
        .strip_prefix(STAMP_PREFIX)
        .ok_or(StampError::MissingPrefix)?;
    let raw = STAMP_ENGINE
        .decode(payload)
        .map_err(|e| StampError::Base64(e.to_string()))?;

    let tail = raw.split(|b| *b == b' ').last().unwrap_or_default();
    let key: [u8; PUBLIC_KEY_LEN] = tail
        .get(..PUBLIC_KEY_LEN)
        .and_then(|k| k.try_into().ok())
        .ok_or(StampError::ShortKey(tail.len()))?;

    // One length byte sits between the key and the name.
    let name = tail.get(PUBLIC_KEY_LEN + 1..).unwrap_or_default();
    let provider_name = std::str::from_utf8(name)
        .map_err(|_| StampError::ProviderName)?
        .to_string();

    Ok(DecodedStamp {
        public_key: ProviderPublicKey::from_bytes(key),
        provider_name,
    })
}
