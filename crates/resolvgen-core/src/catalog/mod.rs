//! Resolver catalog: JSON model and retrieval.
//!
//! The public catalog is a JSON array of resolver objects. Every field is
//! optional; flags that are absent or not JSON booleans deserialize to `None`
//! so that "exactly true" / "exactly false" checks stay strict.

mod fetch;

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::error::GenerateError;

pub use fetch::{fetch_catalog, HttpOptions};

/// Default location of the public DNSCrypt resolver catalog.
pub const DEFAULT_CATALOG_URL: &str =
    "https://download.dnscrypt.info/dnscrypt-resolvers/json/public-resolvers.json";

/// One resolver object from the catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    /// Protocol tag, e.g. `DNSCrypt` or `DoH`.
    #[serde(default)]
    pub proto: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub dnssec: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub nolog: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub nofilter: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub ipv6: Option<bool>,
    #[serde(default)]
    pub addrs: Vec<String>,
    #[serde(default)]
    pub ports: Vec<u16>,
    #[serde(default)]
    pub stamp: Option<String>,
}

/// Geographic position of a resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub long: Option<f64>,
}

impl CatalogEntry {
    /// Name used in logs and error messages.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Any JSON value is accepted; only real booleans survive.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_bool()))
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Download with a single HTTP GET.
    Url(String),
    /// Previously downloaded catalog on disk.
    File(PathBuf),
}

impl CatalogSource {
    /// Loads and parses the catalog from this source.
    pub fn load(&self, http: &HttpOptions) -> Result<Vec<CatalogEntry>, GenerateError> {
        match self {
            CatalogSource::Url(url) => fetch_catalog(url, http),
            CatalogSource::File(path) => read_catalog_file(path),
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Url(url) => write!(f, "{}", url),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Decodes a catalog body into entries.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<CatalogEntry>, GenerateError> {
    let entries: Vec<CatalogEntry> = serde_json::from_slice(bytes)?;
    Ok(entries)
}

/// Reads a catalog JSON file from disk.
pub fn read_catalog_file(path: &Path) -> Result<Vec<CatalogEntry>, GenerateError> {
    let bytes = std::fs::read(path)
        .map_err(|e| GenerateError::fetch(path.display().to_string(), e))?;
    tracing::debug!("read {} bytes of catalog from {}", bytes.len(), path.display());
    parse_catalog(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_full_entry() {
        let json = r#"[{
            "name": "example",
            "proto": "DNSCrypt",
            "ipv6": false,
            "addrs": ["1.2.3.4"],
            "ports": [443],
            "dnssec": true,
            "nolog": true,
            "nofilter": true,
            "description": "line one\nline two",
            "country": "France",
            "location": {"lat": 48.85, "long": 2.35},
            "stamp": "sdns://AQ",
            "extra_field": [1, 2, 3]
        }]"#;
        let entries = parse_catalog(json.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.name.as_deref(), Some("example"));
        assert_eq!(e.proto.as_deref(), Some("DNSCrypt"));
        assert_eq!(e.ipv6, Some(false));
        assert_eq!(e.dnssec, Some(true));
        assert_eq!(e.ports, vec![443]);
        assert_eq!(
            e.location,
            Some(Location {
                lat: Some(48.85),
                long: Some(2.35)
            })
        );
    }

    #[test]
    fn missing_fields_default() {
        let entries = parse_catalog(br#"[{}]"#).unwrap();
        let e = &entries[0];
        assert!(e.name.is_none());
        assert!(e.location.is_none());
        assert!(e.dnssec.is_none());
        assert!(e.addrs.is_empty());
        assert_eq!(e.display_name(), "<unnamed>");
    }

    #[test]
    fn non_boolean_flags_are_none() {
        let json = r#"[{"dnssec": "true", "nolog": 1, "nofilter": null, "ipv6": false}]"#;
        let e = &parse_catalog(json.as_bytes()).unwrap()[0];
        assert_eq!(e.dnssec, None);
        assert_eq!(e.nolog, None);
        assert_eq!(e.nofilter, None);
        assert_eq!(e.ipv6, Some(false));
    }

    #[test]
    fn not_an_array_is_json_error() {
        let err = parse_catalog(br#"{"name": "x"}"#).unwrap_err();
        assert!(matches!(err, GenerateError::JsonParse(_)));
        let err = parse_catalog(b"<html>").unwrap_err();
        assert!(matches!(err, GenerateError::JsonParse(_)));
    }

    #[test]
    fn read_catalog_file_roundtrip() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"[{"name": "a"}, {"name": "b"}]"#).unwrap();
        f.flush().unwrap();
        let entries = read_catalog_file(f.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name.as_deref(), Some("b"));
    }

    #[test]
    fn read_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_catalog_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, GenerateError::Fetch { .. }));
    }
}
