//! Projection of a catalog entry onto the fixed CSV schema.

use crate::catalog::CatalogEntry;
use crate::error::GenerateError;
use crate::filter::DNSCRYPT_PROTO;
use crate::stamp::DecodedStamp;

/// Output columns, in file order.
pub const COLUMNS: [&str; 11] = [
    "Name",
    "Description",
    "Location",
    "Coordinates",
    "Version",
    "DNSSEC validation",
    "No logs",
    "Resolver address",
    "Provider name",
    "Provider public key",
    "Provider public key TXT record",
];

/// Reserved column; never populated.
const PROVIDER_KEY_TXT_RECORD: &str = "";

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub name: String,
    pub description: String,
    pub location: String,
    pub coordinates: String,
    pub version: u8,
    pub dnssec_validation: &'static str,
    pub no_logs: &'static str,
    pub resolver_address: String,
    pub provider_name: String,
    pub provider_public_key: String,
}

impl OutputRecord {
    /// Field values in [`COLUMNS`] order.
    pub fn fields(&self) -> [String; 11] {
        [
            self.name.clone(),
            self.description.clone(),
            self.location.clone(),
            self.coordinates.clone(),
            self.version.to_string(),
            self.dnssec_validation.to_string(),
            self.no_logs.to_string(),
            self.resolver_address.clone(),
            self.provider_name.clone(),
            self.provider_public_key.clone(),
            PROVIDER_KEY_TXT_RECORD.to_string(),
        ]
    }
}

/// Maps an entry and its decoded stamp to an output row.
///
/// Fails with `GenerateError::Format` when the entry has no usable location.
pub fn map_entry(
    entry: &CatalogEntry,
    stamp: &DecodedStamp,
) -> Result<OutputRecord, GenerateError> {
    Ok(OutputRecord {
        name: entry.name.clone().unwrap_or_default(),
        description: entry
            .description
            .as_deref()
            .unwrap_or_default()
            .replace('\n', " "),
        location: entry.country.clone().unwrap_or_default(),
        coordinates: coordinates(entry)?,
        version: if entry.proto.as_deref() == Some(DNSCRYPT_PROTO) {
            1
        } else {
            2
        },
        dnssec_validation: yes_no(entry.dnssec),
        no_logs: yes_no(entry.nolog),
        resolver_address: resolver_addresses(&entry.addrs, &entry.ports),
        provider_name: stamp.provider_name.clone(),
        provider_public_key: stamp.public_key.to_string(),
    })
}

fn coordinates(entry: &CatalogEntry) -> Result<String, GenerateError> {
    let missing = |field| GenerateError::Format {
        resolver: entry.display_name().to_string(),
        field,
    };
    let loc = entry.location.ok_or_else(|| missing("location"))?;
    let lat = loc.lat.ok_or_else(|| missing("location.lat"))?;
    let long = loc.long.ok_or_else(|| missing("location.long"))?;
    Ok(format!("{:+.4}, {:+.4}", lat, long))
}

fn yes_no(flag: Option<bool>) -> &'static str {
    if flag == Some(true) {
        "yes"
    } else {
        "no"
    }
}

/// Every `addr:port` pair, address-major, joined with commas.
pub fn resolver_addresses(addrs: &[String], ports: &[u16]) -> String {
    addrs
        .iter()
        .flat_map(|addr| ports.iter().map(move |port| format!("{}:{}", addr, port)))
        .collect::<Vec<_>>()
        .join(",")
}
