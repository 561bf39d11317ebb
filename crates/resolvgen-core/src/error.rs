//! Error type shared by every stage of the generator.

use thiserror::Error;

/// Failure of a catalog-to-CSV run.
///
/// `Fetch`, `JsonParse` and `Write` are always fatal. `StampDecode` and
/// `Format` are raised per resolver entry; whether they abort the run is
/// decided by [`crate::pipeline::EntryErrorPolicy`].
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Network or HTTP failure while retrieving the catalog (or reading it from disk).
    #[error("fetch catalog from {source_name}: {reason}")]
    Fetch { source_name: String, reason: String },

    /// Catalog body is not a JSON array of resolver objects.
    #[error("parse catalog JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Stamp of a surviving entry is malformed or has an unexpected layout.
    #[error("decode stamp of resolver {resolver:?}: {reason}")]
    StampDecode { resolver: String, reason: StampError },

    /// A field needed for formatting is missing (e.g. location lat/long).
    #[error("format resolver {resolver:?}: missing {field}")]
    Format {
        resolver: String,
        field: &'static str,
    },

    /// Output file could not be created, written or moved into place.
    #[error("write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a stamp could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StampError {
    #[error("missing sdns:// prefix")]
    MissingPrefix,
    #[error("invalid base64url payload: {0}")]
    Base64(String),
    #[error("key segment is {0} bytes, expected at least 32")]
    ShortKey(usize),
    #[error("provider name is not valid UTF-8")]
    ProviderName,
}

impl GenerateError {
    pub(crate) fn fetch(source_name: impl Into<String>, reason: impl ToString) -> Self {
        GenerateError::Fetch {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        GenerateError::Write {
            path: path.display().to_string(),
            source,
        }
    }

    /// True for errors tied to a single resolver entry (candidates for skipping).
    pub fn is_entry_error(&self) -> bool {
        matches!(
            self,
            GenerateError::StampDecode { .. } | GenerateError::Format { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_errors_are_classified() {
        let stamp = GenerateError::StampDecode {
            resolver: "a".into(),
            reason: StampError::ShortKey(3),
        };
        let format = GenerateError::Format {
            resolver: "a".into(),
            field: "location",
        };
        assert!(stamp.is_entry_error());
        assert!(format.is_entry_error());
        assert!(!GenerateError::fetch("x", "HTTP 404").is_entry_error());
    }

    #[test]
    fn display_names_resolver() {
        let e = GenerateError::StampDecode {
            resolver: "scaleway-fr".into(),
            reason: StampError::MissingPrefix,
        };
        assert_eq!(
            e.to_string(),
            "decode stamp of resolver \"scaleway-fr\": missing sdns:// prefix"
        );
    }
}
