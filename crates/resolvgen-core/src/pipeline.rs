//! One-shot run: load catalog, filter, decode and map each survivor, write CSV.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::{CatalogEntry, CatalogSource, HttpOptions};
use crate::error::GenerateError;
use crate::filter::{FilterOptions, ResolverFilter};
use crate::output;
use crate::record::{map_entry, OutputRecord};
use crate::stamp::decode_stamp;

/// Handling of a surviving entry whose stamp or location cannot be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryErrorPolicy {
    /// First bad entry fails the whole run; no output file is written.
    #[default]
    Abort,
    /// Bad entries are logged and left out of the CSV. Changes the output
    /// compared to a strict run, so it must be requested explicitly.
    Skip,
}

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub source: CatalogSource,
    pub http: HttpOptions,
    pub filter: FilterOptions,
    pub output: PathBuf,
    pub on_entry_error: EntryErrorPolicy,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Entries in the catalog.
    pub total: usize,
    /// Entries accepted by the filter.
    pub matched: usize,
    /// Rows written (excluding the header).
    pub written: usize,
    /// Matched entries dropped under [`EntryErrorPolicy::Skip`].
    pub skipped: usize,
    pub output: PathBuf,
}

/// Rows produced from a catalog, before writing.
#[derive(Debug, Clone, Default)]
pub struct MappedCatalog {
    pub records: Vec<OutputRecord>,
    pub matched: usize,
    pub skipped: usize,
}

/// Decodes the stamp of one surviving entry and maps it to a row.
pub fn transform_entry(entry: &CatalogEntry) -> Result<OutputRecord, GenerateError> {
    let stamp = decode_stamp(entry.stamp.as_deref().unwrap_or_default()).map_err(|reason| {
        GenerateError::StampDecode {
            resolver: entry.display_name().to_string(),
            reason,
        }
    })?;
    map_entry(entry, &stamp)
}

/// Filters `entries` and maps the survivors in catalog order.
pub fn map_catalog(
    entries: &[CatalogEntry],
    filter: &ResolverFilter,
    policy: EntryErrorPolicy,
) -> Result<MappedCatalog, GenerateError> {
    let mut mapped = MappedCatalog::default();
    for entry in entries.iter().filter(|e| filter.matches(e)) {
        mapped.matched += 1;
        match transform_entry(entry) {
            Ok(record) => mapped.records.push(record),
            Err(e) if policy == EntryErrorPolicy::Skip && e.is_entry_error() => {
                tracing::warn!("skipping resolver: {}", e);
                mapped.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(mapped)
}

/// Runs the whole pipeline. Fetch and parse failures abort before any file is touched.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateReport, GenerateError> {
    tracing::info!("loading catalog from {}", opts.source);
    let entries = opts.source.load(&opts.http)?;
    tracing::info!("catalog has {} entries", entries.len());

    let filter = ResolverFilter::new(opts.filter);
    tracing::debug!("filter: {:?}, policy: {:?}", filter.options(), opts.on_entry_error);
    let mapped = map_catalog(&entries, &filter, opts.on_entry_error)?;

    output::write_records(&opts.output, &mapped.records)?;
    tracing::info!(
        "wrote {} of {} matching resolvers to {}",
        mapped.records.len(),
        mapped.matched,
        opts.output.display()
    );

    Ok(GenerateReport {
        total: entries.len(),
        matched: mapped.matched,
        written: mapped.records.len(),
        skipped: mapped.skipped,
        output: opts.output.clone(),
    })
}
