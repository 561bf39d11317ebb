//! CLI for the resolvgen DNSCrypt resolver list generator.

use anyhow::{Context, Result};
use clap::Parser;
use resolvgen_core::catalog::CatalogSource;
use resolvgen_core::config::{self, ResolvgenConfig};
use resolvgen_core::filter::FilterOptions;
use resolvgen_core::{generate, EntryErrorPolicy, GenerateOptions};
use std::path::PathBuf;

/// DNSCrypt (not DoH!) resolver list generator.
#[derive(Debug, Parser)]
#[command(name = "resolvgen", version)]
#[command(about = "DNSCrypt (not DoH!) resolver list generator", long_about = None)]
pub struct Cli {
    /// Allow resolvers not verifying DNS query response authenticity.
    #[arg(long)]
    pub no_dnssec: bool,

    /// Allow resolvers not declaring they don't log queries.
    #[arg(long)]
    pub allow_logging: bool,

    /// Allow resolvers not declaring they don't filter responses.
    #[arg(long)]
    pub allow_filter: bool,

    /// Allow resolvers available over IPv6.
    #[arg(long)]
    pub ipv6: bool,

    /// Catalog URL (overrides `source_url` in config.toml).
    #[arg(long, value_name = "URL", conflicts_with = "catalog_file")]
    pub url: Option<String>,

    /// Read the catalog from a local JSON file instead of downloading it.
    #[arg(long, value_name = "PATH")]
    pub catalog_file: Option<PathBuf>,

    /// Output CSV path (overrides `output_file` in config.toml).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Leave out resolvers whose stamp or location cannot be formatted instead of failing.
    #[arg(long)]
    pub skip_invalid: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init().context("load config")?;
        tracing::debug!("loaded config: {:?}", cfg);

        let opts = cli.generate_options(&cfg);
        let report = generate(&opts)?;

        println!(
            "Wrote {} resolver{} to {} ({} of {} catalog entries matched)",
            report.written,
            if report.written == 1 { "" } else { "s" },
            report.output.display(),
            report.matched,
            report.total
        );
        if report.skipped > 0 {
            println!("  ({} skipped: malformed stamp or location)", report.skipped);
        }
        Ok(())
    }

    /// Strict defaults; each flag relaxes one clause.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            require_dnssec: !self.no_dnssec,
            require_nolog: !self.allow_logging,
            require_nofilter: !self.allow_filter,
            allow_ipv6: self.ipv6,
        }
    }

    /// Merge flags over the loaded config.
    pub fn generate_options(&self, cfg: &ResolvgenConfig) -> GenerateOptions {
        let source = match (&self.catalog_file, &self.url) {
            (Some(path), _) => CatalogSource::File(path.clone()),
            (None, Some(url)) => CatalogSource::Url(url.clone()),
            (None, None) => CatalogSource::Url(cfg.source_url.clone()),
        };
        GenerateOptions {
            source,
            http: cfg.http_options(),
            filter: self.filter_options(),
            output: self
                .output
                .clone()
                .unwrap_or_else(|| cfg.output_file.clone()),
            on_entry_error: if self.skip_invalid {
                EntryErrorPolicy::Skip
            } else {
                cfg.on_entry_error
            },
        }
    }
}
