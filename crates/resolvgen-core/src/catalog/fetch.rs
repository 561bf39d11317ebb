//! Catalog download over HTTP(S).
//!
//! Uses the curl crate (libcurl) for one blocking GET. No retries: a failed
//! attempt aborts the run.

use std::time::Duration;

use super::{parse_catalog, CatalogEntry};
use crate::error::GenerateError;

/// Transfer settings for the catalog GET.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
            user_agent: concat!("resolvgen/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Downloads the catalog at `url` and decodes it.
///
/// Follows redirects. Non-2xx responses and transport failures are
/// `GenerateError::Fetch`; a body that is not a JSON array is `JsonParse`.
pub fn fetch_catalog(url: &str, opts: &HttpOptions) -> Result<Vec<CatalogEntry>, GenerateError> {
    let body = get(url, opts)?;
    tracing::info!("fetched {} bytes of catalog from {}", body.len(), url);
    parse_catalog(&body)
}

fn get(url: &str, opts: &HttpOptions) -> Result<Vec<u8>, GenerateError> {
    let parsed = url::Url::parse(url).map_err(|e| GenerateError::fetch(url, e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(GenerateError::fetch(
            url,
            format!("unsupported scheme {:?}", parsed.scheme()),
        ));
    }

    let curl_err = |e: curl::Error| GenerateError::fetch(url, e);
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.get(true).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    easy.max_redirections(10).map_err(curl_err)?;
    easy.connect_timeout(opts.connect_timeout).map_err(curl_err)?;
    easy.timeout(opts.timeout).map_err(curl_err)?;
    easy.useragent(&opts.user_agent).map_err(curl_err)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(curl_err)?;
        transfer.perform().map_err(curl_err)?;
    }

    let code = easy.response_code().map_err(curl_err)?;
    if !(200..300).contains(&code) {
        tracing::warn!("GET {} returned HTTP {}", url, code);
        return Err(GenerateError::fetch(url, format!("HTTP {}", code)));
    }
    Ok(body)
}
