//! Page fetching and location list input.
//!
//! Pages are obtained through the [`PageSource`] trait so extraction can be
//! driven by fixtures. [`HttpSource`] is the real implementation; it also
//! serves `file://` URLs from disk, which makes an offline mirror of the site
//! usable as a base URL.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::{LowtideError, Result};

/// HTTP client configuration for fetching tide pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: format!("Mozilla/5.0 (compatible; lowtide/{})", env!("CARGO_PKG_VERSION")) }
    }
}

/// Something that can return the HTML behind a URL.
pub trait PageSource: Send + Sync {
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Builds `<base>/<name>/<suffix>`, collapsing slashes at the joins.
///
/// # Example
///
/// ```rust
/// use lowtide_core::location_url;
///
/// let url = location_url("https://www.tide-forecast.com/locations/", "Main-Beach", "tides/latest").unwrap();
/// assert_eq!(url, "https://www.tide-forecast.com/locations/Main-Beach/tides/latest");
/// ```
pub fn location_url(base: &str, name: &str, suffix: &str) -> Result<String> {
    let joined = format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        name.trim_matches('/'),
        suffix.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| LowtideError::InvalidUrl(format!("{}: {}", joined, e)))?;

    Ok(joined)
}

/// Fetches pages over HTTP(S), or from disk for `file://` URLs.
///
/// Non-success HTTP statuses are not errors: the body is returned like any
/// other page, and a "not found" page simply has no tide table.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl HttpSource {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(LowtideError::HttpError)?;

        Ok(Self { client, config })
    }

    async fn fetch_http(&self, url: Url) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, url = %response.url(), "non-success status, parsing body anyway");
        }

        response.text().await.map_err(|e| self.map_send_error(e))
    }

    fn map_send_error(&self, e: reqwest::Error) -> LowtideError {
        if e.is_timeout() { LowtideError::Timeout { timeout: self.config.timeout } } else { LowtideError::HttpError(e) }
    }
}

#[cfg(feature = "fetch")]
impl PageSource for HttpSource {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let parsed_url = Url::parse(url).map_err(|e| LowtideError::InvalidUrl(e.to_string()))?;
        tracing::debug!(url = %parsed_url, "fetching page");

        match parsed_url.scheme() {
            "http" | "https" => self.fetch_http(parsed_url).await,
            "file" => {
                let path = parsed_url
                    .to_file_path()
                    .map_err(|_| LowtideError::InvalidUrl(format!("Not a local file URL: {}", url)))?;
                read_page_file(&path).await
            }
            other => Err(LowtideError::InvalidUrl(format!("Unsupported scheme '{}' in {}", other, url))),
        }
    }
}

#[cfg(feature = "fetch")]
async fn read_page_file(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LowtideError::FileNotFound(path.to_path_buf())),
        Err(e) => Err(LowtideError::Io(e)),
    }
}

/// Reads the location list: one `"<beach>, <city>"` per line.
///
/// Lines are trimmed and blank lines dropped. The lines are not validated
/// here; see [`crate::normalize`].
pub fn read_locations(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(LowtideError::FileNotFound(PathBuf::from(path)));
    }

    let content = fs::read_to_string(path)?;
    Ok(parse_locations(&content))
}

/// Splits location list text into non-blank, trimmed lines.
pub fn parse_locations(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("lowtide"));
    }

    #[test]
    fn test_location_url() {
        let url = location_url("https://www.tide-forecast.com/locations", "Main-Beach-Anytown", "tides/latest").unwrap();
        assert_eq!(url, "https://www.tide-forecast.com/locations/Main-Beach-Anytown/tides/latest");

        let url = location_url("https://example.com/locations/", "Main-Beach", "/tides/latest").unwrap();
        assert_eq!(url, "https://example.com/locations/Main-Beach/tides/latest");
    }

    #[test]
    fn test_location_url_invalid_base() {
        let result = location_url("not a url", "Main-Beach", "tides/latest");
        assert!(matches!(result, Err(LowtideError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_locations_skips_blank_lines() {
        let content = "Main Beach, Anytown\n\n   \n  Rocky Point, Seaside  \r\n";
        assert_eq!(parse_locations(content), vec!["Main Beach, Anytown", "Rocky Point, Seaside"]);
    }

    #[test]
    fn test_read_locations() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Main Beach, Anytown").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "Rocky Point, Seaside").unwrap();

        let locations = read_locations(file.path()).unwrap();
        assert_eq!(locations.len(), 2);
    }

    #[test]
    fn test_read_locations_not_found() {
        let result = read_locations(Path::new("/nonexistent/locations.txt"));
        assert!(matches!(result, Err(LowtideError::FileNotFound(_))));
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_fetch_page_file_url() {
        let dir = tempfile::TempDir::new().unwrap();
        let page = dir.path().join("latest");
        fs::write(&page, "<html><body>ok</body></html>").unwrap();

        let source = HttpSource::new(FetchConfig::default()).unwrap();
        let url = Url::from_file_path(&page).unwrap();
        let html = source.fetch_page(url.as_str()).await.unwrap();

        assert!(html.contains("ok"));
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_fetch_page_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let url = Url::from_file_path(dir.path().join("missing")).unwrap();

        let source = HttpSource::new(FetchConfig::default()).unwrap();
        let result = source.fetch_page(url.as_str()).await;

        assert!(matches!(result, Err(LowtideError::FileNotFound(_))));
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_fetch_page_invalid_url() {
        let source = HttpSource::new(FetchConfig::default()).unwrap();
        let result = source.fetch_page("not-a-url").await;
        assert!(matches!(result, Err(LowtideError::InvalidUrl(_))));
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_fetch_page_unsupported_scheme() {
        let source = HttpSource::new(FetchConfig::default()).unwrap();
        let result = source.fetch_page("ftp://example.com/locations").await;
        assert!(matches!(result, Err(LowtideError::InvalidUrl(_))));
    }
}
