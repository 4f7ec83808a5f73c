//! Scraper configuration.
//!
//! Every setting has a default matching tide-forecast.com, so a config file
//! is optional. When present it is TOML:
//!
//! ```toml
//! base_url = "https://www.tide-forecast.com/locations"
//! all_days_suffix = "tides/latest"
//! concurrency = 4
//!
//! [extract]
//! table_selector = "#main > section > table"
//! max_days = 2
//!
//! [extract.layout]
//! label = 0
//! height = 1
//! time = 4
//!
//! [fetch]
//! timeout = 30
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::extract::{ColumnLayout, ExtractConfig};
use crate::fetch::FetchConfig;
use crate::{LowtideError, Result};

/// Site section listing pages by location.
pub const DEFAULT_BASE_URL: &str = "https://www.tide-forecast.com/locations";

/// Path below a location that shows every available day.
pub const DEFAULT_ALL_DAYS_SUFFIX: &str = "tides/latest";

const CONFIG_DIR_NAME: &str = "lowtide";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Complete configuration of a scraping run.
///
/// # Example
///
/// ```rust
/// use lowtide_core::ScrapeConfig;
///
/// let config = ScrapeConfig::builder()
///     .concurrency(8)
///     .max_days(Some(3))
///     .timeout(10)
///     .build();
/// assert_eq!(config.extract.max_days, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Base URL under which location pages live.
    pub base_url: String,
    /// Path appended after the location name.
    pub all_days_suffix: String,
    /// Maximum number of locations scraped at once (minimum 1).
    pub concurrency: usize,
    /// Table location and layout.
    pub extract: ExtractConfig,
    /// HTTP settings.
    pub fetch: FetchConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            all_days_suffix: DEFAULT_ALL_DAYS_SUFFIX.to_string(),
            concurrency: 4,
            extract: ExtractConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl ScrapeConfig {
    /// Creates a new builder for ScrapeConfig.
    pub fn builder() -> ScrapeConfigBuilder {
        ScrapeConfigBuilder::new()
    }

    /// Parses a TOML document; missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| LowtideError::ConfigError(e.to_string()))?;
        if config.concurrency == 0 {
            return Err(LowtideError::ConfigError("concurrency must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Reads a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LowtideError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            LowtideError::ConfigError(msg) => LowtideError::ConfigError(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Loads `path` if given, else the user config file if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading user config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/lowtide/config.toml`, e.g. `~/.config/lowtide/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

/// Builder for ScrapeConfig.
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ScrapeConfig::default() }
    }

    /// Starts from an existing config, e.g. one loaded from a file.
    pub fn from_config(config: ScrapeConfig) -> Self {
        Self { config }
    }

    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.config.base_url = value.into();
        self
    }

    pub fn all_days_suffix(mut self, value: impl Into<String>) -> Self {
        self.config.all_days_suffix = value.into();
        self
    }

    /// Sets the concurrency; zero is raised to one.
    pub fn concurrency(mut self, value: usize) -> Self {
        self.config.concurrency = value.max(1);
        self
    }

    pub fn table_selector(mut self, value: impl Into<String>) -> Self {
        self.config.extract.table_selector = value.into();
        self
    }

    pub fn layout(mut self, value: ColumnLayout) -> Self {
        self.config.extract.layout = value;
        self
    }

    pub fn max_days(mut self, value: Option<u32>) -> Self {
        self.config.extract.max_days = value;
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Builds the config.
    pub fn build(self) -> ScrapeConfig {
        self.config
    }
}

impl Default for ScrapeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.base_url, "https://www.tide-forecast.com/locations");
        assert_eq!(config.all_days_suffix, "tides/latest");
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.extract, ExtractConfig::default());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ScrapeConfig::from_toml(
            r#"
            base_url = "https://mirror.example.com/locations"

            [extract]
            max_days = 2

            [extract.layout]
            time = 3

            [fetch]
            timeout = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://mirror.example.com/locations");
        assert_eq!(config.all_days_suffix, "tides/latest");
        assert_eq!(config.extract.max_days, Some(2));
        assert_eq!(config.extract.layout, ColumnLayout { label: 0, height: 1, time: 3 });
        assert_eq!(config.extract.table_selector, "#main > section > table");
        assert_eq!(config.fetch.timeout, 5);
        assert!(config.fetch.user_agent.contains("lowtide"));
    }

    #[test]
    fn test_from_toml_empty() {
        assert_eq!(ScrapeConfig::from_toml("").unwrap(), ScrapeConfig::default());
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = ScrapeConfig::from_toml("concurrency = \"many\"");
        assert!(matches!(result, Err(LowtideError::ConfigError(_))));

        let result = ScrapeConfig::from_toml("concurrency = 0");
        assert!(matches!(result, Err(LowtideError::ConfigError(_))));
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "concurrency = 2\n").unwrap();

        let config = ScrapeConfig::load(Some(&path)).unwrap();
        assert_eq!(config.concurrency, 2);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = ScrapeConfig::load(Some(Path::new("/nonexistent/lowtide.toml")));
        assert!(matches!(result, Err(LowtideError::FileNotFound(_))));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ScrapeConfig::builder()
            .base_url("file:///srv/mirror/locations")
            .concurrency(0)
            .max_days(Some(1))
            .timeout(7)
            .user_agent("test-agent")
            .build();

        assert_eq!(config.base_url, "file:///srv/mirror/locations");
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.extract.max_days, Some(1));
        assert_eq!(config.fetch.timeout, 7);
        assert_eq!(config.fetch.user_agent, "test-agent");
    }
}
