use crate::error::{QuotezError, Result};
use crate::search::SearchPolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_URL: &str = "http://api.quotable.io";
const DEFAULT_QUOTES_FILE: &str = "quotes.csv";

/// Overrides the data directory (config and default quotes file).
pub const HOME_ENV: &str = "QUOTEZ_HOME";
/// Overrides `api_url` from the config file.
pub const API_URL_ENV: &str = "QUOTEZ_API_URL";

/// Keys accepted by `get`/`set`, in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "api-url",
    "timeout-secs",
    "author-page-cap",
    "unrestricted-page-cap",
    "remote-ttl-secs",
    "store-ttl-secs",
    "quotes-file",
];

/// Configuration for quotez, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotezConfig {
    /// Base URL of the quote service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pages walked for a search restricted to one author
    #[serde(default = "default_author_page_cap")]
    pub author_page_cap: u32,

    /// Upper bound on pages walked for an all-authors content search
    #[serde(default = "default_unrestricted_page_cap")]
    pub unrestricted_page_cap: u32,

    /// Lifetime of memoized author lists and searches
    #[serde(default = "default_remote_ttl_secs")]
    pub remote_ttl_secs: u64,

    /// Lifetime of memoized saved-quote reads
    #[serde(default = "default_store_ttl_secs")]
    pub store_ttl_secs: u64,

    /// Saved quotes file; relative paths resolve against the data directory
    #[serde(default = "default_quotes_file")]
    pub quotes_file: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_author_page_cap() -> u32 {
    5
}

fn default_unrestricted_page_cap() -> u32 {
    100
}

fn default_remote_ttl_secs() -> u64 {
    3600
}

fn default_store_ttl_secs() -> u64 {
    60
}

fn default_quotes_file() -> String {
    DEFAULT_QUOTES_FILE.to_string()
}

impl Default for QuotezConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            author_page_cap: default_author_page_cap(),
            unrestricted_page_cap: default_unrestricted_page_cap(),
            remote_ttl_secs: default_remote_ttl_secs(),
            store_ttl_secs: default_store_ttl_secs(),
            quotes_file: default_quotes_file(),
        }
    }
}

/// Resolves the data directory: `QUOTEZ_HOME` if set, else the platform data dir.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "quotez", "quotez")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| QuotezError::Config("Could not determine data directory".to_string()))
}

impl QuotezConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: QuotezConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values `set` would refuse, for files edited by hand.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("timeout-secs", self.timeout_secs),
            ("author-page-cap", u64::from(self.author_page_cap)),
            ("unrestricted-page-cap", u64::from(self.unrestricted_page_cap)),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(QuotezError::Config(format!(
                    "{} must be greater than zero in {}",
                    key, CONFIG_FILENAME
                )));
            }
        }
        Ok(())
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Applies environment overrides on top of the loaded file.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn remote_ttl(&self) -> Duration {
        Duration::from_secs(self.remote_ttl_secs)
    }

    pub fn store_ttl(&self) -> Duration {
        Duration::from_secs(self.store_ttl_secs)
    }

    pub fn quotes_path(&self, data_dir: &Path) -> PathBuf {
        let path = PathBuf::from(&self.quotes_file);
        if path.is_absolute() {
            path
        } else {
            data_dir.join(path)
        }
    }

    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy {
            author_page_cap: self.author_page_cap,
            unrestricted_page_cap: self.unrestricted_page_cap,
            ..SearchPolicy::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "api-url" => self.api_url.clone(),
            "timeout-secs" => self.timeout_secs.to_string(),
            "author-page-cap" => self.author_page_cap.to_string(),
            "unrestricted-page-cap" => self.unrestricted_page_cap.to_string(),
            "remote-ttl-secs" => self.remote_ttl_secs.to_string(),
            "store-ttl-secs" => self.store_ttl_secs.to_string(),
            "quotes-file" => self.quotes_file.clone(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "api-url" => {
                let url = value.trim().trim_end_matches('/');
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(format!("Invalid api-url: {}", value));
                }
                self.api_url = url.to_string();
            }
            "timeout-secs" => self.timeout_secs = parse_positive(key, value)?,
            "author-page-cap" => self.author_page_cap = parse_positive(key, value)?,
            "unrestricted-page-cap" => self.unrestricted_page_cap = parse_positive(key, value)?,
            "remote-ttl-secs" => self.remote_ttl_secs = parse_number(key, value)?,
            "store-ttl-secs" => self.store_ttl_secs = parse_number(key, value)?,
            "quotes-file" => {
                if value.trim().is_empty() {
                    return Err("quotes-file cannot be empty".to_string());
                }
                self.quotes_file = value.trim().to_string();
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> std::result::Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", key, value))
}

fn parse_positive<T>(key: &str, value: &str) -> std::result::Result<T, String>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let parsed: T = parse_number(key, value)?;
    if parsed <= T::default() {
        return Err(format!("{} must be greater than zero", key));
    }
    Ok(parsed)
}
