//! Configuration loading
//!
//! Settings resolve per value in priority order: command-line argument,
//! environment variable, TOML config file, compiled default. The first two
//! tiers are handled by clap (`env` attributes), the rest here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::matcher::MatchPolicy;

/// Command-line arguments (each doubles as an environment variable)
#[derive(Parser, Debug, Default)]
#[command(name = "ftv-web", about = "FTV worker verification portal")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "FTV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:5780
    #[arg(long, env = "FTV_LISTEN")]
    pub listen: Option<String>,

    /// Base URL of the hosted table API, e.g. https://host/rest/v1
    #[arg(long, env = "FTV_STORE_URL")]
    pub store_url: Option<String>,

    /// API key for the hosted table
    #[arg(long, env = "FTV_STORE_API_KEY")]
    pub store_api_key: Option<String>,

    /// Shared dashboard passkey
    #[arg(long, env = "FTV_PASSKEY")]
    pub passkey: Option<String>,
}

/// Full server configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    pub store_url: String,
    pub store_api_key: String,
    pub store_table: String,
    /// Shared static passkey gating the dashboard
    pub passkey: String,
    pub session_ttl_secs: u64,
    /// Artificial delay before a verification attempt is processed
    pub verify_delay_ms: u64,
    /// Rows per dashboard listing page
    pub page_size: i64,
    /// Require the record to still be unverified when the update lands
    pub verify_only_once: bool,
    pub case_insensitive_match: bool,
    pub nik_suffix_min: usize,
    pub nik_suffix_max: usize,
    pub ktp_suffix_len: usize,
    /// Reference document offered to verified workers (empty disables)
    pub document_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:5780".to_string(),
            store_url: String::new(),
            store_api_key: String::new(),
            store_table: "workers".to_string(),
            passkey: "0000".to_string(),
            session_ttl_secs: 24 * 60 * 60,
            verify_delay_ms: 800,
            page_size: 10,
            verify_only_once: false,
            case_insensitive_match: true,
            nik_suffix_min: 5,
            nik_suffix_max: 6,
            ktp_suffix_len: 7,
            document_url: String::new(),
        }
    }
}

impl ServerConfig {
    /// Resolve configuration from CLI/env arguments and an optional TOML file
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match config_file_path(cli) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }
        if let Some(store_url) = &cli.store_url {
            config.store_url = store_url.clone();
        }
        if let Some(api_key) = &cli.store_api_key {
            config.store_api_key = api_key.clone();
        }
        if let Some(passkey) = &cli.passkey {
            config.passkey = passkey.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    fn validate(&self) -> Result<()> {
        if self.store_url.is_empty() {
            return Err(Error::Config(
                "store_url is required (--store-url, FTV_STORE_URL, or config file)".to_string(),
            ));
        }
        if self.page_size < 1 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.nik_suffix_min > self.nik_suffix_max {
            return Err(Error::Config(
                "nik_suffix_min must not exceed nik_suffix_max".to_string(),
            ));
        }
        Ok(())
    }

    /// Matching rules for this deployment
    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy {
            case_insensitive: self.case_insensitive_match,
            nik_suffix: self.nik_suffix_min..=self.nik_suffix_max,
            ktp_suffix_len: self.ktp_suffix_len,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn verify_delay(&self) -> Duration {
        Duration::from_millis(self.verify_delay_ms)
    }
}

/// Explicit path from CLI/env, else the per-user config file when it exists
fn config_file_path(cli: &Cli) -> Option<PathBuf> {
    if let Some(path) = &cli.config {
        return Some(path.clone());
    }
    let default = dirs::config_dir()?.join("ftv").join("config.toml");
    default.exists().then_some(default)
}
