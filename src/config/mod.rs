//
//  smartling-files
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module manages the settings the `sl` CLI needs to reach the Files
//! API: the API host, the user credentials exchanged for access tokens, the
//! project and a handful of client options. Settings are stored as TOML in a
//! platform-specific directory and may be overridden from the environment.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/smartling/config.toml`
//! - **macOS**: `~/Library/Application Support/smartling/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\smartling\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! host = "https://api.smartling.com"
//! user_identifier = "abcdefghijklmnopqrstuvwxyz"
//! user_secret = "s3cr3t"
//! project_id = "a1b2c3d4e"
//! timeout_secs = 60
//!
//! [api_keys]
//! apiKey = "legacy-key"
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SL_USER_IDENTIFIER` | `user_identifier` |
//! | `SL_USER_SECRET` | `user_secret` |
//! | `SL_PROJECT_ID` | `project_id` |
//! | `SL_HOST` | `host` |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use smartling_files::config::Config;
//!
//! let mut config = Config::load()?;
//! config.apply_env();
//! let client_config = config.client_config()?;
//! println!("Using project {}", client_config.project_id);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::common::ApiError;

/// Default Smartling API host.
pub const DEFAULT_HOST: &str = "https://api.smartling.com";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const KEYS: &[&str] = &[
    "host",
    "user_identifier",
    "user_secret",
    "project_id",
    "proxy",
    "timeout_secs",
    "response_as_string",
];

/// Settings needed to construct a [`FileApi`](crate::api::FileApi).
///
/// # Example
///
/// ```rust
/// use smartling_files::config::{ClientConfig, DEFAULT_HOST};
///
/// let config = ClientConfig::new("user-id", "user-secret", "project-id");
/// assert_eq!(config.host, DEFAULT_HOST);
/// assert!(!config.response_as_string);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub user_identifier: String,
    pub user_secret: String,
    pub project_id: String,
    pub proxy: Option<Url>,
    pub timeout: Option<Duration>,
    /// Return raw `(body, status)` pairs instead of wrapped responses
    pub response_as_string: bool,
    /// Extra keys sent with imports
    pub api_keys: BTreeMap<String, String>,
}

impl ClientConfig {
    pub fn new(
        user_identifier: impl Into<String>,
        user_secret: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            user_identifier: user_identifier.into(),
            user_secret: user_secret.into(),
            project_id: project_id.into(),
            proxy: None,
            timeout: None,
            response_as_string: false,
            api_keys: BTreeMap::new(),
        }
    }
}

/// Persistent configuration of the `sl` CLI.
///
/// All fields use `#[serde(default)]`, so a partial file loads cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// API host; [`DEFAULT_HOST`] when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Proxy URL for every request, e.g. `http://proxy.local:3128`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub response_as_string: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub api_keys: BTreeMap<String, String>,
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`; a missing file yields the default.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "smartling", "smartling")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies the `SL_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(value) = lookup("SL_HOST") {
            self.host = Some(value);
        }
        if let Some(value) = lookup("SL_USER_IDENTIFIER") {
            self.user_identifier = Some(value);
        }
        if let Some(value) = lookup("SL_USER_SECRET") {
            self.user_secret = Some(value);
        }
        if let Some(value) = lookup("SL_PROJECT_ID") {
            self.project_id = Some(value);
        }
    }

    /// Gets a value by key. Unknown keys and unset values return `None`.
    ///
    /// `user_secret` is returned masked.
    ///
    /// # Example
    ///
    /// ```rust
    /// use smartling_files::config::Config;
    ///
    /// let mut config = Config::default();
    /// config.set("user_secret", "abcdef123456").unwrap();
    /// assert_eq!(config.get("user_secret"), Some("abcd********".to_string()));
    /// assert_eq!(config.get("host"), Some("https://api.smartling.com".to_string()));
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "host" => Some(self.host().to_string()),
            "user_identifier" => self.user_identifier.clone(),
            "user_secret" => self.user_secret.as_deref().map(mask_secret),
            "project_id" => self.project_id.clone(),
            "proxy" => self.proxy.clone(),
            "timeout_secs" => self.timeout_secs.map(|secs| secs.to_string()),
            "response_as_string" => Some(self.response_as_string.to_string()),
            _ => None,
        }
    }

    /// Sets a value by key, validating it for its field.
    ///
    /// Keys of the form `api_keys.<name>` set an import API key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(name) = key.strip_prefix("api_keys.") {
            if name.is_empty() {
                bail!("API key name must not be empty");
            }
            self.api_keys.insert(name.to_string(), value.to_string());
            return Ok(());
        }

        match key {
            "host" => {
                Url::parse(value).with_context(|| format!("Invalid host URL: {}", value))?;
                self.host = Some(value.trim_end_matches('/').to_string());
            }
            "user_identifier" => self.user_identifier = Some(value.to_string()),
            "user_secret" => self.user_secret = Some(value.to_string()),
            "project_id" => self.project_id = Some(value.to_string()),
            "proxy" => {
                Url::parse(value).with_context(|| format!("Invalid proxy URL: {}", value))?;
                self.proxy = Some(value.to_string());
            }
            "timeout_secs" => {
                let secs = value
                    .parse()
                    .with_context(|| format!("Invalid timeout: {}", value))?;
                self.timeout_secs = Some(secs);
            }
            "response_as_string" => {
                self.response_as_string = value
                    .parse()
                    .with_context(|| format!("Expected true or false, got: {}", value))?;
            }
            _ => bail!(
                "Unknown configuration key: {} (known keys: {}, api_keys.<name>)",
                key,
                KEYS.join(", ")
            ),
        }
        Ok(())
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Builds the client settings, failing when a required field is missing.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let user_identifier = required(&self.user_identifier, "user_identifier", "SL_USER_IDENTIFIER")?;
        let user_secret = required(&self.user_secret, "user_secret", "SL_USER_SECRET")?;
        let project_id = required(&self.project_id, "project_id", "SL_PROJECT_ID")?;

        let proxy = self
            .proxy
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| ApiError::Config(format!("Invalid proxy URL: {e}")))?;

        Ok(ClientConfig {
            host: self.host().trim_end_matches('/').to_string(),
            user_identifier,
            user_secret,
            project_id,
            proxy,
            timeout: self.timeout_secs.map(Duration::from_secs),
            response_as_string: self.response_as_string,
            api_keys: self.api_keys.clone(),
        })
    }
}

fn required(value: &Option<String>, key: &str, env: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ApiError::Config(format!(
            "Missing `{}`. Run `sl config set {} <value>` or set {}",
            key, key, env
        ))
        .into()),
    }
}

/// Keeps the first four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    let hidden = secret.chars().count().saturating_sub(4);
    format!("{}{}", visible, "*".repeat(hidden))
}
