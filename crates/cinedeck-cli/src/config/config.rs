//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use cinedeck_api::tmdb::{Credential, DEFAULT_IMAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Environment variable holding a v4 read access token.
pub const ENV_API_TOKEN: &str = "TMDB_API_TOKEN";

/// Environment variable holding a v3 API key.
pub const ENV_API_KEY: &str = "TMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB access settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// External player settings.
    #[serde(default)]
    pub player: PlayerConfig,
}

/// TMDB access configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// v3 API key (overridden by `TMDB_API_KEY`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// v4 read access token (overridden by `TMDB_API_TOKEN`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Response language.
    #[serde(default = "default_language")]
    pub language: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Poster width descriptor (e.g. "w500").
    #[serde(default = "default_image_size")]
    pub image_size: String,
}

/// External player configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Command line used to play a URL. `{url}` is replaced by the URL,
    /// otherwise the URL is appended. Unset means the system opener.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

fn default_language() -> String {
    String::from("en-US")
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_image_size() -> String {
    String::from(DEFAULT_IMAGE_SIZE)
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_token: None,
            language: default_language(),
            timeout_secs: default_timeout_secs(),
            image_size: default_image_size(),
        }
    }
}

impl TmdbConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Picks the credential to use.
    ///
    /// Environment variables win over the config file, and a bearer token
    /// wins over an API key from the same source. Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if no credential is available from any source.
    pub fn resolve_credential(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Credential> {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        if let Some(token) = non_blank(env(ENV_API_TOKEN)) {
            return Ok(Credential::BearerToken(token));
        }
        if let Some(key) = non_blank(env(ENV_API_KEY)) {
            return Ok(Credential::ApiKey(key));
        }
        if let Some(token) = non_blank(self.api_token.clone()) {
            return Ok(Credential::BearerToken(token));
        }
        if let Some(key) = non_blank(self.api_key.clone()) {
            return Ok(Credential::ApiKey(key));
        }
        bail!(
            "no TMDB credential: set {ENV_API_KEY} or {ENV_API_TOKEN}, \
             or api_key/api_token under [tmdb] in config.toml"
        )
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Returns a copy safe to print, with secrets masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mask = |v: &Option<String>| v.as_ref().map(|_| String::from("<redacted>"));
        Self {
            tmdb: TmdbConfig {
                api_key: mask(&self.tmdb.api_key),
                api_token: mask(&self.tmdb.api_token),
                language: self.tmdb.language.clone(),
                timeout_secs: self.tmdb.timeout_secs,
                image_size: self.tmdb.image_size.clone(),
            },
            player: PlayerConfig {
                command: self.player.command.clone(),
            },
        }
    }
}
