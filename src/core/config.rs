//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chirp/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::model::{DEFAULT_DESCRIPTION, DEFAULT_ICON, DEFAULT_TITLE, PageMeta};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChirpConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    pub base_url: Option<String>,
    pub session_token: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PageConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_IDENTITY_BASE_URL: &str = "http://localhost:3000/auth";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub identity_base_url: String,
    pub session_token: Option<String>,
    pub meta: PageMeta,
}

/// Values supplied on the command line. `None` = flag not given.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub identity_url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.chirp/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chirp").join("config.toml"))
}

/// Load config from `~/.chirp/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChirpConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChirpConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ChirpConfig::default());
        }
    };
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<ChirpConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ChirpConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ChirpConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // Token deliberately left out of the log
    debug!(
        "Config: api={:?}, identity={:?}, page={:?}",
        config.api, config.identity.base_url, config.page
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Chirp Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:3000"          # Or set CHIRP_API_URL

# [identity]
# base_url = "http://localhost:3000/auth"     # Or set CHIRP_IDENTITY_URL
# session_token = "sess_..."                  # Or set CHIRP_SESSION_TOKEN

# [page]
# title = "Chirp"
# description = "Chirp, Twitter inspired site with emojis"
# icon = "/favicon.ico"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChirpConfig, cli: &CliOverrides) -> ResolvedConfig {
    // API URL: CLI → env → config → default
    let api_base_url = cli
        .api_url
        .clone()
        .or_else(|| std::env::var("CHIRP_API_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Identity URL: CLI → env → config → default
    let identity_base_url = cli
        .identity_url
        .clone()
        .or_else(|| std::env::var("CHIRP_IDENTITY_URL").ok())
        .or_else(|| config.identity.base_url.clone())
        .unwrap_or_else(|| DEFAULT_IDENTITY_BASE_URL.to_string());

    // Session token: env → config
    let session_token = std::env::var("CHIRP_SESSION_TOKEN")
        .ok()
        .or_else(|| config.identity.session_token.clone())
        .filter(|t| !t.trim().is_empty());

    let meta = PageMeta {
        title: config
            .page
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: config
            .page
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        icon: config
            .page
            .icon
            .clone()
            .unwrap_or_else(|| DEFAULT_ICON.to_string()),
    };

    ResolvedConfig {
        api_base_url,
        identity_base_url,
        session_token,
        meta,
    }
}
