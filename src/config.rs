use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4";
pub const DEFAULT_INTERVAL_MINUTES: u64 = 15;

/// Settings loaded once at startup from `~/.glnotes/config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Personal access token with at least the `read_api` scope.
    pub token: String,
    /// User whose assigned and review-requested merge requests are fetched.
    pub username: String,
    /// Folder the notes are written into.
    pub folder: PathBuf,
    /// Minutes between passes in watch mode.
    pub interval_minutes: u64,
    /// API endpoint; override for self-hosted instances.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            username: String::new(),
            folder: PathBuf::new(),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            bail!("config: token must be set (a GitLab personal access token with read_api scope)");
        }
        if self.username.is_empty() {
            bail!("config: username must be set");
        }
        if self.folder.as_os_str().is_empty() {
            bail!("config: folder must be set");
        }
        if self.interval_minutes == 0 {
            bail!("config: interval_minutes must be at least 1");
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".glnotes")
        .join("config.toml")
}

/// Load and validate the configuration file, failing with a hint when it
/// does not exist yet.
pub fn load_config() -> Result<Config> {
    let path = config_path();
    if !path.exists() {
        bail!(
            "No configuration found. Create {} with your GitLab token, username and notes folder",
            path.display()
        );
    }
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
