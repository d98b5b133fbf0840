use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HarvestError, Result};
use crate::input::DEFAULT_URLS_FILE;

/// CSS selector for the lyrics block on a rendered song page.
pub const LYRICS_SELECTOR: &str = "section.w-full > div:nth-child(1)";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub urls_file: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self { Self { urls_file: PathBuf::from(DEFAULT_URLS_FILE) } }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the category folders (`HTML/`, `Audio/`, ...) are created in.
    pub root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self { Self { root: PathBuf::from(".") } }
}

/// Browser rendering parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub navigation_timeout_secs: u64,
    pub selector_timeout_secs: u64,
    pub lyrics_selector: String,
    /// Chrome/Chromium executable; auto-detected when unset.
    pub chrome_executable: Option<PathBuf>,
    pub headless: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_secs: 60,
            selector_timeout_secs: 20,
            lyrics_selector: LYRICS_SELECTOR.to_string(),
            chrome_executable: None,
            headless: true,
        }
    }
}

impl RenderConfig {
    pub fn navigation_timeout(&self) -> Duration { Duration::from_secs(self.navigation_timeout_secs) }
    pub fn selector_timeout(&self) -> Duration { Duration::from_secs(self.selector_timeout_secs) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 15, user_agent: concat!("suno-harvest/", env!("CARGO_PKG_VERSION")).to_string() }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

/// Optional `--config` TOML file. Every section and field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub render: RenderConfig,
    pub http: HttpConfig,
}

impl HarvestConfig {
    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| HarvestError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| HarvestError::fs(path, e))?;
        Self::from_toml(&data)
    }
}
