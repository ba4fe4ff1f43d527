//! Settings file for the `lull` CLI
//!
//! Stored as TOML, by default at `<config dir>/lull/config.toml`:
//! ```toml
//! [debounce]
//! delay_ms = 1000
//!
//! [search]
//! limit = 16
//! latency_ms = 0
//! max_term_len = 50
//! ```
//! A missing file means all defaults.

use anyhow::{Context, Result};
use debounce::DebounceConfig;
use search::catalog::DEFAULT_MAX_TERM_LEN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Every key accepted by `lull config get/set`
pub const KEYS: &[&str] = &[
    "debounce.delay_ms",
    "search.limit",
    "search.latency_ms",
    "search.max_term_len",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub debounce: DebounceConfig,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum results per search (a 4x4 grid by default)
    pub limit: usize,

    /// Simulated backend latency
    pub latency_ms: u64,

    /// Longest accepted search term, in characters
    pub max_term_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: 16,
            latency_ms: 0,
            max_term_len: DEFAULT_MAX_TERM_LEN,
        }
    }
}

impl Settings {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(0..=60_000).contains(&self.debounce.delay_ms) {
            anyhow::bail!(
                "debounce.delay_ms must be between 0 and 60000 (got {})",
                self.debounce.delay_ms
            );
        }
        if !(1..=100).contains(&self.search.limit) {
            anyhow::bail!(
                "search.limit must be between 1 and 100 (got {})",
                self.search.limit
            );
        }
        if self.search.latency_ms > 60_000 {
            anyhow::bail!(
                "search.latency_ms must be between 0 and 60000 (got {})",
                self.search.latency_ms
            );
        }
        if !(1..=500).contains(&self.search.max_term_len) {
            anyhow::bail!(
                "search.max_term_len must be between 1 and 500 (got {})",
                self.search.max_term_len
            );
        }
        Ok(())
    }

    /// Read a single value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "debounce.delay_ms" => self.debounce.delay_ms.to_string(),
            "search.limit" => self.search.limit.to_string(),
            "search.latency_ms" => self.search.latency_ms.to_string(),
            "search.max_term_len" => self.search.max_term_len.to_string(),
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                KEYS.join(", ")
            ),
        };
        Ok(value)
    }

    /// Set a single value by dotted key
    ///
    /// The settings are left untouched if the new value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();

        match key {
            "debounce.delay_ms" => {
                updated.debounce.delay_ms = value
                    .parse()
                    .context("Invalid value: must be an integer")?;
            }
            "search.limit" => {
                updated.search.limit = value
                    .parse()
                    .context("Invalid value: must be a positive integer")?;
            }
            "search.latency_ms" => {
                updated.search.latency_ms = value
                    .parse()
                    .context("Invalid value: must be a non-negative integer")?;
            }
            "search.max_term_len" => {
                updated.search.max_term_len = value
                    .parse()
                    .context("Invalid value: must be a positive integer")?;
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                KEYS.join(", ")
            ),
        }

        updated.validate().context("Invalid configuration value")?;
        *self = updated;
        Ok(())
    }
}

/// Resolve the settings file location
pub fn config_file_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("lull").join("config.toml"))
}

/// Load settings, falling back to defaults if the file does not exist
pub fn load(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: Settings = toml::from_str(&text)
        .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;

    Ok(settings)
}

/// Write settings atomically (temp file + rename)
pub fn save(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let text = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, text)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

/// Create the settings file with defaults if it is missing
///
/// Returns true if a file was created.
pub fn init_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save(path, &Settings::default())?;
    Ok(true)
}

/// Annotated example settings file
pub fn example_config() -> String {
    format!(
        r#"# Lull settings

[debounce]
# Quiet period after the last keystroke before searching (0-60000)
delay_ms = {delay_ms}

[search]
# Maximum results per search (1-100)
limit = {limit}
# Simulated backend response time (0-60000)
latency_ms = {latency_ms}
# Longest accepted search term in characters (1-500)
max_term_len = {max_term_len}
"#,
        delay_ms = DebounceConfig::default().delay_ms,
        limit = SearchSettings::default().limit,
        latency_ms = SearchSettings::default().latency_ms,
        max_term_len = SearchSettings::default().max_term_len,
    )
}
