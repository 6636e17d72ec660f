use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

use crate::presentation::Strings;

pub const DEFAULT_SETTINGS_FILE: &str = "members.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Load the next page once the visible bottom offset drops below this.
    pub load_more_threshold: f64,
    pub command_queue_capacity: usize,
    pub strings: Strings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            load_more_threshold: 40.0,
            command_queue_capacity: 64,
            strings: Strings::default(),
        }
    }
}

/// Reads `members.toml` from the working directory when present, then applies
/// `MEMBERS__*` environment overrides. A malformed file is ignored.
pub fn load_settings() -> Settings {
    let mut settings = fs::read_to_string(DEFAULT_SETTINGS_FILE)
        .ok()
        .and_then(|raw| toml::from_str::<Settings>(&raw).ok())
        .unwrap_or_default();
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Like [`load_settings`] but for an explicit file, which must exist and parse.
pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let mut settings: Settings = toml::from_str(&raw)
        .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("MEMBERS__LOAD_MORE_THRESHOLD") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.load_more_threshold = parsed;
        }
    }
    if let Some(v) = lookup("MEMBERS__COMMAND_QUEUE_CAPACITY") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.command_queue_capacity = parsed.max(1);
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
