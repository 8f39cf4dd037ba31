use std::{collections::HashMap, fs};

use shared::domain::DEFAULT_WINDOW;
use tracing::warn;

use crate::{normalize_server_url, RequestFailure, DEFAULT_SERVER_URL};

pub const CONFIG_FILE: &str = "live_data.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub default_window: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            default_window: DEFAULT_WINDOW.into(),
        }
    }
}

/// Defaults, then `live_data.toml` in the working directory, then environment.
/// Command-line flags are layered on top by the binaries.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        settings.apply_file(&raw);
    }
    settings.apply_env(|key| std::env::var(key).ok());

    settings
}

impl Settings {
    pub fn apply_file(&mut self, raw: &str) {
        let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => file_cfg,
            Err(err) => {
                warn!("ignoring unreadable {CONFIG_FILE}: {err}");
                return;
            }
        };

        if let Some(v) = file_cfg.get("server_url") {
            self.server_url = v.clone();
        }
        if let Some(v) = file_cfg.get("default_window") {
            self.default_window = v.clone();
        }
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("LIVE_DATA_SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = lookup("APP__SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = lookup("LIVE_DATA_DEFAULT_WINDOW") {
            self.default_window = v;
        }
    }

    pub fn with_overrides(mut self, server_url: Option<String>, window: Option<String>) -> Self {
        if let Some(v) = server_url {
            self.server_url = v;
        }
        if let Some(v) = window {
            self.default_window = v;
        }
        self
    }

    pub fn validated(mut self) -> Result<Self, RequestFailure> {
        self.server_url = normalize_server_url(&self.server_url)?;
        self.default_window = self.default_window.trim().to_string();
        Ok(self)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
