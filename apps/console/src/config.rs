use std::{fs, path::Path};

use anyhow::Result;
use client_core::normalize_server_url;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    log_filter: Option<String>,
}

pub fn load_settings() -> (Settings, Option<String>) {
    load_settings_with(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file at `path` if it parses, then the environment.
/// A malformed file is skipped and described in the returned warning, which
/// the caller logs once the subscriber is installed.
pub fn load_settings_with(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> (Settings, Option<String>) {
    let mut settings = Settings::default();
    let mut warning = None;

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.server_url {
                    settings.server_url = v;
                }
                if let Some(v) = file_cfg.log_filter {
                    settings.log_filter = v;
                }
            }
            Err(err) => {
                warning = Some(format!("ignoring malformed {}: {err}", path.display()));
            }
        }
    }

    if let Some(v) = env("USER_API_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    (settings, warning)
}

/// The command-line flag wins over every other source.
pub fn resolve_server_url(settings: &Settings, cli_override: Option<&str>) -> Result<String> {
    normalize_server_url(cli_override.unwrap_or(&settings.server_url))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
