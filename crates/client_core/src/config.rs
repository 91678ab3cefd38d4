use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use url::Url;

use crate::transport::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SETTINGS_FILE: &str = "esg_client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub history_limit: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Defaults, then `esg_client.toml` (or `path`), then environment overrides.
pub fn load_settings(path: Option<&Path>) -> ClientSettings {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

    let mut settings = ClientSettings::default();
    if let Ok(raw) = fs::read_to_string(&path) {
        apply_file_overrides(&mut settings, &raw);
    }

    let env: HashMap<String, String> = std::env::vars().collect();
    apply_env_overrides(&mut settings, &env);
    settings
}

fn apply_file_overrides(settings: &mut ClientSettings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        tracing::warn!("ignoring unparseable client settings file");
        return;
    };

    if let Some(v) = file_cfg.get("base_url").and_then(toml::Value::as_str) {
        settings.base_url = v.to_string();
    }
    match file_cfg.get("history_limit") {
        Some(toml::Value::Integer(n)) => {
            if let Ok(limit) = u32::try_from(*n) {
                settings.history_limit = limit;
            }
        }
        Some(toml::Value::String(s)) => {
            if let Ok(limit) = s.parse::<u32>() {
                settings.history_limit = limit;
            }
        }
        _ => {}
    }
}

fn apply_env_overrides(settings: &mut ClientSettings, env: &HashMap<String, String>) {
    if let Some(v) = env.get("ESG_API_BASE_URL") {
        settings.base_url = v.clone();
    }
    if let Some(v) = env.get("APP__BASE_URL") {
        settings.base_url = v.clone();
    }

    if let Some(v) = env.get("APP__HISTORY_LIMIT") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.history_limit = parsed;
        }
    }
}

/// Checks that `raw` is an absolute http(s) URL and strips any trailing slash.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).with_context(|| format!("invalid base url '{trimmed}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!(
            "unsupported scheme '{}' in base url '{trimmed}'",
            url.scheme()
        ));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
