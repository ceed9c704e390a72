use std::{fs, path::Path};

use serde::Deserialize;
use tracing::warn;

use crate::persistence::DEFAULT_SLOT_KEY;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database_url: String,
    pub slot_key: String,
    pub seed_demo_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/contracts.db".into(),
            slot_key: DEFAULT_SLOT_KEY.into(),
            seed_demo_data: true,
        }
    }
}

/// Keys left out of the file keep their defaults.
pub fn load_settings(path: impl AsRef<Path>) -> Settings {
    let path = path.as_ref();
    let Ok(raw) = fs::read_to_string(path) else {
        return Settings::default();
    };

    match toml::from_str::<Settings>(&raw) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unparsable settings file");
            Settings::default()
        }
    }
}

pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
