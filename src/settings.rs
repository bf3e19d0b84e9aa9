use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::services::submission::DEFAULT_SUBMIT_DELAY_MS;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const SETTINGS_PATH_VAR: &str = "FOOD_E_SETTINGS";

/// Runtime configuration. Values come from an optional JSON file, then
/// environment variables override them. The API key is only ever read from
/// the environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub model: String,
    pub api_base: String,
    pub submit_delay_ms: u64,
    pub offline: bool,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            api_base: DEFAULT_API_BASE.into(),
            submit_delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            offline: false,
            api_key: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let base = match env::var(SETTINGS_PATH_VAR) {
            Ok(path) => Self::from_file(&PathBuf::from(path))?,
            Err(_) => Self::default(),
        };
        Ok(base.with_overrides(|key| env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    /// Applies environment-style overrides. Unparseable values are logged and
    /// ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api_key = lookup("API_KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if let Some(model) = lookup("FOOD_E_MODEL").filter(|value| !value.trim().is_empty()) {
            self.model = model.trim().to_string();
        }

        if let Some(raw) = lookup("FOOD_E_SUBMIT_DELAY_MS") {
            match raw.trim().parse() {
                Ok(delay) => self.submit_delay_ms = delay,
                Err(err) => warn!("Invalid FOOD_E_SUBMIT_DELAY_MS value {raw:?}: {err}"),
            }
        }

        if let Some(raw) = lookup("FOOD_E_OFFLINE") {
            self.offline = raw == "1" || raw.eq_ignore_ascii_case("true");
        }

        if self.api_key.is_none() && !self.offline {
            info!("No API_KEY set; image analysis will be unavailable unless FOOD_E_OFFLINE=1");
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_defaults() {
        let settings = Settings::default().with_overrides(lookup(&[
            ("GEMINI_API_KEY", " abc "),
            ("FOOD_E_MODEL", "gemini-pro-vision"),
            ("FOOD_E_SUBMIT_DELAY_MS", "0"),
            ("FOOD_E_OFFLINE", "true"),
        ]));

        assert_eq!(settings.api_key.as_deref(), Some("abc"));
        assert_eq!(settings.model, "gemini-pro-vision");
        assert_eq!(settings.submit_delay_ms, 0);
        assert!(settings.offline);
    }

    #[test]
    fn api_key_wins_over_gemini_key() {
        let settings = Settings::default()
            .with_overrides(lookup(&[("API_KEY", "primary"), ("GEMINI_API_KEY", "other")]));
        assert_eq!(settings.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn bad_delay_keeps_default() {
        let settings =
            Settings::default().with_overrides(lookup(&[("FOOD_E_SUBMIT_DELAY_MS", "soon")]));
        assert_eq!(settings.submit_delay_ms, DEFAULT_SUBMIT_DELAY_MS);
        assert_eq!(settings.api_key, None);
    }

    #[test]
    fn file_values_fill_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "submitDelayMs": 25, "offline": true }}"#).unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.submit_delay_ms, 25);
        assert!(settings.offline);
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::from_file(&dir.path().join("absent.json")).is_err());
    }
}
