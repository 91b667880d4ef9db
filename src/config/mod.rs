use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::constants::*;

/// Client configuration with sensible defaults.
///
/// Can be overridden via ~/.config/cleverchat/config.toml, then by the
/// `CLEVERBOT_API_KEY` environment variable, then by CLI flags.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reply endpoint; query parameters are appended per request
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Transcript lines kept by the interactive chat
    pub max_history: usize,
    /// API key, if one was found in the config file or environment
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_history: DEFAULT_MAX_HISTORY,
            api_key: None,
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional — missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    max_history: Option<usize>,
    api_key: Option<String>,
}

impl Config {
    /// Load config from ~/.config/cleverchat/config.toml and the environment.
    ///
    /// `~/.config/cleverchat/.env` is loaded first so a key kept there behaves
    /// like an exported variable.
    pub fn load() -> Self {
        let _ = dotenvy::from_path(env_file_path());
        Self::load_from(&config_file_path()).with_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Load config from the given TOML file, falling back to defaults for any
    /// missing fields. If the file doesn't exist, returns pure defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Config::default(),
        };

        match toml::from_str::<FileConfig>(&content) {
            Ok(fc) => Config::default().merge(fc),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                Config::default()
            }
        }
    }

    /// Override the API key when `key` is present and non-empty.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(k) = key.filter(|k| !k.is_empty()) {
            self.api_key = Some(k);
        }
        self
    }

    fn merge(mut self, file_config: FileConfig) -> Self {
        if let Some(v) = file_config.base_url {
            if !v.is_empty() {
                self.base_url = v;
            }
        }
        if let Some(v) = file_config.timeout_secs {
            self.timeout_secs = v.max(MIN_TIMEOUT_SECS);
        }
        if let Some(v) = file_config.connect_timeout_secs {
            self.connect_timeout_secs = v.max(MIN_TIMEOUT_SECS);
        }
        if let Some(v) = file_config.max_history {
            self.max_history = v.max(MIN_MAX_HISTORY);
        }
        self.with_api_key(file_config.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert_eq!(c.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(c.max_history, DEFAULT_MAX_HISTORY);
        assert!(c.api_key.is_none());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            base_url = "http://localhost:9000/getreply"
            timeout_secs = 5
            max_history = 10
            api_key = "file-key"
            "#,
        );
        let c = Config::load_from(file.path());
        assert_eq!(c.base_url, "http://localhost:9000/getreply");
        assert_eq!(c.timeout_secs, 5);
        assert_eq!(c.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
        assert_eq!(c.max_history, 10);
        assert_eq!(c.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    fn values_are_clamped() {
        let file = write_config("timeout_secs = 0\nconnect_timeout_secs = 0\nmax_history = 0\n");
        let c = Config::load_from(file.path());
        assert_eq!(c.timeout_secs, MIN_TIMEOUT_SECS);
        assert_eq!(c.connect_timeout_secs, MIN_TIMEOUT_SECS);
        assert_eq!(c.max_history, MIN_MAX_HISTORY);
    }

    #[test]
    fn empty_strings_ignored() {
        let file = write_config("base_url = \"\"\napi_key = \"\"\n");
        let c = Config::load_from(file.path());
        assert_eq!(c.base_url, DEFAULT_BASE_URL);
        assert!(c.api_key.is_none());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let file = write_config("timeout_secs = \"soon\"\n[[[");
        let c = Config::load_from(file.path());
        assert_eq!(c.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn env_key_overrides_file_key() {
        let file = write_config("api_key = \"file-key\"\n");
        let c = Config::load_from(file.path()).with_api_key(Some("env-key".into()));
        assert_eq!(c.api_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn absent_env_key_keeps_file_key() {
        let file = write_config("api_key = \"file-key\"\n");
        let c = Config::load_from(file.path()).with_api_key(None);
        assert_eq!(c.api_key.as_deref(), Some("file-key"));
    }
}
