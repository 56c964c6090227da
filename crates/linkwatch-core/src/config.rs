//! Run configuration and its resolution.
//!
//! Three settings drive a run: where the target list lives, which webhook
//! receives the failure report, and which channel it is posted to. Each is
//! looked up in the run-scoped [`ConfigInput`] first and in the environment
//! second. A setting absent from both is a fatal [`ConfigError::Missing`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found in env or input payload")]
    Missing(&'static str),

    #[error("failed to read input file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse input file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("unsupported input file format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}

/// A named setting a run needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    CsvUrl,
    WebhookUrl,
    Channel,
}

impl Setting {
    /// Key used both in the input payload and as the environment variable name.
    pub fn key(self) -> &'static str {
        match self {
            Setting::CsvUrl => "CSV_URL",
            Setting::WebhookUrl => "WEBHOOK_URL",
            Setting::Channel => "CHANNEL",
        }
    }
}

/// Run-scoped input payload. Every field is optional; gaps fall back to
/// the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigInput {
    #[serde(rename = "CSV_URL", default, skip_serializing_if = "Option::is_none")]
    pub csv_url: Option<String>,
    #[serde(rename = "WEBHOOK_URL", default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(rename = "CHANNEL", default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl ConfigInput {
    /// Load a payload from a `.json` or `.toml` file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_err = |reason: String| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        };

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string())),
            Some("toml") => toml::from_str(&content).map_err(|e| parse_err(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn merge(self, other: ConfigInput) -> Self {
        Self {
            csv_url: other.csv_url.or(self.csv_url),
            webhook_url: other.webhook_url.or(self.webhook_url),
            channel: other.channel.or(self.channel),
        }
    }

    fn get(&self, setting: Setting) -> Option<&str> {
        match setting {
            Setting::CsvUrl => self.csv_url.as_deref(),
            Setting::WebhookUrl => self.webhook_url.as_deref(),
            Setting::Channel => self.channel.as_deref(),
        }
    }
}

/// Read access to environment-provided settings.
///
/// Resolution takes this as an argument so the lookup stays explicit and
/// testable. [`ProcessEnv`] reads the real process environment.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Resolve one setting: a non-empty run-scoped value wins, otherwise any
/// value present in the environment is used.
pub fn resolve_setting(
    setting: Setting,
    input: &ConfigInput,
    env: &impl EnvSource,
) -> ConfigResult<String> {
    if let Some(value) = input.get(setting).filter(|v| !v.is_empty()) {
        debug!(key = setting.key(), "setting resolved from input");
        return Ok(value.to_string());
    }

    match env.var(setting.key()) {
        Some(value) => {
            debug!(key = setting.key(), "setting resolved from environment");
            Ok(value)
        }
        None => Err(ConfigError::Missing(setting.key())),
    }
}

/// Resolved settings for one run. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Location of the semicolon-delimited target list.
    pub csv_url: String,
    /// Incoming-webhook endpoint for failure reports.
    pub webhook_url: String,
    /// Channel name, without the leading `#`.
    pub channel: String,
}

impl RunConfig {
    /// Resolve every setting up front. Fails on the first missing one.
    pub fn resolve(input: &ConfigInput, env: &impl EnvSource) -> ConfigResult<Self> {
        Ok(Self {
            csv_url: resolve_setting(Setting::CsvUrl, input, env)?,
            webhook_url: resolve_setting(Setting::WebhookUrl, input, env)?,
            channel: resolve_setting(Setting::Channel, input, env)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_input() -> ConfigInput {
        ConfigInput {
            csv_url: Some("https://lists.example.com/domains.csv".to_string()),
            webhook_url: Some("https://hooks.example.com/T000".to_string()),
            channel: Some("ops".to_string()),
        }
    }

    #[test]
    fn input_value_overrides_env() {
        let env = env(&[("CSV_URL", "https://env.example.com/list.csv")]);
        let value = resolve_setting(Setting::CsvUrl, &full_input(), &env).unwrap();
        assert_eq!(value, "https://lists.example.com/domains.csv");
    }

    #[test]
    fn env_used_when_input_absent() {
        let env = env(&[("CHANNEL", "alerts")]);
        let value = resolve_setting(Setting::Channel, &ConfigInput::default(), &env).unwrap();
        assert_eq!(value, "alerts");
    }

    #[test]
    fn empty_input_value_falls_through_to_env() {
        let input = ConfigInput {
            channel: Some(String::new()),
            ..Default::default()
        };
        let env = env(&[("CHANNEL", "alerts")]);
        assert_eq!(resolve_setting(Setting::Channel, &input, &env).unwrap(), "alerts");
    }

    #[test]
    fn missing_everywhere_is_an_error() {
        let err = resolve_setting(Setting::WebhookUrl, &ConfigInput::default(), &env(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("WEBHOOK_URL")));
        assert_eq!(err.to_string(), "WEBHOOK_URL not found in env or input payload");
    }

    #[test]
    fn resolve_mixes_sources() {
        let input = ConfigInput {
            csv_url: Some("https://lists.example.com/domains.csv".to_string()),
            ..Default::default()
        };
        let env = env(&[("WEBHOOK_URL", "https://hooks.example.com/T1"), ("CHANNEL", "ops")]);

        let cfg = RunConfig::resolve(&input, &env).unwrap();
        assert_eq!(cfg.csv_url, "https://lists.example.com/domains.csv");
        assert_eq!(cfg.webhook_url, "https://hooks.example.com/T1");
        assert_eq!(cfg.channel, "ops");
    }

    #[test]
    fn resolve_fails_when_channel_missing() {
        let input = ConfigInput {
            channel: None,
            ..full_input()
        };
        let err = RunConfig::resolve(&input, &env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CHANNEL")));
    }

    #[test]
    fn merge_prefers_overlay() {
        let base = full_input();
        let overlay = ConfigInput {
            channel: Some("incidents".to_string()),
            ..Default::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.channel.as_deref(), Some("incidents"));
        assert_eq!(
            merged.csv_url.as_deref(),
            Some("https://lists.example.com/domains.csv")
        );
    }

    #[test]
    fn parse_json_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(
            &path,
            r#"{"CSV_URL": "https://lists.example.com/a.csv", "CHANNEL": "ops"}"#,
        )
        .unwrap();

        let input = ConfigInput::from_file(&path).unwrap();
        assert_eq!(input.csv_url.as_deref(), Some("https://lists.example.com/a.csv"));
        assert_eq!(input.channel.as_deref(), Some("ops"));
        assert!(input.webhook_url.is_none());
    }

    #[test]
    fn parse_toml_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.toml");
        std::fs::write(&path, "WEBHOOK_URL = \"https://hooks.example.com/T2\"\n").unwrap();

        let input = ConfigInput::from_file(&path).unwrap();
        assert_eq!(input.webhook_url.as_deref(), Some("https://hooks.example.com/T2"));
    }

    #[test]
    fn fixture_payloads_resolve() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures");

        let json = ConfigInput::from_file(&fixtures.join("input.json")).unwrap();
        let cfg = RunConfig::resolve(&json, &env(&[])).unwrap();
        assert_eq!(cfg.channel, "ops-alerts");

        // The TOML fixture has no webhook; the environment fills the gap.
        let toml = ConfigInput::from_file(&fixtures.join("input.toml")).unwrap();
        let cfg = RunConfig::resolve(&toml, &env(&[("WEBHOOK_URL", "https://hooks.example.com/T9")]))
            .unwrap();
        assert_eq!(cfg.csv_url, "https://lists.example.com/domains.csv");
        assert_eq!(cfg.webhook_url, "https://hooks.example.com/T9");
    }

    #[test]
    fn unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.yaml");
        std::fs::write(&path, "CHANNEL: ops\n").unwrap();

        let err = ConfigInput::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
