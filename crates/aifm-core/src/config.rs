use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::ConfigError;
use crate::persistence::default_collection_path;
use crate::state::StoreMode;

pub const DEFAULT_GATEWAY_URL: &str = "https://localhost:7188/api/NewItems";
pub const DEFAULT_INTENT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_INTENT_MODEL: &str = "x-ai/grok-4.1-fast";
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub mode: StoreMode,
    pub gateway: GatewayConfig,
    pub intent: IntentConfig,
    pub storage: StorageConfig,
    pub speech: SpeechConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: StoreMode::Virtual,
            gateway: GatewayConfig::default(),
            intent: IntentConfig::default(),
            storage: StorageConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    /// The development gateway serves a self-signed certificate.
    pub accept_invalid_certs: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            accept_invalid_certs: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct IntentConfig {
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the bearer token.
    pub api_key_env: String,
    pub max_tokens: u32,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_INTENT_ENDPOINT.to_string(),
            model: DEFAULT_INTENT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            max_tokens: 100,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_collection_path)
    }
}

/// External transcriber: a program that records one utterance and prints
/// the transcript on stdout.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SpeechConfig {
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aifm")
            .join("config.toml")
    }

    /// A missing file yields the defaults; anything present must parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::Config;
    use super::DEFAULT_GATEWAY_URL;
    use crate::errors::ConfigError;
    use crate::state::StoreMode;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tmpdir");
        let config = Config::load(&dir.path().join("config.toml")).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.gateway.base_url, DEFAULT_GATEWAY_URL);
        assert_eq!(config.intent.max_tokens, 100);
        assert_eq!(config.mode, StoreMode::Virtual);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = Config::from_toml(
            r#"
mode = "remote"

[gateway]
base_url = "http://127.0.0.1:5000/api/NewItems"

[speech]
command = "whisper-once"
args = ["--lang", "en"]
"#,
        )
        .expect("parse");

        assert_eq!(config.mode, StoreMode::Remote);
        assert_eq!(config.gateway.base_url, "http://127.0.0.1:5000/api/NewItems");
        assert!(config.gateway.accept_invalid_certs);
        assert_eq!(config.intent, Config::default().intent);
        assert_eq!(config.speech.command.as_deref(), Some("whisper-once"));
        assert_eq!(config.speech.args, vec!["--lang".to_string(), "en".to_string()]);
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "mode = 3").expect("write");
        match Config::load(&path) {
            Err(ConfigError::Parse { path: reported, .. }) => {
                assert!(reported.ends_with("config.toml"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
