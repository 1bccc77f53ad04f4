//! Configuration loading, validation, and management for alterego.
//!
//! Loads configuration from `~/.alterego/config.toml` (or an explicit path)
//! with environment variable overrides. Validates all settings at startup.

use alterego_core::UnknownToolPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.alterego/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default completion provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Max tokens per completion round (provider default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_max_tokens: Option<u32>,

    /// Who the assistant impersonates
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Conversation driver settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Push notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.7
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("persona", &self.persona)
            .field("agent", &self.agent)
            .field("gateway", &self.gateway)
            .field("notifications", &self.notifications)
            .field("providers", &self.providers)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Full name of the impersonated person
    #[serde(default = "default_persona_name")]
    pub name: String,

    /// Profile document (PDF or text)
    #[serde(default = "default_profile_path")]
    pub profile_path: PathBuf,

    /// Optional separate summary document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_path: Option<PathBuf>,

    /// GitHub profile link included in the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

fn default_persona_name() -> String {
    "Pranav Hole".into()
}
fn default_profile_path() -> PathBuf {
    PathBuf::from("me/linkedin.pdf")
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            profile_path: default_profile_path(),
            summary_path: None,
            github: Some("https://github.com/pranavhole".into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Completion rounds allowed per request before giving up
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// How to answer tool names the registry doesn't know
    #[serde(default)]
    pub unknown_tool_policy: UnknownToolPolicy,
}

fn default_max_rounds() -> u32 {
    10
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            unknown_tool_policy: UnknownToolPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// CORS origins; `"*"` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_allowed_origins() -> Vec<String> {
    vec!["*".into()]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushover_user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushover_token: Option<String>,

    #[serde(default = "default_pushover_url")]
    pub pushover_url: String,
}

fn default_pushover_url() -> String {
    "https://api.pushover.net/1/messages.json".into()
}

impl NotificationConfig {
    /// Both Pushover credentials are present.
    pub fn has_pushover(&self) -> bool {
        self.pushover_user.is_some() && self.pushover_token.is_some()
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            pushover_user: None,
            pushover_token: None,
            pushover_url: default_pushover_url(),
        }
    }
}

impl std::fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("pushover_user", &redact(&self.pushover_user))
            .field("pushover_token", &redact(&self.pushover_token))
            .field("pushover_url", &self.pushover_url)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.alterego/config.toml).
    ///
    /// Environment variables override file values:
    /// - `ALTEREGO_API_KEY`, then `OPENAI_API_KEY`, then `OPENROUTER_API_KEY` (only when no key is configured)
    /// - `ALTEREGO_PROVIDER`, `ALTEREGO_MODEL`, `ALTEREGO_PROFILE`
    /// - `PUSHOVER_USER`, `PUSHOVER_TOKEN`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        Self::load_with_env(&config_path)
    }

    /// Load from an explicit path, then apply environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if self.api_key.is_none() {
            self.api_key = env("ALTEREGO_API_KEY")
                .or_else(|| env("OPENAI_API_KEY"))
                .or_else(|| env("OPENROUTER_API_KEY"));
        }

        if let Some(provider) = env("ALTEREGO_PROVIDER") {
            self.default_provider = provider;
        }

        if let Some(model) = env("ALTEREGO_MODEL") {
            self.default_model = model;
        }

        if let Some(profile) = env("ALTEREGO_PROFILE") {
            self.persona.profile_path = PathBuf::from(profile);
        }

        if let Some(user) = env("PUSHOVER_USER") {
            self.notifications.pushover_user = Some(user);
        }

        if let Some(token) = env("PUSHOVER_TOKEN") {
            self.notifications.pushover_token = Some(token);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".alterego")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.agent.max_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_rounds must be at least 1".into(),
            ));
        }

        if self.persona.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "persona.name must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
            || self
                .providers
                .get(&self.default_provider)
                .is_some_and(|p| p.api_key.is_some())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: None,
            persona: PersonaConfig::default(),
            agent: AgentConfig::default(),
            gateway: GatewayConfig::default(),
            notifications: NotificationConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.default_model, "gpt-4o-mini");
        assert_eq!(config.gateway.port, 8000);
        assert_eq!(config.agent.max_rounds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_provider, config.default_provider);
        assert_eq!(parsed.persona.name, config.persona.name);
        assert_eq!(parsed.gateway.allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            default_temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_rounds_rejected() {
        let mut config = AppConfig::default();
        config.agent.max_rounds = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_rounds"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().default_provider, "openai");
    }

    #[test]
    fn parses_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
default_model = "gpt-4o"

[persona]
name = "Ada Lovelace"
profile_path = "profiles/ada.md"

[agent]
max_rounds = 3
unknown_tool_policy = "strict"

[notifications]
pushover_user = "u-123"
pushover_token = "t-456"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.default_model, "gpt-4o");
        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.persona.name, "Ada Lovelace");
        assert_eq!(config.persona.profile_path, PathBuf::from("profiles/ada.md"));
        assert_eq!(config.agent.max_rounds, 3);
        assert_eq!(config.agent.unknown_tool_policy, UnknownToolPolicy::Strict);
        assert!(config.notifications.has_pushover());
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "default_model = [not toml").unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| match key {
            "OPENAI_API_KEY" => Some("sk-test".into()),
            "ALTEREGO_MODEL" => Some("gpt-4.1".into()),
            "ALTEREGO_PROFILE" => Some("/srv/me.pdf".into()),
            "PUSHOVER_USER" => Some("u".into()),
            "PUSHOVER_TOKEN" => Some("t".into()),
            _ => None,
        });

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.default_model, "gpt-4.1");
        assert_eq!(config.persona.profile_path, PathBuf::from("/srv/me.pdf"));
        assert!(config.notifications.has_pushover());
    }

    #[test]
    fn configured_key_wins_over_env() {
        let mut config = AppConfig {
            api_key: Some("from-file".into()),
            ..AppConfig::default()
        };
        config.apply_env_overrides(|key| (key == "ALTEREGO_API_KEY").then(|| "from-env".into()));
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut config = AppConfig {
            api_key: Some("sk-secret".into()),
            ..AppConfig::default()
        };
        config.notifications.pushover_token = Some("tok-secret".into());

        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("tok-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
