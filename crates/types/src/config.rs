//! Configuration types.
//!
//! Settings are plain `KEY = value` strings. They are looked up through a
//! [`SettingsLookup`], usually a settings file layered over the process
//! environment, and validated all at once so a single report lists every
//! problem.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Light node JSON-RPC endpoint.
pub const RPC_URL_KEY: &str = "CELESTIA_LIGHT_NODE_RPC_URL";

/// Namespace blobs are posted under.
pub const NAMESPACE_KEY: &str = "CELESTIA_AI_AGENT_NAMESPACE";

/// Gas price attached to every submission.
pub const DEFAULT_TX_FEE_KEY: &str = "CELESTIA_DEFAULT_TX_FEE";

/// Pre-provisioned auth token. When set, the node CLI is never invoked.
pub const AUTH_TOKEN_KEY: &str = "CELESTIA_AUTH_TOKEN";

/// Node type passed to `celestia <type> auth admin`.
pub const NODE_TYPE_KEY: &str = "NODE_TYPE";

/// Network passed to `--p2p.network`.
pub const CHAIN_ID_KEY: &str = "CHAIN_ID";

/// Docker container the node CLI runs in, if any.
pub const NODE_CONTAINER_KEY: &str = "CELESTIA_NODE_CONTAINER";

/// Block explorer base URL.
pub const EXPLORER_URL_KEY: &str = "CELESTIA_EXPLORER_URL";

/// HTTP request timeout in milliseconds (`0` disables it).
pub const RPC_TIMEOUT_KEY: &str = "CELESTIA_RPC_TIMEOUT_MS";

/// Auth token fetch timeout in milliseconds (`0` disables it).
pub const AUTH_TIMEOUT_KEY: &str = "CELESTIA_AUTH_TIMEOUT_MS";

/// Celenium explorer for the Mocha testnet, used when no explorer is set.
pub const DEFAULT_EXPLORER_URL: &str = "https://mocha-4.celenium.io";

const DEFAULT_NODE_TYPE: &str = "light";
const DEFAULT_CHAIN_ID: &str = "mocha-4";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// A source of raw setting values.
pub trait SettingsLookup {
    /// Look up a single setting by key.
    fn setting(&self, key: &str) -> Option<String>;
}

impl SettingsLookup for HashMap<String, String> {
    fn setting(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: SettingsLookup + ?Sized> SettingsLookup for &T {
    fn setting(&self, key: &str) -> Option<String> {
        (**self).setting(key)
    }
}

/// Settings read from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsLookup for EnvSettings {
    fn setting(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Two lookups stacked: `primary` wins unless its value is missing or empty.
#[derive(Debug, Clone, Default)]
pub struct Layered<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> Layered<P, F> {
    /// Stack `primary` over `fallback`.
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: SettingsLookup, F: SettingsLookup> SettingsLookup for Layered<P, F> {
    fn setting(&self, key: &str) -> Option<String> {
        self.primary
            .setting(key)
            .filter(|value| !value.is_empty())
            .or_else(|| self.fallback.setting(key))
    }
}

/// Settings loaded from a TOML file of top-level `KEY = value` pairs.
#[derive(Debug, Clone, Default)]
pub struct FileSettings {
    values: HashMap<String, String>,
}

impl FileSettings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not TOML or a value is a table,
    /// array or datetime.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content)?;

        let mut values = HashMap::with_capacity(table.len());
        for (key, value) in table {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                _ => return Err(ConfigError::UnsupportedValue { key }),
            };
            values.insert(key, value);
        }

        Ok(Self { values })
    }
}

impl SettingsLookup for FileSettings {
    fn setting(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Light node connection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Light node JSON-RPC endpoint.
    pub rpc_url: String,

    /// Namespace identifier, passed through untouched.
    pub namespace: String,

    /// Gas price for submissions (in utia). Never negative.
    pub default_tx_fee: f64,
}

impl ConnectionConfig {
    /// Validate the three connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every missing or invalid field.
    pub fn from_settings(settings: &impl SettingsLookup) -> Result<Self, ConfigError> {
        let mut report = ValidationReport::default();
        match Self::collect(settings, &mut report) {
            Some(config) if report.is_empty() => Ok(config),
            _ => Err(ConfigError::Invalid(report)),
        }
    }

    fn collect(settings: &impl SettingsLookup, report: &mut ValidationReport) -> Option<Self> {
        let rpc_url = required(
            settings,
            RPC_URL_KEY,
            "Celestia Light Node RPC URL is required",
            report,
        );
        let namespace = required(
            settings,
            NAMESPACE_KEY,
            "Celestia AI Agent Namespace is required",
            report,
        );
        let default_tx_fee = fee(settings, report);

        Some(Self {
            rpc_url: rpc_url?,
            namespace: namespace?,
            default_tx_fee: default_tx_fee?,
        })
    }
}

/// Where the bearer token for the light node comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthSource {
    /// A pre-provisioned token.
    Static(String),

    /// Minted on demand by `celestia <node_type> auth admin`.
    NodeCli {
        /// Node type, e.g. `light`.
        node_type: String,

        /// Network passed to `--p2p.network`.
        network: String,

        /// Run the CLI through `docker exec` in this container.
        container: Option<String>,
    },
}

impl fmt::Debug for AuthSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(_) => f.debug_tuple("Static").field(&"<redacted>").finish(),
            Self::NodeCli {
                node_type,
                network,
                container,
            } => f
                .debug_struct("NodeCli")
                .field("node_type", node_type)
                .field("network", network)
                .field("container", container)
                .finish(),
        }
    }
}

/// Everything the submitter needs, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitterConfig {
    /// Light node connection.
    pub connection: ConnectionConfig,

    /// Auth token source.
    pub auth: AuthSource,

    /// Block explorer base URL.
    pub explorer_url: String,

    /// Bound on the HTTP call, `None` for unbounded.
    pub rpc_timeout: Option<Duration>,

    /// Bound on the token fetch, `None` for unbounded.
    pub auth_timeout: Option<Duration>,
}

impl SubmitterConfig {
    /// Validate all settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every missing or invalid field.
    pub fn from_settings(settings: &impl SettingsLookup) -> Result<Self, ConfigError> {
        let mut report = ValidationReport::default();

        let connection = ConnectionConfig::collect(settings, &mut report);
        let rpc_timeout = timeout(settings, RPC_TIMEOUT_KEY, &mut report);
        let auth_timeout = timeout(settings, AUTH_TIMEOUT_KEY, &mut report);

        let connection = match connection {
            Some(connection) if report.is_empty() => connection,
            _ => return Err(ConfigError::Invalid(report)),
        };

        let auth = match optional(settings, AUTH_TOKEN_KEY) {
            Some(token) => AuthSource::Static(token),
            None => AuthSource::NodeCli {
                node_type: optional(settings, NODE_TYPE_KEY)
                    .unwrap_or_else(|| DEFAULT_NODE_TYPE.to_string()),
                network: optional(settings, CHAIN_ID_KEY)
                    .unwrap_or_else(|| DEFAULT_CHAIN_ID.to_string()),
                container: optional(settings, NODE_CONTAINER_KEY),
            },
        };

        Ok(Self {
            connection,
            auth,
            explorer_url: optional(settings, EXPLORER_URL_KEY)
                .unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string()),
            rpc_timeout,
            auth_timeout,
        })
    }
}

fn optional(settings: &impl SettingsLookup, key: &str) -> Option<String> {
    settings
        .setting(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(
    settings: &impl SettingsLookup,
    key: &str,
    message: &str,
    report: &mut ValidationReport,
) -> Option<String> {
    let value = optional(settings, key);
    if value.is_none() {
        report.push(key, message);
    }
    value
}

fn fee(settings: &impl SettingsLookup, report: &mut ValidationReport) -> Option<f64> {
    let Some(raw) = optional(settings, DEFAULT_TX_FEE_KEY) else {
        report.push(DEFAULT_TX_FEE_KEY, "Default Transaction Fee is required");
        return None;
    };

    match raw.parse::<f64>() {
        Ok(value) if !value.is_finite() => {
            report.push(DEFAULT_TX_FEE_KEY, format!("expected a finite number, received {raw:?}"));
            None
        }
        Ok(value) if value < 0.0 => {
            report.push(DEFAULT_TX_FEE_KEY, "Default Transaction Fee must not be negative");
            None
        }
        Ok(value) => Some(value),
        Err(_) => {
            report.push(DEFAULT_TX_FEE_KEY, format!("expected a number, received {raw:?}"));
            None
        }
    }
}

fn timeout(
    settings: &impl SettingsLookup,
    key: &str,
    report: &mut ValidationReport,
) -> Option<Duration> {
    let Some(raw) = optional(settings, key) else {
        return Some(Duration::from_millis(DEFAULT_TIMEOUT_MS));
    };

    match raw.parse::<u64>() {
        Ok(0) => None,
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            report.push(
                key,
                format!("expected a non-negative integer number of milliseconds, received {raw:?}"),
            );
            None
        }
    }
}

/// A single missing or invalid setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Setting key.
    pub field: String,

    /// What is wrong with it.
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every issue found while validating settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ConfigIssue>,
}

impl ValidationReport {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.issues.push(ConfigIssue {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// The issues, in the order the settings were checked.
    #[must_use]
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    /// Whether no issues were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether `field` has at least one issue.
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Celestia configuration validation failed:")?;
        for issue in &self.issues {
            write!(f, "\n{issue}")?;
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading a settings file.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error in a settings file.
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A settings file value that cannot be read as a plain setting.
    #[error("unsupported value for setting {key}: expected a string, number or boolean")]
    UnsupportedValue {
        /// Setting key.
        key: String,
    },

    /// One or more settings are missing or invalid.
    #[error("{0}")]
    Invalid(ValidationReport),
}

impl ConfigError {
    /// The validation report, if this is a validation failure.
    #[must_use]
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Invalid(report) => Some(report),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn valid() -> HashMap<String, String> {
        settings(&[
            (RPC_URL_KEY, "http://localhost:26658"),
            (NAMESPACE_KEY, "0f0f0f0f0f0f0f0f0f0f"),
            (DEFAULT_TX_FEE_KEY, "0.002"),
        ])
    }

    #[test]
    fn test_valid_connection_config() {
        let config = ConnectionConfig::from_settings(&valid()).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:26658");
        assert_eq!(config.namespace, "0f0f0f0f0f0f0f0f0f0f");
        assert!((config.default_tx_fee - 0.002).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_fee_is_reported() {
        let mut values = valid();
        values.remove(DEFAULT_TX_FEE_KEY);

        let err = ConnectionConfig::from_settings(&values).unwrap_err();
        let report = err.report().unwrap();
        assert_eq!(report.issues().len(), 1);
        assert!(report.mentions(DEFAULT_TX_FEE_KEY));
        assert!(err.to_string().contains("CELESTIA_DEFAULT_TX_FEE"));
    }

    #[test]
    fn test_all_issues_are_aggregated() {
        let err = SubmitterConfig::from_settings(&settings(&[
            (DEFAULT_TX_FEE_KEY, "cheap"),
            (RPC_TIMEOUT_KEY, "soon"),
        ]))
        .unwrap_err();

        let report = err.report().unwrap();
        assert_eq!(report.issues().len(), 4);
        assert!(report.mentions(RPC_URL_KEY));
        assert!(report.mentions(NAMESPACE_KEY));
        assert!(report.mentions(DEFAULT_TX_FEE_KEY));
        assert!(report.mentions(RPC_TIMEOUT_KEY));

        let text = err.to_string();
        assert!(text.starts_with("Celestia configuration validation failed:\n"));
        assert!(text.contains("CELESTIA_LIGHT_NODE_RPC_URL: Celestia Light Node RPC URL is required"));
        assert!(text.contains("CELESTIA_AI_AGENT_NAMESPACE: Celestia AI Agent Namespace is required"));
    }

    #[test]
    fn test_fee_must_be_a_non_negative_number() {
        for bad in ["abc", "-1", "NaN", "inf"] {
            let mut values = valid();
            values.insert(DEFAULT_TX_FEE_KEY.to_string(), bad.to_string());
            let err = ConnectionConfig::from_settings(&values).unwrap_err();
            assert!(err.report().unwrap().mentions(DEFAULT_TX_FEE_KEY), "fee {bad}");
        }

        let mut values = valid();
        values.insert(DEFAULT_TX_FEE_KEY.to_string(), "0".to_string());
        assert_eq!(ConnectionConfig::from_settings(&values).unwrap().default_tx_fee, 0.0);
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let mut values = valid();
        values.insert(NAMESPACE_KEY.to_string(), "   ".to_string());
        let err = ConnectionConfig::from_settings(&values).unwrap_err();
        assert!(err.report().unwrap().mentions(NAMESPACE_KEY));
    }

    #[test]
    fn test_submitter_defaults() {
        let config = SubmitterConfig::from_settings(&valid()).unwrap();
        assert_eq!(
            config.auth,
            AuthSource::NodeCli {
                node_type: "light".to_string(),
                network: "mocha-4".to_string(),
                container: None,
            }
        );
        assert_eq!(config.explorer_url, "https://mocha-4.celenium.io");
        assert_eq!(config.rpc_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.auth_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_static_token_and_disabled_timeouts() {
        let mut values = valid();
        values.insert(AUTH_TOKEN_KEY.to_string(), "secret".to_string());
        values.insert(RPC_TIMEOUT_KEY.to_string(), "0".to_string());
        values.insert(AUTH_TIMEOUT_KEY.to_string(), "1500".to_string());

        let config = SubmitterConfig::from_settings(&values).unwrap();
        assert_eq!(config.auth, AuthSource::Static("secret".to_string()));
        assert_eq!(config.rpc_timeout, None);
        assert_eq!(config.auth_timeout, Some(Duration::from_millis(1500)));
        assert!(!format!("{:?}", config.auth).contains("secret"));
    }

    #[test]
    fn test_layered_falls_back_on_missing_and_empty() {
        let primary = settings(&[(RPC_URL_KEY, ""), (NAMESPACE_KEY, "primary")]);
        let fallback = settings(&[
            (RPC_URL_KEY, "http://fallback:26658"),
            (NAMESPACE_KEY, "fallback"),
            (DEFAULT_TX_FEE_KEY, "0.1"),
        ]);
        let layered = Layered::new(primary, fallback);

        assert_eq!(layered.setting(RPC_URL_KEY).as_deref(), Some("http://fallback:26658"));
        assert_eq!(layered.setting(NAMESPACE_KEY).as_deref(), Some("primary"));
        assert_eq!(layered.setting(DEFAULT_TX_FEE_KEY).as_deref(), Some("0.1"));
        assert_eq!(layered.setting(CHAIN_ID_KEY), None);
    }

    #[test]
    fn test_file_settings_from_toml() {
        let file = FileSettings::from_toml_str(
            r#"
            CELESTIA_LIGHT_NODE_RPC_URL = "http://localhost:26658"
            CELESTIA_AI_AGENT_NAMESPACE = "0f0f"
            CELESTIA_DEFAULT_TX_FEE = 0.002
            CELESTIA_RPC_TIMEOUT_MS = 5000
            "#,
        )
        .unwrap();

        let config = SubmitterConfig::from_settings(&file).unwrap();
        assert_eq!(config.connection.namespace, "0f0f");
        assert!((config.connection.default_tx_fee - 0.002).abs() < f64::EPSILON);
        assert_eq!(config.rpc_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_file_settings_rejects_tables() {
        let err = FileSettings::from_toml_str("[celestia]\nnamespace = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedValue { key } if key == "celestia"));
    }
}
