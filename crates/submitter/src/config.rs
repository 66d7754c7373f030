//! Settings loading and validation.

use std::path::Path;

use eyre::{Result, WrapErr};
use submitter_types::{keys, AuthSource, EnvSettings, FileSettings, Layered, SubmitterConfig};

/// Settings file layered over the process environment.
pub type Settings = Layered<FileSettings, EnvSettings>;

/// Load settings from `path` (if given) with environment fallback.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn settings(path: Option<&Path>) -> Result<Settings> {
    let file = match path {
        Some(path) => FileSettings::load(path)
            .wrap_err_with(|| format!("failed to load settings: {}", path.display()))?,
        None => FileSettings::default(),
    };
    Ok(Layered::new(file, EnvSettings))
}

/// Load and validate the configuration.
///
/// # Errors
///
/// Returns an error if loading or validation fails.
pub fn load(path: Option<&Path>) -> Result<SubmitterConfig> {
    let settings = settings(path)?;
    Ok(SubmitterConfig::from_settings(&settings)?)
}

/// Human-readable configuration summary with secrets redacted.
#[must_use]
pub fn summary(config: &SubmitterConfig) -> Vec<(&'static str, String)> {
    let auth = match &config.auth {
        AuthSource::Static(_) => "static token (redacted)".to_string(),
        AuthSource::NodeCli {
            node_type,
            network,
            container: Some(container),
        } => format!("celestia {node_type} auth admin --p2p.network {network} (in container {container})"),
        AuthSource::NodeCli {
            node_type,
            network,
            container: None,
        } => format!("celestia {node_type} auth admin --p2p.network {network}"),
    };
    let timeout = |t: Option<std::time::Duration>| {
        t.map_or_else(|| "none".to_string(), |t| format!("{}ms", t.as_millis()))
    };

    vec![
        (keys::RPC_URL_KEY, config.connection.rpc_url.clone()),
        (keys::NAMESPACE_KEY, config.connection.namespace.clone()),
        (keys::DEFAULT_TX_FEE_KEY, config.connection.default_tx_fee.to_string()),
        ("auth", auth),
        (keys::EXPLORER_URL_KEY, config.explorer_url.clone()),
        (keys::RPC_TIMEOUT_KEY, timeout(config.rpc_timeout)),
        (keys::AUTH_TIMEOUT_KEY, timeout(config.auth_timeout)),
    ]
}

/// A settings file with every recognized key.
#[must_use]
pub fn template() -> String {
    format!(
        r#"# Celestia blob submitter settings.
# Any key left out here is read from the environment instead.

{rpc_url} = "http://localhost:26658"
{namespace} = "0f0f0f0f0f0f0f0f0f0f"
{fee} = 0.002

# Pre-provisioned auth token. Leave unset to mint one with the node CLI.
# {token} = ""
{node_type} = "light"
{chain_id} = "mocha-4"
# {container} = "celestia-node"

{explorer} = "https://mocha-4.celenium.io"
{rpc_timeout} = 30000
{auth_timeout} = 30000
"#,
        rpc_url = keys::RPC_URL_KEY,
        namespace = keys::NAMESPACE_KEY,
        fee = keys::DEFAULT_TX_FEE_KEY,
        token = keys::AUTH_TOKEN_KEY,
        node_type = keys::NODE_TYPE_KEY,
        chain_id = keys::CHAIN_ID_KEY,
        container = keys::NODE_CONTAINER_KEY,
        explorer = keys::EXPLORER_URL_KEY,
        rpc_timeout = keys::RPC_TIMEOUT_KEY,
        auth_timeout = keys::AUTH_TIMEOUT_KEY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_is_valid() {
        let file = FileSettings::from_toml_str(&template()).unwrap();
        let config = SubmitterConfig::from_settings(&file).unwrap();
        assert_eq!(config.connection.rpc_url, "http://localhost:26658");
        assert!(matches!(config.auth, AuthSource::NodeCli { container: None, .. }));
    }

    #[test]
    fn test_summary_redacts_token() {
        let file = FileSettings::from_toml_str(&format!(
            "{}\n{} = \"super-secret\"",
            template(),
            keys::AUTH_TOKEN_KEY
        ))
        .unwrap();
        let config = SubmitterConfig::from_settings(&file).unwrap();

        let summary = summary(&config);
        assert!(summary.iter().all(|(_, value)| !value.contains("super-secret")));
        assert!(summary.iter().any(|(key, value)| *key == "auth" && value.contains("redacted")));
    }

    #[test]
    fn test_missing_settings_file() {
        let err = settings(Some(Path::new("/nonexistent/celestia.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to load settings"));
    }
}
