//! Auth token acquisition for the light node RPC.
//!
//! Tokens are fetched right before every request and never cached.

use std::fmt;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use submitter_types::AuthSource;
use tokio::process::Command;

use crate::{CelestiaError, Result};

/// A source of bearer tokens for the light node.
#[async_trait::async_trait]
pub trait AuthTokenProvider: Send + Sync {
    /// Fetch a fresh token.
    ///
    /// # Errors
    ///
    /// Returns [`CelestiaError::Auth`] if no token could be obtained.
    async fn fetch_token(&self) -> Result<String>;
}

/// Build the provider described by `source`.
#[must_use]
pub fn provider_for(source: &AuthSource, timeout: Option<Duration>) -> Arc<dyn AuthTokenProvider> {
    match source {
        AuthSource::Static(token) => Arc::new(StaticTokenProvider::new(token.clone())),
        AuthSource::NodeCli {
            node_type,
            network,
            container,
        } => Arc::new(
            CommandTokenProvider::node_cli(node_type, network, container.as_deref())
                .with_timeout(timeout),
        ),
    }
}

/// Returns a pre-provisioned token.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Wrap a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait::async_trait]
impl AuthTokenProvider for StaticTokenProvider {
    async fn fetch_token(&self) -> Result<String> {
        if self.token.trim().is_empty() {
            return Err(CelestiaError::Auth("configured token is empty".to_string()));
        }
        Ok(self.token.trim().to_string())
    }
}

/// Mints a token by running an external program and reading its stdout.
#[derive(Debug, Clone)]
pub struct CommandTokenProvider {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandTokenProvider {
    /// Run `program` with `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: None,
        }
    }

    /// `celestia <node_type> auth admin --p2p.network <network>`, run through
    /// `docker exec <container>` when a container is given.
    #[must_use]
    pub fn node_cli(node_type: &str, network: &str, container: Option<&str>) -> Self {
        let celestia_args = [node_type, "auth", "admin", "--p2p.network", network];

        match container {
            Some(container) => Self::new(
                "docker",
                ["exec", container, "celestia"]
                    .into_iter()
                    .chain(celestia_args),
            ),
            None => Self::new("celestia", celestia_args),
        }
    }

    /// Bound how long the program may run.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Program and arguments as a single display string.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    async fn run(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CelestiaError::Auth(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(
                command = %self.command_line(),
                status = %output.status,
                stderr = %stderr.trim(),
                "Auth command failed"
            );
            return Err(CelestiaError::Auth(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| CelestiaError::Auth("auth command printed non-UTF-8 output".to_string()))?;
        let token = stdout.trim();
        if token.is_empty() {
            return Err(CelestiaError::Auth("auth command printed no token".to_string()));
        }

        Ok(token.to_string())
    }
}

#[async_trait::async_trait]
impl AuthTokenProvider for CommandTokenProvider {
    async fn fetch_token(&self) -> Result<String> {
        tracing::debug!(command = %self.command_line(), "Fetching auth token");

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run()).await.map_err(|_| {
                CelestiaError::Auth(format!("auth command timed out after {}ms", limit.as_millis()))
            })?,
            None => self.run().await,
        }
    }
}
