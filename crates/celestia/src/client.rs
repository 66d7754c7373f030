//! Celestia client implementation.
//!
//! Talks JSON-RPC 2.0 over plain HTTP POST to a light node, authenticating
//! every request with a freshly fetched bearer token.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use submitter_types::{GasFee, RawRpcResponse, RpcRequest, RpcResponse, SubmitterConfig};

use crate::auth::{provider_for, AuthTokenProvider};
use crate::{CelestiaError, DataAvailability, Result};

/// Celestia light node client.
pub struct CelestiaClient {
    /// HTTP client for JSON-RPC calls.
    http: reqwest::Client,

    /// Token source, asked once per request.
    auth: Arc<dyn AuthTokenProvider>,
}

impl std::fmt::Debug for CelestiaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CelestiaClient").finish_non_exhaustive()
    }
}

impl CelestiaClient {
    /// Create a new client.
    ///
    /// `timeout` bounds each HTTP call; `None` leaves it unbounded.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(auth: Arc<dyn AuthTokenProvider>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CelestiaError::Transport)?;

        Ok(Self { http, auth })
    }

    /// Create a client from validated settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: &SubmitterConfig) -> Result<Self> {
        let auth = provider_for(&config.auth, config.auth_timeout);
        Self::new(auth, config.rpc_timeout)
    }

    /// Call `method` on the light node at `endpoint`.
    ///
    /// The endpoint is checked before a token is fetched, so a bad endpoint
    /// never reaches the auth provider or the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid, no auth token could be
    /// obtained, or the request fails.
    pub async fn request<P>(&self, endpoint: &str, method: &str, params: P) -> Result<RpcResponse>
    where
        P: Serialize + Send + Sync,
    {
        let url = parse_endpoint(endpoint)?;
        self.send(url, &RpcRequest::new(method, params)).await
    }

    async fn send<P>(&self, url: Url, request: &RpcRequest<P>) -> Result<RpcResponse>
    where
        P: Serialize + Send + Sync,
    {
        let token = self.auth.fetch_token().await?;
        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| CelestiaError::Auth("token is not a valid header value".to_string()))?;
        authorization.set_sensitive(true);

        tracing::debug!(%url, method = %request.method, "Sending JSON-RPC request");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, authorization)
            .json(request)
            .send()
            .await
            .map_err(CelestiaError::Transport)?;

        let status = response.status();
        let body: Value = response.json().await.map_err(CelestiaError::Transport)?;
        let raw = RawRpcResponse::from(body);

        if raw.error.is_some() {
            tracing::warn!(
                %status,
                code = ?raw.error_code(),
                error = raw.error_message().unwrap_or("<none>"),
                "Light node returned a JSON-RPC error"
            );
        }

        let response = RpcResponse::from(raw);
        if response.is_empty() {
            tracing::debug!(%status, "Light node returned no result");
        }

        Ok(response)
    }
}

/// Parse a light node endpoint, requiring an http(s) scheme and a host.
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let invalid = |reason: String| CelestiaError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if !url.has_host() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}

#[async_trait::async_trait]
impl DataAvailability for CelestiaClient {
    async fn submit_blob(
        &self,
        endpoint: &str,
        namespace_id: &str,
        encoded_data: &str,
        fee: GasFee,
    ) -> Result<RpcResponse> {
        let url = parse_endpoint(endpoint)?;

        tracing::debug!(
            namespace = %namespace_id,
            data_len = encoded_data.len(),
            gas_price = fee.gas_price,
            "Submitting blob to Celestia"
        );

        let request = RpcRequest::submit_pay_for_blob(namespace_id, encoded_data, fee);
        self.send(url, &request).await
    }
}
