//! End-to-end blob submission.

use submitter_types::{ConnectionConfig, GasFee, SettingsLookup, SubmitterConfig};

use crate::{encode_blob, CelestiaClient, CelestiaError, DataAvailability, Explorer, Result};

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Transaction hash reported by the light node.
    pub tx_hash: String,

    /// Inclusion height, when reported.
    pub height: Option<u64>,

    /// Explorer page for the transaction.
    pub explorer_url: String,

    /// Confirmation text for the user.
    pub display_text: String,
}

/// Runs the submission pipeline: encode, submit, check the response, format.
#[derive(Debug)]
pub struct BlobSubmitter<D> {
    connection: ConnectionConfig,
    explorer: Explorer,
    da: D,
}

impl BlobSubmitter<CelestiaClient> {
    /// Validate settings and build a submitter backed by a [`CelestiaClient`].
    ///
    /// # Errors
    ///
    /// Returns [`CelestiaError::Configuration`] if any setting is missing or
    /// invalid.
    pub fn from_settings(settings: &impl SettingsLookup) -> Result<Self> {
        let config = SubmitterConfig::from_settings(settings)?;
        Self::from_config(&config)
    }

    /// Build a submitter backed by a [`CelestiaClient`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: &SubmitterConfig) -> Result<Self> {
        let client = CelestiaClient::from_config(config)?;
        Ok(Self::new(
            config.connection.clone(),
            Explorer::new(config.explorer_url.clone()),
            client,
        ))
    }
}

impl<D: DataAvailability> BlobSubmitter<D> {
    /// Create a submitter.
    pub fn new(connection: ConnectionConfig, explorer: Explorer, da: D) -> Self {
        Self {
            connection,
            explorer,
            da,
        }
    }

    /// Connection settings in use.
    #[must_use]
    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    /// Submit `payload` as a blob.
    ///
    /// Every call is a new transaction; submitting the same payload twice
    /// yields two transactions.
    ///
    /// # Errors
    ///
    /// Returns [`CelestiaError::EmptyPayload`] for empty input, any error of
    /// the DA client, or [`CelestiaError::MalformedResponse`] when the node
    /// reports no transaction.
    pub async fn submit(&self, payload: &str) -> Result<Receipt> {
        tracing::info!(payload_len = payload.len(), "Starting blob submission");

        let result = self.try_submit(payload).await;
        match &result {
            Ok(receipt) => tracing::info!(
                tx_hash = %receipt.tx_hash,
                explorer_url = %receipt.explorer_url,
                "Blob submitted successfully"
            ),
            Err(CelestiaError::EmptyPayload) => tracing::info!("No data to submit"),
            Err(e) => tracing::error!(error = %e, "Error during blob submission"),
        }
        result
    }

    async fn try_submit(&self, payload: &str) -> Result<Receipt> {
        if payload.is_empty() {
            return Err(CelestiaError::EmptyPayload);
        }

        let encoded = encode_blob(payload)?;
        let response = self
            .da
            .submit_blob(
                &self.connection.rpc_url,
                &self.connection.namespace,
                &encoded,
                GasFee::new(self.connection.default_tx_fee),
            )
            .await?;

        let tx = response.first_tx()?;
        Ok(Receipt {
            explorer_url: self.explorer.tx_url(&tx.tx_hash),
            display_text: self.explorer.confirmation(&tx.tx_hash),
            tx_hash: tx.tx_hash,
            height: tx.height,
        })
    }
}
