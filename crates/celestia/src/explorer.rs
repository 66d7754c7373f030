//! Block explorer links for submitted transactions.

use submitter_types::DEFAULT_EXPLORER_URL;

/// Formats transaction hashes as explorer references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explorer {
    base_url: String,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORER_URL)
    }
}

impl Explorer {
    /// Use the explorer at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Explorer page for a transaction. The hash is not validated.
    #[must_use]
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{tx_hash}", self.base_url)
    }

    /// User-facing confirmation for a submitted transaction.
    #[must_use]
    pub fn confirmation(&self, tx_hash: &str) -> String {
        format!(
            "Blob submitted successfully! Check it out on Celenium: {}",
            self.tx_url(tx_hash)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "6AA8D09F878A03FEB541AB035A55568068587F59D7350C8C34D55779B71D30A4";

    #[test]
    fn test_default_explorer() {
        assert_eq!(
            Explorer::default().confirmation(HASH),
            format!("Blob submitted successfully! Check it out on Celenium: https://mocha-4.celenium.io/tx/{HASH}")
        );
    }

    #[test]
    fn test_default_matches_config_default() {
        let settings: std::collections::HashMap<String, String> = [
            (submitter_types::keys::RPC_URL_KEY, "http://localhost:26658"),
            (submitter_types::keys::NAMESPACE_KEY, "0f0f"),
            (submitter_types::keys::DEFAULT_TX_FEE_KEY, "0.002"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
        let config = submitter_types::SubmitterConfig::from_settings(&settings).unwrap();

        assert_eq!(
            Explorer::new(config.explorer_url).tx_url(HASH),
            Explorer::default().tx_url(HASH)
        );
    }

    #[test]
    fn test_custom_base_url_trailing_slash() {
        let explorer = Explorer::new("https://celenium.io/");
        assert_eq!(explorer.tx_url("ABC123"), "https://celenium.io/tx/ABC123");
    }
}
