//! Celestia DA module.
//!
//! This crate submits text blobs to Celestia through a light node's JSON-RPC
//! API: the payload is encoded, a bearer token is fetched, one
//! `state.SubmitPayForBlob` call is made and the resulting transaction is
//! reported as a block explorer link.

#![warn(missing_docs)]

mod auth;
mod client;
mod encoding;
mod error;
mod explorer;
mod submit;

#[cfg(test)]
mod testing;

pub use auth::{provider_for, AuthTokenProvider, CommandTokenProvider, StaticTokenProvider};
pub use client::CelestiaClient;
pub use encoding::{decode_blob, encode_blob};
pub use error::CelestiaError;
pub use explorer::Explorer;
pub use submitter_types::DEFAULT_EXPLORER_URL;
pub use submit::{BlobSubmitter, Receipt};

use submitter_types::{GasFee, RpcResponse};

/// Result type for Celestia operations.
pub type Result<T> = std::result::Result<T, CelestiaError>;

/// Trait for Celestia DA operations.
#[async_trait::async_trait]
pub trait DataAvailability: Send + Sync {
    /// Submit already-encoded blob data under `namespace_id` to the light node
    /// at `endpoint`.
    ///
    /// A response without a result is returned as [`RpcResponse::empty`], not
    /// as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid, no auth token could be
    /// obtained, or the request fails.
    async fn submit_blob(
        &self,
        endpoint: &str,
        namespace_id: &str,
        encoded_data: &str,
        fee: GasFee,
    ) -> Result<RpcResponse>;
}
