//! Core types for the Celestia blob submitter.
//!
//! This crate provides the configuration surface and the JSON-RPC wire types
//! shared by the DA client and the command-line front end.

#![warn(missing_docs)]

mod config;
mod rpc;
pub mod serde_helpers;

pub use config::{
    AuthSource, ConfigError, ConfigIssue, ConnectionConfig, EnvSettings, FileSettings, Layered,
    SettingsLookup, SubmitterConfig, ValidationReport, DEFAULT_EXPLORER_URL,
};
pub use rpc::{
    BlobParam, GasFee, PayForBlobParams, RawRpcResponse, ResponseShapeError,
    RpcRequest, RpcResponse, TxResult, JSONRPC_VERSION, REQUEST_ID, SUBMIT_PAY_FOR_BLOB,
};

/// Setting keys recognized by [`SubmitterConfig::from_settings`].
pub mod keys {
    pub use crate::config::{
        AUTH_TIMEOUT_KEY, AUTH_TOKEN_KEY, CHAIN_ID_KEY, DEFAULT_TX_FEE_KEY, EXPLORER_URL_KEY,
        NAMESPACE_KEY, NODE_CONTAINER_KEY, NODE_TYPE_KEY, RPC_TIMEOUT_KEY, RPC_URL_KEY,
    };
}
