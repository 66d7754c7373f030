//! JSON-RPC 2.0 wire types for the light node API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_helpers;

/// JSON-RPC protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request id sent with every request.
///
/// Constant, so concurrent in-flight requests cannot be correlated by id.
pub const REQUEST_ID: u64 = 1;

/// Light node method that submits a pay-for-blob transaction.
pub const SUBMIT_PAY_FOR_BLOB: &str = "state.SubmitPayForBlob";

/// A JSON-RPC request envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest<P> {
    /// Always [`JSONRPC_VERSION`].
    pub jsonrpc: &'static str,

    /// Always [`REQUEST_ID`].
    pub id: u64,

    /// Method name.
    pub method: String,

    /// Positional parameters.
    pub params: P,
}

impl<P: Serialize> RpcRequest<P> {
    /// Build a request for `method` with the fixed version and id.
    pub fn new(method: impl Into<String>, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: REQUEST_ID,
            method: method.into(),
            params,
        }
    }
}

/// A single blob in a pay-for-blob submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobParam {
    /// Namespace the blob is posted under, passed through from config.
    pub namespace_id: String,

    /// Base64 blob data.
    pub data: String,
}

/// Fee descriptor for a pay-for-blob submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasFee {
    /// Gas price (in utia).
    pub gas_price: f64,

    /// Whether `gas_price` overrides the node's estimate.
    pub is_gas_price_set: bool,
}

impl GasFee {
    /// A fee with an explicitly set gas price.
    #[must_use]
    pub fn new(gas_price: f64) -> Self {
        Self {
            gas_price,
            is_gas_price_set: true,
        }
    }
}

/// Positional params of `state.SubmitPayForBlob`: the blob list and the fee.
pub type PayForBlobParams = (Vec<BlobParam>, GasFee);

impl RpcRequest<PayForBlobParams> {
    /// Build a `state.SubmitPayForBlob` request for a single blob.
    pub fn submit_pay_for_blob(
        namespace_id: impl Into<String>,
        data: impl Into<String>,
        fee: GasFee,
    ) -> Self {
        let blob = BlobParam {
            namespace_id: namespace_id.into(),
            data: data.into(),
        };
        Self::new(SUBMIT_PAY_FOR_BLOB, (vec![blob], fee))
    }
}

/// A response as received from the light node, before normalization.
///
/// Every field is kept as raw JSON so that any well-formed reply can be
/// normalized, whatever shape its envelope fields take.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRpcResponse {
    /// Protocol version, if sent.
    #[serde(default)]
    pub jsonrpc: Option<Value>,

    /// Request id, if sent.
    #[serde(default)]
    pub id: Option<Value>,

    /// Result; falsy values are read as absent.
    #[serde(default, deserialize_with = "serde_helpers::truthy::deserialize")]
    pub result: Option<Value>,

    /// Error member, if any. Usually `{code, message}`, but not relied upon.
    #[serde(default)]
    pub error: Option<Value>,
}

impl RawRpcResponse {
    /// Error code, when the error member is an object carrying an integer `code`.
    #[must_use]
    pub fn error_code(&self) -> Option<i64> {
        self.error.as_ref()?.get("code")?.as_i64()
    }

    /// Error message: the `message` string of an error object, or the error
    /// member itself when it is a bare string.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        let error = self.error.as_ref()?;
        error
            .as_str()
            .or_else(|| error.get("message").and_then(Value::as_str))
    }
}

impl From<Value> for RawRpcResponse {
    /// Any JSON that is not an object has no `result` and reads as empty.
    fn from(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// A normalized light node response.
///
/// A response without a usable `result` becomes [`RpcResponse::empty`] rather
/// than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Request id.
    pub id: Value,

    /// Protocol version.
    pub jsonrpc: String,

    /// Result payload.
    pub result: Value,
}

impl RpcResponse {
    /// The normalized "no-op" response: `{id:1, jsonrpc:"2.0", result:[]}`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            id: Value::from(REQUEST_ID),
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Value::Array(Vec::new()),
        }
    }

    /// Whether this is the normalized empty response.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.result.as_array().is_some_and(Vec::is_empty)
    }

    /// Read `result[0]` as a transaction result.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a non-empty array whose first
    /// element carries a string `tx_hash`.
    pub fn first_tx(&self) -> Result<TxResult, ResponseShapeError> {
        let entries = self.result.as_array().ok_or(ResponseShapeError::NotAnArray)?;
        let first = entries.first().ok_or(ResponseShapeError::Empty)?;
        let tx_hash = first
            .get("tx_hash")
            .and_then(Value::as_str)
            .ok_or(ResponseShapeError::MissingTxHash)?;

        Ok(TxResult {
            tx_hash: tx_hash.to_string(),
            height: first.get("height").and_then(Value::as_u64),
        })
    }
}

impl From<RawRpcResponse> for RpcResponse {
    fn from(raw: RawRpcResponse) -> Self {
        let Some(result) = raw.result else {
            return Self::empty();
        };

        Self {
            id: raw.id.unwrap_or_else(|| Value::from(REQUEST_ID)),
            jsonrpc: raw
                .jsonrpc
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or(JSONRPC_VERSION)
                .to_string(),
            result,
        }
    }
}

/// The transaction a pay-for-blob submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxResult {
    /// Transaction hash.
    pub tx_hash: String,

    /// Inclusion height, when the node reports one.
    pub height: Option<u64>,
}

/// Ways a response can fail to look like a pay-for-blob result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseShapeError {
    /// `result` is not an array.
    #[error("result is not an array")]
    NotAnArray,

    /// `result` is an empty array.
    #[error("result is empty")]
    Empty,

    /// `result[0].tx_hash` is missing or not a string.
    #[error("result[0].tx_hash is missing or not a string")]
    MissingTxHash,
}
