//! Blob payload encoding.
//!
//! The light node expects `data` as base64. The payload is first serialized
//! as a JSON string, quotes and escapes included, so `"Hello World!"` goes on
//! the wire as the base64 of `"\"Hello World!\""`.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::{CelestiaError, Result};

/// Encode a text payload as base64 JSON.
///
/// # Errors
///
/// Returns [`CelestiaError::Encoding`] if JSON serialization fails.
pub fn encode_blob(payload: &str) -> Result<String> {
    let json = serde_json::to_vec(payload)?;
    Ok(BASE64.encode(json))
}

/// Reverse [`encode_blob`].
///
/// # Errors
///
/// Returns [`CelestiaError::Encoding`] if the input is not base64 of a JSON
/// string.
pub fn decode_blob(encoded: &str) -> Result<String> {
    let json = BASE64.decode(encoded.trim()).map_err(|e| {
        CelestiaError::Encoding(serde::de::Error::custom(format!("invalid base64: {e}")))
    })?;
    Ok(serde_json::from_slice(&json)?)
}
