//! Wire encoding shared by every payload that crosses the sequencer boundary.
//!
//! Payloads travel as `0x`-prefixed hex strings inside JSON bodies. Decoded,
//! they are UTF-8 command lines, UTF-8 route strings, JSON documents, or the
//! packed binary layouts used by the asset portals (see [`portal`]). Every
//! transform here is symmetric: decoding an encoded value yields the input again.

pub mod portal;

use serde_json::Value;
use thiserror::Error;

/// Failures raised while decoding an inbound payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload was not valid hexadecimal.
    #[error("payload is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// The payload bytes were not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// The payload text was not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A portal payload did not match its packed layout.
    #[error("malformed deposit: {message}")]
    Deposit { message: String },
}

impl DecodeError {
    /// Creates a malformed deposit error.
    pub fn deposit(message: impl Into<String>) -> Self {
        Self::Deposit {
            message: message.into(),
        }
    }
}

/// Encodes bytes as lowercase hex with a `0x` prefix.
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decodes hex text, with or without a `0x` prefix.
///
/// # Errors
///
/// Returns [`DecodeError::Hex`] for odd-length input or non-hex digits.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, DecodeError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    Ok(hex::decode(digits)?)
}

/// Encodes text as its UTF-8 bytes.
#[must_use]
pub fn encode_text(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Decodes UTF-8 bytes into an owned string.
///
/// # Errors
///
/// Returns [`DecodeError::Utf8`] when the bytes are not valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Result<String, DecodeError> {
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Encodes a JSON value as compact UTF-8 bytes.
#[must_use]
pub fn encode_json(value: &Value) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// Decodes UTF-8 JSON bytes into a value.
///
/// # Errors
///
/// Returns [`DecodeError::Utf8`] or [`DecodeError::Json`] when the bytes are
/// not UTF-8 or not a JSON document.
pub fn decode_json(bytes: &[u8]) -> Result<Value, DecodeError> {
    let text = decode_text(bytes)?;
    Ok(serde_json::from_str(&text)?)
}
