//! Standard RFC 4648 Base64 (`+/`, `=` padding) for embedding wire bytes in
//! JSON-RPC payloads.

use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine as _;

use crate::error::SolError;

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode(text: &str) -> Result<Vec<u8>, SolError> {
    STANDARD
        .decode(text)
        .map_err(|e| SolError::InvalidBase64(e.to_string()))
}
