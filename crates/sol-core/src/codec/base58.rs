//! Base58 text encoding, Bitcoin alphabet, no checksum.
//!
//! Leading zero bytes become leading `'1'` characters and survive a round
//! trip, which matters for 32-byte keys that start with zeros.

use crate::error::SolError;

/// Encode arbitrary bytes as Base58 text.
pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode Base58 text of any length.
pub fn decode(text: &str) -> Result<Vec<u8>, SolError> {
    bs58::decode(text).into_vec().map_err(map_decode_error)
}

/// Decode Base58 text that must describe exactly `N` bytes.
pub fn decode_fixed<const N: usize>(text: &str) -> Result<[u8; N], SolError> {
    let bytes = decode(text)?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| SolError::DecodedLengthMismatch {
            expected: N,
            actual: v.len(),
        })
}

fn map_decode_error(e: bs58::decode::Error) -> SolError {
    match e {
        bs58::decode::Error::InvalidCharacter { character, index } => {
            SolError::InvalidBase58Character { character, index }
        }
        bs58::decode::Error::NonAsciiCharacter { index } => SolError::InvalidBase58Character {
            character: char::REPLACEMENT_CHARACTER,
            index,
        },
        other => SolError::InvalidMessage(format!("base58 decode failed: {other}")),
    }
}
