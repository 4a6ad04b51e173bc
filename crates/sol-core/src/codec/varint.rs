//! Solana's compact-u16 ("shortvec") length prefix.
//!
//! Seven value bits per byte, least significant group first, with the high
//! bit set on every byte except the last:
//!
//! - Values 0..0x7f       -> 1 byte
//! - Values 0x80..0x3fff  -> 2 bytes
//! - Values 0x4000..      -> 3 bytes (max 0x1_ffff, but u16 caps at 0xffff)

use crate::error::SolError;

/// Longest valid encoding of a `u16`.
pub const MAX_ENCODING_LENGTH: usize = 3;

/// Encode a length in compact-u16 form.
pub fn encode_length(value: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_ENCODING_LENGTH);
    write_length(&mut out, value);
    out
}

/// Append a compact-u16 encoding of `value` to `buf`.
pub fn write_length(buf: &mut Vec<u8>, value: u16) {
    let mut val = value as u32;

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if val == 0 {
            break;
        }
    }
}

/// Append the compact-u16 prefix for a sequence of `len` items.
///
/// Fails with [`SolError::LengthOverflow`] for sequences that cannot be
/// described on the wire.
pub fn write_sequence_length(buf: &mut Vec<u8>, len: usize) -> Result<(), SolError> {
    let value = u16::try_from(len).map_err(|_| SolError::LengthOverflow(len))?;
    write_length(buf, value);
    Ok(())
}

/// Decode a compact-u16 value from the front of `data`.
///
/// Returns `(value, bytes_consumed)`.
pub fn decode_length(data: &[u8]) -> Result<(u16, usize), SolError> {
    let mut value: u32 = 0;

    for (i, &byte) in data.iter().take(MAX_ENCODING_LENGTH).enumerate() {
        value |= ((byte & 0x7f) as u32) << (7 * i);

        if byte & 0x80 == 0 {
            if i > 0 && byte == 0 {
                return Err(SolError::MalformedVarInt(
                    "non-canonical trailing zero byte".into(),
                ));
            }
            let value = u16::try_from(value).map_err(|_| {
                SolError::MalformedVarInt(format!("value {value} overflows u16"))
            })?;
            return Ok((value, i + 1));
        }
    }

    if data.len() >= MAX_ENCODING_LENGTH {
        Err(SolError::MalformedVarInt(format!(
            "continuation bit still set after {MAX_ENCODING_LENGTH} bytes"
        )))
    } else {
        Err(SolError::TruncatedMessage(
            "unexpected end of data while decoding compact-u16".into(),
        ))
    }
}
