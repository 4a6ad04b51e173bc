//! Byte-level codecs used on the wire and at the transport boundary.

pub mod base58;
pub mod base64;
pub(crate) mod reader;
pub mod varint;
