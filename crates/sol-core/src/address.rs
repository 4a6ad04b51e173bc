//! Solana addresses.
//!
//! An address is a raw 32-byte value: either an Ed25519 public key or a
//! program-derived address that is deliberately off the curve. There is no
//! hashing step (unlike Bitcoin or Ethereum); the text form is simply the
//! Base58 encoding of the 32 bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::base58;
use crate::error::SolError;

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// A 32-byte account or program address.
///
/// `Address::default()` is the all-zero address. It is a valid value (it is
/// also the System Program id) but is used as the "not set" sentinel, so
/// check [`Address::is_unset`] where that distinction matters.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a Base58 address. The text must decode to exactly 32 bytes.
    pub fn from_base58(text: &str) -> Result<Self, SolError> {
        base58::decode_fixed::<ADDRESS_LENGTH>(text).map(Self)
    }

    pub fn to_base58(&self) -> String {
        base58::encode(&self.0)
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub const fn to_bytes(self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    /// True for the all-zero sentinel.
    pub fn is_unset(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }

    /// Whether these bytes decompress to a point on the Ed25519 curve.
    ///
    /// Real public keys are on the curve; program-derived addresses never are.
    pub fn is_on_curve(&self) -> bool {
        is_on_curve(&self.0)
    }
}

/// Check if 32 bytes represent a valid Ed25519 curve point.
///
/// Uses `curve25519-dalek` to attempt decompression. If it succeeds, the
/// point is on the curve.
pub fn is_on_curve(bytes: &[u8; ADDRESS_LENGTH]) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58())
    }
}

impl FromStr for Address {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = SolError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; ADDRESS_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| SolError::DecodedLengthMismatch {
                    expected: ADDRESS_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Address::from_base58(&text).map_err(serde::de::Error::custom)
    }
}
