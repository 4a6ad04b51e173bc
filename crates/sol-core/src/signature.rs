//! Ed25519 transaction signatures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::base58;
use crate::error::SolError;

pub const SIGNATURE_LENGTH: usize = 64;

/// A detached 64-byte Ed25519 signature.
///
/// The first signature of a transaction doubles as its identifier and is what
/// `sendTransaction` returns, Base58 encoded.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    pub const fn new(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_base58(text: &str) -> Result<Self, SolError> {
        base58::decode_fixed::<SIGNATURE_LENGTH>(text).map(Self)
    }

    pub fn to_base58(&self) -> String {
        base58::encode(&self.0)
    }

    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// All zeros marks a slot that has not been signed yet.
    pub fn is_placeholder(&self) -> bool {
        self.0 == [0u8; SIGNATURE_LENGTH]
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; SIGNATURE_LENGTH])
    }
}

impl From<ed25519_dalek::Signature> for Signature {
    fn from(sig: ed25519_dalek::Signature) -> Self {
        Self(sig.to_bytes())
    }
}

impl From<Signature> for ed25519_dalek::Signature {
    fn from(sig: Signature) -> Self {
        ed25519_dalek::Signature::from_bytes(&sig.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_base58())
    }
}

impl FromStr for Signature {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Signature::from_base58(&text).map_err(serde::de::Error::custom)
    }
}
