//! Recent blockhash: the 32-byte ledger anchor every message carries.
//!
//! The RPC hands it out as an opaque Base58 token; the wire format carries
//! the decoded bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::base58;
use crate::error::SolError;

pub const BLOCKHASH_LENGTH: usize = 32;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Blockhash([u8; BLOCKHASH_LENGTH]);

impl Blockhash {
    pub const fn new(bytes: [u8; BLOCKHASH_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_base58(text: &str) -> Result<Self, SolError> {
        base58::decode_fixed::<BLOCKHASH_LENGTH>(text).map(Self)
    }

    pub fn to_base58(&self) -> String {
        base58::encode(&self.0)
    }

    pub const fn as_bytes(&self) -> &[u8; BLOCKHASH_LENGTH] {
        &self.0
    }

    /// True for the all-zero value a fresh builder starts with.
    pub fn is_unset(&self) -> bool {
        self.0 == [0u8; BLOCKHASH_LENGTH]
    }
}

impl fmt::Display for Blockhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Blockhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blockhash({})", self.to_base58())
    }
}

impl FromStr for Blockhash {
    type Err = SolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl From<[u8; BLOCKHASH_LENGTH]> for Blockhash {
    fn from(bytes: [u8; BLOCKHASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Blockhash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Blockhash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Blockhash::from_base58(&text).map_err(serde::de::Error::custom)
    }
}
