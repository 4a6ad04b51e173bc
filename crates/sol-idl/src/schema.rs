//! The IDL document model.
//!
//! Only what instruction encoding and account decoding need is modelled;
//! unknown keys in the JSON are ignored.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::IdlError;

/// A program's interface description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Idl {
    #[serde(default)]
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub accounts: Vec<IdlAccountDef>,
    #[serde(default)]
    pub errors: Vec<IdlErrorCode>,
}

impl Idl {
    pub fn from_json_str(json: &str) -> Result<Self, IdlError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, IdlError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let idl = Self::from_json_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            name = %idl.name,
            instructions = idl.instructions.len(),
            accounts = idl.accounts.len(),
            "loaded idl"
        );
        Ok(idl)
    }

    pub fn instruction(&self, name: &str) -> Option<&IdlInstruction> {
        self.instructions.iter().find(|ix| ix.name == name)
    }

    pub fn account(&self, name: &str) -> Option<&IdlAccountDef> {
        self.accounts.iter().find(|acc| acc.name == name)
    }

    /// Human readable text for a custom program error code: the declared
    /// message, or the error name when there is none.
    pub fn error_message(&self, code: u32) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.msg.as_deref().unwrap_or(&e.name))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<IdlAccountItem>,
    #[serde(default)]
    pub args: Vec<IdlField>,
    #[serde(default)]
    pub returns: Option<IdlType>,
}

/// One account slot of an instruction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlAccountItem {
    pub name: String,
    pub is_mut: bool,
    pub is_signer: bool,
    #[serde(default)]
    pub is_optional: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IdlType,
}

/// An account type stored on chain by the program.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlAccountDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IdlStruct,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlStruct {
    #[serde(default)]
    pub fields: Vec<IdlField>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdlErrorCode {
    pub code: u32,
    pub name: String,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Declared type of a field.
///
/// Every type the IDL format can name parses, so a document is never
/// rejected for containing composite types. Encoding and decoding only
/// handle the primitive variants; see [`IdlType::is_primitive`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawType")]
pub enum IdlType {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    U64,
    I64,
    F64,
    U128,
    I128,
    U256,
    I256,
    Bytes,
    String,
    PublicKey,
    Defined(String),
    Option(Box<IdlType>),
    Vec(Box<IdlType>),
    Array(Box<IdlType>, usize),
}

impl IdlType {
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            IdlType::Bool
                | IdlType::U8
                | IdlType::I8
                | IdlType::U16
                | IdlType::I16
                | IdlType::U32
                | IdlType::I32
                | IdlType::F32
                | IdlType::U64
                | IdlType::I64
                | IdlType::F64
                | IdlType::String
                | IdlType::PublicKey
        )
    }
}

impl fmt::Display for IdlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdlType::Bool => "bool",
            IdlType::U8 => "u8",
            IdlType::I8 => "i8",
            IdlType::U16 => "u16",
            IdlType::I16 => "i16",
            IdlType::U32 => "u32",
            IdlType::I32 => "i32",
            IdlType::F32 => "f32",
            IdlType::U64 => "u64",
            IdlType::I64 => "i64",
            IdlType::F64 => "f64",
            IdlType::U128 => "u128",
            IdlType::I128 => "i128",
            IdlType::U256 => "u256",
            IdlType::I256 => "i256",
            IdlType::Bytes => "bytes",
            IdlType::String => "string",
            IdlType::PublicKey => "publicKey",
            IdlType::Defined(name) => return write!(f, "defined<{name}>"),
            IdlType::Option(inner) => return write!(f, "option<{inner}>"),
            IdlType::Vec(inner) => return write!(f, "vec<{inner}>"),
            IdlType::Array(inner, len) => return write!(f, "array<{inner}; {len}>"),
        };
        f.write_str(name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawType {
    Name(String),
    Defined { defined: String },
    Option { option: Box<RawType> },
    Vec { vec: Box<RawType> },
    Array { array: (Box<RawType>, usize) },
}

impl TryFrom<RawType> for IdlType {
    type Error = String;

    fn try_from(raw: RawType) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawType::Name(name) => match name.as_str() {
                "bool" => IdlType::Bool,
                "u8" => IdlType::U8,
                "i8" => IdlType::I8,
                "u16" => IdlType::U16,
                "i16" => IdlType::I16,
                "u32" => IdlType::U32,
                "i32" => IdlType::I32,
                "f32" => IdlType::F32,
                "u64" => IdlType::U64,
                "i64" => IdlType::I64,
                "f64" => IdlType::F64,
                "u128" => IdlType::U128,
                "i128" => IdlType::I128,
                "u256" => IdlType::U256,
                "i256" => IdlType::I256,
                "bytes" => IdlType::Bytes,
                "string" => IdlType::String,
                "publicKey" | "pubkey" => IdlType::PublicKey,
                other => return Err(format!("unknown idl type {other:?}")),
            },
            RawType::Defined { defined } => IdlType::Defined(defined),
            RawType::Option { option } => IdlType::Option(Box::new(Self::try_from(*option)?)),
            RawType::Vec { vec } => IdlType::Vec(Box::new(Self::try_from(*vec)?)),
            RawType::Array { array: (inner, len) } => {
                IdlType::Array(Box::new(Self::try_from(*inner)?), len)
            }
        })
    }
}
