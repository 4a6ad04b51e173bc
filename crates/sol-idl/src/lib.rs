//! IDL-driven instruction encoding and account decoding.
//!
//! An IDL is a JSON description of a program's instructions (ordered
//! account roles and typed arguments) and account types. [`Program`] binds
//! one to a program id and hands out an [`InstructionEncoder`] per
//! instruction and an [`AccountDecoder`] per account type.
//!
//! Only primitive field types are encoded: `bool`, 8 to 64 bit integers,
//! `f32`/`f64`, `string` and `publicKey`. Integers and floats are written
//! big-endian. Anything else fails with [`IdlError::UnsupportedIdlType`].

pub mod decoder;
pub mod encoder;
pub mod error;
mod layout;
pub mod naming;
pub mod program;
pub mod schema;

pub use decoder::AccountDecoder;
pub use encoder::InstructionEncoder;
pub use error::IdlError;
pub use naming::{account_discriminator, instruction_discriminator, to_camel_case, to_snake_case};
pub use program::Program;
pub use schema::{Idl, IdlAccountDef, IdlAccountItem, IdlErrorCode, IdlField, IdlInstruction, IdlType};
