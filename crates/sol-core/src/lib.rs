//! Solana transaction core.
//!
//! Addresses, keys, program-derived addresses and the legacy transaction
//! wire format, implemented by hand on top of `ed25519-dalek` and `sha2`
//! rather than `solana-sdk`. Nothing here performs I/O except
//! [`Keypair::from_file`]; every other operation is a pure function of its
//! inputs and safe to call from any thread.

pub mod address;
pub mod blockhash;
pub mod codec;
pub mod error;
pub mod instruction;
pub mod keypair;
pub mod message;
pub mod pda;
pub mod programs;
pub mod signature;
pub mod signer;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use address::{is_on_curve, Address, ADDRESS_LENGTH};
pub use blockhash::Blockhash;
pub use error::{ErrorKind, SolError};
pub use instruction::{AccountMeta, Instruction};
pub use keypair::{sign_detached, verify_signature, Keypair};
pub use message::{CompiledInstruction, Message, MessageBuilder, MessageHeader};
pub use pda::{create_program_address, find_program_address, MAX_SEED_LENGTH};
pub use signature::{Signature, SIGNATURE_LENGTH};
pub use transaction::Transaction;
