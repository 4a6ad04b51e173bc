//! # crypto-utils
//!
//! Secure random generation and zeroize-on-drop secret containers used by
//! the Solana key handling code.

pub mod error;
pub mod random;
pub mod secret;

pub use error::CryptoError;
pub use random::random_seed;
pub use secret::SecretBytes;
