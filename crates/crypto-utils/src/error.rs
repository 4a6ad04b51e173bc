use thiserror::Error;

/// Cryptographic utility errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}
