use thiserror::Error;

use crate::address::Address;

/// Broad failure classes, for callers that only care about which layer
/// rejected their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed Base58, Base64 or compact-u16 input, or truncated wire bytes.
    Encoding,
    /// Signing, key parsing or signature verification failures.
    Crypto,
    /// Schema-driven encoding rejected the input.
    Schema,
    /// A builder or signer was used before it had everything it needs.
    BuilderState,
    /// The program address search ran out of bump seeds.
    DerivationExhausted,
}

/// Solana core errors.
#[derive(Debug, Error)]
pub enum SolError {
    #[error("invalid base58 character {character:?} at index {index}")]
    InvalidBase58Character { character: char, index: usize },

    #[error("decoded length mismatch: expected {expected} bytes, got {actual}")]
    DecodedLengthMismatch { expected: usize, actual: usize },

    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("malformed compact-u16: {0}")]
    MalformedVarInt(String),

    #[error("length {0} exceeds the compact-u16 range")]
    LengthOverflow(usize),

    #[error("truncated message: {0}")]
    TruncatedMessage(String),

    #[error("invalid message: {0}")]
    InvalidMessage(String),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("signature verification failed for {0}")]
    SignatureVerification(Address),

    #[error("key file error: {0}")]
    KeyFile(#[from] std::io::Error),

    #[error("seed is {len} bytes, maximum is {max}")]
    SeedTooLong { len: usize, max: usize },

    #[error("unable to find a viable program address bump seed")]
    PdaDerivationExhausted,

    #[error("token owner {0} is off curve")]
    OwnerOffCurve(Address),

    #[error("recent blockhash is not set")]
    MissingBlockhash,

    #[error("message has no instructions")]
    NoInstructions,

    #[error("no signers provided")]
    NoSigners,

    #[error("missing signer for account {0}")]
    MissingSigner(Address),

    #[error("keypair {0} is not a required signer")]
    UnexpectedSigner(Address),

    #[error("message references {0} accounts, maximum is 256")]
    TooManyAccounts(usize),

    #[error("message requires {0} signatures, maximum is 255")]
    TooManySigners(usize),
}

impl SolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SolError::InvalidBase58Character { .. }
            | SolError::DecodedLengthMismatch { .. }
            | SolError::InvalidBase64(_)
            | SolError::MalformedVarInt(_)
            | SolError::LengthOverflow(_)
            | SolError::TruncatedMessage(_)
            | SolError::InvalidMessage(_) => ErrorKind::Encoding,

            SolError::SigningError(_)
            | SolError::InvalidSecretKey(_)
            | SolError::SignatureVerification(_)
            | SolError::KeyFile(_)
            | SolError::SeedTooLong { .. }
            | SolError::OwnerOffCurve(_) => ErrorKind::Crypto,

            SolError::MissingBlockhash
            | SolError::NoInstructions
            | SolError::NoSigners
            | SolError::MissingSigner(_)
            | SolError::UnexpectedSigner(_)
            | SolError::TooManyAccounts(_)
            | SolError::TooManySigners(_) => ErrorKind::BuilderState,

            SolError::PdaDerivationExhausted => ErrorKind::DerivationExhausted,
        }
    }
}

impl From<crypto_utils::CryptoError> for SolError {
    fn from(e: crypto_utils::CryptoError) -> Self {
        match e {
            crypto_utils::CryptoError::InvalidKeyLength { .. } => {
                SolError::InvalidSecretKey(e.to_string())
            }
            crypto_utils::CryptoError::RandomnessUnavailable(_) => {
                SolError::SigningError(e.to_string())
            }
        }
    }
}
