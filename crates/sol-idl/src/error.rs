use sol_core::{ErrorKind, SolError};
use thiserror::Error;

/// Errors from IDL parsing, instruction encoding and account decoding.
#[derive(Debug, Error)]
pub enum IdlError {
    #[error("unsupported idl type: {0}")]
    UnsupportedIdlType(String),

    #[error("no address supplied for account {0}")]
    MissingAccount(String),

    #[error("missing argument {0}")]
    MissingArgument(String),

    #[error("invalid value for {name}: expected {expected}")]
    InvalidArgument { name: String, expected: String },

    #[error("unknown instruction {0}")]
    UnknownInstruction(String),

    #[error("unknown account type {0}")]
    UnknownAccount(String),

    #[error("account data is not a {0} account")]
    DiscriminatorMismatch(String),

    #[error("account data ends before field {0}")]
    TruncatedAccount(String),

    #[error("account field {0} is not valid utf-8")]
    InvalidUtf8(String),

    #[error("invalid idl json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read idl: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sol(#[from] SolError),
}

impl IdlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdlError::Sol(e) => e.kind(),
            IdlError::TruncatedAccount(_) | IdlError::InvalidUtf8(_) => ErrorKind::Encoding,
            _ => ErrorKind::Schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IdlError::UnsupportedIdlType("vec<u8>".into());
        assert_eq!(err.to_string(), "unsupported idl type: vec<u8>");

        let err = IdlError::MissingAccount("dataAccount".into());
        assert_eq!(err.to_string(), "no address supplied for account dataAccount");

        let err = IdlError::InvalidArgument {
            name: "amount".into(),
            expected: "u64".into(),
        };
        assert_eq!(err.to_string(), "invalid value for amount: expected u64");
    }

    #[test]
    fn schema_errors_map_to_schema_kind() {
        assert_eq!(IdlError::MissingArgument("x".into()).kind(), ErrorKind::Schema);
        assert_eq!(IdlError::UnsupportedIdlType("x".into()).kind(), ErrorKind::Schema);
        assert_eq!(IdlError::TruncatedAccount("x".into()).kind(), ErrorKind::Encoding);
        assert_eq!(IdlError::InvalidUtf8("x".into()).kind(), ErrorKind::Encoding);
        assert_eq!(
            IdlError::from(SolError::PdaDerivationExhausted).kind(),
            ErrorKind::DerivationExhausted
        );
    }
}
