//! Ed25519 key material.
//!
//! A keypair's 64-byte secret key uses the conventional expanded layout:
//! the 32-byte seed followed by the 32-byte public key. The same layout is
//! used for key files (raw bytes, no wrapping structure).

use std::fmt;
use std::path::Path;

use crypto_utils::{random_seed, SecretBytes};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::address::Address;
use crate::error::SolError;
use crate::signature::Signature;

/// Length of the seed a keypair is derived from.
pub const SEED_LENGTH: usize = 32;

/// Length of the expanded secret key (`seed || public key`).
pub const SECRET_KEY_LENGTH: usize = 64;

/// An Ed25519 signing keypair.
///
/// The address is always the public key derived from the seed half of the
/// secret key. The signing key is wiped when the keypair is dropped.
#[derive(Clone)]
pub struct Keypair {
    address: Address,
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a fresh keypair from the operating system CSPRNG.
    pub fn generate() -> Result<Self, SolError> {
        let seed = random_seed::<SEED_LENGTH>()?;
        Ok(Self::from_seed(seed.expose()))
    }

    /// Derive a keypair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    /// Rebuild a keypair from a 64-byte expanded secret key.
    ///
    /// The public half must match the key derived from the seed half.
    pub fn from_secret_key(secret_key: &[u8]) -> Result<Self, SolError> {
        let bytes = SecretBytes::<SECRET_KEY_LENGTH>::from_slice(secret_key)?;

        let signing_key = SigningKey::from_keypair_bytes(bytes.expose()).map_err(|_| {
            SolError::InvalidSecretKey("public key does not match secret seed".into())
        })?;

        Ok(Self::from_signing_key(signing_key))
    }

    /// Load a keypair from a raw 64-byte key file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SolError> {
        let path = path.as_ref();
        let contents = Zeroizing::new(std::fs::read(path)?);
        tracing::debug!(path = %path.display(), "loaded keypair file");
        Self::from_secret_key(&contents)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = Address::new(signing_key.verifying_key().to_bytes());
        Self {
            address,
            signing_key,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Export the expanded secret key. The copy is wiped when dropped.
    pub fn secret_key(&self) -> SecretBytes<SECRET_KEY_LENGTH> {
        SecretBytes::new(self.signing_key.to_keypair_bytes())
    }

    /// Produce a detached Ed25519 signature over `message`.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message).into()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Sign `message` with a raw expanded secret key.
///
/// Fails with [`SolError::SigningError`] if the key is not exactly 64 bytes
/// or its halves do not belong together.
pub fn sign_detached(secret_key: &[u8], message: &[u8]) -> Result<Signature, SolError> {
    let keypair = Keypair::from_secret_key(secret_key).map_err(|e| match e {
        SolError::InvalidSecretKey(reason) => SolError::SigningError(reason),
        other => other,
    })?;
    Ok(keypair.sign(message))
}

/// Check a detached signature against the public key in `address`.
pub fn verify_signature(
    address: &Address,
    message: &[u8],
    signature: &Signature,
) -> Result<(), SolError> {
    let key = VerifyingKey::from_bytes(address.as_bytes())
        .map_err(|_| SolError::SignatureVerification(*address))?;
    let signature: ed25519_dalek::Signature = (*signature).into();
    key.verify_strict(message, &signature)
        .map_err(|_| SolError::SignatureVerification(*address))
}
