use std::fmt;

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// A fixed-size byte array that is zeroed when dropped.
///
/// Holds seeds and expanded secret keys. `Debug` never prints the contents,
/// so a `SecretBytes` can sit inside types that derive `Debug` without leaking
/// key material into logs or error messages.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize>([u8; N]);

impl<const N: usize> SecretBytes<N> {
    /// Wraps an existing array. The caller's copy is not wiped.
    pub fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// An all-zero buffer, meant to be filled in place.
    pub fn zeroed() -> Self {
        Self([0u8; N])
    }

    /// Copies `bytes` into a new container. The length must be exactly `N`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != N {
            return Err(CryptoError::InvalidKeyLength {
                expected: N,
                actual: bytes.len(),
            });
        }
        let mut out = Self::zeroed();
        out.0.copy_from_slice(bytes);
        Ok(out)
    }

    /// Borrow the secret bytes.
    pub fn expose(&self) -> &[u8; N] {
        &self.0
    }

    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<const N: usize> AsMut<[u8]> for SecretBytes<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes<{N}>([REDACTED])")
    }
}

impl<const N: usize> ConstantTimeEq for SecretBytes<N> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl<const N: usize> PartialEq for SecretBytes<N> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<const N: usize> Eq for SecretBytes<N> {}
