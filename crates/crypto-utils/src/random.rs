use rand_core::{OsRng, RngCore};

use crate::error::CryptoError;
use crate::secret::SecretBytes;

/// Draws an `N`-byte secret seed from the operating system CSPRNG.
///
/// The seed is returned in a [`SecretBytes`] container so it is wiped once
/// the caller has turned it into key material.
pub fn random_seed<const N: usize>() -> Result<SecretBytes<N>, CryptoError> {
    let mut seed = SecretBytes::<N>::zeroed();
    OsRng
        .try_fill_bytes(seed.as_mut())
        .map_err(|e| CryptoError::RandomnessUnavailable(e.to_string()))?;
    Ok(seed)
}
