//! Program-derived addresses.
//!
//! A PDA is `SHA-256(seed_0 || ... || seed_n || program_id || "ProgramDerivedAddress")`
//! accepted only when the digest is NOT a valid Ed25519 point, so no private
//! key can ever exist for it. [`find_program_address`] appends a one-byte
//! bump seed and walks it from 255 down to 0 until that holds.

use sha2::{Digest, Sha256};

use crate::address::{is_on_curve, Address};
use crate::error::SolError;

/// Maximum length of a single seed.
pub const MAX_SEED_LENGTH: usize = 32;

/// Domain separator appended after the program id.
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Find the canonical program address and bump seed for `seeds`.
///
/// Deterministic: the same inputs always give the same `(address, bump)`,
/// so callers can recompute addresses without asking the network.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<(Address, u8), SolError> {
    check_seeds(seeds)?;

    for bump in (0u8..=255).rev() {
        if let Some(address) = derive(seeds, Some(bump), program_id) {
            tracing::debug!(%program_id, %address, bump, "derived program address");
            return Ok((address, bump));
        }
        tracing::trace!(bump, "bump produced an on-curve point");
    }

    Err(SolError::PdaDerivationExhausted)
}

/// Derive a program address from `seeds` exactly as given.
///
/// Returns `Ok(None)` when the digest lands on the curve; the caller usually
/// retries with another bump seed.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<Option<Address>, SolError> {
    check_seeds(seeds)?;
    Ok(derive(seeds, None, program_id))
}

fn check_seeds(seeds: &[&[u8]]) -> Result<(), SolError> {
    if let Some(seed) = seeds.iter().find(|s| s.len() > MAX_SEED_LENGTH) {
        return Err(SolError::SeedTooLong {
            len: seed.len(),
            max: MAX_SEED_LENGTH,
        });
    }
    Ok(())
}

fn derive(seeds: &[&[u8]], bump: Option<u8>, program_id: &Address) -> Option<Address> {
    let mut hasher = Sha256::new();

    for seed in seeds {
        hasher.update(seed);
    }
    if let Some(bump) = bump {
        hasher.update([bump]);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);

    let hash: [u8; 32] = hasher.finalize().into();

    if is_on_curve(&hash) {
        return None;
    }

    Some(Address::new(hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(text: &str) -> Address {
        Address::from_base58(text).unwrap()
    }

    // -- known vectors ------------------------------------------------------

    #[test]
    fn single_seed_vector() {
        let seed = addr("8VBafTNv1F8k5Bg7DTVwhitw3MGAMTmekHsgLuMJxLC8");
        let program_id = addr("6Cust2JhvweKLh4CVo1dt21s2PJ86uNGkziudpkNPaCj");

        let (pda, bump) = find_program_address(&[seed.as_ref()], &program_id).unwrap();

        assert_eq!(pda.to_base58(), "FGnnqkzkXUGKD7wtgJCqTemU3WZ6yYqkYJ8xoQoXVvUG");
        assert_eq!(bump, 255);
    }

    #[test]
    fn multi_seed_vector() {
        let seeds = [
            addr("SeedPubey1111111111111111111111111111111111"),
            addr("3gF2KMe9KiC6FNVBmfg9i267aMPvK37FewCip4eGBFcT"),
            addr("HwRVBufQ4haG5XSgpspwKtNd3PC9GM9m1196uJW36vds"),
        ];
        let program_id = addr("BPFLoader1111111111111111111111111111111111");
        let seed_refs: Vec<&[u8]> = seeds.iter().map(|s| s.as_ref()).collect();

        let (pda, bump) = find_program_address(&seed_refs, &program_id).unwrap();

        assert_eq!(pda.to_base58(), "GXLbx3CbJuTTtJDZeS1PGzwJJ5jGYVEqcXum7472kpUp");
        assert_eq!(bump, 254);
    }

    #[test]
    fn create_with_found_bump_reproduces_address() {
        let program_id = addr("BPFLoader1111111111111111111111111111111111");
        let (pda, bump) = find_program_address(&[b"vault"], &program_id).unwrap();

        let recreated = create_program_address(&[b"vault", &[bump]], &program_id)
            .unwrap()
            .unwrap();
        assert_eq!(recreated, pda);
    }

    // -- properties ---------------------------------------------------------

    #[test]
    fn result_is_off_curve() {
        let program_id = Address::new([0x11; 32]);
        for i in 0u8..32 {
            let (pda, _) = find_program_address(&[&[i], b"seed"], &program_id).unwrap();
            assert!(!pda.is_on_curve(), "PDA must NOT be on the Ed25519 curve");
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let program_id = Address::new([0x22; 32]);
        let a = find_program_address(&[b"abc", &[1, 2, 3]], &program_id).unwrap();
        let b = find_program_address(&[b"abc", &[1, 2, 3]], &program_id).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seed_order_matters() {
        let program_id = Address::new([0x33; 32]);
        let (a, _) = find_program_address(&[b"a", b"b"], &program_id).unwrap();
        let (b, _) = find_program_address(&[b"b", b"a"], &program_id).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn different_programs_give_different_addresses() {
        let (a, _) = find_program_address(&[b"x"], &Address::new([1; 32])).unwrap();
        let (b, _) = find_program_address(&[b"x"], &Address::new([2; 32])).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_seed_list_is_allowed() {
        let (pda, _) = find_program_address(&[], &Address::new([9; 32])).unwrap();
        assert!(!pda.is_on_curve());
    }

    // -- seed validation ----------------------------------------------------

    #[test]
    fn seed_of_32_bytes_is_accepted() {
        assert!(find_program_address(&[&[0u8; 32]], &Address::default()).is_ok());
    }

    #[test]
    fn seed_over_32_bytes_is_rejected() {
        let long = [0u8; 33];
        let err = find_program_address(&[b"ok", &long], &Address::default()).unwrap_err();
        assert!(matches!(err, SolError::SeedTooLong { len: 33, max: 32 }));

        let err = create_program_address(&[&long], &Address::default()).unwrap_err();
        assert!(matches!(err, SolError::SeedTooLong { .. }));
    }
}
