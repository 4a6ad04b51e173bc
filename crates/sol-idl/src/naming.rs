//! Name conversions and discriminators.
//!
//! IDL instruction names are camelCase while the on-chain dispatcher hashes
//! snake_case names, so both directions are needed.

use sha2::{Digest, Sha256};

pub const DISCRIMINATOR_LENGTH: usize = 8;

/// `setData` -> `set_data`, `SetData` -> `set_data`.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `data_account` -> `dataAccount`. Names already in camelCase pass through.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `SHA-256("global:" + snake_case(name))[..8]`
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LENGTH] {
    sighash("global", &to_snake_case(name))
}

/// `SHA-256("account:" + name)[..8]`, with the account name as declared.
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LENGTH] {
    sighash("account", name)
}

fn sighash(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LENGTH] {
    let digest = Sha256::new()
        .chain_update(namespace.as_bytes())
        .chain_update(b":")
        .chain_update(name.as_bytes())
        .finalize();
    let mut out = [0u8; DISCRIMINATOR_LENGTH];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LENGTH]);
    out
}
