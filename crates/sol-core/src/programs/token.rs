//! SPL Token transfers and associated token accounts.

use crate::address::Address;
use crate::error::SolError;
use crate::instruction::{AccountMeta, Instruction};
use crate::pda::find_program_address;

use super::{ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};

const TRANSFER: u8 = 3;

// ---------------------------------------------------------------------------
// Token transfer
// ---------------------------------------------------------------------------

/// Move `amount` base units from `source` to `destination`, authorized by
/// `owner`.
///
/// Data is the one-byte `Transfer` tag followed by the amount as `u64` LE.
pub fn transfer(
    source: &Address,
    destination: &Address,
    owner: &Address,
    amount: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(9);
    data.push(TRANSFER);
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction::new(
        TOKEN_PROGRAM_ID,
        vec![
            AccountMeta::new(*source, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*owner, true),
        ],
        data,
    )
}

// ---------------------------------------------------------------------------
// Associated token accounts
// ---------------------------------------------------------------------------

/// The associated token account of `owner` for `mint`.
///
/// Seeds are `[owner, token_program, mint]` under the associated token
/// program. Owners that are themselves program addresses are rejected with
/// [`SolError::OwnerOffCurve`] unless `allow_owner_off_curve` is set.
pub fn get_associated_token_address(
    mint: &Address,
    owner: &Address,
    allow_owner_off_curve: bool,
) -> Result<Address, SolError> {
    if !allow_owner_off_curve && !owner.is_on_curve() {
        return Err(SolError::OwnerOffCurve(*owner));
    }

    let (address, _bump) = find_program_address(
        &[owner.as_bytes(), TOKEN_PROGRAM_ID.as_bytes(), mint.as_bytes()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )?;
    Ok(address)
}

/// Create `associated_token` for `owner` and `mint`, paid for by `payer`.
pub fn create_associated_token_account(
    payer: &Address,
    associated_token: &Address,
    owner: &Address,
    mint: &Address,
) -> Instruction {
    Instruction::new(
        ASSOCIATED_TOKEN_PROGRAM_ID,
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*associated_token, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        Vec::new(),
    )
}
