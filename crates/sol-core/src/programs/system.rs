//! System program instructions.
//!
//! Instruction data is a little-endian `u32` discriminant followed by the
//! instruction's fields, also little-endian.

use crate::address::Address;
use crate::instruction::{AccountMeta, Instruction};

use super::SYSTEM_PROGRAM_ID;

const CREATE_ACCOUNT: u32 = 0;
const TRANSFER: u32 = 2;

/// Move `lamports` from `from` (signer) to `to`.
pub fn transfer(from: &Address, to: &Address, lamports: u64) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&TRANSFER.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![AccountMeta::new(*from, true), AccountMeta::new(*to, false)],
        data,
    )
}

/// Create `new_account` funded by `from`, allocate `space` bytes and assign
/// it to `owner`. Both accounts must sign.
pub fn create_account(
    from: &Address,
    new_account: &Address,
    lamports: u64,
    space: u64,
    owner: &Address,
) -> Instruction {
    let mut data = Vec::with_capacity(52);
    data.extend_from_slice(&CREATE_ACCOUNT.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner.as_bytes());

    Instruction::new(
        SYSTEM_PROGRAM_ID,
        vec![
            AccountMeta::new(*from, true),
            AccountMeta::new(*new_account, true),
        ],
        data,
    )
}
