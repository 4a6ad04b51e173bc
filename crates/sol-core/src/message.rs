//! Legacy Solana messages: the canonical, signable payload.
//!
//! Building happens in two phases. A [`MessageBuilder`] collects instructions
//! and the recent blockhash; [`MessageBuilder::compile`] turns it into an
//! immutable [`Message`] whose account list and instruction indices are
//! final. Only a `Message` can be serialized.
//!
//! ```text
//! Message:
//!   num_required_sigs     u8
//!   num_readonly_signed   u8
//!   num_readonly_unsigned u8
//!   num_accounts          compact-u16
//!   account_keys          32 bytes * num_accounts
//!   recent_blockhash      32 bytes
//!   num_instructions      compact-u16
//!   instructions[]        (see below)
//!
//! Instruction:
//!   program_id_index      u8
//!   num_accounts          compact-u16
//!   account_indices       u8 * num_accounts
//!   data_len              compact-u16
//!   data                  u8 * data_len
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::address::Address;
use crate::blockhash::Blockhash;
use crate::codec::reader::WireReader;
use crate::codec::varint::write_sequence_length;
use crate::error::SolError;
use crate::instruction::Instruction;

/// Account indices are single bytes on the wire.
pub const MAX_ACCOUNTS: usize = 256;

/// Counts that split the account list into its four permission buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageHeader {
    /// The first `num_required_signatures` accounts must sign.
    pub num_required_signatures: u8,
    /// Trailing signers that are read-only.
    pub num_readonly_signed_accounts: u8,
    /// Trailing non-signers that are read-only.
    pub num_readonly_unsigned_accounts: u8,
}

/// An instruction whose accounts are indices into the message account list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// A compiled message.
///
/// `account_keys` is deduplicated and ordered: fee payer, then writable
/// signers, read-only signers, writable non-signers, read-only non-signers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Address>,
    pub recent_blockhash: Blockhash,
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// The account that pays fees, always index 0.
    pub fn fee_payer(&self) -> Option<&Address> {
        self.account_keys.first()
    }

    /// The accounts that must sign, in signature order.
    pub fn signer_keys(&self) -> &[Address] {
        let n = (self.header.num_required_signatures as usize).min(self.account_keys.len());
        &self.account_keys[..n]
    }

    pub fn is_signer(&self, index: usize) -> bool {
        index < self.header.num_required_signatures as usize
    }

    pub fn is_writable(&self, index: usize) -> bool {
        let num_signed = self.header.num_required_signatures as usize;
        let readonly_signed = self.header.num_readonly_signed_accounts as usize;
        let readonly_unsigned = self.header.num_readonly_unsigned_accounts as usize;

        if index >= self.account_keys.len() {
            false
        } else if index < num_signed {
            index < num_signed - readonly_signed
        } else {
            index < self.account_keys.len() - readonly_unsigned
        }
    }

    /// Serialize into the bytes every signer signs.
    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let mut buf = Vec::with_capacity(
            3 + 3 + 32 * self.account_keys.len() + 32 + 3 + 64 * self.instructions.len(),
        );

        buf.push(self.header.num_required_signatures);
        buf.push(self.header.num_readonly_signed_accounts);
        buf.push(self.header.num_readonly_unsigned_accounts);

        write_sequence_length(&mut buf, self.account_keys.len())?;
        for key in &self.account_keys {
            buf.extend_from_slice(key.as_bytes());
        }

        buf.extend_from_slice(self.recent_blockhash.as_bytes());

        write_sequence_length(&mut buf, self.instructions.len())?;
        for ix in &self.instructions {
            buf.push(ix.program_id_index);

            write_sequence_length(&mut buf, ix.accounts.len())?;
            buf.extend_from_slice(&ix.accounts);

            write_sequence_length(&mut buf, ix.data.len())?;
            buf.extend_from_slice(&ix.data);
        }

        Ok(buf)
    }

    /// Parse a serialized message. The whole buffer must be consumed.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, SolError> {
        let mut reader = WireReader::new(bytes);
        let message = Self::read(&mut reader)?;

        let trailing = reader.remaining().len();
        if trailing != 0 {
            return Err(SolError::InvalidMessage(format!(
                "{trailing} trailing bytes after message ending at byte {}",
                reader.offset()
            )));
        }
        Ok(message)
    }

    pub(crate) fn read(reader: &mut WireReader<'_>) -> Result<Self, SolError> {
        let header = MessageHeader {
            num_required_signatures: reader.read_u8("header")?,
            num_readonly_signed_accounts: reader.read_u8("header")?,
            num_readonly_unsigned_accounts: reader.read_u8("header")?,
        };

        let num_accounts = reader.read_len("account count")?;
        let mut account_keys = Vec::with_capacity(num_accounts);
        for _ in 0..num_accounts {
            account_keys.push(Address::new(reader.read_array::<32>("account key")?));
        }

        let recent_blockhash = Blockhash::new(reader.read_array::<32>("recent blockhash")?);

        let num_instructions = reader.read_len("instruction count")?;
        let mut instructions = Vec::with_capacity(num_instructions.min(reader.remaining().len()));
        for _ in 0..num_instructions {
            let program_id_index = reader.read_u8("program id index")?;
            let n = reader.read_len("instruction account count")?;
            let accounts = reader.read_bytes(n, "instruction account indices")?.to_vec();
            let len = reader.read_len("instruction data length")?;
            let data = reader.read_bytes(len, "instruction data")?.to_vec();
            instructions.push(CompiledInstruction {
                program_id_index,
                accounts,
                data,
            });
        }

        let message = Message {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        };
        message.sanity_check()?;
        Ok(message)
    }

    /// Structural checks that a well-formed message always passes.
    fn sanity_check(&self) -> Result<(), SolError> {
        let n = self.account_keys.len();
        let signed = self.header.num_required_signatures as usize;
        let readonly_signed = self.header.num_readonly_signed_accounts as usize;
        let readonly_unsigned = self.header.num_readonly_unsigned_accounts as usize;

        if signed > n {
            return Err(SolError::InvalidMessage(format!(
                "{signed} required signatures but only {n} accounts"
            )));
        }
        if readonly_signed > signed {
            return Err(SolError::InvalidMessage(
                "more read-only signers than signers".into(),
            ));
        }
        if readonly_unsigned > n - signed {
            return Err(SolError::InvalidMessage(
                "more read-only non-signers than non-signers".into(),
            ));
        }

        for ix in &self.instructions {
            let out_of_range = std::iter::once(&ix.program_id_index)
                .chain(ix.accounts.iter())
                .find(|&&i| i as usize >= n);
            if let Some(i) = out_of_range {
                return Err(SolError::InvalidMessage(format!(
                    "account index {i} out of range for {n} accounts"
                )));
            }
        }
        Ok(())
    }
}

/// Mutable, in-progress message.
///
/// Not meant to be shared across threads while it is being filled in.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    instructions: Vec<Instruction>,
    recent_blockhash: Option<Blockhash>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_instruction(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn set_recent_blockhash(&mut self, blockhash: Blockhash) -> &mut Self {
        self.recent_blockhash = Some(blockhash);
        self
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn recent_blockhash(&self) -> Option<&Blockhash> {
        self.recent_blockhash.as_ref()
    }

    /// Compile the collected instructions with `fee_payer` at index 0.
    pub fn compile(&self, fee_payer: &Address) -> Result<Message, SolError> {
        let recent_blockhash = self
            .recent_blockhash
            .filter(|hash| !hash.is_unset())
            .ok_or(SolError::MissingBlockhash)?;

        if self.instructions.is_empty() {
            return Err(SolError::NoInstructions);
        }

        let (header, account_keys) = order_accounts(fee_payer, &self.instructions)?;

        let positions: HashMap<Address, u8> = account_keys
            .iter()
            .enumerate()
            .map(|(i, key)| (*key, i as u8))
            .collect();

        // Every key was collected above, so lookups cannot miss.
        let instructions = self
            .instructions
            .iter()
            .map(|ix| CompiledInstruction {
                program_id_index: positions[&ix.program_id],
                accounts: ix.accounts.iter().map(|m| positions[&m.address]).collect(),
                data: ix.data.clone(),
            })
            .collect();

        tracing::debug!(
            accounts = account_keys.len(),
            instructions = self.instructions.len(),
            signers = header.num_required_signatures,
            "compiled message"
        );

        Ok(Message {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        })
    }
}

#[derive(Clone, Copy, Default)]
struct KeyFlags {
    is_signer: bool,
    is_writable: bool,
}

impl KeyFlags {
    fn bucket(self) -> u8 {
        match (self.is_signer, self.is_writable) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    }
}

/// Deduplicate every referenced key, merge its flags, and lay the keys out
/// in bucket order. Within a bucket keys are sorted by their bytes, so the
/// result does not depend on instruction order.
fn order_accounts(
    fee_payer: &Address,
    instructions: &[Instruction],
) -> Result<(MessageHeader, Vec<Address>), SolError> {
    let mut flags: BTreeMap<Address, KeyFlags> = BTreeMap::new();

    let mut upsert = |address: Address, is_signer: bool, is_writable: bool| {
        let entry = flags.entry(address).or_default();
        entry.is_signer |= is_signer;
        entry.is_writable |= is_writable;
    };

    for ix in instructions {
        for meta in &ix.accounts {
            upsert(meta.address, meta.is_signer, meta.is_writable);
        }
        // Program ids are non-signer, read-only accounts.
        upsert(ix.program_id, false, false);
    }
    flags.remove(fee_payer);

    let total = flags.len() + 1;
    if total > MAX_ACCOUNTS {
        return Err(SolError::TooManyAccounts(total));
    }

    let mut account_keys = Vec::with_capacity(total);
    account_keys.push(*fee_payer);
    for bucket in 0..4 {
        account_keys.extend(
            flags
                .iter()
                .filter(|(_, f)| f.bucket() == bucket)
                .map(|(address, _)| *address),
        );
    }

    let count = |pred: fn(&KeyFlags) -> bool| flags.values().filter(|f| pred(f)).count();
    let signers = 1 + count(|f| f.is_signer);
    let num_required_signatures =
        u8::try_from(signers).map_err(|_| SolError::TooManySigners(signers))?;
    // Both counts are bounded by the 255 non-payer accounts.
    let header = MessageHeader {
        num_required_signatures,
        num_readonly_signed_accounts: count(|f| f.is_signer && !f.is_writable) as u8,
        num_readonly_unsigned_accounts: count(|f| !f.is_signer && !f.is_writable) as u8,
    };

    Ok((header, account_keys))
}
