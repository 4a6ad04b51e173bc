//! Build instructions from an IDL instruction definition.

use std::collections::HashMap;

use serde_json::Value;
use sol_core::{AccountMeta, Address, Instruction};

use crate::error::IdlError;
use crate::layout::write_value;
use crate::naming::{instruction_discriminator, to_camel_case, DISCRIMINATOR_LENGTH};
use crate::schema::IdlInstruction;

/// Encoder for one instruction of one program.
#[derive(Debug, Clone)]
pub struct InstructionEncoder {
    program_id: Address,
    definition: IdlInstruction,
    discriminator: [u8; DISCRIMINATOR_LENGTH],
}

impl InstructionEncoder {
    pub fn new(definition: IdlInstruction, program_id: Address) -> Self {
        let discriminator = instruction_discriminator(&definition.name);
        Self {
            program_id,
            definition,
            discriminator,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &IdlInstruction {
        &self.definition
    }

    pub fn discriminator(&self) -> [u8; DISCRIMINATOR_LENGTH] {
        self.discriminator
    }

    /// Instruction data: the discriminator followed by every declared
    /// argument in order.
    ///
    /// `args` is either a JSON array (positional) or an object keyed by
    /// argument name. `Null` means no arguments.
    pub fn encode_data(&self, args: &Value) -> Result<Vec<u8>, IdlError> {
        if let Some(field) = self.definition.args.iter().find(|f| !f.ty.is_primitive()) {
            return Err(IdlError::UnsupportedIdlType(field.ty.to_string()));
        }

        let mut buf = Vec::with_capacity(DISCRIMINATOR_LENGTH + 8 * self.definition.args.len());
        buf.extend_from_slice(&self.discriminator);

        for (i, field) in self.definition.args.iter().enumerate() {
            let value = match args {
                Value::Array(items) => items.get(i),
                Value::Object(map) => map.get(&field.name),
                _ => None,
            }
            .ok_or_else(|| IdlError::MissingArgument(field.name.clone()))?;

            write_value(&mut buf, &field.name, &field.ty, value)?;
        }
        Ok(buf)
    }

    /// Account metas in declared order.
    ///
    /// `accounts` is keyed by the camelCase account name. An optional
    /// account with no address is filled with the program id, which the
    /// program reads as "absent".
    pub fn account_metas(
        &self,
        accounts: &HashMap<String, Address>,
    ) -> Result<Vec<AccountMeta>, IdlError> {
        self.definition
            .accounts
            .iter()
            .map(|item| {
                let key = to_camel_case(&item.name);
                match accounts.get(&key) {
                    Some(address) => Ok(AccountMeta {
                        address: *address,
                        is_signer: item.is_signer,
                        is_writable: item.is_mut,
                    }),
                    None if item.is_optional => {
                        Ok(AccountMeta::new_readonly(self.program_id, false))
                    }
                    None => Err(IdlError::MissingAccount(key)),
                }
            })
            .collect()
    }

    pub fn build(
        &self,
        accounts: &HashMap<String, Address>,
        args: &Value,
    ) -> Result<Instruction, IdlError> {
        let metas = self.account_metas(accounts)?;
        let data = self.encode_data(args)?;
        tracing::trace!(
            instruction = %self.definition.name,
            accounts = metas.len(),
            data_len = data.len(),
            "encoded instruction"
        );
        Ok(Instruction::new(self.program_id, metas, data))
    }
}
