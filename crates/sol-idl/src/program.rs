//! A program client assembled from its IDL.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde_json::Value;
use sol_core::{Address, Instruction};

use crate::decoder::AccountDecoder;
use crate::encoder::InstructionEncoder;
use crate::error::IdlError;
use crate::schema::Idl;

/// An IDL bound to the address the program is deployed at.
#[derive(Debug, Clone)]
pub struct Program {
    idl: Idl,
    program_id: Address,
    instructions: BTreeMap<String, InstructionEncoder>,
    accounts: BTreeMap<String, AccountDecoder>,
}

impl Program {
    pub fn new(idl: Idl, program_id: Address) -> Self {
        let instructions = idl
            .instructions
            .iter()
            .map(|ix| (ix.name.clone(), InstructionEncoder::new(ix.clone(), program_id)))
            .collect();
        let accounts = idl
            .accounts
            .iter()
            .map(|acc| (acc.name.clone(), AccountDecoder::new(acc.clone())))
            .collect();

        Self {
            idl,
            program_id,
            instructions,
            accounts,
        }
    }

    pub fn from_json_str(json: &str, program_id: Address) -> Result<Self, IdlError> {
        Ok(Self::new(Idl::from_json_str(json)?, program_id))
    }

    /// Load the IDL from a JSON file.
    pub fn load(path: impl AsRef<Path>, program_id: Address) -> Result<Self, IdlError> {
        Ok(Self::new(Idl::load(path)?, program_id))
    }

    pub fn idl(&self) -> &Idl {
        &self.idl
    }

    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    pub fn instruction(&self, name: &str) -> Result<&InstructionEncoder, IdlError> {
        self.instructions
            .get(name)
            .ok_or_else(|| IdlError::UnknownInstruction(name.to_string()))
    }

    pub fn account(&self, name: &str) -> Result<&AccountDecoder, IdlError> {
        self.accounts
            .get(name)
            .ok_or_else(|| IdlError::UnknownAccount(name.to_string()))
    }

    /// Shorthand for `self.instruction(name)?.build(accounts, args)`.
    pub fn build_instruction(
        &self,
        name: &str,
        accounts: &HashMap<String, Address>,
        args: &Value,
    ) -> Result<Instruction, IdlError> {
        self.instruction(name)?.build(accounts, args)
    }
}
