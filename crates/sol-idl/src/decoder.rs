//! Decode program-owned account data described by the IDL.

use serde_json::{Map, Value};
use sol_core::codec::base64;

use crate::error::IdlError;
use crate::layout::read_value;
use crate::naming::{account_discriminator, DISCRIMINATOR_LENGTH};
use crate::schema::IdlAccountDef;

/// Decoder for one account type.
#[derive(Debug, Clone)]
pub struct AccountDecoder {
    definition: IdlAccountDef,
    discriminator: [u8; DISCRIMINATOR_LENGTH],
}

impl AccountDecoder {
    pub fn new(definition: IdlAccountDef) -> Self {
        let discriminator = account_discriminator(&definition.name);
        Self {
            definition,
            discriminator,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn discriminator(&self) -> [u8; DISCRIMINATOR_LENGTH] {
        self.discriminator
    }

    /// Decode raw account data into a JSON object keyed by field name.
    ///
    /// Bytes after the last declared field are ignored; accounts are often
    /// allocated larger than their current layout.
    pub fn decode(&self, data: &[u8]) -> Result<Value, IdlError> {
        if data.len() < DISCRIMINATOR_LENGTH
            || data[..DISCRIMINATOR_LENGTH] != self.discriminator
        {
            return Err(IdlError::DiscriminatorMismatch(self.definition.name.clone()));
        }

        let mut cursor = &data[DISCRIMINATOR_LENGTH..];
        let mut fields = Map::new();
        for field in &self.definition.ty.fields {
            let value = read_value(&mut cursor, &field.name, &field.ty)?;
            fields.insert(field.name.clone(), value);
        }
        Ok(Value::Object(fields))
    }

    /// Decode account data as returned by `getAccountInfo` with base64
    /// encoding.
    pub fn decode_base64(&self, text: &str) -> Result<Value, IdlError> {
        self.decode(&base64::decode(text)?)
    }
}
