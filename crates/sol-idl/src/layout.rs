//! Byte layout of primitive IDL values.
//!
//! Multi-byte integers and floats are big-endian, strings carry a big-endian
//! `u16` length prefix and public keys are 32 raw bytes. Programs that read
//! these buffers depend on this exact order, so it is not the little-endian
//! Borsh layout.

use serde_json::{Number, Value};
use sol_core::{Address, ADDRESS_LENGTH};

use crate::error::IdlError;
use crate::schema::IdlType;

/// Append `value`, interpreted as `ty`, to `buf`. `name` labels errors.
pub(crate) fn write_value(
    buf: &mut Vec<u8>,
    name: &str,
    ty: &IdlType,
    value: &Value,
) -> Result<(), IdlError> {
    let invalid = || IdlError::InvalidArgument {
        name: name.to_string(),
        expected: ty.to_string(),
    };

    match ty {
        IdlType::Bool => buf.push(u8::from(value.as_bool().ok_or_else(invalid)?)),
        IdlType::U8 => buf.push(unsigned::<u8>(value).ok_or_else(invalid)?),
        IdlType::I8 => buf.extend_from_slice(&signed::<i8>(value).ok_or_else(invalid)?.to_be_bytes()),
        IdlType::U16 => buf.extend_from_slice(&unsigned::<u16>(value).ok_or_else(invalid)?.to_be_bytes()),
        IdlType::I16 => buf.extend_from_slice(&signed::<i16>(value).ok_or_else(invalid)?.to_be_bytes()),
        IdlType::U32 => buf.extend_from_slice(&unsigned::<u32>(value).ok_or_else(invalid)?.to_be_bytes()),
        IdlType::I32 => buf.extend_from_slice(&signed::<i32>(value).ok_or_else(invalid)?.to_be_bytes()),
        IdlType::U64 => buf.extend_from_slice(&value.as_u64().ok_or_else(invalid)?.to_be_bytes()),
        IdlType::I64 => buf.extend_from_slice(&value.as_i64().ok_or_else(invalid)?.to_be_bytes()),
        IdlType::F32 => {
            let v = value.as_f64().ok_or_else(invalid)? as f32;
            buf.extend_from_slice(&v.to_be_bytes());
        }
        IdlType::F64 => buf.extend_from_slice(&value.as_f64().ok_or_else(invalid)?.to_be_bytes()),
        IdlType::String => {
            let s = value.as_str().ok_or_else(invalid)?;
            let len = u16::try_from(s.len()).map_err(|_| invalid())?;
            buf.extend_from_slice(&len.to_be_bytes());
            buf.extend_from_slice(s.as_bytes());
        }
        IdlType::PublicKey => {
            let address = Address::from_base58(value.as_str().ok_or_else(invalid)?)?;
            buf.extend_from_slice(address.as_bytes());
        }
        other => return Err(IdlError::UnsupportedIdlType(other.to_string())),
    }
    Ok(())
}

/// Read one value of type `ty` from the front of `data`, advancing it.
pub(crate) fn read_value(data: &mut &[u8], name: &str, ty: &IdlType) -> Result<Value, IdlError> {
    Ok(match ty {
        IdlType::Bool => Value::Bool(take::<1>(data, name)?[0] != 0),
        IdlType::U8 => Value::from(take::<1>(data, name)?[0]),
        IdlType::I8 => Value::from(i8::from_be_bytes(take(data, name)?)),
        IdlType::U16 => Value::from(u16::from_be_bytes(take(data, name)?)),
        IdlType::I16 => Value::from(i16::from_be_bytes(take(data, name)?)),
        IdlType::U32 => Value::from(u32::from_be_bytes(take(data, name)?)),
        IdlType::I32 => Value::from(i32::from_be_bytes(take(data, name)?)),
        IdlType::U64 => Value::from(u64::from_be_bytes(take(data, name)?)),
        IdlType::I64 => Value::from(i64::from_be_bytes(take(data, name)?)),
        IdlType::F32 => float(f64::from(f32::from_be_bytes(take(data, name)?))),
        IdlType::F64 => float(f64::from_be_bytes(take(data, name)?)),
        IdlType::String => {
            let len = u16::from_be_bytes(take(data, name)?) as usize;
            if data.len() < len {
                return Err(IdlError::TruncatedAccount(name.to_string()));
            }
            let (bytes, rest) = data.split_at(len);
            *data = rest;
            let text = std::str::from_utf8(bytes)
                .map_err(|_| IdlError::InvalidUtf8(name.to_string()))?;
            Value::String(text.to_owned())
        }
        IdlType::PublicKey => {
            Value::String(Address::new(take::<ADDRESS_LENGTH>(data, name)?).to_base58())
        }
        other => return Err(IdlError::UnsupportedIdlType(other.to_string())),
    })
}

fn take<const N: usize>(data: &mut &[u8], name: &str) -> Result<[u8; N], IdlError> {
    if data.len() < N {
        return Err(IdlError::TruncatedAccount(name.to_string()));
    }
    let (head, rest) = data.split_at(N);
    *data = rest;
    let mut out = [0u8; N];
    out.copy_from_slice(head);
    Ok(out)
}

/// NaN and infinities have no JSON form.
fn float(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

fn unsigned<T: TryFrom<u64>>(value: &Value) -> Option<T> {
    value.as_u64().and_then(|v| T::try_from(v).ok())
}

fn signed<T: TryFrom<i64>>(value: &Value) -> Option<T> {
    value.as_i64().and_then(|v| T::try_from(v).ok())
}
