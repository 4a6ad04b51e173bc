use crate::codec::varint;
use crate::error::SolError;

/// Forward-only cursor over wire bytes. Every read names the field it was
/// after so truncation errors point at the right place.
pub(crate) struct WireReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn remaining(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    pub(crate) fn read_u8(&mut self, field: &str) -> Result<u8, SolError> {
        Ok(self.read_bytes(1, field)?[0])
    }

    pub(crate) fn read_len(&mut self, field: &str) -> Result<usize, SolError> {
        let (value, consumed) = varint::decode_length(self.remaining()).map_err(|e| match e {
            SolError::TruncatedMessage(_) => truncated(field, self.offset),
            other => other,
        })?;
        self.offset += consumed;
        Ok(value as usize)
    }

    pub(crate) fn read_bytes(&mut self, len: usize, field: &str) -> Result<&'a [u8], SolError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| truncated(field, self.offset))?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    pub(crate) fn read_array<const N: usize>(&mut self, field: &str) -> Result<[u8; N], SolError> {
        let bytes = self.read_bytes(N, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

fn truncated(field: &str, offset: usize) -> SolError {
    SolError::TruncatedMessage(format!("buffer ended while reading {field} at byte {offset}"))
}
