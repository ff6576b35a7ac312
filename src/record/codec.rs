//! Binary codec for export records.
//!
//! Records are persisted across incremental builds, so the layout is
//! explicit ordered fields rather than a derived format - stable and
//! auditable across cache-format versions:
//!
//! ```text
//! u32 LE   range.start
//! u32 LE   range.end
//! u8       base tag (declaration order of ExportBase, 0..=5)
//! u32 LE   number of name segments (>= 1)
//! repeat:  u32 LE byte length, UTF-8 bytes
//! ```
//!
//! `decode(encode(r)) == r` for every valid record; decode consumes the
//! whole input and re-validates through the record constructor.

use super::{ExportBase, ExportRecord, RecordError, SourceRange};
use thiserror::Error;

/// Errors that can occur while decoding a cached export record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("record truncated while reading {field}: {missing} byte(s) missing")]
    Truncated { field: &'static str, missing: usize },

    #[error("invalid base tag byte: {0}")]
    InvalidBaseTag(u8),

    #[error("name segment is not valid UTF-8")]
    InvalidUtf8,

    #[error("record declares zero name segments")]
    ZeroNames,

    #[error("{0} trailing byte(s) after record")]
    TrailingBytes(usize),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Encodes a record into its stable cache layout.
pub fn encode(record: &ExportRecord) -> Vec<u8> {
    let names = record.names();
    let payload: usize = names.iter().map(|n| 4 + n.len()).sum();
    let mut buf = Vec::with_capacity(13 + payload);

    buf.extend_from_slice(&record.range().start.to_le_bytes());
    buf.extend_from_slice(&record.range().end.to_le_bytes());
    buf.push(record.base().tag());
    buf.extend_from_slice(&(names.len() as u32).to_le_bytes());
    for name in names {
        buf.extend_from_slice(&(name.len() as u32).to_le_bytes());
        buf.extend_from_slice(name.as_bytes());
    }
    buf
}

/// Decodes a record, consuming the entire input.
pub fn decode(bytes: &[u8]) -> CodecResult<ExportRecord> {
    let mut cursor = Cursor { bytes, pos: 0 };

    let start = cursor.read_u32("range.start")?;
    let end = cursor.read_u32("range.end")?;
    let tag = cursor.read_u8("base tag")?;
    let base = ExportBase::from_tag(tag).ok_or(CodecError::InvalidBaseTag(tag))?;

    let count = cursor.read_u32("name count")? as usize;
    if count == 0 {
        return Err(CodecError::ZeroNames);
    }

    // A corrupt count must not drive pre-allocation; each segment read
    // below fails fast on truncated input anyway.
    let mut names = Vec::with_capacity(count.min(16));
    for _ in 0..count {
        let len = cursor.read_u32("name length")? as usize;
        let raw = cursor.read_slice(len, "name bytes")?;
        let name = std::str::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8)?;
        names.push(name.to_string());
    }

    if cursor.pos != bytes.len() {
        return Err(CodecError::TrailingBytes(bytes.len() - cursor.pos));
    }

    Ok(ExportRecord::new(SourceRange::new(start, end), base, names)?)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn read_slice(&mut self, len: usize, field: &'static str) -> CodecResult<&'a [u8]> {
        let available = self.bytes.len() - self.pos;
        if available < len {
            return Err(CodecError::Truncated {
                field,
                missing: len - available,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u8(&mut self, field: &'static str) -> CodecResult<u8> {
        Ok(self.read_slice(1, field)?[0])
    }

    fn read_u32(&mut self, field: &'static str) -> CodecResult<u32> {
        let slice = self.read_slice(4, field)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(slice);
        Ok(u32::from_le_bytes(raw))
    }
}
