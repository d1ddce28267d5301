//! Opaque RDATA for unrecognized record types (RFC 3597).

use bytes::BytesMut;
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RDATA of a record type this crate has no layout for.
///
/// The raw bytes are preserved exactly so the record re-encodes untouched.
/// Decoding to this variant is the universal fallback and never fails;
/// rendering uses the RFC 3597 `\# <length> <hex>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unknown {
    type_code: u16,
    data: Vec<u8>,
}

impl Unknown {
    /// Creates an opaque RDATA value.
    pub fn new(type_code: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            type_code,
            data: data.into(),
        }
    }

    /// Returns the record type code.
    #[inline]
    pub const fn type_code(&self) -> u16 {
        self.type_code
    }

    /// Returns the raw RDATA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the encoded length in bytes.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.data.len()
    }

    /// Appends the raw RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.data);
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_empty() {
            write!(f, "\\# 0")
        } else {
            write!(f, "\\# {} {}", self.data.len(), HEXLOWER.encode(&self.data))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_bytes() {
        let unknown = Unknown::new(65280, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(unknown.type_code(), 65280);

        let mut buf = BytesMut::new();
        unknown.write_wire(&mut buf);
        assert_eq!(buf.as_ref(), &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn rfc3597_rendering() {
        let unknown = Unknown::new(65280, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(unknown.to_string(), "\\# 4 deadbeef");

        let empty = Unknown::new(65281, Vec::new());
        assert_eq!(empty.to_string(), "\\# 0");
    }
}
