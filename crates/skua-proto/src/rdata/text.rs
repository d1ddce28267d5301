//! Character-string records (TXT, HINFO).

use crate::error::{Error, Result};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Reads one length-prefixed character-string (RFC 1035 §3.3).
fn read_char_string<'a>(data: &'a [u8], pos: &mut usize) -> Result<&'a [u8]> {
    let len = *data
        .get(*pos)
        .ok_or_else(|| Error::truncated(*pos + 1, data.len()))? as usize;
    let start = *pos + 1;
    let end = start + len;
    if end > data.len() {
        return Err(Error::truncated(end, data.len()));
    }
    *pos = end;
    Ok(&data[start..end])
}

fn write_char_string(buf: &mut BytesMut, s: &[u8]) {
    debug_assert!(s.len() <= 255, "character-string over 255 bytes");
    buf.extend_from_slice(&[s.len() as u8]);
    buf.extend_from_slice(s);
}

/// TXT record: one or more character-strings (RFC 1035).
///
/// Consumers such as SPF and DKIM treat the concatenation of all strings as
/// the record value; the individual strings are an artifact of the 255-byte
/// character-string limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Txt {
    strings: SmallVec<[Vec<u8>; 1]>,
}

impl Txt {
    /// Creates a TXT record from one or more strings.
    pub fn new(strings: impl IntoIterator<Item = impl Into<Vec<u8>>>) -> Self {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a TXT record holding a single string.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when the string exceeds 255 bytes; split
    /// longer values across multiple strings.
    pub fn single(s: impl Into<Vec<u8>>) -> Self {
        Self {
            strings: smallvec::smallvec![s.into()],
        }
    }

    /// Returns the individual character-strings.
    pub fn strings(&self) -> &[Vec<u8>] {
        &self.strings
    }

    /// Returns all strings concatenated.
    pub fn concatenated(&self) -> Vec<u8> {
        self.strings.iter().flatten().copied().collect()
    }

    /// Decodes from an RDATA slice.
    pub fn decode(rdata: &[u8]) -> Result<Self> {
        let mut strings = SmallVec::new();
        let mut pos = 0;
        while pos < rdata.len() {
            strings.push(read_char_string(rdata, &mut pos)?.to_vec());
        }
        Ok(Self { strings })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        self.strings.iter().map(|s| 1 + s.len()).sum()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        for s in &self.strings {
            write_char_string(buf, s);
        }
    }
}

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.strings.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "\"{}\"", String::from_utf8_lossy(s))?;
        }
        Ok(())
    }
}

/// HINFO record: host CPU and OS strings (RFC 1035, revived by RFC 8482 for
/// minimal ANY responses).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hinfo {
    cpu: Vec<u8>,
    os: Vec<u8>,
}

impl Hinfo {
    /// Creates an HINFO record.
    pub fn new(cpu: impl Into<Vec<u8>>, os: impl Into<Vec<u8>>) -> Self {
        Self {
            cpu: cpu.into(),
            os: os.into(),
        }
    }

    /// Returns the CPU string.
    pub fn cpu(&self) -> &[u8] {
        &self.cpu
    }

    /// Returns the OS string.
    pub fn os(&self) -> &[u8] {
        &self.os
    }

    /// Decodes from an RDATA slice.
    pub fn decode(rdata: &[u8]) -> Result<Self> {
        let mut pos = 0;
        let cpu = read_char_string(rdata, &mut pos)?.to_vec();
        let os = read_char_string(rdata, &mut pos)?.to_vec();
        Ok(Self { cpu, os })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        2 + self.cpu.len() + self.os.len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        write_char_string(buf, &self.cpu);
        write_char_string(buf, &self.os);
    }
}

impl fmt::Display for Hinfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" \"{}\"",
            String::from_utf8_lossy(&self.cpu),
            String::from_utf8_lossy(&self.os)
        )
    }
}
