//! The question section.

use crate::class::{Class, RecordClass};
use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::rtype::{RecordType, Type};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single question: a name and the type and class being asked about.
///
/// Wire layout is the name followed by two 16-bit codes:
///
/// ```text
/// QNAME (variable) | QTYPE (16) | QCLASS (16)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// The name being queried.
    pub qname: Name,

    /// The record type being requested.
    pub qtype: Type,

    /// The class, almost always IN.
    pub qclass: Class,
}

impl Question {
    /// Creates a question for an assigned type and class.
    #[inline]
    pub fn new(qname: Name, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            qname,
            qtype: Type::Known(qtype),
            qclass: Class::Known(qclass),
        }
    }

    /// Creates an IN-class A question.
    #[inline]
    pub fn a(qname: Name) -> Self {
        Self::new(qname, RecordType::A, RecordClass::IN)
    }

    /// Creates an IN-class AAAA question.
    #[inline]
    pub fn aaaa(qname: Name) -> Self {
        Self::new(qname, RecordType::AAAA, RecordClass::IN)
    }

    /// Creates an IN-class PTR question.
    #[inline]
    pub fn ptr(qname: Name) -> Self {
        Self::new(qname, RecordType::PTR, RecordClass::IN)
    }

    /// Decodes the question at `offset` within `message`.
    ///
    /// Returns the question and the bytes consumed. The full message buffer
    /// is required because the name may be compressed.
    pub fn decode_at(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (qname, name_len) = NameParser::new(message).decode_at(offset)?;

        let mut rd = WireReader::new(message);
        rd.seek(offset + name_len)?;
        let qtype = Type::from_u16(rd.read_u16()?);
        let qclass = Class::from_u16(rd.read_u16()?);

        Ok((
            Self {
                qname,
                qtype,
                qclass,
            },
            name_len + 4,
        ))
    }

    /// Returns the encoded length in bytes.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.qname.wire_len() + 4
    }

    /// Appends the encoded question to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        self.qname.write_wire(buf);
        buf.extend_from_slice(&self.qtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_u16().to_be_bytes());
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.qname, self.qclass, self.qtype)
    }
}
