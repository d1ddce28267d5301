//! The 12-byte fixed message header.
//!
//! Wire layout per RFC 1035 §4.1.1:
//!
//! ```text
//!                                 1  1  1  1  1  1
//!   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      ID                       |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |QR|   Opcode  |AA|TC|RD|RA| Z|AD|CD|   RCODE   |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    QDCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    ANCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    NSCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    ARCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```
//!
//! The header codec trusts the four count fields; the message codec is what
//! cross-checks them against the sections it actually decodes, and recomputes
//! them from the actual section lengths on encode.

use crate::error::{Error, Result};
use crate::opcode::OpCode;
use crate::rcode::ResponseCode;
use crate::wire::WireReader;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 12;

bitflags! {
    /// The eight single-bit flags of the header flag word.
    ///
    /// The opcode and rcode nibbles share the same 16-bit word but are kept
    /// as separate [`Header`] fields; these constants cover only the 1-bit
    /// positions.
    #[derive(Serialize, Deserialize)]
    pub struct HeaderFlags: u16 {
        /// Query (0) or response (1).
        const QR = 0x8000;

        /// Authoritative answer.
        const AA = 0x0400;

        /// Message was truncated in transit.
        const TC = 0x0200;

        /// Recursion desired.
        const RD = 0x0100;

        /// Recursion available.
        const RA = 0x0080;

        /// Reserved, must be zero.
        const Z = 0x0040;

        /// Authentic data (DNSSEC).
        const AD = 0x0020;

        /// Checking disabled (DNSSEC).
        const CD = 0x0010;
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A DNS message header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Transaction identifier matching responses to queries.
    pub id: u16,

    /// The single-bit flags.
    pub flags: HeaderFlags,

    /// Operation code (4 bits on the wire).
    pub opcode: OpCode,

    /// Response code (4 bits on the wire; EDNS may extend it).
    pub rcode: ResponseCode,

    /// Number of questions.
    pub qdcount: u16,

    /// Number of answer records.
    pub ancount: u16,

    /// Number of authority records.
    pub nscount: u16,

    /// Number of additional records.
    pub arcount: u16,
}

impl Header {
    /// Creates an empty header with the given transaction ID.
    #[inline]
    pub fn new(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags::empty(),
            opcode: OpCode::Query,
            rcode: ResponseCode::NoError,
            qdcount: 0,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    /// Creates a recursive query header with a random transaction ID.
    pub fn query() -> Self {
        Self {
            id: rand::random(),
            flags: HeaderFlags::RD,
            ..Self::new(0)
        }
    }

    /// Creates the header of a response to `query`, echoing its ID, opcode,
    /// and RD flag.
    pub fn response_to(query: &Header) -> Self {
        Self {
            id: query.id,
            flags: HeaderFlags::QR | (query.flags & HeaderFlags::RD),
            opcode: query.opcode,
            ..Self::new(0)
        }
    }

    /// Returns true for a query.
    #[inline]
    pub fn is_query(&self) -> bool {
        !self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true for a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if the TC flag is set.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.flags.contains(HeaderFlags::TC)
    }

    /// Returns true if recursion was requested.
    #[inline]
    pub fn recursion_desired(&self) -> bool {
        self.flags.contains(HeaderFlags::RD)
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn set_flag(&mut self, flag: HeaderFlags, on: bool) {
        self.flags.set(flag, on);
    }

    /// Decodes a header from the start of `data`.
    ///
    /// Only the fixed width is validated; every bit pattern inside it is
    /// meaningful or carried through.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(Error::truncated(HEADER_LEN, data.len()));
        }
        let mut rd = WireReader::new(data);

        let id = rd.read_u16()?;
        let word = rd.read_u16()?;

        let opcode = OpCode::from(((word >> 11) & 0x0F) as u8);
        let rcode = ResponseCode::from(word & 0x0F);
        // from_bits_truncate drops the opcode and rcode nibbles.
        let flags = HeaderFlags::from_bits_truncate(word);

        Ok(Self {
            id,
            flags,
            opcode,
            rcode,
            qdcount: rd.read_u16()?,
            ancount: rd.read_u16()?,
            nscount: rd.read_u16()?,
            arcount: rd.read_u16()?,
        })
    }

    /// Encodes the header into its fixed 12-byte form.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let word = self.flags.bits()
            | (u16::from(self.opcode.to_u8() & 0x0F) << 11)
            | u16::from(self.rcode.header_bits());

        let mut buf = [0u8; HEADER_LEN];
        buf[0..2].copy_from_slice(&self.id.to_be_bytes());
        buf[2..4].copy_from_slice(&word.to_be_bytes());
        buf[4..6].copy_from_slice(&self.qdcount.to_be_bytes());
        buf[6..8].copy_from_slice(&self.ancount.to_be_bytes());
        buf[8..10].copy_from_slice(&self.nscount.to_be_bytes());
        buf[10..12].copy_from_slice(&self.arcount.to_be_bytes());
        buf
    }

    /// Appends the encoded header to a buffer.
    pub fn write_wire(&self, buf: &mut bytes::BytesMut) {
        buf.extend_from_slice(&self.encode());
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id {:#06x} {} {}, flags:",
            self.id, self.opcode, self.rcode
        )?;
        for (name, flag) in [
            ("qr", HeaderFlags::QR),
            ("aa", HeaderFlags::AA),
            ("tc", HeaderFlags::TC),
            ("rd", HeaderFlags::RD),
            ("ra", HeaderFlags::RA),
            ("ad", HeaderFlags::AD),
            ("cd", HeaderFlags::CD),
        ] {
            if self.flags.contains(flag) {
                write!(f, " {name}")?;
            }
        }
        write!(
            f,
            "; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            self.qdcount, self.ancount, self.nscount, self.arcount
        )
    }
}
