//! Resource records.
//!
//! Wire layout per RFC 1035 §4.1.3:
//!
//! ```text
//! NAME (variable) | TYPE (16) | CLASS (16) | TTL (32) | RDLENGTH (16) | RDATA
//! ```
//!
//! `RDLENGTH` is never stored on [`Record`]; encoding recomputes it from the
//! RDATA's actual size, so a record cannot carry a stale length field.

use crate::class::{Class, RecordClass};
use crate::edns::{Opt, OptMeta};
use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rdata::RData;
use crate::rtype::{RecordType, Type};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resource record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    rtype: Type,
    class: Class,
    ttl: u32,
    rdata: RData,
}

impl Record {
    /// Creates a record.
    ///
    /// `rtype` is taken separately from `rdata` so that opaque data can
    /// carry any code; for typed RDATA use the convenience constructors,
    /// which pick the matching type.
    pub fn new(name: Name, rtype: Type, class: Class, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype,
            class,
            ttl,
            rdata,
        }
    }

    /// Creates an IN-class record with the type implied by the RDATA.
    pub fn from_rdata(name: Name, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype: rdata.rtype(),
            class: Class::Known(RecordClass::IN),
            ttl,
            rdata,
        }
    }

    /// Creates an IN-class A record.
    pub fn a(name: Name, ttl: u32, address: std::net::Ipv4Addr) -> Self {
        Self::from_rdata(name, ttl, RData::A(crate::rdata::A::new(address)))
    }

    /// Creates an IN-class AAAA record.
    pub fn aaaa(name: Name, ttl: u32, address: std::net::Ipv6Addr) -> Self {
        Self::from_rdata(name, ttl, RData::Aaaa(crate::rdata::Aaaa::new(address)))
    }

    /// Creates an IN-class CNAME record.
    pub fn cname(name: Name, ttl: u32, target: Name) -> Self {
        Self::from_rdata(name, ttl, RData::Cname(crate::rdata::Cname::new(target)))
    }

    /// Creates an OPT pseudo-record carrying EDNS metadata and options.
    ///
    /// The owner is the root name; `meta` lands in the class and TTL
    /// fields.
    pub fn opt(meta: OptMeta, options: Opt) -> Self {
        let (class, ttl) = meta.to_class_ttl();
        Self {
            name: Name::root(),
            rtype: Type::Known(RecordType::OPT),
            class: Class::from_u16(class),
            ttl,
            rdata: RData::Opt(options),
        }
    }

    /// Returns the owner name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the record type.
    #[inline]
    pub fn rtype(&self) -> Type {
        self.rtype
    }

    /// Returns the record class.
    #[inline]
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the TTL in seconds.
    #[inline]
    pub const fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the record data.
    #[inline]
    pub fn rdata(&self) -> &RData {
        &self.rdata
    }

    /// Returns true for the OPT pseudo-record.
    #[inline]
    pub fn is_opt(&self) -> bool {
        self.rtype == Type::Known(RecordType::OPT)
    }

    /// Returns the EDNS metadata of an OPT record.
    pub fn opt_meta(&self) -> Option<OptMeta> {
        self.is_opt()
            .then(|| OptMeta::from_class_ttl(self.class.to_u16(), self.ttl))
    }

    /// Decodes the record at `offset` within `message`.
    ///
    /// Returns the record and the bytes consumed. Fails with
    /// [`Error::TruncatedRecord`] when fewer than RDLENGTH bytes remain.
    pub fn decode_at(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (name, name_len) = NameParser::new(message).decode_at(offset)?;

        let mut rd = WireReader::new(message);
        rd.seek(offset + name_len)?;
        let rtype = rd.read_u16()?;
        let class = rd.read_u16()?;
        let ttl = rd.read_u32()?;
        let rdlength = rd.read_u16()? as usize;

        if rd.remaining() < rdlength {
            return Err(Error::TruncatedRecord {
                rtype,
                needed: rdlength,
                available: rd.remaining(),
            });
        }

        let rdata = RData::decode(rtype, message, rd.position(), rdlength)?;

        Ok((
            Self {
                name,
                rtype: Type::from_u16(rtype),
                class: Class::from_u16(class),
                ttl,
                rdata,
            },
            name_len + 10 + rdlength,
        ))
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        self.name.wire_len() + 10 + self.rdata.wire_len()
    }

    /// Appends the encoded record to a buffer, RDLENGTH computed from the
    /// actual RDATA encoding.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        self.name.write_wire(buf);
        buf.extend_from_slice(&self.rtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.class.to_u16().to_be_bytes());
        buf.extend_from_slice(&self.ttl.to_be_bytes());
        buf.extend_from_slice(&(self.rdata.wire_len() as u16).to_be_bytes());
        self.rdata.write_wire(buf);
    }

    /// Encodes the record to a standalone byte vector.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_wire(&mut buf);
        buf.to_vec()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(meta) = self.opt_meta() {
            return write!(f, "{meta} [{}]", self.rdata);
        }
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name, self.ttl, self.class, self.rtype, self.rdata
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edns::EdnsOption;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    #[test]
    fn roundtrip() {
        let record = Record::a(
            Name::from_str("www.example.com").unwrap(),
            3600,
            Ipv4Addr::new(10, 0, 0, 1),
        );

        let wire = record.to_wire();
        let (decoded, consumed) = Record::decode_at(&wire, 0).unwrap();

        assert_eq!(consumed, wire.len());
        assert_eq!(decoded, record);
    }

    #[test]
    fn rdlength_recomputed_from_rdata() {
        let record = Record::cname(
            Name::from_str("alias.example.com").unwrap(),
            300,
            Name::from_str("canonical.example.com").unwrap(),
        );

        let wire = record.to_wire();
        // RDLENGTH sits 10 bytes before the RDATA, right after the name,
        // type, class, and TTL.
        let name_len = record.name().wire_len();
        let rdlength = u16::from_be_bytes([wire[name_len + 8], wire[name_len + 9]]);
        assert_eq!(usize::from(rdlength), record.rdata().wire_len());
        assert_eq!(wire.len(), name_len + 10 + usize::from(rdlength));
    }

    #[test]
    fn short_rdata_is_a_truncated_record() {
        let record = Record::a(
            Name::from_str("example.com").unwrap(),
            60,
            Ipv4Addr::new(192, 0, 2, 1),
        );
        let wire = record.to_wire();

        // Drop the final RDATA byte: RDLENGTH still claims 4.
        let result = Record::decode_at(&wire[..wire.len() - 1], 0);
        assert_eq!(
            result,
            Err(Error::TruncatedRecord {
                rtype: 1,
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn unknown_type_roundtrip() {
        let record = Record::new(
            Name::from_str("example.com").unwrap(),
            Type::Unknown(65280),
            Class::Known(RecordClass::IN),
            120,
            RData::Unknown(crate::rdata::Unknown::new(65280, vec![1, 2, 3, 4, 5])),
        );

        let wire = record.to_wire();
        let (decoded, _) = Record::decode_at(&wire, 0).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn opt_record_meta() {
        let meta = OptMeta {
            udp_size: 1232,
            extended_rcode: 0,
            version: 0,
            dnssec_ok: true,
        };
        let mut options = Opt::new();
        options.push(EdnsOption::Padding(vec![0; 4]));

        let record = Record::opt(meta, options);
        assert!(record.is_opt());
        assert!(record.name().is_root());

        let wire = record.to_wire();
        let (decoded, _) = Record::decode_at(&wire, 0).unwrap();
        assert_eq!(decoded.opt_meta(), Some(meta));
        assert_eq!(decoded, record);
    }

    #[test]
    fn display() {
        let record = Record::a(
            Name::from_str("example.com").unwrap(),
            300,
            Ipv4Addr::new(192, 0, 2, 1),
        );
        assert_eq!(record.to_string(), "example.com.\t300\tIN\tA\t192.0.2.1");
    }
}
