//! Record data (RDATA) registry.
//!
//! [`RData`] is the closed set of RDATA layouts this crate understands,
//! keyed by the 16-bit record type code. Dispatch is an exhaustive match:
//! the RFC-defined type space is closed, and every code without a typed
//! layout — present or future — lands in [`RData::Unknown`], which is a
//! successful decode, not an error.
//!
//! Decoders receive the complete message buffer, not just the RDATA slice,
//! because several layouts embed domain names whose compression pointers
//! are offsets into the whole message.

pub mod address;
pub mod cert;
pub mod dnssec;
pub mod host;
pub mod service;
pub mod soa;
pub mod text;
pub mod unknown;

pub use address::{A, Aaaa};
pub use cert::{Caa, Sshfp, Tlsa};
pub use dnssec::{Dnskey, Ds, Nsec, Rrsig};
pub use host::{Cname, Dname, Mx, Ns, Ptr};
pub use service::{Naptr, Srv};
pub use soa::Soa;
pub use text::{Hinfo, Txt};
pub use unknown::Unknown;

use crate::edns::Opt;
use crate::error::Result;
use crate::name::Name;
use crate::rtype::{RecordType, Type};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Typed record data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RData {
    /// IPv4 address.
    A(A),
    /// Authoritative name server.
    Ns(Ns),
    /// Canonical name.
    Cname(Cname),
    /// Start of authority.
    Soa(Soa),
    /// Reverse-mapping pointer.
    Ptr(Ptr),
    /// Host information.
    Hinfo(Hinfo),
    /// Mail exchange.
    Mx(Mx),
    /// Text strings.
    Txt(Txt),
    /// IPv6 address.
    Aaaa(Aaaa),
    /// Service locator.
    Srv(Srv),
    /// DDDS rewrite rule.
    Naptr(Naptr),
    /// Subtree redirection.
    Dname(Dname),
    /// EDNS(0) options (OPT pseudo-record).
    Opt(Opt),
    /// Delegation signer.
    Ds(Ds),
    /// SSH host key fingerprint.
    Sshfp(Sshfp),
    /// DNSSEC signature.
    Rrsig(Rrsig),
    /// Next secure name.
    Nsec(Nsec),
    /// DNSSEC public key.
    Dnskey(Dnskey),
    /// TLS certificate association.
    Tlsa(Tlsa),
    /// CA issuance authorization.
    Caa(Caa),
    /// Any type without a layout here; bytes preserved verbatim.
    Unknown(Unknown),
}

impl RData {
    /// Decodes the RDATA of a record of type `rtype`.
    ///
    /// `message` is the complete message buffer and `offset`/`rdlength`
    /// delimit the RDATA within it; the caller has already verified that
    /// `rdlength` bytes are present.
    pub fn decode(rtype: u16, message: &[u8], offset: usize, rdlength: usize) -> Result<Self> {
        let slice = &message[offset..offset + rdlength];

        let rdata = match RecordType::from_u16(rtype) {
            Some(RecordType::A) => Self::A(A::decode(slice)?),
            Some(RecordType::NS) => Self::Ns(Ns::decode_at(message, offset)?),
            Some(RecordType::CNAME) => Self::Cname(Cname::decode_at(message, offset)?),
            Some(RecordType::SOA) => Self::Soa(Soa::decode_at(message, offset)?),
            Some(RecordType::PTR) => Self::Ptr(Ptr::decode_at(message, offset)?),
            Some(RecordType::HINFO) => Self::Hinfo(Hinfo::decode(slice)?),
            Some(RecordType::MX) => Self::Mx(Mx::decode_at(message, offset)?),
            Some(RecordType::TXT) => Self::Txt(Txt::decode(slice)?),
            Some(RecordType::AAAA) => Self::Aaaa(Aaaa::decode(slice)?),
            Some(RecordType::SRV) => Self::Srv(Srv::decode_at(message, offset)?),
            Some(RecordType::NAPTR) => Self::Naptr(Naptr::decode_at(message, offset)?),
            Some(RecordType::DNAME) => Self::Dname(Dname::decode_at(message, offset)?),
            Some(RecordType::OPT) => Self::Opt(Opt::decode(slice)?),
            Some(RecordType::DS) => Self::Ds(Ds::decode(slice)?),
            Some(RecordType::SSHFP) => Self::Sshfp(Sshfp::decode(slice)?),
            Some(RecordType::RRSIG) => Self::Rrsig(Rrsig::decode_at(message, offset, rdlength)?),
            Some(RecordType::NSEC) => Self::Nsec(Nsec::decode_at(message, offset, rdlength)?),
            Some(RecordType::DNSKEY) => Self::Dnskey(Dnskey::decode(slice)?),
            Some(RecordType::TLSA) => Self::Tlsa(Tlsa::decode(slice)?),
            Some(RecordType::CAA) => Self::Caa(Caa::decode(slice)?),
            _ => Self::Unknown(Unknown::new(rtype, slice)),
        };

        Ok(rdata)
    }

    /// Returns the record type this data belongs to.
    pub fn rtype(&self) -> Type {
        match self {
            Self::A(_) => Type::Known(RecordType::A),
            Self::Ns(_) => Type::Known(RecordType::NS),
            Self::Cname(_) => Type::Known(RecordType::CNAME),
            Self::Soa(_) => Type::Known(RecordType::SOA),
            Self::Ptr(_) => Type::Known(RecordType::PTR),
            Self::Hinfo(_) => Type::Known(RecordType::HINFO),
            Self::Mx(_) => Type::Known(RecordType::MX),
            Self::Txt(_) => Type::Known(RecordType::TXT),
            Self::Aaaa(_) => Type::Known(RecordType::AAAA),
            Self::Srv(_) => Type::Known(RecordType::SRV),
            Self::Naptr(_) => Type::Known(RecordType::NAPTR),
            Self::Dname(_) => Type::Known(RecordType::DNAME),
            Self::Opt(_) => Type::Known(RecordType::OPT),
            Self::Ds(_) => Type::Known(RecordType::DS),
            Self::Sshfp(_) => Type::Known(RecordType::SSHFP),
            Self::Rrsig(_) => Type::Known(RecordType::RRSIG),
            Self::Nsec(_) => Type::Known(RecordType::NSEC),
            Self::Dnskey(_) => Type::Known(RecordType::DNSKEY),
            Self::Tlsa(_) => Type::Known(RecordType::TLSA),
            Self::Caa(_) => Type::Known(RecordType::CAA),
            Self::Unknown(u) => Type::from_u16(u.type_code()),
        }
    }

    /// Returns the encoded RDATA length in bytes.
    pub fn wire_len(&self) -> usize {
        match self {
            Self::A(r) => r.wire_len(),
            Self::Ns(r) => r.wire_len(),
            Self::Cname(r) => r.wire_len(),
            Self::Soa(r) => r.wire_len(),
            Self::Ptr(r) => r.wire_len(),
            Self::Hinfo(r) => r.wire_len(),
            Self::Mx(r) => r.wire_len(),
            Self::Txt(r) => r.wire_len(),
            Self::Aaaa(r) => r.wire_len(),
            Self::Srv(r) => r.wire_len(),
            Self::Naptr(r) => r.wire_len(),
            Self::Dname(r) => r.wire_len(),
            Self::Opt(r) => r.wire_len(),
            Self::Ds(r) => r.wire_len(),
            Self::Sshfp(r) => r.wire_len(),
            Self::Rrsig(r) => r.wire_len(),
            Self::Nsec(r) => r.wire_len(),
            Self::Dnskey(r) => r.wire_len(),
            Self::Tlsa(r) => r.wire_len(),
            Self::Caa(r) => r.wire_len(),
            Self::Unknown(r) => r.wire_len(),
        }
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        match self {
            Self::A(r) => r.write_wire(buf),
            Self::Ns(r) => r.write_wire(buf),
            Self::Cname(r) => r.write_wire(buf),
            Self::Soa(r) => r.write_wire(buf),
            Self::Ptr(r) => r.write_wire(buf),
            Self::Hinfo(r) => r.write_wire(buf),
            Self::Mx(r) => r.write_wire(buf),
            Self::Txt(r) => r.write_wire(buf),
            Self::Aaaa(r) => r.write_wire(buf),
            Self::Srv(r) => r.write_wire(buf),
            Self::Naptr(r) => r.write_wire(buf),
            Self::Dname(r) => r.write_wire(buf),
            Self::Opt(r) => r.write_wire(buf),
            Self::Ds(r) => r.write_wire(buf),
            Self::Sshfp(r) => r.write_wire(buf),
            Self::Rrsig(r) => r.write_wire(buf),
            Self::Nsec(r) => r.write_wire(buf),
            Self::Dnskey(r) => r.write_wire(buf),
            Self::Tlsa(r) => r.write_wire(buf),
            Self::Caa(r) => r.write_wire(buf),
            Self::Unknown(r) => r.write_wire(buf),
        }
    }

    /// Returns the IPv4 address of an A record.
    pub fn as_a(&self) -> Option<Ipv4Addr> {
        match self {
            Self::A(a) => Some(a.address()),
            _ => None,
        }
    }

    /// Returns the IPv6 address of an AAAA record.
    pub fn as_aaaa(&self) -> Option<Ipv6Addr> {
        match self {
            Self::Aaaa(aaaa) => Some(aaaa.address()),
            _ => None,
        }
    }

    /// Returns the target of a CNAME record.
    pub fn as_cname(&self) -> Option<&Name> {
        match self {
            Self::Cname(cname) => Some(cname.target()),
            _ => None,
        }
    }

    /// Returns the options of an OPT record.
    pub fn as_opt(&self) -> Option<&Opt> {
        match self {
            Self::Opt(opt) => Some(opt),
            _ => None,
        }
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(r) => write!(f, "{r}"),
            Self::Ns(r) => write!(f, "{r}"),
            Self::Cname(r) => write!(f, "{r}"),
            Self::Soa(r) => write!(f, "{r}"),
            Self::Ptr(r) => write!(f, "{r}"),
            Self::Hinfo(r) => write!(f, "{r}"),
            Self::Mx(r) => write!(f, "{r}"),
            Self::Txt(r) => write!(f, "{r}"),
            Self::Aaaa(r) => write!(f, "{r}"),
            Self::Srv(r) => write!(f, "{r}"),
            Self::Naptr(r) => write!(f, "{r}"),
            Self::Dname(r) => write!(f, "{r}"),
            Self::Opt(r) => write!(f, "{r}"),
            Self::Ds(r) => write!(f, "{r}"),
            Self::Sshfp(r) => write!(f, "{r}"),
            Self::Rrsig(r) => write!(f, "{r}"),
            Self::Nsec(r) => write!(f, "{r}"),
            Self::Dnskey(r) => write!(f, "{r}"),
            Self::Tlsa(r) => write!(f, "{r}"),
            Self::Caa(r) => write!(f, "{r}"),
            Self::Unknown(r) => write!(f, "{r}"),
        }
    }
}
