//! DNS record types.
//!
//! The record type table maps 16-bit type codes to symbolic names. The codec
//! consumes this table for dispatch and rendering; codes outside it are
//! carried through the [`Type::Unknown`] dual and rendered in RFC 3597
//! `TYPE####` form.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A record type with an assigned meaning.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum RecordType {
    /// IPv4 address - RFC 1035
    A = 1,

    /// Authoritative name server - RFC 1035
    NS = 2,

    /// Canonical name (alias) - RFC 1035
    CNAME = 5,

    /// Start of authority - RFC 1035
    SOA = 6,

    /// Null record - RFC 1035
    NULL = 10,

    /// Domain name pointer (reverse DNS) - RFC 1035
    PTR = 12,

    /// Host information - RFC 1035
    HINFO = 13,

    /// Mail exchange - RFC 1035
    MX = 15,

    /// Text strings - RFC 1035
    TXT = 16,

    /// IPv6 address - RFC 3596
    AAAA = 28,

    /// Service locator - RFC 2782
    SRV = 33,

    /// Naming authority pointer - RFC 3403
    NAPTR = 35,

    /// Delegation name - RFC 6672
    DNAME = 39,

    /// EDNS(0) pseudo-record - RFC 6891
    OPT = 41,

    /// Delegation signer - RFC 4034
    DS = 43,

    /// SSH key fingerprint - RFC 4255
    SSHFP = 44,

    /// DNSSEC signature - RFC 4034
    RRSIG = 46,

    /// Next secure - RFC 4034
    NSEC = 47,

    /// DNS public key - RFC 4034
    DNSKEY = 48,

    /// TLS certificate association - RFC 6698
    TLSA = 52,

    /// Incremental zone transfer - RFC 1995
    IXFR = 251,

    /// Full zone transfer - RFC 5936
    AXFR = 252,

    /// Any record type - RFC 1035, RFC 8482
    ANY = 255,

    /// Certification authority authorization - RFC 8659
    CAA = 257,
}

impl RecordType {
    /// Returns the numeric type code.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Creates a record type from its numeric code, if assigned.
    #[inline]
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Returns true for query-only types that never appear in record data.
    #[inline]
    pub const fn is_query_only(self) -> bool {
        matches!(self, Self::IXFR | Self::AXFR | Self::ANY)
    }

    /// Returns true for the OPT pseudo-record type.
    #[inline]
    pub const fn is_pseudo(self) -> bool {
        matches!(self, Self::OPT)
    }

    /// Returns the registry mnemonic.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::NS => "NS",
            Self::CNAME => "CNAME",
            Self::SOA => "SOA",
            Self::NULL => "NULL",
            Self::PTR => "PTR",
            Self::HINFO => "HINFO",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::AAAA => "AAAA",
            Self::SRV => "SRV",
            Self::NAPTR => "NAPTR",
            Self::DNAME => "DNAME",
            Self::OPT => "OPT",
            Self::DS => "DS",
            Self::SSHFP => "SSHFP",
            Self::RRSIG => "RRSIG",
            Self::NSEC => "NSEC",
            Self::DNSKEY => "DNSKEY",
            Self::TLSA => "TLSA",
            Self::IXFR => "IXFR",
            Self::AXFR => "AXFR",
            Self::ANY => "ANY",
            Self::CAA => "CAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for RecordType {
    fn default() -> Self {
        Self::A
    }
}

/// A type code that may or may not have an assigned meaning.
///
/// Wire decoding never rejects a type code; unassigned values ride along as
/// [`Type::Unknown`] for forward compatibility (RFC 3597).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
    /// An assigned record type.
    Known(RecordType),
    /// An unassigned type code.
    Unknown(u16),
}

impl Type {
    /// Classifies a numeric type code.
    #[inline]
    pub fn from_u16(value: u16) -> Self {
        RecordType::from_u16(value)
            .map(Self::Known)
            .unwrap_or(Self::Unknown(value))
    }

    /// Returns the numeric type code.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::Known(t) => t.to_u16(),
            Self::Unknown(v) => v,
        }
    }

    /// Returns the assigned type, if any.
    #[inline]
    pub const fn as_known(self) -> Option<RecordType> {
        match self {
            Self::Known(t) => Some(t),
            Self::Unknown(_) => None,
        }
    }
}

impl From<RecordType> for Type {
    fn from(t: RecordType) -> Self {
        Self::Known(t)
    }
}

impl From<u16> for Type {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(t) => write!(f, "{t}"),
            Self::Unknown(v) => write!(f, "TYPE{v}"),
        }
    }
}

impl Default for Type {
    fn default() -> Self {
        Self::Known(RecordType::A)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_values() {
        assert_eq!(RecordType::A.to_u16(), 1);
        assert_eq!(RecordType::AAAA.to_u16(), 28);
        assert_eq!(RecordType::OPT.to_u16(), 41);
        assert_eq!(RecordType::CAA.to_u16(), 257);
    }

    #[test]
    fn lookup() {
        assert_eq!(RecordType::from_u16(6), Some(RecordType::SOA));
        assert_eq!(RecordType::from_u16(65280), None);
    }

    #[test]
    fn predicates() {
        assert!(RecordType::AXFR.is_query_only());
        assert!(RecordType::OPT.is_pseudo());
        assert!(!RecordType::A.is_query_only());
    }

    #[test]
    fn unknown_dual() {
        let t = Type::from_u16(47);
        assert_eq!(t.as_known(), Some(RecordType::NSEC));
        assert_eq!(t.to_string(), "NSEC");

        let t = Type::from_u16(65280);
        assert_eq!(t.as_known(), None);
        assert_eq!(t.to_u16(), 65280);
        assert_eq!(t.to_string(), "TYPE65280");
    }
}
