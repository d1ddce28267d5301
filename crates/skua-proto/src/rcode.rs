//! DNS response codes.
//!
//! The header carries a 4-bit RCODE; EDNS(0) extends it with 8 further bits
//! stored in the OPT pseudo-record's TTL field, giving the 12-bit extended
//! codes (BADVERS and friends).

use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a DNS operation (RFC 1035 §4.1.1, RFC 6895 registry).
///
/// Conversions are total: values without an assigned meaning are preserved
/// in [`ResponseCode::Unassigned`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    FromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum ResponseCode {
    /// No error condition - RFC 1035
    NoError = 0,

    /// The server could not interpret the query - RFC 1035
    FormErr = 1,

    /// The server failed internally - RFC 1035
    ServFail = 2,

    /// The queried name does not exist - RFC 1035
    NXDomain = 3,

    /// The server does not support this kind of query - RFC 1035
    NotImp = 4,

    /// The server refuses for policy reasons - RFC 1035
    Refused = 5,

    /// A name exists when it should not - RFC 2136
    YXDomain = 6,

    /// An RRset exists when it should not - RFC 2136
    YXRRSet = 7,

    /// An RRset that should exist does not - RFC 2136
    NXRRSet = 8,

    /// The server is not authoritative / not authorized - RFC 2136, RFC 8945
    NotAuth = 9,

    /// A name is not contained in the zone - RFC 2136
    NotZone = 10,

    /// EDNS version not supported - RFC 6891 (extended)
    BadVers = 16,

    /// Bad or missing server cookie - RFC 7873 (extended)
    BadCookie = 23,

    /// Any value without an assigned meaning, carried through verbatim.
    #[num_enum(catch_all)]
    Unassigned(u16),
}

impl ResponseCode {
    /// Returns the numeric value of the full (possibly extended) code.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::NoError => 0,
            Self::FormErr => 1,
            Self::ServFail => 2,
            Self::NXDomain => 3,
            Self::NotImp => 4,
            Self::Refused => 5,
            Self::YXDomain => 6,
            Self::YXRRSet => 7,
            Self::NXRRSet => 8,
            Self::NotAuth => 9,
            Self::NotZone => 10,
            Self::BadVers => 16,
            Self::BadCookie => 23,
            Self::Unassigned(v) => v,
        }
    }

    /// Returns the low 4 bits carried in the message header.
    #[inline]
    pub const fn header_bits(self) -> u8 {
        (self.to_u16() & 0x0F) as u8
    }

    /// Returns the high 8 bits carried in the OPT pseudo-record.
    #[inline]
    pub const fn extended_bits(self) -> u8 {
        (self.to_u16() >> 4) as u8
    }

    /// Combines the header nibble with the OPT record's extension byte.
    #[inline]
    pub fn from_parts(header_bits: u8, extended_bits: u8) -> Self {
        Self::from(u16::from(extended_bits) << 4 | u16::from(header_bits & 0x0F))
    }

    /// Returns true for NOERROR.
    #[inline]
    pub fn is_success(self) -> bool {
        self == Self::NoError
    }

    /// Returns true for NXDOMAIN.
    #[inline]
    pub fn is_nxdomain(self) -> bool {
        self == Self::NXDomain
    }

    /// Returns true if the code only fits with an EDNS extension byte.
    #[inline]
    pub fn is_extended(self) -> bool {
        self.to_u16() > 0x0F
    }

    /// Returns the registry name of the code.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NXDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::YXDomain => "YXDOMAIN",
            Self::YXRRSet => "YXRRSET",
            Self::NXRRSet => "NXRRSET",
            Self::NotAuth => "NOTAUTH",
            Self::NotZone => "NOTZONE",
            Self::BadVers => "BADVERS",
            Self::BadCookie => "BADCOOKIE",
            Self::Unassigned(_) => "RESERVED",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned(v) => write!(f, "RCODE{v}"),
            known => write!(f, "{}", known.name()),
        }
    }
}

impl Default for ResponseCode {
    fn default() -> Self {
        Self::NoError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        assert_eq!(ResponseCode::NoError.to_u16(), 0);
        assert_eq!(ResponseCode::NXDomain.to_u16(), 3);
        assert_eq!(ResponseCode::BadCookie.to_u16(), 23);
    }

    #[test]
    fn conversion_is_total() {
        assert_eq!(ResponseCode::from(2), ResponseCode::ServFail);
        assert_eq!(ResponseCode::from(12), ResponseCode::Unassigned(12));
    }

    #[test]
    fn split_and_recombine() {
        let code = ResponseCode::BadCookie; // 23 = 0x17
        assert_eq!(code.header_bits(), 7);
        assert_eq!(code.extended_bits(), 1);
        assert!(code.is_extended());
        assert_eq!(
            ResponseCode::from_parts(code.header_bits(), code.extended_bits()),
            code
        );

        let plain = ResponseCode::NXDomain;
        assert_eq!(plain.extended_bits(), 0);
        assert!(!plain.is_extended());
        assert_eq!(ResponseCode::from_parts(3, 0), plain);
    }

    #[test]
    fn predicates() {
        assert!(ResponseCode::NoError.is_success());
        assert!(ResponseCode::NXDomain.is_nxdomain());
        assert!(!ResponseCode::ServFail.is_success());
    }
}
