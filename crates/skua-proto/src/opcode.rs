//! DNS operation codes.

use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of query, from the 4-bit OPCODE header field (RFC 1035 §4.1.1).
///
/// Conversion from the wire nibble is total: the header codec performs no
/// validation beyond its fixed width, so unassigned values are preserved in
/// [`OpCode::Unassigned`] rather than rejected.
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
#[repr(u8)]
pub enum OpCode {
    /// Standard query - RFC 1035
    Query = 0,

    /// Inverse query - RFC 1035, obsoleted by RFC 3425
    IQuery = 1,

    /// Server status request - RFC 1035
    Status = 2,

    /// Zone change notification - RFC 1996
    Notify = 4,

    /// Dynamic update - RFC 2136
    Update = 5,

    /// DNS Stateful Operations - RFC 8490
    Dso = 6,

    /// Any value without an assigned meaning, carried through verbatim.
    #[num_enum(catch_all)]
    Unassigned(u8),
}

impl OpCode {
    /// Returns the numeric opcode value.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Query => 0,
            Self::IQuery => 1,
            Self::Status => 2,
            Self::Notify => 4,
            Self::Update => 5,
            Self::Dso => 6,
            Self::Unassigned(v) => v,
        }
    }

    /// Returns the registry name of the opcode.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::IQuery => "IQUERY",
            Self::Status => "STATUS",
            Self::Notify => "NOTIFY",
            Self::Update => "UPDATE",
            Self::Dso => "DSO",
            Self::Unassigned(_) => "RESERVED",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned(v) => write!(f, "OPCODE{v}"),
            known => write!(f, "{}", known.name()),
        }
    }
}

impl Default for OpCode {
    fn default() -> Self {
        Self::Query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        assert_eq!(OpCode::Query.to_u8(), 0);
        assert_eq!(OpCode::Notify.to_u8(), 4);
        assert_eq!(OpCode::Dso.to_u8(), 6);
    }

    #[test]
    fn conversion_is_total() {
        assert_eq!(OpCode::from(0), OpCode::Query);
        assert_eq!(OpCode::from(5), OpCode::Update);
        assert_eq!(OpCode::from(3), OpCode::Unassigned(3));
        assert_eq!(OpCode::Unassigned(3).to_u8(), 3);
    }

    #[test]
    fn display() {
        assert_eq!(OpCode::Query.to_string(), "QUERY");
        assert_eq!(OpCode::Unassigned(9).to_string(), "OPCODE9");
    }
}
