//! DNS record classes.
//!
//! Practically all traffic uses the Internet class; the table exists for
//! rendering and for the CHAOS-class server-identification conventions.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A record class with an assigned meaning (RFC 1035 §3.2.4, RFC 6895).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum RecordClass {
    /// Internet - RFC 1035
    IN = 1,

    /// CHAOS - RFC 1035; still used for `version.bind` style queries
    CH = 3,

    /// Hesiod - RFC 1035
    HS = 4,

    /// Query class NONE - RFC 2136 (dynamic update prerequisites)
    NONE = 254,

    /// Query class ANY - RFC 1035 (queries only)
    ANY = 255,
}

impl RecordClass {
    /// Returns the numeric class code.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Creates a class from its numeric code, if assigned.
    #[inline]
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Returns true for the query-only classes (NONE, ANY).
    #[inline]
    pub const fn is_query_only(self) -> bool {
        matches!(self, Self::NONE | Self::ANY)
    }

    /// Returns the registry mnemonic.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IN => "IN",
            Self::CH => "CH",
            Self::HS => "HS",
            Self::NONE => "NONE",
            Self::ANY => "ANY",
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for RecordClass {
    fn default() -> Self {
        Self::IN
    }
}

/// A class code that may or may not have an assigned meaning.
///
/// The OPT pseudo-record repurposes this field for its UDP payload size, so
/// arbitrary values must survive decoding untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    /// An assigned class.
    Known(RecordClass),
    /// An unassigned class code.
    Unknown(u16),
}

impl Class {
    /// Classifies a numeric class code.
    #[inline]
    pub fn from_u16(value: u16) -> Self {
        RecordClass::from_u16(value)
            .map(Self::Known)
            .unwrap_or(Self::Unknown(value))
    }

    /// Returns the numeric class code.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::Known(c) => c.to_u16(),
            Self::Unknown(v) => v,
        }
    }

    /// Returns the assigned class, if any.
    #[inline]
    pub const fn as_known(self) -> Option<RecordClass> {
        match self {
            Self::Known(c) => Some(c),
            Self::Unknown(_) => None,
        }
    }
}

impl From<RecordClass> for Class {
    fn from(c: RecordClass) -> Self {
        Self::Known(c)
    }
}

impl From<u16> for Class {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(c) => write!(f, "{c}"),
            Self::Unknown(v) => write!(f, "CLASS{v}"),
        }
    }
}

impl Default for Class {
    fn default() -> Self {
        Self::Known(RecordClass::IN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_values() {
        assert_eq!(RecordClass::IN.to_u16(), 1);
        assert_eq!(RecordClass::CH.to_u16(), 3);
        assert_eq!(RecordClass::ANY.to_u16(), 255);
    }

    #[test]
    fn query_only() {
        assert!(RecordClass::ANY.is_query_only());
        assert!(!RecordClass::IN.is_query_only());
    }

    #[test]
    fn unknown_dual() {
        let c = Class::from_u16(1);
        assert_eq!(c.as_known(), Some(RecordClass::IN));

        // An OPT record's UDP payload size riding in the class field.
        let c = Class::from_u16(4096);
        assert_eq!(c.as_known(), None);
        assert_eq!(c.to_u16(), 4096);
        assert_eq!(c.to_string(), "CLASS4096");
    }
}
