//! Decode error taxonomy.
//!
//! Every wire-format decoder in this crate reports failure through [`Error`].
//! Encoding has no error path: a value that exists is always encodable, and
//! contract violations during construction are programmer errors.
//!
//! Unrecognized record types and option codes are deliberately *not* errors;
//! they decode to the opaque fallback variants so that messages carrying
//! future RFC-defined codes pass through intact.

use thiserror::Error;

/// Result type alias for wire-format operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Wire-format decode errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer bytes available than a fixed or length-prefixed field demands.
    #[error("truncated input: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes the field demanded.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// A name compression pointer targets an offset that is not strictly
    /// before the pointer itself, or a pointer chain does not terminate.
    #[error("malformed compression pointer at offset {offset} targeting {target}")]
    MalformedPointer {
        /// Position of the pointer byte.
        offset: usize,
        /// Offset the pointer references.
        target: usize,
    },

    /// A label length byte uses one of the reserved types (`0x40..=0xBF`).
    #[error("reserved label type 0x{value:02X} at offset {offset}")]
    ReservedLabelType {
        /// Position of the length byte.
        offset: usize,
        /// The offending length byte.
        value: u8,
    },

    /// A label exceeds 63 bytes.
    #[error("label too long: {length} bytes exceeds maximum of 63")]
    LabelTooLong {
        /// Actual label length.
        length: usize,
    },

    /// A decoded name exceeds 255 octets in wire form.
    #[error("name too long: {length} bytes exceeds maximum of 255")]
    NameTooLong {
        /// Actual wire-format length.
        length: usize,
    },

    /// A character not permitted in a presentation-format label.
    #[error("invalid character '{character}' in label at position {position}")]
    InvalidLabelChar {
        /// The offending character.
        character: char,
        /// Position within the label.
        position: usize,
    },

    /// A record's RDLENGTH field demands more bytes than the message holds.
    #[error("truncated record (type {rtype}): RDATA needs {needed} bytes, {available} remain")]
    TruncatedRecord {
        /// Numeric record type code.
        rtype: u16,
        /// Bytes RDLENGTH demanded.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
    },

    /// RDATA whose length contradicts its type's fixed layout.
    #[error("bad RDATA length for {rtype}: expected {expected} bytes, got {actual}")]
    RdataLength {
        /// Record type name.
        rtype: &'static str,
        /// Length the layout requires.
        expected: usize,
        /// Length actually present.
        actual: usize,
    },

    /// An EDNS option payload violates its type's size or shape contract.
    #[error("malformed EDNS option {code}: {reason}")]
    OptionMalformed {
        /// Option code.
        code: u16,
        /// What the payload violated.
        reason: String,
    },
}

impl Error {
    /// Creates a `Truncated` error.
    #[inline]
    pub fn truncated(needed: usize, available: usize) -> Self {
        Self::Truncated { needed, available }
    }

    /// Creates a `MalformedPointer` error.
    #[inline]
    pub fn malformed_pointer(offset: usize, target: usize) -> Self {
        Self::MalformedPointer { offset, target }
    }

    /// Creates an `OptionMalformed` error.
    #[inline]
    pub fn option_malformed(code: u16, reason: impl Into<String>) -> Self {
        Self::OptionMalformed {
            code,
            reason: reason.into(),
        }
    }

    /// Creates an `RdataLength` error.
    #[inline]
    pub fn rdata_length(rtype: &'static str, expected: usize, actual: usize) -> Self {
        Self::RdataLength {
            rtype,
            expected,
            actual,
        }
    }
}
