//! Domain names.
//!
//! A domain name is a sequence of labels terminated by the root label. In
//! wire form each label is prefixed by its length; the whole encoding is
//! capped at 255 octets. Names embedded in messages may use compression
//! pointers, which [`NameParser`] resolves during decoding; a stored [`Name`]
//! always holds the fully expanded, uncompressed form.
//!
//! DNS names compare case-insensitively over ASCII (RFC 1035, clarified by
//! RFC 4343); `Eq`, `Hash`, and `Ord` here all respect that.

mod label;
mod parse;

pub use label::{Label, LabelIter};
pub use parse::NameParser;

use crate::error::{Error, Result};
use crate::{MAX_LABEL_LEN, MAX_NAME_LEN};
use bytes::BytesMut;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A fully-qualified DNS domain name.
///
/// Stored as uncompressed wire-form octets, terminating zero included, so
/// `www.example.com.` occupies 17 bytes:
///
/// ```text
/// 03 'w' 'w' 'w' 07 'e' 'x' 'a' 'm' 'p' 'l' 'e' 03 'c' 'o' 'm' 00
/// ```
///
/// Names up to 64 bytes, which covers nearly all real traffic, live inline
/// without a heap allocation.
#[derive(Clone)]
pub struct Name {
    /// Uncompressed wire form including the terminating root label.
    octets: SmallVec<[u8; 64]>,
    /// Number of labels, root included.
    label_count: u8,
}

impl Name {
    /// Creates the root name (`.`).
    #[inline]
    pub fn root() -> Self {
        Self {
            octets: smallvec![0],
            label_count: 1,
        }
    }

    /// Creates a name from uncompressed wire-form octets.
    ///
    /// The input must start with a well-formed label sequence ending with
    /// the root label and must not contain compression pointers; bytes
    /// beyond the root label are ignored.
    pub fn from_wire(wire: &[u8]) -> Result<Self> {
        let mut pos = 0;
        let mut label_count: u8 = 0;

        loop {
            if pos >= wire.len() {
                return Err(Error::truncated(pos + 1, wire.len()));
            }
            let len = wire[pos] as usize;
            if len == 0 {
                label_count += 1;
                pos += 1;
                break;
            }
            if len > MAX_LABEL_LEN {
                return Err(Error::ReservedLabelType {
                    offset: pos,
                    value: len as u8,
                });
            }
            pos += 1 + len;
            label_count = label_count
                .checked_add(1)
                .ok_or(Error::NameTooLong { length: pos })?;
        }

        if pos > MAX_NAME_LEN {
            return Err(Error::NameTooLong { length: pos });
        }

        Ok(Self {
            octets: SmallVec::from_slice(&wire[..pos]),
            label_count,
        })
    }

    /// Internal constructor for octets already validated by a parser.
    pub(crate) fn from_validated(octets: SmallVec<[u8; 64]>, label_count: u8) -> Self {
        Self {
            octets,
            label_count,
        }
    }

    /// Returns the uncompressed wire-form octets, terminating zero included.
    #[inline]
    pub fn as_wire(&self) -> &[u8] {
        &self.octets
    }

    /// Returns the encoded length in bytes.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.octets.len()
    }

    /// Returns the number of labels, root included.
    #[inline]
    pub const fn label_count(&self) -> usize {
        self.label_count as usize
    }

    /// Returns true for the root name.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.octets.len() == 1
    }

    /// Returns an iterator over the labels, root label last.
    #[inline]
    pub fn labels(&self) -> LabelIter<'_> {
        LabelIter::new(&self.octets)
    }

    /// Returns the name with its leftmost label removed, or `None` for the
    /// root name.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let first = self.octets[0] as usize;
        Some(Self {
            octets: SmallVec::from_slice(&self.octets[1 + first..]),
            label_count: self.label_count - 1,
        })
    }

    /// Returns true if `self` equals `other` or sits below it in the tree.
    pub fn is_subdomain_of(&self, other: &Name) -> bool {
        if self.label_count < other.label_count {
            return false;
        }
        let self_labels: Vec<Label<'_>> = self.labels().collect();
        let other_labels: Vec<Label<'_>> = other.labels().collect();

        self_labels
            .iter()
            .rev()
            .zip(other_labels.iter().rev())
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    /// Renders the name in dotted presentation form.
    pub fn to_presentation(&self) -> CompactString {
        if self.is_root() {
            return CompactString::const_new(".");
        }
        let mut out = CompactString::default();
        for label in self.labels() {
            if !label.is_root() {
                out.push_str(&label.to_string());
                out.push('.');
            }
        }
        out
    }

    /// Appends the wire form to a buffer.
    ///
    /// Compression pointers are never emitted; the full label sequence is
    /// always written.
    #[inline]
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.octets);
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parses dotted presentation form. A trailing dot is accepted and
    /// implied when absent.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }

        let s = s.strip_suffix('.').unwrap_or(s);
        let mut octets = SmallVec::<[u8; 64]>::new();
        let mut label_count: u8 = 0;

        for part in s.split('.') {
            if part.len() > MAX_LABEL_LEN {
                return Err(Error::LabelTooLong { length: part.len() });
            }
            for (i, c) in part.chars().enumerate() {
                // Hostname characters plus underscore (service labels) and
                // asterisk (wildcards).
                if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '*' {
                    return Err(Error::InvalidLabelChar {
                        character: c,
                        position: i,
                    });
                }
            }
            octets.push(part.len() as u8);
            octets.extend_from_slice(part.as_bytes());
            label_count += 1;
        }

        octets.push(0);
        label_count += 1;

        if octets.len() > MAX_NAME_LEN {
            return Err(Error::NameTooLong {
                length: octets.len(),
            });
        }

        Ok(Self {
            octets,
            label_count,
        })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_presentation())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(\"{}\")", self)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.label_count == other.label_count
            && self.octets.eq_ignore_ascii_case(&other.octets)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for &byte in self.octets.iter() {
            byte.to_ascii_lowercase().hash(state);
        }
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    /// Canonical DNS ordering per RFC 4034 §6.1: labels compared from the
    /// root outward.
    fn cmp(&self, other: &Self) -> Ordering {
        let self_labels: Vec<Label<'_>> = self.labels().collect();
        let other_labels: Vec<Label<'_>> = other.labels().collect();

        for (a, b) in self_labels.iter().rev().zip(other_labels.iter().rev()) {
            match a.cmp_canonical(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        self_labels.len().cmp(&other_labels.len())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::root()
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_presentation())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
