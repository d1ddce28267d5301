//! Records whose RDATA is a domain name, possibly with a small prefix
//! (NS, CNAME, PTR, DNAME, MX).
//!
//! These parse against the complete message buffer because the embedded
//! names may be compression pointers into earlier sections.

use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! name_rdata {
    ($(#[$doc:meta])* $ty:ident, $field:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $ty {
            $field: Name,
        }

        impl $ty {
            #[doc = concat!("Creates a ", stringify!($ty), " record.")]
            #[inline]
            pub fn new($field: Name) -> Self {
                Self { $field }
            }

            /// Returns the carried name.
            #[inline]
            pub fn $field(&self) -> &Name {
                &self.$field
            }

            /// Decodes at `offset` within the complete message.
            pub fn decode_at(message: &[u8], offset: usize) -> Result<Self> {
                let ($field, _) = NameParser::new(message).decode_at(offset)?;
                Ok(Self { $field })
            }

            /// Returns the encoded length in bytes.
            #[inline]
            pub fn wire_len(&self) -> usize {
                self.$field.wire_len()
            }

            /// Appends the encoded RDATA to a buffer.
            pub fn write_wire(&self, buf: &mut BytesMut) {
                self.$field.write_wire(buf);
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.$field)
            }
        }
    };
}

name_rdata! {
    /// NS record: an authoritative name server for the owner name (RFC 1035).
    Ns, nsdname
}

name_rdata! {
    /// CNAME record: the owner name is an alias for this canonical name
    /// (RFC 1035).
    Cname, target
}

name_rdata! {
    /// PTR record: reverse-mapping pointer (RFC 1035).
    Ptr, ptrdname
}

name_rdata! {
    /// DNAME record: redirection for an entire subtree (RFC 6672).
    Dname, target
}

/// MX record: a mail exchange with its preference (RFC 1035). Lower
/// preference values are tried first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mx {
    preference: u16,
    exchange: Name,
}

impl Mx {
    /// Creates an MX record.
    #[inline]
    pub fn new(preference: u16, exchange: Name) -> Self {
        Self {
            preference,
            exchange,
        }
    }

    /// Returns the preference value.
    #[inline]
    pub const fn preference(&self) -> u16 {
        self.preference
    }

    /// Returns the exchange host name.
    #[inline]
    pub fn exchange(&self) -> &Name {
        &self.exchange
    }

    /// Decodes at `offset` within the complete message.
    pub fn decode_at(message: &[u8], offset: usize) -> Result<Self> {
        let mut rd = WireReader::new(message);
        rd.seek(offset)?;
        let preference = rd.read_u16()?;
        let (exchange, _) = NameParser::new(message).decode_at(rd.position())?;
        Ok(Self {
            preference,
            exchange,
        })
    }

    /// Returns the encoded length in bytes.
    #[inline]
    pub fn wire_len(&self) -> usize {
        2 + self.exchange.wire_len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.preference.to_be_bytes());
        self.exchange.write_wire(buf);
    }
}

impl fmt::Display for Mx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn cname_roundtrip() {
        let cname = Cname::new(Name::from_str("www.example.com").unwrap());
        let mut buf = BytesMut::new();
        cname.write_wire(&mut buf);

        let decoded = Cname::decode_at(&buf, 0).unwrap();
        assert_eq!(decoded, cname);
        assert_eq!(decoded.to_string(), "www.example.com.");
    }

    #[test]
    fn mx_roundtrip() {
        let mx = Mx::new(10, Name::from_str("mail.example.com").unwrap());
        let mut buf = BytesMut::new();
        mx.write_wire(&mut buf);
        assert_eq!(buf.len(), mx.wire_len());

        let decoded = Mx::decode_at(&buf, 0).unwrap();
        assert_eq!(decoded, mx);
        assert_eq!(decoded.to_string(), "10 mail.example.com.");
    }

    #[test]
    fn mx_with_compressed_exchange() {
        // "example.com." at offset 0; MX RDATA at offset 13 referencing it.
        let mut message = Vec::new();
        message.extend_from_slice(&[
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
        ]);
        message.extend_from_slice(&20u16.to_be_bytes());
        message.extend_from_slice(&[4, b'm', b'a', b'i', b'l', 0xC0, 0x00]);

        let mx = Mx::decode_at(&message, 13).unwrap();
        assert_eq!(mx.preference(), 20);
        assert_eq!(mx.exchange().to_string(), "mail.example.com.");
    }

    #[test]
    fn ns_and_ptr() {
        let ns = Ns::new(Name::from_str("ns1.example.com").unwrap());
        assert_eq!(ns.nsdname().to_string(), "ns1.example.com.");

        let ptr = Ptr::new(Name::from_str("host.example.com").unwrap());
        assert_eq!(ptr.to_string(), "host.example.com.");
    }
}
