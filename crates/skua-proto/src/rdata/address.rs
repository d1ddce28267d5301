//! Address records (A, AAAA).

use crate::error::{Error, Result};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A record: an IPv4 address (RFC 1035). RDATA is exactly 4 octets in
/// network byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct A {
    address: Ipv4Addr,
}

impl A {
    /// Creates an A record.
    #[inline]
    pub const fn new(address: Ipv4Addr) -> Self {
        Self { address }
    }

    /// Returns the address.
    #[inline]
    pub const fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Decodes from an RDATA slice.
    pub fn decode(rdata: &[u8]) -> Result<Self> {
        let octets: [u8; 4] = rdata
            .try_into()
            .map_err(|_| Error::rdata_length("A", 4, rdata.len()))?;
        Ok(Self {
            address: Ipv4Addr::from(octets),
        })
    }

    /// Returns the encoded length (always 4).
    #[inline]
    pub const fn wire_len(&self) -> usize {
        4
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.address.octets());
    }
}

impl From<Ipv4Addr> for A {
    fn from(address: Ipv4Addr) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// AAAA record: an IPv6 address (RFC 3596). RDATA is exactly 16 octets in
/// network byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aaaa {
    address: Ipv6Addr,
}

impl Aaaa {
    /// Creates an AAAA record.
    #[inline]
    pub const fn new(address: Ipv6Addr) -> Self {
        Self { address }
    }

    /// Returns the address.
    #[inline]
    pub const fn address(&self) -> Ipv6Addr {
        self.address
    }

    /// Decodes from an RDATA slice.
    pub fn decode(rdata: &[u8]) -> Result<Self> {
        let octets: [u8; 16] = rdata
            .try_into()
            .map_err(|_| Error::rdata_length("AAAA", 16, rdata.len()))?;
        Ok(Self {
            address: Ipv6Addr::from(octets),
        })
    }

    /// Returns the encoded length (always 16).
    #[inline]
    pub const fn wire_len(&self) -> usize {
        16
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.address.octets());
    }
}

impl From<Ipv6Addr> for Aaaa {
    fn from(address: Ipv6Addr) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_roundtrip() {
        let a = A::new(Ipv4Addr::new(192, 0, 2, 1));
        let mut buf = BytesMut::new();
        a.write_wire(&mut buf);

        assert_eq!(buf.as_ref(), &[192, 0, 2, 1]);
        assert_eq!(A::decode(&buf).unwrap(), a);
        assert_eq!(a.to_string(), "192.0.2.1");
    }

    #[test]
    fn a_wrong_length() {
        assert_eq!(
            A::decode(&[1, 2, 3]),
            Err(Error::rdata_length("A", 4, 3))
        );
        assert!(A::decode(&[1, 2, 3, 4, 5]).is_err());
    }

    #[test]
    fn aaaa_roundtrip() {
        let aaaa = Aaaa::new(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));
        let mut buf = BytesMut::new();
        aaaa.write_wire(&mut buf);

        assert_eq!(buf.len(), 16);
        assert_eq!(Aaaa::decode(&buf).unwrap(), aaaa);
        assert_eq!(aaaa.to_string(), "2001:db8::1");
    }

    #[test]
    fn aaaa_wrong_length() {
        assert!(matches!(
            Aaaa::decode(&[0; 15]),
            Err(Error::RdataLength { .. })
        ));
    }
}
