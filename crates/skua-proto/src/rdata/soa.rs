//! SOA record (RFC 1035).

use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Start of authority: zone apex metadata.
///
/// Wire layout: `MNAME`, `RNAME`, then five 32-bit fields
/// (serial, refresh, retry, expire, minimum).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Soa {
    /// Primary name server for the zone.
    mname: Name,
    /// Responsible mailbox, first label being the local part.
    rname: Name,
    /// Zone serial number (RFC 1982 arithmetic).
    serial: u32,
    /// Secondary refresh interval, seconds.
    refresh: u32,
    /// Retry interval after a failed refresh, seconds.
    retry: u32,
    /// How long secondaries may serve the zone unrefreshed, seconds.
    expire: u32,
    /// Negative-caching TTL (RFC 2308), seconds.
    minimum: u32,
}

impl Soa {
    /// Creates an SOA record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Self {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// Returns the primary name server.
    #[inline]
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// Returns the responsible mailbox in name form.
    #[inline]
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// Returns the zone serial.
    #[inline]
    pub const fn serial(&self) -> u32 {
        self.serial
    }

    /// Returns the refresh interval in seconds.
    #[inline]
    pub const fn refresh(&self) -> u32 {
        self.refresh
    }

    /// Returns the retry interval in seconds.
    #[inline]
    pub const fn retry(&self) -> u32 {
        self.retry
    }

    /// Returns the expire limit in seconds.
    #[inline]
    pub const fn expire(&self) -> u32 {
        self.expire
    }

    /// Returns the minimum / negative-caching TTL in seconds.
    #[inline]
    pub const fn minimum(&self) -> u32 {
        self.minimum
    }

    /// Decodes at `offset` within the complete message; both names may be
    /// compressed.
    pub fn decode_at(message: &[u8], offset: usize) -> Result<Self> {
        let parser = NameParser::new(message);
        let (mname, mname_len) = parser.decode_at(offset)?;
        let (rname, rname_len) = parser.decode_at(offset + mname_len)?;

        let mut rd = WireReader::new(message);
        rd.seek(offset + mname_len + rname_len)?;

        Ok(Self {
            mname,
            rname,
            serial: rd.read_u32()?,
            refresh: rd.read_u32()?,
            retry: rd.read_u32()?,
            expire: rd.read_u32()?,
            minimum: rd.read_u32()?,
        })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        self.mname.wire_len() + self.rname.wire_len() + 20
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        self.mname.write_wire(buf);
        self.rname.write_wire(buf);
        buf.extend_from_slice(&self.serial.to_be_bytes());
        buf.extend_from_slice(&self.refresh.to_be_bytes());
        buf.extend_from_slice(&self.retry.to_be_bytes());
        buf.extend_from_slice(&self.expire.to_be_bytes());
        buf.extend_from_slice(&self.minimum.to_be_bytes());
    }
}

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire,
            self.minimum
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> Soa {
        Soa::new(
            Name::from_str("ns1.example.com").unwrap(),
            Name::from_str("hostmaster.example.com").unwrap(),
            2024010101,
            7200,
            900,
            1209600,
            3600,
        )
    }

    #[test]
    fn roundtrip() {
        let soa = sample();
        let mut buf = BytesMut::new();
        soa.write_wire(&mut buf);
        assert_eq!(buf.len(), soa.wire_len());

        let decoded = Soa::decode_at(&buf, 0).unwrap();
        assert_eq!(decoded, soa);
    }

    #[test]
    fn truncated_numbers_rejected() {
        let soa = sample();
        let mut buf = BytesMut::new();
        soa.write_wire(&mut buf);

        assert!(Soa::decode_at(&buf[..buf.len() - 4], 0).is_err());
    }

    #[test]
    fn display() {
        let soa = sample();
        assert_eq!(
            soa.to_string(),
            "ns1.example.com. hostmaster.example.com. 2024010101 7200 900 1209600 3600"
        );
    }
}
