//! Service location records (SRV, NAPTR).

use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SRV record: the host and port of a service instance (RFC 2782).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Srv {
    /// Lower priority is tried first.
    priority: u16,
    /// Load-balancing weight among equal priorities.
    weight: u16,
    /// Service port.
    port: u16,
    /// Service host; the root name means "service not available".
    target: Name,
}

impl Srv {
    /// Creates an SRV record.
    pub fn new(priority: u16, weight: u16, port: u16, target: Name) -> Self {
        Self {
            priority,
            weight,
            port,
            target,
        }
    }

    /// Returns the priority.
    #[inline]
    pub const fn priority(&self) -> u16 {
        self.priority
    }

    /// Returns the weight.
    #[inline]
    pub const fn weight(&self) -> u16 {
        self.weight
    }

    /// Returns the port.
    #[inline]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the target host name.
    #[inline]
    pub fn target(&self) -> &Name {
        &self.target
    }

    /// Decodes at `offset` within the complete message.
    pub fn decode_at(message: &[u8], offset: usize) -> Result<Self> {
        let mut rd = WireReader::new(message);
        rd.seek(offset)?;
        let priority = rd.read_u16()?;
        let weight = rd.read_u16()?;
        let port = rd.read_u16()?;
        let (target, _) = NameParser::new(message).decode_at(rd.position())?;

        Ok(Self {
            priority,
            weight,
            port,
            target,
        })
    }

    /// Returns the encoded length in bytes.
    #[inline]
    pub fn wire_len(&self) -> usize {
        6 + self.target.wire_len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.priority.to_be_bytes());
        buf.extend_from_slice(&self.weight.to_be_bytes());
        buf.extend_from_slice(&self.port.to_be_bytes());
        self.target.write_wire(buf);
    }
}

impl fmt::Display for Srv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.priority, self.weight, self.port, self.target
        )
    }
}

/// NAPTR record: DDDS rewrite rule (RFC 3403).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Naptr {
    /// Lower order is processed first.
    order: u16,
    /// Preference among equal orders.
    preference: u16,
    /// Flags controlling rewrite interpretation.
    flags: Vec<u8>,
    /// Service parameters.
    service: Vec<u8>,
    /// Substitution expression.
    regexp: Vec<u8>,
    /// Replacement name when no regexp applies.
    replacement: Name,
}

impl Naptr {
    /// Creates a NAPTR record.
    pub fn new(
        order: u16,
        preference: u16,
        flags: impl Into<Vec<u8>>,
        service: impl Into<Vec<u8>>,
        regexp: impl Into<Vec<u8>>,
        replacement: Name,
    ) -> Self {
        Self {
            order,
            preference,
            flags: flags.into(),
            service: service.into(),
            regexp: regexp.into(),
            replacement,
        }
    }

    /// Returns the order.
    #[inline]
    pub const fn order(&self) -> u16 {
        self.order
    }

    /// Returns the preference.
    #[inline]
    pub const fn preference(&self) -> u16 {
        self.preference
    }

    /// Returns the flags string.
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }

    /// Returns the service string.
    pub fn service(&self) -> &[u8] {
        &self.service
    }

    /// Returns the regexp string.
    pub fn regexp(&self) -> &[u8] {
        &self.regexp
    }

    /// Returns the replacement name.
    pub fn replacement(&self) -> &Name {
        &self.replacement
    }

    /// Decodes at `offset` within the complete message.
    pub fn decode_at(message: &[u8], offset: usize) -> Result<Self> {
        let mut rd = WireReader::new(message);
        rd.seek(offset)?;
        let order = rd.read_u16()?;
        let preference = rd.read_u16()?;

        let mut read_string = || -> Result<Vec<u8>> {
            let len = rd.read_u8()? as usize;
            Ok(rd.take(len)?.to_vec())
        };
        let flags = read_string()?;
        let service = read_string()?;
        let regexp = read_string()?;

        let (replacement, _) = NameParser::new(message).decode_at(rd.position())?;

        Ok(Self {
            order,
            preference,
            flags,
            service,
            regexp,
            replacement,
        })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        4 + 3
            + self.flags.len()
            + self.service.len()
            + self.regexp.len()
            + self.replacement.wire_len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.order.to_be_bytes());
        buf.extend_from_slice(&self.preference.to_be_bytes());
        for s in [&self.flags, &self.service, &self.regexp] {
            buf.extend_from_slice(&[s.len() as u8]);
            buf.extend_from_slice(s);
        }
        self.replacement.write_wire(buf);
    }
}

impl fmt::Display for Naptr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} \"{}\" \"{}\" \"{}\" {}",
            self.order,
            self.preference,
            String::from_utf8_lossy(&self.flags),
            String::from_utf8_lossy(&self.service),
            String::from_utf8_lossy(&self.regexp),
            self.replacement
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::str::FromStr;

    #[test]
    fn srv_roundtrip() {
        let srv = Srv::new(0, 5, 5060, Name::from_str("sip.example.com").unwrap());
        let mut buf = BytesMut::new();
        srv.write_wire(&mut buf);
        assert_eq!(buf.len(), srv.wire_len());

        let decoded = Srv::decode_at(&buf, 0).unwrap();
        assert_eq!(decoded, srv);
        assert_eq!(decoded.to_string(), "0 5 5060 sip.example.com.");
    }

    #[test]
    fn srv_truncated_fixed_part() {
        let rdata = [0, 1, 0, 2, 0];
        assert!(matches!(
            Srv::decode_at(&rdata, 0),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn naptr_roundtrip() {
        let naptr = Naptr::new(
            100,
            10,
            *b"u",
            *b"E2U+sip",
            *b"!^.*$!sip:info@example.com!",
            Name::root(),
        );
        let mut buf = BytesMut::new();
        naptr.write_wire(&mut buf);
        assert_eq!(buf.len(), naptr.wire_len());

        let decoded = Naptr::decode_at(&buf, 0).unwrap();
        assert_eq!(decoded, naptr);
    }
}
