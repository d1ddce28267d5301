//! EDNS Client Subnet (RFC 7871).
//!
//! The option carries a client network prefix so authoritative servers can
//! tailor answers geographically. On the wire the address is truncated to
//! the fewest octets that hold `source_prefix` bits:
//!
//! ```text
//! FAMILY (16) | SOURCE PREFIX (8) | SCOPE PREFIX (8) | ADDRESS (0..16 octets)
//! ```

use crate::error::{Error, Result};
use crate::wire::WireReader;
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address family number for IPv4.
const FAMILY_IPV4: u16 = 1;
/// Address family number for IPv6.
const FAMILY_IPV6: u16 = 2;

/// A client subnet: an address truncated to a prefix length.
///
/// Values are kept in canonical form: address bits beyond `source_prefix`
/// are zeroed at construction, mirroring what the wire encoding can carry.
/// Consequently `decode(encode(v)) == v` holds exactly.
///
/// Decoding is strict: the payload must carry exactly `⌈source_prefix/8⌉`
/// address octets, and the family must match a known address width;
/// anything else is [`Error::OptionMalformed`]. (RFC 7871 recommends
/// rejection; lenient decoders silently zero-fill instead.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientSubnet {
    address: IpAddr,
    source_prefix: u8,
    scope_prefix: u8,
}

impl ClientSubnet {
    /// Creates a client subnet, zeroing address bits beyond the prefix.
    ///
    /// `source_prefix` larger than the address width is clamped to it.
    pub fn new(address: IpAddr, source_prefix: u8, scope_prefix: u8) -> Self {
        let source_prefix = source_prefix.min(address_bits(&address));
        Self {
            address: mask_address(address, source_prefix),
            source_prefix,
            scope_prefix,
        }
    }

    /// Creates the form a client sends: scope prefix zero, to be filled in
    /// by the responding server.
    pub fn for_request(address: IpAddr, source_prefix: u8) -> Self {
        Self::new(address, source_prefix, 0)
    }

    /// Returns the (truncated) address, zero-extended to full width.
    #[inline]
    pub const fn address(&self) -> IpAddr {
        self.address
    }

    /// Returns the source prefix length.
    #[inline]
    pub const fn source_prefix(&self) -> u8 {
        self.source_prefix
    }

    /// Returns the scope prefix length.
    #[inline]
    pub const fn scope_prefix(&self) -> u8 {
        self.scope_prefix
    }

    /// Returns the address family number (1 for IPv4, 2 for IPv6).
    #[inline]
    pub const fn family(&self) -> u16 {
        match self.address {
            IpAddr::V4(_) => FAMILY_IPV4,
            IpAddr::V6(_) => FAMILY_IPV6,
        }
    }

    /// Returns the number of address octets the wire form carries.
    #[inline]
    pub const fn address_octets(&self) -> usize {
        (self.source_prefix as usize + 7) / 8
    }

    /// Returns the payload length in bytes.
    #[inline]
    pub const fn payload_len(&self) -> usize {
        4 + self.address_octets()
    }

    /// Appends the payload (family, prefixes, truncated address).
    pub fn write_payload(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.family().to_be_bytes());
        buf.extend_from_slice(&[self.source_prefix, self.scope_prefix]);

        let n = self.address_octets();
        match self.address {
            IpAddr::V4(a) => buf.extend_from_slice(&a.octets()[..n]),
            IpAddr::V6(a) => buf.extend_from_slice(&a.octets()[..n]),
        }
    }

    /// Decodes a client subnet from an option payload.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut rd = WireReader::new(payload);
        let family = rd
            .read_u16()
            .map_err(|_| short_payload(payload.len()))?;
        let source_prefix = rd.read_u8().map_err(|_| short_payload(payload.len()))?;
        let scope_prefix = rd.read_u8().map_err(|_| short_payload(payload.len()))?;

        let width = match family {
            FAMILY_IPV4 => 32u8,
            FAMILY_IPV6 => 128u8,
            other => {
                return Err(Error::option_malformed(
                    super::OptionCode::ClientSubnet.to_u16(),
                    format!("unknown address family {other}"),
                ))
            }
        };
        if source_prefix > width {
            return Err(Error::option_malformed(
                super::OptionCode::ClientSubnet.to_u16(),
                format!("source prefix {source_prefix} exceeds family width {width}"),
            ));
        }

        let expected = (usize::from(source_prefix) + 7) / 8;
        if rd.remaining() != expected {
            return Err(Error::option_malformed(
                super::OptionCode::ClientSubnet.to_u16(),
                format!(
                    "prefix {} implies {} address octets, payload carries {}",
                    source_prefix,
                    expected,
                    rd.remaining()
                ),
            ));
        }
        let present = rd.take(expected)?;

        let address = match family {
            FAMILY_IPV4 => {
                let mut octets = [0u8; 4];
                octets[..present.len()].copy_from_slice(present);
                IpAddr::V4(Ipv4Addr::from(octets))
            }
            _ => {
                let mut octets = [0u8; 16];
                octets[..present.len()].copy_from_slice(present);
                IpAddr::V6(Ipv6Addr::from(octets))
            }
        };

        // Construction masks any stray bits in a trailing partial octet.
        Ok(Self::new(address, source_prefix, scope_prefix))
    }
}

impl fmt::Display for ClientSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.address, self.source_prefix, self.scope_prefix
        )
    }
}

fn short_payload(len: usize) -> Error {
    Error::option_malformed(
        super::OptionCode::ClientSubnet.to_u16(),
        format!("payload of {len} bytes is shorter than the fixed fields"),
    )
}

const fn address_bits(address: &IpAddr) -> u8 {
    match address {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn mask_address(address: IpAddr, prefix: u8) -> IpAddr {
    match address {
        IpAddr::V4(a) => {
            let masked = if prefix == 0 {
                0
            } else {
                u32::from(a) & (u32::MAX << (32 - u32::from(prefix)))
            };
            IpAddr::V4(Ipv4Addr::from(masked))
        }
        IpAddr::V6(a) => {
            let masked = if prefix == 0 {
                0
            } else {
                u128::from(a) & (u128::MAX << (128 - u32::from(prefix)))
            };
            IpAddr::V6(Ipv6Addr::from(masked))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn truncates_to_three_octets() {
        let ecs = ClientSubnet::for_request(IpAddr::from_str("192.0.2.1").unwrap(), 24);

        let mut buf = BytesMut::new();
        ecs.write_payload(&mut buf);
        assert_eq!(buf.as_ref(), &[0x00, 0x01, 24, 0, 0xC0, 0x00, 0x02]);

        let decoded = ClientSubnet::decode(&buf).unwrap();
        assert_eq!(
            decoded.address(),
            IpAddr::from_str("192.0.2.0").unwrap(),
            "the dropped host octet zero-extends"
        );
        assert_eq!(decoded.source_prefix(), 24);
        assert_eq!(decoded.scope_prefix(), 0);
        assert_eq!(decoded, ecs);
    }

    #[test]
    fn partial_octet_bits_are_masked() {
        // /20 keeps two full octets and the top 4 bits of the third.
        let ecs = ClientSubnet::for_request(IpAddr::from_str("10.1.255.255").unwrap(), 20);

        let mut buf = BytesMut::new();
        ecs.write_payload(&mut buf);
        assert_eq!(&buf[4..], &[10, 1, 0xF0]);
        assert_eq!(ecs.address(), IpAddr::from_str("10.1.240.0").unwrap());
    }

    #[test]
    fn ipv6_roundtrip() {
        let ecs = ClientSubnet::new(IpAddr::from_str("2001:db8:1234::1").unwrap(), 56, 48);
        assert_eq!(ecs.family(), 2);
        assert_eq!(ecs.address_octets(), 7);

        let mut buf = BytesMut::new();
        ecs.write_payload(&mut buf);
        assert_eq!(buf.len(), ecs.payload_len());

        let decoded = ClientSubnet::decode(&buf).unwrap();
        assert_eq!(decoded, ecs);
        assert_eq!(decoded.scope_prefix(), 48);
    }

    #[test]
    fn zero_prefix_carries_no_octets() {
        let ecs = ClientSubnet::for_request(IpAddr::from_str("203.0.113.9").unwrap(), 0);

        let mut buf = BytesMut::new();
        ecs.write_payload(&mut buf);
        assert_eq!(buf.as_ref(), &[0x00, 0x01, 0, 0]);

        let decoded = ClientSubnet::decode(&buf).unwrap();
        assert_eq!(decoded.address(), IpAddr::from_str("0.0.0.0").unwrap());
    }

    #[test]
    fn octet_count_mismatch_rejected() {
        // /24 implies 3 octets; payload carries 4.
        let payload = [0x00, 0x01, 24, 0, 192, 0, 2, 1];
        assert!(matches!(
            ClientSubnet::decode(&payload),
            Err(Error::OptionMalformed { code: 8, .. })
        ));

        // /24 implies 3 octets; payload carries 2.
        let payload = [0x00, 0x01, 24, 0, 192, 0];
        assert!(matches!(
            ClientSubnet::decode(&payload),
            Err(Error::OptionMalformed { code: 8, .. })
        ));
    }

    #[test]
    fn unknown_family_rejected() {
        let payload = [0x00, 0x03, 8, 0, 1];
        assert!(matches!(
            ClientSubnet::decode(&payload),
            Err(Error::OptionMalformed { code: 8, .. })
        ));
    }

    #[test]
    fn excessive_prefix_rejected() {
        let payload = [0x00, 0x01, 40, 0, 1, 2, 3, 4, 5];
        assert!(matches!(
            ClientSubnet::decode(&payload),
            Err(Error::OptionMalformed { code: 8, .. })
        ));
    }

    #[test]
    fn short_fixed_part_rejected() {
        assert!(matches!(
            ClientSubnet::decode(&[0x00, 0x01, 24]),
            Err(Error::OptionMalformed { code: 8, .. })
        ));
    }

    #[test]
    fn display() {
        let ecs = ClientSubnet::for_request(IpAddr::from_str("192.0.2.1").unwrap(), 24);
        assert_eq!(ecs.to_string(), "192.0.2.0/24/0");
    }
}
