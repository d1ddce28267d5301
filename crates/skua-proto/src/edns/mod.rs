//! EDNS(0) OPT pseudo-record support (RFC 6891).
//!
//! The OPT record (type 41) repurposes its fixed fields — the class carries
//! the sender's UDP payload size and the TTL packs the extended RCODE,
//! version, and DO flag ([`OptMeta`]) — and its RDATA is a sequence of
//! `{code, length, payload}` options ([`Opt`], [`EdnsOption`]).
//!
//! Each recognized option code has a typed decoder enforcing its payload
//! contract; unrecognized codes ride along opaquely. Option payloads never
//! use name compression, so decoding works on the RDATA alone.

mod subnet;

pub use subnet::ClientSubnet;

use crate::error::{Error, Result};
use crate::wire::WireReader;
use bytes::BytesMut;
use data_encoding::HEXLOWER;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// EDNS option codes with assigned meanings.
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
pub enum OptionCode {
    /// Long-Lived Queries - RFC 8764
    Llq = 1,

    /// Update Lease - draft-sekar-dns-ul
    UpdateLease = 2,

    /// Name Server Identifier - RFC 5001
    Nsid = 3,

    /// DNSSEC Algorithm Understood - RFC 6975
    Dau = 5,

    /// DS Hash Understood - RFC 6975
    Dhu = 6,

    /// NSEC3 Hash Understood - RFC 6975
    N3u = 7,

    /// Client Subnet - RFC 7871
    ClientSubnet = 8,

    /// EDNS Expire - RFC 7314
    Expire = 9,

    /// DNS Cookie - RFC 7873
    Cookie = 10,

    /// TCP Keepalive - RFC 7828
    TcpKeepalive = 11,

    /// Padding - RFC 7830
    Padding = 12,

    /// CHAIN Query - RFC 7901
    Chain = 13,

    /// Key Tag signaling - RFC 8145
    KeyTag = 14,

    /// Extended DNS Error - RFC 8914
    ExtendedDnsError = 15,
}

impl OptionCode {
    /// Returns the numeric option code.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Creates an option code from its numeric value, if assigned.
    #[inline]
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Returns the registry mnemonic.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Llq => "LLQ",
            Self::UpdateLease => "UPDATE-LEASE",
            Self::Nsid => "NSID",
            Self::Dau => "DAU",
            Self::Dhu => "DHU",
            Self::N3u => "N3U",
            Self::ClientSubnet => "CLIENT-SUBNET",
            Self::Expire => "EXPIRE",
            Self::Cookie => "COOKIE",
            Self::TcpKeepalive => "TCP-KEEPALIVE",
            Self::Padding => "PADDING",
            Self::Chain => "CHAIN",
            Self::KeyTag => "KEY-TAG",
            Self::ExtendedDnsError => "EDE",
        }
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single EDNS option.
///
/// The option code and payload length are derived from the variant and its
/// data; they are never stored, so encode and decode cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdnsOption {
    /// Long-Lived Query metadata (RFC 8764). Fixed 18-byte payload.
    Llq {
        /// LLQ protocol version.
        version: u16,
        /// LLQ operation (setup/refresh/event).
        llq_opcode: u16,
        /// LLQ error code.
        error_code: u16,
        /// Query identifier issued by the server.
        id: u64,
        /// Lease lifetime in seconds.
        lease_life: u32,
    },

    /// Dynamic-update lease duration (dnssd-update-lease). Fixed 4-byte
    /// payload.
    UpdateLease {
        /// Lease duration in seconds.
        lease: u32,
    },

    /// Name server identifier (RFC 5001); opaque, often ASCII.
    Nsid(Vec<u8>),

    /// DNSSEC signing algorithms the client understands (RFC 6975).
    Dau(Vec<u8>),

    /// DS hash algorithms the client understands (RFC 6975).
    Dhu(Vec<u8>),

    /// NSEC3 hash algorithms the client understands (RFC 6975).
    N3u(Vec<u8>),

    /// Client network prefix (RFC 7871).
    ClientSubnet(ClientSubnet),

    /// Seconds until the zone copy expires (RFC 7314). Fixed 4-byte
    /// payload.
    Expire {
        /// Remaining expiry time in seconds.
        expire: u32,
    },

    /// DNS Cookie (RFC 7873): 8-byte client cookie, optionally followed by
    /// an 8–32 byte server cookie.
    Cookie {
        /// The client cookie.
        client: [u8; 8],
        /// The server cookie, when present.
        server: Option<Vec<u8>>,
    },

    /// Requested idle timeout for TCP connections (RFC 7828), in units of
    /// 100 milliseconds. Empty in queries.
    TcpKeepalive {
        /// The timeout; `None` when the payload is empty.
        timeout: Option<u16>,
    },

    /// Message size padding (RFC 7830); the content is ignored.
    Padding(Vec<u8>),

    /// CHAIN query (RFC 7901), carried as the fixed two-octet form of the
    /// closest trust point.
    Chain {
        /// The closest trust point value.
        trust_point: u16,
    },

    /// DNSKEY tags of the trust anchors the validator uses (RFC 8145).
    KeyTag(Vec<u16>),

    /// Extended DNS Error (RFC 8914): an info code and optional free text.
    ExtendedDnsError {
        /// The error info code.
        info_code: u16,
        /// Human-readable extra text, possibly empty.
        text: String,
    },

    /// An option code without a typed decoder; payload preserved verbatim.
    Unknown {
        /// The option code.
        code: u16,
        /// The raw payload.
        data: Vec<u8>,
    },
}

impl EdnsOption {
    /// Returns the option code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Llq { .. } => OptionCode::Llq.to_u16(),
            Self::UpdateLease { .. } => OptionCode::UpdateLease.to_u16(),
            Self::Nsid(_) => OptionCode::Nsid.to_u16(),
            Self::Dau(_) => OptionCode::Dau.to_u16(),
            Self::Dhu(_) => OptionCode::Dhu.to_u16(),
            Self::N3u(_) => OptionCode::N3u.to_u16(),
            Self::ClientSubnet(_) => OptionCode::ClientSubnet.to_u16(),
            Self::Expire { .. } => OptionCode::Expire.to_u16(),
            Self::Cookie { .. } => OptionCode::Cookie.to_u16(),
            Self::TcpKeepalive { .. } => OptionCode::TcpKeepalive.to_u16(),
            Self::Padding(_) => OptionCode::Padding.to_u16(),
            Self::Chain { .. } => OptionCode::Chain.to_u16(),
            Self::KeyTag(_) => OptionCode::KeyTag.to_u16(),
            Self::ExtendedDnsError { .. } => OptionCode::ExtendedDnsError.to_u16(),
            Self::Unknown { code, .. } => *code,
        }
    }

    /// Returns the payload length in bytes, excluding the 4-byte TLV
    /// header.
    pub fn payload_len(&self) -> usize {
        match self {
            Self::Llq { .. } => 18,
            Self::UpdateLease { .. } => 4,
            Self::Nsid(data) | Self::Dau(data) | Self::Dhu(data) | Self::N3u(data) => data.len(),
            Self::ClientSubnet(ecs) => ecs.payload_len(),
            Self::Expire { .. } => 4,
            Self::Cookie { server, .. } => 8 + server.as_ref().map_or(0, Vec::len),
            Self::TcpKeepalive { timeout } => if timeout.is_some() { 2 } else { 0 },
            Self::Padding(data) => data.len(),
            Self::Chain { .. } => 2,
            Self::KeyTag(tags) => tags.len() * 2,
            Self::ExtendedDnsError { text, .. } => 2 + text.len(),
            Self::Unknown { data, .. } => data.len(),
        }
    }

    /// Returns the full TLV length in bytes.
    #[inline]
    pub fn wire_len(&self) -> usize {
        4 + self.payload_len()
    }

    /// Appends the TLV-framed option; the length field is computed from the
    /// actual payload.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.code().to_be_bytes());
        buf.extend_from_slice(&(self.payload_len() as u16).to_be_bytes());

        match self {
            Self::Llq {
                version,
                llq_opcode,
                error_code,
                id,
                lease_life,
            } => {
                buf.extend_from_slice(&version.to_be_bytes());
                buf.extend_from_slice(&llq_opcode.to_be_bytes());
                buf.extend_from_slice(&error_code.to_be_bytes());
                buf.extend_from_slice(&id.to_be_bytes());
                buf.extend_from_slice(&lease_life.to_be_bytes());
            }
            Self::UpdateLease { lease } => buf.extend_from_slice(&lease.to_be_bytes()),
            Self::Nsid(data) | Self::Dau(data) | Self::Dhu(data) | Self::N3u(data) => {
                buf.extend_from_slice(data);
            }
            Self::ClientSubnet(ecs) => ecs.write_payload(buf),
            Self::Expire { expire } => buf.extend_from_slice(&expire.to_be_bytes()),
            Self::Cookie { client, server } => {
                buf.extend_from_slice(client);
                if let Some(server) = server {
                    buf.extend_from_slice(server);
                }
            }
            Self::TcpKeepalive { timeout } => {
                if let Some(timeout) = timeout {
                    buf.extend_from_slice(&timeout.to_be_bytes());
                }
            }
            Self::Padding(data) => buf.extend_from_slice(data),
            Self::Chain { trust_point } => buf.extend_from_slice(&trust_point.to_be_bytes()),
            Self::KeyTag(tags) => {
                for tag in tags {
                    buf.extend_from_slice(&tag.to_be_bytes());
                }
            }
            Self::ExtendedDnsError { info_code, text } => {
                buf.extend_from_slice(&info_code.to_be_bytes());
                buf.extend_from_slice(text.as_bytes());
            }
            Self::Unknown { data, .. } => buf.extend_from_slice(data),
        }
    }

    /// Decodes an option from its code and length-bounded payload.
    ///
    /// Recognized codes enforce their payload contracts and fail with
    /// [`Error::OptionMalformed`]; unrecognized codes always succeed as
    /// [`EdnsOption::Unknown`].
    pub fn decode_payload(code: u16, payload: &[u8]) -> Result<Self> {
        fn require_len(code: u16, payload: &[u8], expected: usize) -> Result<()> {
            if payload.len() != expected {
                return Err(Error::option_malformed(
                    code,
                    format!(
                        "payload must be exactly {expected} bytes, got {}",
                        payload.len()
                    ),
                ));
            }
            Ok(())
        }

        let option = match OptionCode::from_u16(code) {
            Some(OptionCode::Llq) => {
                require_len(code, payload, 18)?;
                let mut rd = WireReader::new(payload);
                let version = rd.read_u16()?;
                let llq_opcode = rd.read_u16()?;
                let error_code = rd.read_u16()?;
                let id = u64::from(rd.read_u32()?) << 32 | u64::from(rd.read_u32()?);
                let lease_life = rd.read_u32()?;
                Self::Llq {
                    version,
                    llq_opcode,
                    error_code,
                    id,
                    lease_life,
                }
            }
            Some(OptionCode::UpdateLease) => {
                require_len(code, payload, 4)?;
                Self::UpdateLease {
                    lease: WireReader::new(payload).read_u32()?,
                }
            }
            Some(OptionCode::Nsid) => Self::Nsid(payload.to_vec()),
            Some(OptionCode::Dau) => Self::Dau(payload.to_vec()),
            Some(OptionCode::Dhu) => Self::Dhu(payload.to_vec()),
            Some(OptionCode::N3u) => Self::N3u(payload.to_vec()),
            Some(OptionCode::ClientSubnet) => Self::ClientSubnet(ClientSubnet::decode(payload)?),
            Some(OptionCode::Expire) => {
                require_len(code, payload, 4)?;
                Self::Expire {
                    expire: WireReader::new(payload).read_u32()?,
                }
            }
            Some(OptionCode::Cookie) => {
                if payload.len() != 8 && !(16..=40).contains(&payload.len()) {
                    return Err(Error::option_malformed(
                        code,
                        format!(
                            "payload must be 8 bytes or 16-40 bytes, got {}",
                            payload.len()
                        ),
                    ));
                }
                let mut client = [0u8; 8];
                client.copy_from_slice(&payload[..8]);
                let server = (payload.len() > 8).then(|| payload[8..].to_vec());
                Self::Cookie { client, server }
            }
            Some(OptionCode::TcpKeepalive) => match payload.len() {
                0 => Self::TcpKeepalive { timeout: None },
                2 => Self::TcpKeepalive {
                    timeout: Some(u16::from_be_bytes([payload[0], payload[1]])),
                },
                other => {
                    return Err(Error::option_malformed(
                        code,
                        format!("payload must be empty or 2 bytes, got {other}"),
                    ))
                }
            },
            Some(OptionCode::Padding) => Self::Padding(payload.to_vec()),
            Some(OptionCode::Chain) => {
                require_len(code, payload, 2)?;
                Self::Chain {
                    trust_point: WireReader::new(payload).read_u16()?,
                }
            }
            Some(OptionCode::KeyTag) => {
                if payload.len() % 2 != 0 {
                    return Err(Error::option_malformed(
                        code,
                        format!("payload of {} bytes is not a whole number of tags", payload.len()),
                    ));
                }
                Self::KeyTag(
                    payload
                        .chunks_exact(2)
                        .map(|c| u16::from_be_bytes([c[0], c[1]]))
                        .collect(),
                )
            }
            Some(OptionCode::ExtendedDnsError) => {
                if payload.len() < 2 {
                    return Err(Error::option_malformed(
                        code,
                        format!("payload must be at least 2 bytes, got {}", payload.len()),
                    ));
                }
                Self::ExtendedDnsError {
                    info_code: u16::from_be_bytes([payload[0], payload[1]]),
                    text: String::from_utf8_lossy(&payload[2..]).into_owned(),
                }
            }
            None => Self::Unknown {
                code,
                data: payload.to_vec(),
            },
        };

        Ok(option)
    }
}

impl fmt::Display for EdnsOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Llq {
                version,
                llq_opcode,
                error_code,
                id,
                lease_life,
            } => write!(
                f,
                "LLQ: v{version} op{llq_opcode} err{error_code} id {id:#018x} lease {lease_life}s"
            ),
            Self::UpdateLease { lease } => write!(f, "UPDATE-LEASE: {lease}s"),
            Self::Nsid(data) => write!(f, "NSID: {}", String::from_utf8_lossy(data)),
            Self::Dau(algs) => write!(f, "DAU: {algs:?}"),
            Self::Dhu(algs) => write!(f, "DHU: {algs:?}"),
            Self::N3u(algs) => write!(f, "N3U: {algs:?}"),
            Self::ClientSubnet(ecs) => write!(f, "CLIENT-SUBNET: {ecs}"),
            Self::Expire { expire } => write!(f, "EXPIRE: {expire}s"),
            Self::Cookie { client, server } => {
                write!(f, "COOKIE: {}", HEXLOWER.encode(client))?;
                if let Some(server) = server {
                    write!(f, " (server {})", HEXLOWER.encode(server))?;
                }
                Ok(())
            }
            Self::TcpKeepalive { timeout: Some(t) } => {
                write!(f, "TCP-KEEPALIVE: {}ms", u32::from(*t) * 100)
            }
            Self::TcpKeepalive { timeout: None } => write!(f, "TCP-KEEPALIVE"),
            Self::Padding(data) => write!(f, "PADDING: {} bytes", data.len()),
            Self::Chain { trust_point } => write!(f, "CHAIN: {trust_point:#06x}"),
            Self::KeyTag(tags) => write!(f, "KEY-TAG: {tags:?}"),
            Self::ExtendedDnsError { info_code, text } if text.is_empty() => {
                write!(f, "EDE: {info_code}")
            }
            Self::ExtendedDnsError { info_code, text } => {
                write!(f, "EDE: {info_code} ({text})")
            }
            Self::Unknown { code, data } => {
                write!(f, "OPT{}: {}", code, HEXLOWER.encode(data))
            }
        }
    }
}

/// The RDATA of an OPT record: an ordered sequence of options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Opt {
    options: Vec<EdnsOption>,
}

impl Opt {
    /// Creates empty OPT RDATA.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates OPT RDATA from a list of options.
    pub fn with_options(options: Vec<EdnsOption>) -> Self {
        Self { options }
    }

    /// Returns the options in wire order.
    pub fn options(&self) -> &[EdnsOption] {
        &self.options
    }

    /// Appends an option.
    pub fn push(&mut self, option: EdnsOption) {
        self.options.push(option);
    }

    /// Returns the client cookie, when a Cookie option is present.
    pub fn cookie(&self) -> Option<&[u8; 8]> {
        self.options.iter().find_map(|o| match o {
            EdnsOption::Cookie { client, .. } => Some(client),
            _ => None,
        })
    }

    /// Returns the client subnet, when present.
    pub fn client_subnet(&self) -> Option<&ClientSubnet> {
        self.options.iter().find_map(|o| match o {
            EdnsOption::ClientSubnet(ecs) => Some(ecs),
            _ => None,
        })
    }

    /// Returns the extended DNS error, when present.
    pub fn extended_error(&self) -> Option<(u16, &str)> {
        self.options.iter().find_map(|o| match o {
            EdnsOption::ExtendedDnsError { info_code, text } => {
                Some((*info_code, text.as_str()))
            }
            _ => None,
        })
    }

    /// Decodes OPT RDATA: a sequence of TLV-framed options.
    pub fn decode(rdata: &[u8]) -> Result<Self> {
        let mut rd = WireReader::new(rdata);
        let mut options = Vec::new();

        while !rd.is_empty() {
            let code = rd.read_u16()?;
            let length = rd.read_u16()? as usize;
            let payload = rd.take(length)?;
            options.push(EdnsOption::decode_payload(code, payload)?);
        }

        Ok(Self { options })
    }

    /// Returns the encoded RDATA length in bytes.
    pub fn wire_len(&self) -> usize {
        self.options.iter().map(EdnsOption::wire_len).sum()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        for option in &self.options {
            option.write_wire(buf);
        }
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{option}")?;
        }
        Ok(())
    }
}

/// The OPT pseudo-record's repurposed fixed fields.
///
/// On the wire these live in the record's CLASS (UDP payload size) and TTL
/// (extended RCODE, version, DO bit, reserved flags):
///
/// ```text
/// TTL: | EXTENDED-RCODE (8) | VERSION (8) | DO | Z (15) |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptMeta {
    /// Sender's maximum UDP payload size.
    pub udp_size: u16,
    /// Upper 8 bits of the extended response code.
    pub extended_rcode: u8,
    /// EDNS version; 0 is the only deployed version.
    pub version: u8,
    /// DNSSEC OK: the sender wants DNSSEC records.
    pub dnssec_ok: bool,
}

impl OptMeta {
    /// Creates metadata with the given UDP payload size and everything else
    /// zero.
    pub fn new(udp_size: u16) -> Self {
        Self {
            udp_size,
            extended_rcode: 0,
            version: 0,
            dnssec_ok: false,
        }
    }

    /// Reconstructs metadata from an OPT record's class and TTL fields.
    pub fn from_class_ttl(class: u16, ttl: u32) -> Self {
        Self {
            udp_size: class,
            extended_rcode: (ttl >> 24) as u8,
            version: (ttl >> 16) as u8,
            dnssec_ok: ttl & 0x8000 != 0,
        }
    }

    /// Packs the metadata back into class and TTL fields.
    pub fn to_class_ttl(self) -> (u16, u32) {
        let ttl = u32::from(self.extended_rcode) << 24
            | u32::from(self.version) << 16
            | if self.dnssec_ok { 0x8000 } else { 0 };
        (self.udp_size, ttl)
    }
}

impl Default for OptMeta {
    fn default() -> Self {
        Self::new(crate::DEFAULT_EDNS_UDP_SIZE)
    }
}

impl fmt::Display for OptMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EDNS: version {}; flags:{}; udp: {}",
            self.version,
            if self.dnssec_ok { " do" } else { "" },
            self.udp_size
        )
    }
}
