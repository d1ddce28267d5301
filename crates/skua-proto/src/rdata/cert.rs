//! Certificate and key association records (TLSA, SSHFP, CAA).

use crate::error::Result;
use crate::wire::WireReader;
use bytes::BytesMut;
use data_encoding::HEXUPPER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// TLSA record: associates a TLS certificate or key with a service
/// endpoint (RFC 6698).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tlsa {
    /// Certificate usage (PKIX-TA/PKIX-EE/DANE-TA/DANE-EE).
    usage: u8,
    /// Selector: full certificate (0) or public key (1).
    selector: u8,
    /// Matching type: exact (0), SHA-256 (1), SHA-512 (2).
    matching_type: u8,
    /// Certificate association data.
    data: Vec<u8>,
}

impl Tlsa {
    /// Creates a TLSA record.
    pub fn new(usage: u8, selector: u8, matching_type: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            usage,
            selector,
            matching_type,
            data: data.into(),
        }
    }

    /// Returns the certificate usage.
    #[inline]
    pub const fn usage(&self) -> u8 {
        self.usage
    }

    /// Returns the selector.
    #[inline]
    pub const fn selector(&self) -> u8 {
        self.selector
    }

    /// Returns the matching type.
    #[inline]
    pub const fn matching_type(&self) -> u8 {
        self.matching_type
    }

    /// Returns the association data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decodes from an RDATA slice.
    pub fn decode(rdata: &[u8]) -> Result<Self> {
        let mut rd = WireReader::new(rdata);
        Ok(Self {
            usage: rd.read_u8()?,
            selector: rd.read_u8()?,
            matching_type: rd.read_u8()?,
            data: rd.take(rd.remaining())?.to_vec(),
        })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        3 + self.data.len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&[self.usage, self.selector, self.matching_type]);
        buf.extend_from_slice(&self.data);
    }
}

impl fmt::Display for Tlsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.usage,
            self.selector,
            self.matching_type,
            HEXUPPER.encode(&self.data)
        )
    }
}

/// SSHFP record: an SSH host key fingerprint (RFC 4255).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sshfp {
    /// Key algorithm (RSA=1, DSA=2, ECDSA=3, Ed25519=4).
    algorithm: u8,
    /// Fingerprint type (SHA-1=1, SHA-256=2).
    fingerprint_type: u8,
    /// Fingerprint bytes.
    fingerprint: Vec<u8>,
}

impl Sshfp {
    /// Creates an SSHFP record.
    pub fn new(algorithm: u8, fingerprint_type: u8, fingerprint: impl Into<Vec<u8>>) -> Self {
        Self {
            algorithm,
            fingerprint_type,
            fingerprint: fingerprint.into(),
        }
    }

    /// Returns the key algorithm.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the fingerprint type.
    #[inline]
    pub const fn fingerprint_type(&self) -> u8 {
        self.fingerprint_type
    }

    /// Returns the fingerprint.
    pub fn fingerprint(&self) -> &[u8] {
        &self.fingerprint
    }

    /// Decodes from an RDATA slice.
    pub fn decode(rdata: &[u8]) -> Result<Self> {
        let mut rd = WireReader::new(rdata);
        Ok(Self {
            algorithm: rd.read_u8()?,
            fingerprint_type: rd.read_u8()?,
            fingerprint: rd.take(rd.remaining())?.to_vec(),
        })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        2 + self.fingerprint.len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&[self.algorithm, self.fingerprint_type]);
        buf.extend_from_slice(&self.fingerprint);
    }
}

impl fmt::Display for Sshfp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.algorithm,
            self.fingerprint_type,
            HEXUPPER.encode(&self.fingerprint)
        )
    }
}

/// CAA record: which certificate authorities may issue for a domain
/// (RFC 8659).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Caa {
    /// Critical bit: unrecognized critical properties forbid issuance.
    critical: bool,
    /// Property tag, e.g. `issue`, `issuewild`, `iodef`.
    tag: String,
    /// Property value.
    value: Vec<u8>,
}

impl Caa {
    /// Creates a CAA record.
    pub fn new(critical: bool, tag: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            critical,
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Creates an `issue` property.
    pub fn issue(issuer: impl Into<String>) -> Self {
        Self::new(false, "issue", issuer.into().into_bytes())
    }

    /// Returns true if the critical bit is set.
    #[inline]
    pub const fn is_critical(&self) -> bool {
        self.critical
    }

    /// Returns the property tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the property value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Decodes from an RDATA slice.
    pub fn decode(rdata: &[u8]) -> Result<Self> {
        let mut rd = WireReader::new(rdata);
        let flags = rd.read_u8()?;
        let tag_len = rd.read_u8()? as usize;
        // Tags are ASCII per the registry; tolerate anything on decode.
        let tag = String::from_utf8_lossy(rd.take(tag_len)?).into_owned();
        let value = rd.take(rd.remaining())?.to_vec();

        Ok(Self {
            critical: flags & 0x80 != 0,
            tag,
            value,
        })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        2 + self.tag.len() + self.value.len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&[if self.critical { 0x80 } else { 0 }, self.tag.len() as u8]);
        buf.extend_from_slice(self.tag.as_bytes());
        buf.extend_from_slice(&self.value);
    }
}

impl fmt::Display for Caa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} \"{}\"",
            u8::from(self.critical) << 7,
            self.tag,
            String::from_utf8_lossy(&self.value)
        )
    }
}
