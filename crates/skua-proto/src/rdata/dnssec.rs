//! DNSSEC record types (DNSKEY, DS, RRSIG, NSEC).
//!
//! The codec carries these records; it does not validate signatures.

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rtype::Type;
use crate::wire::{self, WireReader};
use bytes::BytesMut;
use data_encoding::BASE64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// DNSKEY record: a zone's public key (RFC 4034 §2).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dnskey {
    /// Bit 7: zone key; bit 15: secure entry point.
    flags: u16,
    /// Must be 3.
    protocol: u8,
    /// Signing algorithm number.
    algorithm: u8,
    /// Public key material.
    public_key: Vec<u8>,
}

impl Dnskey {
    /// Flag bit marking a zone key.
    pub const ZONE_KEY: u16 = 0x0100;
    /// Flag bit marking a secure entry point (KSK).
    pub const SEP: u16 = 0x0001;

    /// Creates a DNSKEY record.
    pub fn new(flags: u16, protocol: u8, algorithm: u8, public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            flags,
            protocol,
            algorithm,
            public_key: public_key.into(),
        }
    }

    /// Returns the flags field.
    #[inline]
    pub const fn flags(&self) -> u16 {
        self.flags
    }

    /// Returns the protocol field.
    #[inline]
    pub const fn protocol(&self) -> u8 {
        self.protocol
    }

    /// Returns the algorithm number.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the key material.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Returns true for a key-signing key.
    #[inline]
    pub const fn is_sep(&self) -> bool {
        self.flags & Self::SEP != 0
    }

    /// Computes the RFC 4034 appendix B key tag over this key's RDATA.
    pub fn key_tag(&self) -> u16 {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_wire(&mut buf);
        wire::key_tag(&buf)
    }

    /// Decodes from an RDATA slice.
    pub fn decode(rdata: &[u8]) -> Result<Self> {
        let mut rd = WireReader::new(rdata);
        Ok(Self {
            flags: rd.read_u16()?,
            protocol: rd.read_u8()?,
            algorithm: rd.read_u8()?,
            public_key: rd.take(rd.remaining())?.to_vec(),
        })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        4 + self.public_key.len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&[self.protocol, self.algorithm]);
        buf.extend_from_slice(&self.public_key);
    }
}

impl fmt::Display for Dnskey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.flags,
            self.protocol,
            self.algorithm,
            BASE64.encode(&self.public_key)
        )
    }
}

/// DS record: a digest of a child zone's DNSKEY (RFC 4034 §5).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ds {
    key_tag: u16,
    algorithm: u8,
    digest_type: u8,
    digest: Vec<u8>,
}

impl Ds {
    /// Creates a DS record.
    pub fn new(key_tag: u16, algorithm: u8, digest_type: u8, digest: impl Into<Vec<u8>>) -> Self {
        Self {
            key_tag,
            algorithm,
            digest_type,
            digest: digest.into(),
        }
    }

    /// Returns the referenced key's tag.
    #[inline]
    pub const fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// Returns the algorithm number.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the digest type number.
    #[inline]
    pub const fn digest_type(&self) -> u8 {
        self.digest_type
    }

    /// Returns the digest.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Decodes from an RDATA slice.
    pub fn decode(rdata: &[u8]) -> Result<Self> {
        let mut rd = WireReader::new(rdata);
        Ok(Self {
            key_tag: rd.read_u16()?,
            algorithm: rd.read_u8()?,
            digest_type: rd.read_u8()?,
            digest: rd.take(rd.remaining())?.to_vec(),
        })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        4 + self.digest.len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.key_tag.to_be_bytes());
        buf.extend_from_slice(&[self.algorithm, self.digest_type]);
        buf.extend_from_slice(&self.digest);
    }
}

impl fmt::Display for Ds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.key_tag,
            self.algorithm,
            self.digest_type,
            data_encoding::HEXUPPER.encode(&self.digest)
        )
    }
}

/// RRSIG record: a signature over an RRset (RFC 4034 §3).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rrsig {
    /// Type of the covered RRset.
    type_covered: Type,
    /// Signing algorithm number.
    algorithm: u8,
    /// Label count of the owner name, wildcards excluded.
    labels: u8,
    /// Original TTL of the covered RRset.
    original_ttl: u32,
    /// Signature expiration, seconds since the epoch.
    expiration: u32,
    /// Signature inception, seconds since the epoch.
    inception: u32,
    /// Tag of the signing key.
    key_tag: u16,
    /// Name of the signing zone.
    signer: Name,
    /// Signature bytes.
    signature: Vec<u8>,
}

impl Rrsig {
    /// Creates an RRSIG record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        type_covered: Type,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: u32,
        inception: u32,
        key_tag: u16,
        signer: Name,
        signature: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer,
            signature: signature.into(),
        }
    }

    /// Returns the covered record type.
    #[inline]
    pub const fn type_covered(&self) -> Type {
        self.type_covered
    }

    /// Returns the signing zone name.
    #[inline]
    pub fn signer(&self) -> &Name {
        &self.signer
    }

    /// Returns the signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Returns the signing key tag.
    #[inline]
    pub const fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// Decodes at `offset` within the complete message; the signer name may
    /// be compressed in captures even though RFC 4034 forbids emitting it so.
    pub fn decode_at(message: &[u8], offset: usize, rdlength: usize) -> Result<Self> {
        let end = offset + rdlength;
        let mut rd = WireReader::new(message);
        rd.seek(offset)?;

        let type_covered = Type::from_u16(rd.read_u16()?);
        let algorithm = rd.read_u8()?;
        let labels = rd.read_u8()?;
        let original_ttl = rd.read_u32()?;
        let expiration = rd.read_u32()?;
        let inception = rd.read_u32()?;
        let key_tag = rd.read_u16()?;

        let (signer, signer_len) = NameParser::new(message).decode_at(rd.position())?;
        let sig_start = rd.position() + signer_len;
        if sig_start > end {
            return Err(Error::truncated(sig_start, end));
        }
        rd.seek(sig_start)?;
        let signature = rd.take(end - sig_start)?.to_vec();

        Ok(Self {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer,
            signature,
        })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        18 + self.signer.wire_len() + self.signature.len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.type_covered.to_u16().to_be_bytes());
        buf.extend_from_slice(&[self.algorithm, self.labels]);
        buf.extend_from_slice(&self.original_ttl.to_be_bytes());
        buf.extend_from_slice(&self.expiration.to_be_bytes());
        buf.extend_from_slice(&self.inception.to_be_bytes());
        buf.extend_from_slice(&self.key_tag.to_be_bytes());
        self.signer.write_wire(buf);
        buf.extend_from_slice(&self.signature);
    }
}

impl fmt::Display for Rrsig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {}",
            self.type_covered,
            self.algorithm,
            self.labels,
            self.original_ttl,
            self.expiration,
            self.inception,
            self.key_tag,
            self.signer,
            BASE64.encode(&self.signature)
        )
    }
}

/// NSEC record: the next owner name in canonical order plus the type bitmap
/// of the types present at this name (RFC 4034 §4).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nsec {
    next_name: Name,
    /// Window-block type bitmap, stored in wire form.
    type_bitmap: Vec<u8>,
}

impl Nsec {
    /// Creates an NSEC record from a raw type bitmap.
    pub fn new(next_name: Name, type_bitmap: impl Into<Vec<u8>>) -> Self {
        Self {
            next_name,
            type_bitmap: type_bitmap.into(),
        }
    }

    /// Returns the next owner name.
    #[inline]
    pub fn next_name(&self) -> &Name {
        &self.next_name
    }

    /// Returns the raw type bitmap.
    pub fn type_bitmap(&self) -> &[u8] {
        &self.type_bitmap
    }

    /// Expands the bitmap into the type codes it asserts.
    pub fn types(&self) -> Vec<u16> {
        let mut types = Vec::new();
        let mut pos = 0;

        while pos + 2 <= self.type_bitmap.len() {
            let window = u16::from(self.type_bitmap[pos]);
            let len = self.type_bitmap[pos + 1] as usize;
            pos += 2;
            if pos + len > self.type_bitmap.len() {
                break;
            }
            for (byte_idx, &byte) in self.type_bitmap[pos..pos + len].iter().enumerate() {
                for bit in 0..8 {
                    if byte & (0x80 >> bit) != 0 {
                        types.push(window * 256 + (byte_idx as u16) * 8 + bit);
                    }
                }
            }
            pos += len;
        }
        types
    }

    /// Decodes at `offset` within the complete message.
    pub fn decode_at(message: &[u8], offset: usize, rdlength: usize) -> Result<Self> {
        let end = offset + rdlength;
        let (next_name, name_len) = NameParser::new(message).decode_at(offset)?;

        let bitmap_start = offset + name_len;
        if bitmap_start > end || end > message.len() {
            return Err(Error::truncated(end, message.len()));
        }
        Ok(Self {
            next_name,
            type_bitmap: message[bitmap_start..end].to_vec(),
        })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        self.next_name.wire_len() + self.type_bitmap.len()
    }

    /// Appends the encoded RDATA to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        self.next_name.write_wire(buf);
        buf.extend_from_slice(&self.type_bitmap);
    }
}

impl fmt::Display for Nsec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.next_name)?;
        for code in self.types() {
            write!(f, " {}", Type::from_u16(code))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtype::RecordType;
    use std::str::FromStr;

    #[test]
    fn dnskey_roundtrip_and_tag() {
        let key = Dnskey::new(
            Dnskey::ZONE_KEY | Dnskey::SEP,
            3,
            8,
            vec![0x03, 0x01, 0x00, 0x01, 0xAB, 0xCD],
        );
        assert!(key.is_sep());

        let mut buf = BytesMut::new();
        key.write_wire(&mut buf);
        assert_eq!(Dnskey::decode(&buf).unwrap(), key);

        // The tag must be stable across a decode round-trip.
        assert_eq!(Dnskey::decode(&buf).unwrap().key_tag(), key.key_tag());
    }

    #[test]
    fn ds_roundtrip() {
        let ds = Ds::new(20326, 8, 2, vec![0xE0; 32]);
        let mut buf = BytesMut::new();
        ds.write_wire(&mut buf);

        let decoded = Ds::decode(&buf).unwrap();
        assert_eq!(decoded, ds);
        assert_eq!(decoded.key_tag(), 20326);
    }

    #[test]
    fn ds_too_short() {
        assert!(Ds::decode(&[0, 1, 2]).is_err());
    }

    #[test]
    fn rrsig_roundtrip() {
        let rrsig = Rrsig::new(
            Type::Known(RecordType::A),
            13,
            2,
            3600,
            1_700_003_600,
            1_700_000_000,
            34567,
            Name::from_str("example.com").unwrap(),
            vec![0x55; 64],
        );
        let mut buf = BytesMut::new();
        rrsig.write_wire(&mut buf);
        assert_eq!(buf.len(), rrsig.wire_len());

        let decoded = Rrsig::decode_at(&buf, 0, buf.len()).unwrap();
        assert_eq!(decoded, rrsig);
    }

    #[test]
    fn nsec_bitmap_expansion() {
        // Window 0, 6 bytes: bits for A(1), NS(2), SOA(6), MX(15), TXT(16),
        // AAAA(28), RRSIG(46).
        let mut bitmap = vec![0u8, 6];
        let mut bits = [0u8; 6];
        for t in [1u16, 2, 6, 15, 16, 28, 46] {
            bits[(t / 8) as usize] |= 0x80 >> (t % 8);
        }
        bitmap.extend_from_slice(&bits);

        let nsec = Nsec::new(Name::from_str("host.example.com").unwrap(), bitmap);
        assert_eq!(nsec.types(), vec![1, 2, 6, 15, 16, 28, 46]);

        let mut buf = BytesMut::new();
        nsec.write_wire(&mut buf);
        let decoded = Nsec::decode_at(&buf, 0, buf.len()).unwrap();
        assert_eq!(decoded, nsec);
    }
}
