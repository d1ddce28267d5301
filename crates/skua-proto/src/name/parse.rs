//! Name decoding from message buffers, compression included.
//!
//! Compression pointers (RFC 1035 §4.1.4) are two-byte markers whose top two
//! bits are set; the remaining 14 bits give an absolute offset into the
//! enclosing message where the rest of the name continues. Pointers are
//! message-relative, so the decoder always works against the complete
//! message buffer, never an isolated RDATA slice.

use super::Name;
use crate::error::{Error, Result};
use crate::{MAX_LABEL_LEN, MAX_NAME_LEN};
use smallvec::SmallVec;

/// Upper bound on pointer jumps while decoding one name.
///
/// A conforming pointer always targets an offset strictly before itself, but
/// a crafted message can still arrange a cycle through interleaved labels;
/// the budget guarantees termination. 63 jumps is far beyond anything a
/// 255-octet name can legitimately need.
const MAX_POINTER_JUMPS: usize = 63;

/// Decoder for domain names embedded in a message.
#[derive(Debug, Clone, Copy)]
pub struct NameParser<'a> {
    /// The complete message buffer, for pointer resolution.
    message: &'a [u8],
}

impl<'a> NameParser<'a> {
    /// Creates a parser over the complete message buffer.
    #[inline]
    pub const fn new(message: &'a [u8]) -> Self {
        Self { message }
    }

    /// Decodes the name starting at `offset`.
    ///
    /// Returns the expanded name and the number of bytes the name occupies
    /// at `offset` itself (a compression pointer counts as two bytes; the
    /// pointed-to labels count toward the name, not toward consumption).
    pub fn decode_at(&self, offset: usize) -> Result<(Name, usize)> {
        let mut octets = SmallVec::<[u8; 64]>::new();
        let mut label_count: u8 = 0;
        let mut pos = offset;
        let mut consumed = 0usize;
        let mut jumped = false;
        let mut jumps = 0usize;

        loop {
            let len_byte = *self
                .message
                .get(pos)
                .ok_or_else(|| Error::truncated(pos + 1, self.message.len()))?;

            if len_byte & 0xC0 == 0xC0 {
                let low = *self
                    .message
                    .get(pos + 1)
                    .ok_or_else(|| Error::truncated(pos + 2, self.message.len()))?;
                let target = usize::from(u16::from_be_bytes([len_byte & 0x3F, low]));

                // A pointer may only reference earlier message bytes; this
                // also rules out self-reference.
                if target >= pos {
                    return Err(Error::malformed_pointer(pos, target));
                }

                jumps += 1;
                if jumps > MAX_POINTER_JUMPS {
                    return Err(Error::malformed_pointer(pos, target));
                }

                if !jumped {
                    consumed = pos - offset + 2;
                    jumped = true;
                }
                pos = target;
                continue;
            }

            // 0x40 and 0x80 prefixes are reserved label types (RFC 2671
            // extended labels were never deployed).
            if len_byte as usize > MAX_LABEL_LEN {
                return Err(Error::ReservedLabelType {
                    offset: pos,
                    value: len_byte,
                });
            }

            let len = len_byte as usize;
            if len == 0 {
                octets.push(0);
                label_count += 1;
                if !jumped {
                    consumed = pos - offset + 1;
                }
                break;
            }

            let start = pos + 1;
            let end = start + len;
            if end > self.message.len() {
                return Err(Error::truncated(end, self.message.len()));
            }
            // The label, its length byte, and the eventual root terminator
            // must all fit under the 255-octet cap.
            if octets.len() + 1 + len + 1 > MAX_NAME_LEN {
                return Err(Error::NameTooLong {
                    length: octets.len() + 1 + len + 1,
                });
            }

            octets.push(len_byte);
            octets.extend_from_slice(&self.message[start..end]);
            label_count += 1;
            pos = end;
        }

        Ok((Name::from_validated(octets, label_count), consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name() {
        let wire = [
            3, b'w', b'w', b'w', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm',
            0,
        ];
        let (name, consumed) = NameParser::new(&wire).decode_at(0).unwrap();

        assert_eq!(name.to_string(), "www.example.com.");
        assert_eq!(consumed, 17);
    }

    #[test]
    fn compressed_name() {
        // offset 0: example.com.  offset 13: www + pointer to 0
        let wire = [
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, //
            3, b'w', b'w', b'w', 0xC0, 0x00,
        ];
        let parser = NameParser::new(&wire);

        let (first, consumed) = parser.decode_at(0).unwrap();
        assert_eq!(first.to_string(), "example.com.");
        assert_eq!(consumed, 13);

        let (second, consumed) = parser.decode_at(13).unwrap();
        assert_eq!(second.to_string(), "www.example.com.");
        // Label "www" plus the two pointer bytes.
        assert_eq!(consumed, 6);
    }

    #[test]
    fn chained_pointers() {
        // offset 0: com.  offset 5: example + pointer to 0
        // offset 15: www + pointer to 5
        let wire = [
            3, b'c', b'o', b'm', 0, //
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0xC0, 0x00, //
            3, b'w', b'w', b'w', 0xC0, 0x05,
        ];
        let (name, consumed) = NameParser::new(&wire).decode_at(15).unwrap();
        assert_eq!(name.to_string(), "www.example.com.");
        assert_eq!(consumed, 6);
    }

    #[test]
    fn forward_pointer_rejected() {
        let wire = [3, b'w', b'w', b'w', 0xC0, 0x08, 0, 0, 0];
        let result = NameParser::new(&wire).decode_at(0);
        assert!(matches!(result, Err(Error::MalformedPointer { .. })));
    }

    #[test]
    fn self_pointer_rejected() {
        let wire = [0xC0, 0x00];
        let result = NameParser::new(&wire).decode_at(0);
        assert!(matches!(
            result,
            Err(Error::MalformedPointer {
                offset: 0,
                target: 0
            })
        ));
    }

    #[test]
    fn pointer_cycle_rejected() {
        // The pointer at offset 4 targets offset 0; the labels from offset 0
        // run straight back into the same pointer. Each individual jump is
        // backwards, so only the jump budget catches the cycle.
        let wire = [3, b'a', b'b', b'c', 0xC0, 0x00];
        let result = NameParser::new(&wire).decode_at(4);
        assert!(matches!(result, Err(Error::MalformedPointer { .. })));
    }

    #[test]
    fn reserved_label_type_rejected() {
        let wire = [0x41, b'x', 0];
        let result = NameParser::new(&wire).decode_at(0);
        assert!(matches!(
            result,
            Err(Error::ReservedLabelType { offset: 0, value: 0x41 })
        ));
    }

    #[test]
    fn truncated_name_rejected() {
        let wire = [3, b'w', b'w'];
        assert!(matches!(
            NameParser::new(&wire).decode_at(0),
            Err(Error::Truncated { .. })
        ));

        // Missing root terminator.
        let wire = [3, b'w', b'w', b'w'];
        assert!(matches!(
            NameParser::new(&wire).decode_at(0),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn overlong_name_rejected() {
        // Compression lets a short buffer expand past the 255-octet cap:
        // each pointer jump re-reads the 63-byte label and prepends another.
        let mut wire = Vec::new();
        wire.push(63);
        wire.extend_from_slice(&[b'a'; 63]);
        wire.push(0);
        // Four names, each prepending a 63-byte label and pointing at the
        // previous one.
        let mut prev = 0u16;
        for _ in 0..4 {
            let here = wire.len() as u16;
            wire.push(63);
            wire.extend_from_slice(&[b'b'; 63]);
            wire.extend_from_slice(&(0xC000 | prev).to_be_bytes());
            prev = here;
        }
        let result = NameParser::new(&wire).decode_at((prev) as usize);
        assert!(matches!(result, Err(Error::NameTooLong { .. })));
    }
}
