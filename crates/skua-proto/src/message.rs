//! Whole-message codec.
//!
//! A message is the fixed header followed by four sections: questions,
//! answers, authority records, and additional records. Decoding reads
//! exactly the number of entries the header counts announce; encoding
//! recomputes every count from the actual section lengths, so counts can
//! never disagree with content in anything this codec produces.

use crate::edns::OptMeta;
use crate::error::Result;
use crate::header::{Header, HEADER_LEN};
use crate::question::Question;
use crate::rcode::ResponseCode;
use crate::record::Record;
use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete DNS message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<Record>,
    authorities: Vec<Record>,
    additionals: Vec<Record>,
}

impl Message {
    /// Creates an empty message with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            questions: Vec::new(),
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    /// Creates a recursive query for one question.
    pub fn query(question: Question) -> Self {
        let mut message = Self::new(Header::query());
        message.add_question(question);
        message
    }

    /// Creates the skeleton of a response to `query`: same ID and opcode,
    /// the question echoed, sections empty.
    pub fn response_to(query: &Message) -> Self {
        let mut message = Self::new(Header::response_to(&query.header));
        for question in &query.questions {
            message.add_question(question.clone());
        }
        message
    }

    /// Returns the header.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns a mutable reference to the header.
    ///
    /// Count fields edited here are overwritten from the actual section
    /// lengths on encode.
    #[inline]
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the message ID.
    #[inline]
    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Returns the response code.
    #[inline]
    pub fn rcode(&self) -> ResponseCode {
        self.header.rcode
    }

    /// Returns the question section.
    #[inline]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the first question, the common case.
    #[inline]
    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Returns the answer section.
    #[inline]
    pub fn answers(&self) -> &[Record] {
        &self.answers
    }

    /// Returns the authority section.
    #[inline]
    pub fn authorities(&self) -> &[Record] {
        &self.authorities
    }

    /// Returns the additional section, OPT record included.
    #[inline]
    pub fn additionals(&self) -> &[Record] {
        &self.additionals
    }

    /// Appends a question and bumps the count.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
        self.header.qdcount = self.questions.len() as u16;
    }

    /// Appends an answer record and bumps the count.
    pub fn add_answer(&mut self, record: Record) {
        self.answers.push(record);
        self.header.ancount = self.answers.len() as u16;
    }

    /// Appends an authority record and bumps the count.
    pub fn add_authority(&mut self, record: Record) {
        self.authorities.push(record);
        self.header.nscount = self.authorities.len() as u16;
    }

    /// Appends an additional record and bumps the count.
    pub fn add_additional(&mut self, record: Record) {
        self.additionals.push(record);
        self.header.arcount = self.additionals.len() as u16;
    }

    /// Returns the OPT pseudo-record, when present in the additional
    /// section.
    pub fn opt(&self) -> Option<&Record> {
        self.additionals.iter().find(|r| r.is_opt())
    }

    /// Returns the EDNS metadata of the OPT record, when present.
    pub fn edns(&self) -> Option<OptMeta> {
        self.opt().and_then(Record::opt_meta)
    }

    /// Returns the full response code, extended bits from the OPT record
    /// included.
    pub fn extended_rcode(&self) -> ResponseCode {
        match self.edns() {
            Some(meta) => {
                ResponseCode::from_parts(self.header.rcode.header_bits(), meta.extended_rcode)
            }
            None => self.header.rcode,
        }
    }

    /// Decodes a message from wire format.
    ///
    /// The header's counts dictate how many entries each section holds;
    /// running out of bytes mid-section is an error, as are compression
    /// pointers that escape the buffer.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let header = Header::decode(data)?;
        let mut offset = HEADER_LEN;

        let mut questions = Vec::with_capacity(usize::from(header.qdcount.min(16)));
        for _ in 0..header.qdcount {
            let (question, consumed) = Question::decode_at(data, offset)?;
            questions.push(question);
            offset += consumed;
        }

        let mut decode_section = |count: u16, offset: &mut usize| -> Result<Vec<Record>> {
            let mut records = Vec::with_capacity(usize::from(count.min(32)));
            for _ in 0..count {
                let (record, consumed) = Record::decode_at(data, *offset)?;
                records.push(record);
                *offset += consumed;
            }
            Ok(records)
        };

        let answers = decode_section(header.ancount, &mut offset)?;
        let authorities = decode_section(header.nscount, &mut offset)?;
        let additionals = decode_section(header.arcount, &mut offset)?;

        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// Returns the encoded length in bytes.
    pub fn wire_len(&self) -> usize {
        HEADER_LEN
            + self.questions.iter().map(Question::wire_len).sum::<usize>()
            + self.answers.iter().map(Record::wire_len).sum::<usize>()
            + self.authorities.iter().map(Record::wire_len).sum::<usize>()
            + self.additionals.iter().map(Record::wire_len).sum::<usize>()
    }

    /// Appends the encoded message to a buffer.
    ///
    /// The header counts written are taken from the section lengths, never
    /// from the stored header fields.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        let mut header = self.header.clone();
        header.qdcount = self.questions.len() as u16;
        header.ancount = self.answers.len() as u16;
        header.nscount = self.authorities.len() as u16;
        header.arcount = self.additionals.len() as u16;
        header.write_wire(buf);

        for question in &self.questions {
            question.write_wire(buf);
        }
        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            record.write_wire(buf);
        }
    }

    /// Encodes the message to a frozen byte buffer.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_wire(&mut buf);
        buf.freeze()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";; ->>HEADER<<- {}", self.header)?;

        if let Some(meta) = self.edns() {
            writeln!(f, ";; {meta}")?;
        }

        writeln!(f, ";; QUESTION SECTION:")?;
        for question in &self.questions {
            writeln!(f, ";{question}")?;
        }

        for (title, section) in [
            ("ANSWER", &self.answers),
            ("AUTHORITY", &self.authorities),
            ("ADDITIONAL", &self.additionals),
        ] {
            if !section.is_empty() {
                writeln!(f, ";; {title} SECTION:")?;
                for record in section.iter() {
                    writeln!(f, "{record}")?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edns::{EdnsOption, Opt};
    use crate::name::Name;
    use crate::rtype::RecordType;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn a_query(name: &str) -> Message {
        Message::query(Question::a(Name::from_str(name).unwrap()))
    }

    #[test]
    fn query_roundtrip() {
        let mut query = a_query("example.com");
        query.header_mut().id = 0x4242;

        let wire = query.encode();
        let decoded = Message::decode(&wire).unwrap();

        assert_eq!(decoded, query);
        assert_eq!(decoded.question().unwrap().qname.to_string(), "example.com.");
    }

    #[test]
    fn counts_recomputed_on_encode() {
        let mut message = a_query("example.com");
        message.add_answer(Record::a(
            Name::from_str("example.com").unwrap(),
            300,
            Ipv4Addr::new(192, 0, 2, 1),
        ));
        message.add_answer(Record::a(
            Name::from_str("example.com").unwrap(),
            300,
            Ipv4Addr::new(192, 0, 2, 2),
        ));
        // Sabotage the stored counts; encode must ignore them.
        message.header_mut().ancount = 9;
        message.header_mut().qdcount = 0;

        let decoded = Message::decode(&message.encode()).unwrap();
        assert_eq!(decoded.header().qdcount, 1);
        assert_eq!(decoded.header().ancount, 2);
        assert_eq!(decoded.answers().len(), 2);
    }

    #[test]
    fn counts_exceeding_content_rejected() {
        let message = a_query("example.com");
        let mut wire = BytesMut::from(message.encode().as_ref());
        // Claim a second question that is not present.
        wire[5] = 2;

        assert!(Message::decode(&wire).is_err());
    }

    #[test]
    fn response_echoes_question() {
        let query = a_query("www.example.net");
        let mut response = Message::response_to(&query);
        response.add_answer(Record::a(
            Name::from_str("www.example.net").unwrap(),
            60,
            Ipv4Addr::new(203, 0, 113, 5),
        ));

        assert_eq!(response.id(), query.id());
        assert!(response.header().is_response());
        assert_eq!(response.questions(), query.questions());
    }

    #[test]
    fn opt_record_travels_in_additional_section() {
        let mut query = a_query("example.com");
        let mut options = Opt::new();
        options.push(EdnsOption::Cookie {
            client: [1, 2, 3, 4, 5, 6, 7, 8],
            server: None,
        });
        query.add_additional(Record::opt(OptMeta::new(1232), options));

        let wire = query.encode();
        let decoded = Message::decode(&wire).unwrap();

        assert_eq!(decoded.header().arcount, 1);
        let opt = decoded.opt().expect("OPT record present");
        assert_eq!(opt.rtype().to_u16(), RecordType::OPT.to_u16());
        assert_eq!(decoded.edns().unwrap().udp_size, 1232);
        assert_eq!(
            decoded.opt().unwrap().rdata().as_opt().unwrap().cookie(),
            Some(&[1, 2, 3, 4, 5, 6, 7, 8])
        );
    }

    #[test]
    fn extended_rcode_combines_opt_bits() {
        let mut response = Message::response_to(&a_query("example.com"));
        response.header_mut().rcode = ResponseCode::from(0); // low nibble 0
        response.add_additional(Record::opt(
            OptMeta {
                udp_size: 4096,
                extended_rcode: 1, // 16 >> 4
                version: 0,
                dnssec_ok: false,
            },
            Opt::new(),
        ));

        assert_eq!(response.extended_rcode(), ResponseCode::BadVers);
    }

    #[test]
    fn display_sections() {
        let mut message = a_query("example.com");
        message.add_answer(Record::a(
            Name::from_str("example.com").unwrap(),
            300,
            Ipv4Addr::new(192, 0, 2, 1),
        ));

        let rendered = message.to_string();
        assert!(rendered.contains("QUESTION SECTION"));
        assert!(rendered.contains("ANSWER SECTION"));
        assert!(rendered.contains("192.0.2.1"));
    }
}
