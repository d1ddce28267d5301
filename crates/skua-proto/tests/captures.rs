//! Tests against captured and hand-assembled wire messages.

use skua_proto::{
    ClientSubnet, EdnsOption, Message, Name, Opt, OptMeta, Question, RData, Record, RecordClass,
    RecordType, Type,
};
use std::net::IpAddr;
use std::str::FromStr;

/// A captured `www.google.com. IN A` query with an EDNS cookie, as sent by
/// a stub resolver.
const GOOGLE_QUERY: &[u8] = &[
    0x76, 0x0B, 0x01, 0x20, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, // header
    0x03, 0x77, 0x77, 0x77, 0x06, 0x67, 0x6F, 0x6F, 0x67, 0x6C, 0x65, 0x03, 0x63, 0x6F, 0x6D,
    0x00, // www.google.com.
    0x00, 0x01, 0x00, 0x01, // A IN
    0x00, // root owner
    0x00, 0x29, // OPT
    0x04, 0xD0, // udp 1232
    0x00, 0x00, 0x00, 0x00, // ttl
    0x00, 0x0C, // rdlength 12
    0x00, 0x0A, 0x00, 0x08, // cookie, 8 bytes
    0xD2, 0xD5, 0xDE, 0x88, 0xF9, 0x96, 0x1C, 0x58,
];

#[test]
fn decodes_captured_google_query() {
    let message = Message::decode(GOOGLE_QUERY).unwrap();

    assert_eq!(message.id(), 0x760B);
    assert!(message.header().is_query());
    assert!(message.header().recursion_desired());
    assert_eq!(message.header().qdcount, 1);
    assert_eq!(message.header().arcount, 1);

    let question = message.question().unwrap();
    assert_eq!(question.qname.to_string(), "www.google.com.");
    assert_eq!(question.qtype, Type::Known(RecordType::A));
    assert_eq!(question.qclass.as_known(), Some(RecordClass::IN));

    let edns = message.edns().unwrap();
    assert_eq!(edns.udp_size, 1232);
    assert_eq!(edns.version, 0);
    assert!(!edns.dnssec_ok);

    let opt = message.opt().unwrap().rdata().as_opt().unwrap();
    assert_eq!(
        opt.cookie(),
        Some(&[0xD2, 0xD5, 0xDE, 0x88, 0xF9, 0x96, 0x1C, 0x58])
    );
}

#[test]
fn reencodes_captured_query_byte_for_byte() {
    let message = Message::decode(GOOGLE_QUERY).unwrap();
    assert_eq!(message.encode().as_ref(), GOOGLE_QUERY);
}

/// A hand-assembled response exercising compression pointers in owner
/// names and inside RDATA: the CNAME target and the second answer's owner
/// both point back into earlier message bytes.
#[test]
fn follows_compression_across_records() {
    #[rustfmt::skip]
    let wire: Vec<u8> = vec![
        // header: response, RD|RA, 1 question, 2 answers
        0xBE, 0xEF, 0x81, 0x80, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00,
        // question: www.example.com. A IN (name at offset 12)
        0x03, b'w', b'w', b'w', 0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e',
        0x03, b'c', b'o', b'm', 0x00,
        0x00, 0x01, 0x00, 0x01,
        // answer 1 at offset 33: ptr(12) CNAME IN ttl=60
        // rdata at offset 45: "web" + ptr(16) = web.example.com.
        0xC0, 0x0C, 0x00, 0x05, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3C, 0x00, 0x06,
        0x03, b'w', b'e', b'b', 0xC0, 0x10,
        // answer 2 at offset 51: ptr(45) A IN ttl=60 rdata 192.0.2.66
        0xC0, 0x2D, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3C, 0x00, 0x04,
        0xC0, 0x00, 0x02, 0x42,
    ];

    let message = Message::decode(&wire).unwrap();
    assert_eq!(message.answers().len(), 2);

    let cname = &message.answers()[0];
    assert_eq!(cname.name().to_string(), "www.example.com.");
    assert_eq!(
        cname.rdata().as_cname().unwrap().to_string(),
        "web.example.com."
    );

    let a = &message.answers()[1];
    assert_eq!(a.name().to_string(), "web.example.com.");
    assert_eq!(a.rdata().as_a().unwrap().to_string(), "192.0.2.66");

    // Re-encoding expands the pointers; the result must still describe the
    // same message.
    let reencoded = Message::decode(&message.encode()).unwrap();
    assert_eq!(reencoded, message);
}

#[test]
fn kitchen_sink_roundtrip() {
    let zone = Name::from_str("example.com").unwrap();
    let mut message = Message::response_to(&Message::query(Question::a(zone.clone())));

    message.add_answer(Record::a(
        zone.clone(),
        300,
        "192.0.2.1".parse().unwrap(),
    ));
    message.add_answer(Record::aaaa(
        zone.clone(),
        300,
        "2001:db8::1".parse().unwrap(),
    ));
    message.add_answer(Record::from_rdata(
        zone.clone(),
        3600,
        RData::Mx(skua_proto::rdata::Mx::new(
            10,
            Name::from_str("mail.example.com").unwrap(),
        )),
    ));
    message.add_authority(Record::from_rdata(
        zone.clone(),
        3600,
        RData::Soa(skua_proto::rdata::Soa::new(
            Name::from_str("ns1.example.com").unwrap(),
            Name::from_str("hostmaster.example.com").unwrap(),
            2024060100,
            7200,
            900,
            1209600,
            3600,
        )),
    ));

    let mut options = Opt::new();
    options.push(EdnsOption::ClientSubnet(ClientSubnet::for_request(
        IpAddr::from_str("198.51.100.0").unwrap(),
        24,
    )));
    options.push(EdnsOption::Cookie {
        client: [9, 8, 7, 6, 5, 4, 3, 2],
        server: Some(vec![0x11; 16]),
    });
    message.add_additional(Record::opt(
        OptMeta {
            udp_size: 4096,
            extended_rcode: 0,
            version: 0,
            dnssec_ok: true,
        },
        options,
    ));

    let wire = message.encode();
    let decoded = Message::decode(&wire).unwrap();
    assert_eq!(decoded, message);

    // Length invariants: counts match sections, RDLENGTH matches RDATA.
    assert_eq!(decoded.header().ancount, 3);
    assert_eq!(decoded.header().nscount, 1);
    assert_eq!(decoded.header().arcount, 1);
    assert_eq!(wire.len(), message.wire_len());

    // And a second pass is stable.
    assert_eq!(decoded.encode(), wire);
}

#[test]
fn opaque_record_and_option_survive_roundtrip() {
    let mut message = Message::query(Question::a(Name::from_str("example.com").unwrap()));
    message.add_additional(Record::from_rdata(
        Name::from_str("example.com").unwrap(),
        0,
        RData::Unknown(skua_proto::rdata::Unknown::new(
            65280,
            vec![0xCA, 0xFE, 0xBA, 0xBE],
        )),
    ));

    let mut options = Opt::new();
    options.push(EdnsOption::Unknown {
        code: 999,
        data: vec![0xAA, 0xBB],
    });
    message.add_additional(Record::opt(OptMeta::default(), options));

    let decoded = Message::decode(&message.encode()).unwrap();
    assert_eq!(decoded, message);

    let unknown = &decoded.additionals()[0];
    assert_eq!(unknown.rtype().to_u16(), 65280);
    match unknown.rdata() {
        RData::Unknown(u) => assert_eq!(u.data(), &[0xCA, 0xFE, 0xBA, 0xBE]),
        other => panic!("expected opaque rdata, got {other:?}"),
    }
}
