//! # Skua DNS Protocol Library
//!
//! Wire-format codec for DNS messages following RFC 1035 and its extensions.
//! This crate converts between raw byte buffers and structured, typed
//! representations of DNS headers, questions, resource records, and EDNS(0)
//! options, and round-trips them byte for byte.
//!
//! ## Features
//!
//! - **RFC 1035 message layout** with name compression on decode
//! - **Typed RDATA** for the common record types, with an opaque RFC 3597
//!   fallback for everything else
//! - **EDNS(0)** (RFC 6891) OPT pseudo-RR with typed options, including
//!   Client Subnet (RFC 7871), Cookie (RFC 7873), and Extended DNS Errors
//!   (RFC 8914)
//! - **Diagnostic rendering** via `Display` on every entity
//!
//! ## Example
//!
//! ```rust,ignore
//! use skua_proto::{Message, Question, Name, RecordType, RecordClass};
//! use std::str::FromStr;
//!
//! // Decode a DNS message from wire format
//! let message = Message::decode(&bytes)?;
//!
//! // Build and encode a query
//! let query = Message::query(Question::new(
//!     Name::from_str("example.com.")?,
//!     RecordType::A,
//!     RecordClass::IN,
//! ));
//! let wire = query.encode();
//! ```
//!
//! Every decode and encode call is a pure function of its input: the codec
//! holds no sessions, performs no I/O, and never logs. Malformed input is
//! reported through [`Error`]; recovery policy belongs to the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod class;
pub mod edns;
pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod opcode;
pub mod question;
pub mod rcode;
pub mod rdata;
pub mod record;
pub mod rtype;
pub mod wire;

// Re-exports for convenience
pub use class::{Class, RecordClass};
pub use edns::{ClientSubnet, EdnsOption, Opt, OptMeta};
pub use error::{Error, Result};
pub use header::{Header, HeaderFlags};
pub use message::Message;
pub use name::Name;
pub use opcode::OpCode;
pub use question::Question;
pub use rcode::ResponseCode;
pub use rdata::RData;
pub use record::Record;
pub use rtype::{RecordType, Type};

/// Maximum length of a single DNS label (RFC 1035).
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum encoded length of a domain name, length bytes included (RFC 1035).
pub const MAX_NAME_LEN: usize = 255;

/// Default EDNS(0) advertised UDP payload size.
pub const DEFAULT_EDNS_UDP_SIZE: u16 = 4096;
