//! # slirc-wire
//!
//! A codec for the wire syntax of a single IRC line. It turns raw bytes into a
//! structured [`Message`] (IRCv3 tags, prefix, command, parameters) and renders
//! a [`Message`] back into wire bytes.
//!
//! ## Features
//!
//! - Total parsing: every byte sequence, including the empty one, parses
//! - IRCv3 tag escaping and unescaping
//! - `name!user@host` prefix splitting with independent optional fields
//! - Trailing-parameter detection and ASCII command normalization
//! - Rendering with or without the CRLF terminator
//! - Direct-to-writer encoding through [`IrcEncode`]
//!
//! Transport, line framing and command semantics are left to the caller.
//!
//! ## Cargo features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Message`], [`Prefix`] and [`Tags`]
//! - `tracing`: trace events from the parser

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ### Parsing IRC Messages
//!
//! ```rust
//! use slirc_wire::Message;
//!
//! let raw = b"@time=2023-01-01T12:00:00Z :nick!user@host PRIVMSG #channel :Hello!\r\n";
//! let (message, consumed) = Message::parse(raw);
//!
//! assert_eq!(consumed, raw.len());
//! assert_eq!(message.tag_value("time"), Some("2023-01-01T12:00:00Z"));
//! assert_eq!(message.source_nickname(), Some("nick"));
//! assert_eq!(message.params, ["#channel", "Hello!"]);
//! ```
//!
//! ### Creating IRC Messages
//!
//! ```rust
//! use slirc_wire::{Message, Prefix};
//!
//! let msg = Message::new("PRIVMSG", ["#dev", "Tagged message"])
//!     .with_tag("msgid", "abc123")
//!     .with_prefix(Prefix::new_from_str("bot!bot@example.com"));
//!
//! assert_eq!(
//!     msg.to_string(),
//!     "@msgid=abc123 :bot!bot@example.com PRIVMSG #dev :Tagged message"
//! );
//! assert!(msg.to_line().ends_with("\r\n"));
//! ```

pub mod encode;
pub mod error;
pub mod message;
pub mod prefix;
mod util;

pub use self::encode::IrcEncode;
pub use self::error::ProtocolError;
pub use self::message::tags::{escape_tag_value, unescape_tag_value};
pub use self::message::{Message, Tags};
pub use self::prefix::Prefix;
