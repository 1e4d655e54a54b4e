//! Direct-to-writer encoding for IRC messages.
//!
//! This module provides the [`IrcEncode`] trait for writing IRC messages straight
//! into any [`Write`] implementor (sockets, `Vec<u8>`, buffered writers) without
//! building an intermediate `String`.
//!
//! [`encode`](IrcEncode::encode) produces exactly what `Display` produces, with
//! no terminator. [`encode_line`](IrcEncode::encode_line) appends CRLF and is the
//! one to use when the bytes go onto the wire.
//!
//! # Example
//!
//! ```
//! use slirc_wire::encode::IrcEncode;
//! use slirc_wire::Message;
//!
//! let msg = Message::new("PRIVMSG", ["#channel", "Hello!"]);
//! let mut buf = Vec::new();
//! msg.encode_line(&mut buf).unwrap();
//!
//! assert_eq!(&buf, b"PRIVMSG #channel Hello!\r\n");
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::message::{Message, Tags};
use crate::prefix::Prefix;

/// A trait for encoding IRC protocol elements directly to a byte stream.
///
/// # Implementors
///
/// - [`Message`] - the full line
/// - [`Prefix`] - `name!user@host`, without the leading `:`
/// - [`Tags`] - the tag block body, without the leading `@`
pub trait IrcEncode {
    /// Encode this value to the given writer, without a line terminator.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the write fails.
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<usize>;

    /// Encode this value followed by CRLF.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the write fails.
    fn encode_line<W: Write>(&self, writer: &mut W) -> io::Result<usize> {
        let written = self.encode(writer)?;
        writer.write_all(b"\r\n")?;
        Ok(written + 2)
    }

    /// Encode this value to a new `Vec<u8>`, without a line terminator.
    #[must_use]
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512); // IRC max line length
        let _ = self.encode(&mut buf);
        buf
    }
}

/// Counts the bytes that reach the inner writer.
struct Counter<'w, W: Write> {
    inner: &'w mut W,
    written: usize,
}

impl<W: Write> Write for Counter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Stream a `Display` rendering into `w`.
fn encode_display<W: Write, T: fmt::Display>(value: &T, w: &mut W) -> io::Result<usize> {
    let mut counter = Counter {
        inner: w,
        written: 0,
    };
    write!(counter, "{}", value)?;
    Ok(counter.written)
}

impl IrcEncode for Message {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        encode_display(self, w)
    }
}

impl IrcEncode for Prefix {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        encode_display(self, w)
    }
}

impl IrcEncode for Tags {
    fn encode<W: Write>(&self, w: &mut W) -> io::Result<usize> {
        encode_display(self, w)
    }
}
