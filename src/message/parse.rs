//! Decoding of a single IRC line.
//!
//! IRC message format:
//! ```text
//! [@tags] [:prefix] <command> [params...] [:trailing] [CRLF]
//! ```
//!
//! Each stage takes the remaining input as an immutable slice and returns
//! what it parsed together with the number of bytes it consumed.

use std::convert::Infallible;
use std::str::FromStr;

use crate::error::Result;
use crate::message::tags::parse_tags;
use crate::message::types::Message;
use crate::prefix::parse_prefix;
use crate::util::{consumed, is_line_end, is_token_end, skip_byte, take_field, text};

/// Read the command token, upper-casing ASCII letters.
///
/// Stops at space, CR or LF; the space is consumed.
pub fn parse_command(input: &[u8]) -> (String, usize) {
    let (command, rest) = take_field(input, is_token_end);
    let rest = skip_byte(rest, b' ');
    (text(&command.to_ascii_uppercase()), consumed(input, rest))
}

/// Split the parameter list.
///
/// Runs of spaces separate parameters. A `:` opening a parameter starts the
/// trailing parameter, which runs verbatim up to CR or LF. A `:` anywhere
/// else inside a parameter is dropped. CR and LF are never consumed.
pub fn parse_params(input: &[u8]) -> (Vec<String>, usize) {
    let mut params = Vec::new();
    let mut rest = input;

    loop {
        match rest.first() {
            None | Some(b'\r' | b'\n') => break,
            Some(b' ') => rest = &rest[1..],
            Some(b':') => {
                let (trailing, r) = take_field(&rest[1..], is_line_end);
                params.push(text(trailing));
                rest = r;
                break;
            }
            Some(_) => {
                let (token, r) = take_field(rest, is_token_end);
                let param: Vec<u8> = token.iter().copied().filter(|&b| b != b':').collect();
                params.push(text(&param));
                rest = r;
            }
        }
    }

    (params, consumed(input, rest))
}

impl Message {
    /// Parse one IRC line from `input`.
    ///
    /// Returns the message and how many bytes of `input` it read. A CRLF
    /// directly after the parameters is consumed; a missing terminator is
    /// fine. Parsing never fails: malformed input degrades to empty fields.
    ///
    /// # Example
    ///
    /// ```
    /// use slirc_wire::Message;
    ///
    /// let input = b"@id=1 :nick!user@host privmsg #chan :hi there\r\nPING x";
    /// let (msg, n) = Message::parse(input);
    /// assert_eq!(msg.command, "PRIVMSG");
    /// assert_eq!(msg.params, ["#chan", "hi there"]);
    /// assert_eq!(&input[n..], b"PING x");
    /// ```
    pub fn parse(input: &[u8]) -> (Message, usize) {
        let mut pos = 0;

        let (tags, n) = parse_tags(&input[pos..]);
        pos += n;
        let (prefix, n) = parse_prefix(&input[pos..]);
        pos += n;
        let (command, n) = parse_command(&input[pos..]);
        pos += n;
        let (params, n) = parse_params(&input[pos..]);
        pos += n;

        if input[pos..].starts_with(b"\r\n") {
            pos += 2;
        }

        let message = Message {
            tags,
            prefix,
            command,
            params,
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            consumed = pos,
            command = %message.command,
            params = message.params.len(),
            tags = message.tags.len(),
            "parsed irc line"
        );

        (message, pos)
    }

    /// Parse one IRC line from text, discarding the consumed count.
    pub fn parse_str(s: &str) -> Message {
        Message::parse(s.as_bytes()).0
    }

    /// Parse one IRC line, rejecting it unless the consumed bytes are valid
    /// UTF-8.
    ///
    /// [`parse`](Self::parse) replaces invalid sequences with U+FFFD; use this
    /// when that substitution is unacceptable.
    pub fn parse_utf8(input: &[u8]) -> Result<(Message, usize)> {
        let (message, n) = Message::parse(input);
        if let Err(e) = std::str::from_utf8(&input[..n]) {
            #[cfg(feature = "tracing")]
            tracing::debug!(byte_pos = e.valid_up_to(), "rejected non-utf-8 irc line");
            return Err(e.into());
        }
        Ok((message, n))
    }
}

impl FromStr for Message {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Message::parse_str(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    fn command(input: &str) -> (String, &str) {
        let (c, n) = parse_command(input.as_bytes());
        (c, &input[n..])
    }

    fn params(input: &str) -> (Vec<String>, &str) {
        let (p, n) = parse_params(input.as_bytes());
        (p, &input[n..])
    }

    #[test]
    fn test_command_upper_cases_letters_only() {
        assert_eq!(command("priVmsg foo"), ("PRIVMSG".to_string(), "foo"));
        assert_eq!(command("001 nick"), ("001".to_string(), "nick"));
        assert_eq!(command("a-b_c\u{e9}"), ("A-B_C\u{e9}".to_string(), ""));
    }

    #[test]
    fn test_command_stops_before_line_end() {
        assert_eq!(command("ping\r\n"), ("PING".to_string(), "\r\n"));
        assert_eq!(command("\r\n"), (String::new(), "\r\n"));
        assert_eq!(command(""), (String::new(), ""));
    }

    #[test]
    fn test_params_collapse_spaces() {
        assert_eq!(params("#foo-bar +o foobar  "), (vec!["#foo-bar".into(), "+o".into(), "foobar".into()], ""));
        assert_eq!(params("   "), (vec![], ""));
    }

    #[test]
    fn test_params_trailing() {
        assert_eq!(
            params("bar baz :asdf quux"),
            (vec!["bar".into(), "baz".into(), "asdf quux".into()], "")
        );
        assert_eq!(params("bar :"), (vec!["bar".into(), String::new()], ""));
        assert_eq!(params("bar ::asdf"), (vec!["bar".into(), ":asdf".into()], ""));
        assert_eq!(params("bar :lol :) "), (vec!["bar".into(), "lol :) ".into()], ""));
    }

    #[test]
    fn test_params_mid_token_colon_dropped() {
        assert_eq!(params("a:b c::d e:"), (vec!["ab".into(), "cd".into(), "e".into()], ""));
    }

    #[test]
    fn test_params_stop_before_line_end() {
        assert_eq!(params("with crlf\r\n"), (vec!["with".into(), "crlf".into()], "\r\n"));
        assert_eq!(params(":trail ing\r\nnext"), (vec!["trail ing".into()], "\r\nnext"));
        assert_eq!(params("\n"), (vec![], "\n"));
    }

    #[test]
    fn test_parse_consumes_crlf_only() {
        let (msg, n) = Message::parse(b"FOO bar\r\n");
        assert_eq!(n, 9);
        let (same, m) = Message::parse(b"FOO bar");
        assert_eq!(m, 7);
        assert_eq!(msg, same);

        // a lone LF is left in place
        let (_, n) = Message::parse(b"FOO bar\n");
        assert_eq!(n, 7);
    }

    #[test]
    fn test_parse_empty() {
        let (msg, n) = Message::parse(b"");
        assert_eq!(msg, Message::default());
        assert_eq!(n, 0);
    }

    #[test]
    fn test_parse_lossy_utf8() {
        let (msg, n) = Message::parse(b"PRIVMSG #chan :caf\xe9");
        assert_eq!(msg.params[1], "caf\u{fffd}");
        assert_eq!(n, 19);
    }

    #[test]
    fn test_parse_utf8_rejects_invalid() {
        let err = Message::parse_utf8(b"PRIVMSG #chan :caf\xe9").unwrap_err();
        match err {
            ProtocolError::InvalidUtf8 { byte_pos, .. } => assert_eq!(byte_pos, 18),
            _ => panic!("Expected InvalidUtf8 variant"),
        }
    }

    #[test]
    fn test_parse_utf8_ignores_unconsumed_bytes() {
        let (msg, n) = Message::parse_utf8(b"PING x\r\n\xff").unwrap();
        assert_eq!(msg.command, "PING");
        assert_eq!(n, 8);
    }

    #[test]
    fn test_from_str() {
        let msg: Message = "ping :irc.example.com".parse().unwrap();
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.params, ["irc.example.com"]);
    }
}
