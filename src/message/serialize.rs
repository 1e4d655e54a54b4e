use std::fmt::{self, Write};

use crate::message::types::Message;

/// Check if the last parameter needs a `:` to survive re-parsing.
///
/// Empty values and values with a space would otherwise be lost, and a
/// colon would be dropped or start a new trailing parameter.
#[inline]
pub(crate) fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains([' ', ':'])
}

/// Renders the message without a line terminator.
///
/// Use [`Message::to_line`] or [`IrcEncode::encode_line`](crate::IrcEncode::encode_line)
/// when writing to a transport.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.tags.is_empty() {
            write!(f, "@{} ", self.tags)?;
        }

        if !self.prefix.is_empty() {
            write!(f, ":{} ", self.prefix)?;
        }

        f.write_str(&self.command)?;

        if let Some((last, middle)) = self.params.split_last() {
            for param in middle {
                f.write_char(' ')?;
                f.write_str(param)?;
            }
            f.write_char(' ')?;
            if needs_colon_prefix(last) {
                f.write_char(':')?;
            }
            f.write_str(last)?;
        }

        Ok(())
    }
}

impl Message {
    /// Render the message as a complete wire line ending in CRLF.
    ///
    /// ```
    /// use slirc_wire::Message;
    ///
    /// let msg = Message::new("PONG", ["irc.example.com"]);
    /// assert_eq!(msg.to_line(), "PONG irc.example.com\r\n");
    /// ```
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{}\r\n", self)
    }
}
