//! IRC message prefix types.
//!
//! A prefix identifies the origin of a message as `name!user@host`, where
//! each part is optional.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format

use std::convert::Infallible;
use std::str::FromStr;

use super::parse::split_fields;

/// IRC message prefix - identifies the origin of a message.
///
/// Each field is independent and an empty string means the field is absent.
/// A server source is just a prefix with only `name` set.
#[derive(Clone, Default, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prefix {
    /// Nickname or server name.
    pub name: String,
    /// Username (ident), after `!`.
    pub user: String,
    /// Hostname, after `@`.
    pub host: String,
}

impl Prefix {
    /// Create a prefix from its three components.
    ///
    /// # Example
    ///
    /// ```
    /// use slirc_wire::Prefix;
    ///
    /// let prefix = Prefix::new("nick", "user", "host.example.com");
    /// assert_eq!(prefix.nick(), Some("nick"));
    /// assert_eq!(prefix.user(), Some("user"));
    /// assert_eq!(prefix.host(), Some("host.example.com"));
    /// assert_eq!(prefix.to_string(), "nick!user@host.example.com");
    /// ```
    pub fn new(name: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Prefix {
            name: name.into(),
            user: user.into(),
            host: host.into(),
        }
    }

    /// Parse a colon-less `name!user@host` string.
    ///
    /// This is a lenient parser: it never fails and does not validate the
    /// components. Splitting stops at the first space, CR or LF.
    pub fn new_from_str(s: &str) -> Self {
        split_fields(s.as_bytes()).0
    }

    /// Get the nickname (or server name), if present.
    pub fn nick(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Get the username, if present.
    pub fn user(&self) -> Option<&str> {
        non_empty(&self.user)
    }

    /// Get the hostname, if present.
    pub fn host(&self) -> Option<&str> {
        non_empty(&self.host)
    }

    /// True if every field is empty. Such a prefix is not rendered.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.user.is_empty() && self.host.is_empty()
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl FromStr for Prefix {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Prefix::new_from_str(s))
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Prefix::new_from_str(s)
    }
}
