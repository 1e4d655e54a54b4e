use crate::message::tags::Tags;
use crate::prefix::Prefix;

/// An owned IRC message.
///
/// Contains the complete structured form of one IRC line: IRCv3 tags, the
/// prefix/source, the command and its parameters. Empty tags and an empty
/// prefix stand for "absent".
///
/// # Example
///
/// ```
/// use slirc_wire::Message;
///
/// // Parse a message
/// let msg = Message::parse_str(":nick!user@host PRIVMSG #channel :Hello!");
/// assert_eq!(msg.params, ["#channel", "Hello!"]);
///
/// // Construct a message
/// let msg = Message::new("PRIVMSG", ["#channel", "Hello there"]);
/// assert_eq!(msg.to_string(), "PRIVMSG #channel :Hello there");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// IRCv3 message tags (e.g., `time`, `msgid`).
    pub tags: Tags,
    /// Message prefix/source (e.g., `nick!user@host`).
    pub prefix: Prefix,
    /// The command. Parsing upper-cases ASCII letters.
    pub command: String,
    /// Command parameters, the trailing one last.
    pub params: Vec<String>,
}

impl Message {
    /// Create a message from a command and its parameters.
    ///
    /// The command is stored as given; only parsing normalizes case.
    #[must_use]
    pub fn new<C, I, P>(command: C, params: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Message {
            tags: Tags::new(),
            prefix: Prefix::default(),
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the value of an IRCv3 tag by key.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags.get(key)
    }

    /// Get the nickname from the message prefix, if present.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.nick()
    }

    /// The last parameter, which is the only one allowed to contain spaces.
    pub fn trailing(&self) -> Option<&str> {
        self.params.last().map(String::as_str)
    }

    /// Add a single IRCv3 tag, replacing any existing value for the key.
    #[must_use]
    pub fn with_tag<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.tags.insert(key, value);
        self
    }

    /// Replace all IRCv3 tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Set the prefix/source of this message.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = prefix;
        self
    }

    /// Append a parameter.
    #[must_use]
    pub fn with_param<P: Into<String>>(mut self, param: P) -> Self {
        self.params.push(param.into());
        self
    }
}
