//! IRCv3 message tags: the `@key=value;...` block.
//!
//! Decoding is a byte-wise scan driven by [`TagState::step`]. Encoding
//! escapes values with the inverse table and joins pairs with `;`.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt::{self, Result as FmtResult, Write};

use crate::util::text;

/// A set of IRCv3 message tags.
///
/// Keys are unique; inserting an existing key overwrites its value. An empty
/// value means the key is present without a value. Iteration order carries no
/// meaning on the wire.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Tags(BTreeMap::new())
    }

    /// Insert a tag, returning the value it replaced.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), value.into())
    }

    /// Get the value of a tag. Presence-only tags yield `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Tags
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        tags.extend(iter);
        tags
    }
}

impl<K, V> Extend<(K, V)> for Tags
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Tags {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders the tag block body, without the leading `@` or trailing space.
impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> FmtResult {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(';')?;
            }
            f.write_str(key)?;
            if !value.is_empty() {
                f.write_char('=')?;
                escape_tag_value(f, value)?;
            }
        }
        Ok(())
    }
}

/// Scanner state while decoding the tag block.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TagState {
    /// Reading a key.
    Key,
    /// Reading a value.
    Value,
    /// The previous value byte was a backslash.
    Escape,
}

/// What the scanner does with one byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TagStep {
    /// Append the byte to the key.
    Key(u8),
    /// Append the byte to the value.
    Value(u8),
    /// Commit the current pair and start a new one.
    Commit,
    /// Nothing to append.
    Skip,
    /// Commit the current pair and stop scanning. `consume` tells whether
    /// the terminating byte belongs to the tag block.
    End {
        /// Whether the terminator is consumed.
        consume: bool,
    },
}

impl TagState {
    /// Pure transition function of the tag scanner.
    pub fn step(self, byte: u8) -> (TagState, TagStep) {
        match byte {
            b' ' => (self, TagStep::End { consume: true }),
            b'\r' | b'\n' => (self, TagStep::End { consume: false }),
            b';' => (TagState::Key, TagStep::Commit),
            // `=` is never copied, even inside a value
            b'=' => (TagState::Value, TagStep::Skip),
            _ => match self {
                TagState::Key => (TagState::Key, TagStep::Key(byte)),
                TagState::Value if byte == b'\\' => (TagState::Escape, TagStep::Skip),
                TagState::Value => (TagState::Value, TagStep::Value(byte)),
                TagState::Escape => (TagState::Value, TagStep::Value(unescape_byte(byte))),
            },
        }
    }
}

/// Map the byte following a backslash. Unknown escapes pass through.
#[inline]
fn unescape_byte(b: u8) -> u8 {
    match b {
        b':' => b';',
        b's' => b' ',
        b'r' => b'\r',
        b'n' => b'\n',
        other => other,
    }
}

/// In-progress key/value bytes.
#[derive(Default)]
struct Pair {
    key: Vec<u8>,
    value: Vec<u8>,
}

impl Pair {
    fn commit(&mut self, tags: &mut Tags) {
        if !self.key.is_empty() {
            tags.insert(text(&self.key), text(&self.value));
        }
        self.key.clear();
        self.value.clear();
    }
}

/// Decode a leading `@` tag block.
///
/// Returns the tags and the number of bytes consumed. Input that does not
/// start with `@` yields empty tags and consumes nothing.
pub fn parse_tags(input: &[u8]) -> (Tags, usize) {
    let mut tags = Tags::new();
    let body = match input.split_first() {
        Some((b'@', body)) => body,
        _ => return (tags, 0),
    };

    let mut pair = Pair::default();
    let mut state = TagState::Key;
    for (i, &b) in body.iter().enumerate() {
        let (next, step) = state.step(b);
        state = next;
        match step {
            TagStep::Key(b) => pair.key.push(b),
            TagStep::Value(b) => pair.value.push(b),
            TagStep::Commit => pair.commit(&mut tags),
            TagStep::Skip => {}
            TagStep::End { consume } => {
                pair.commit(&mut tags);
                // 1 for the `@`, i bytes of body, plus the terminator if consumed
                return (tags, 1 + i + usize::from(consume));
            }
        }
    }

    pair.commit(&mut tags);
    (tags, input.len())
}

/// Escape a tag value for serialization.
///
/// Escapes special characters according to the IRCv3 message-tags spec.
pub fn escape_tag_value(f: &mut dyn Write, value: &str) -> FmtResult {
    for c in value.chars() {
        match c {
            ';' => f.write_str("\\:")?,
            ' ' => f.write_str("\\s")?,
            '\\' => f.write_str("\\\\")?,
            '\r' => f.write_str("\\r")?,
            '\n' => f.write_str("\\n")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Unescape a single tag value from wire format.
///
/// Reverses the escaping applied by [`escape_tag_value`]. Unknown escapes
/// keep the escaped character; a lone trailing backslash is dropped.
pub fn unescape_tag_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut iter = value.chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => break,
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    unescaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_of(pairs: &[(&str, &str)]) -> Tags {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_step_key_and_value() {
        assert_eq!(TagState::Key.step(b'a'), (TagState::Key, TagStep::Key(b'a')));
        assert_eq!(TagState::Key.step(b'='), (TagState::Value, TagStep::Skip));
        assert_eq!(TagState::Value.step(b'x'), (TagState::Value, TagStep::Value(b'x')));
        assert_eq!(TagState::Value.step(b';'), (TagState::Key, TagStep::Commit));
    }

    #[test]
    fn test_step_escapes() {
        assert_eq!(TagState::Value.step(b'\\'), (TagState::Escape, TagStep::Skip));
        assert_eq!(TagState::Escape.step(b':'), (TagState::Value, TagStep::Value(b';')));
        assert_eq!(TagState::Escape.step(b's'), (TagState::Value, TagStep::Value(b' ')));
        assert_eq!(TagState::Escape.step(b'\\'), (TagState::Value, TagStep::Value(b'\\')));
        assert_eq!(TagState::Escape.step(b'r'), (TagState::Value, TagStep::Value(b'\r')));
        assert_eq!(TagState::Escape.step(b'n'), (TagState::Value, TagStep::Value(b'\n')));
        assert_eq!(TagState::Escape.step(b'1'), (TagState::Value, TagStep::Value(b'1')));
    }

    #[test]
    fn test_step_backslash_in_key_is_literal() {
        assert_eq!(TagState::Key.step(b'\\'), (TagState::Key, TagStep::Key(b'\\')));
    }

    #[test]
    fn test_step_terminators_from_any_state() {
        for state in [TagState::Key, TagState::Value, TagState::Escape] {
            assert_eq!(state.step(b' ').1, TagStep::End { consume: true });
            assert_eq!(state.step(b'\r').1, TagStep::End { consume: false });
            assert_eq!(state.step(b'\n').1, TagStep::End { consume: false });
        }
    }

    #[test]
    fn test_parse_tags_requires_at() {
        let (tags, n) = parse_tags(b"foo=bar COMMAND");
        assert!(tags.is_empty());
        assert_eq!(n, 0);

        let (tags, n) = parse_tags(b"");
        assert!(tags.is_empty());
        assert_eq!(n, 0);
    }

    #[test]
    fn test_parse_tags_consumes_space() {
        let input = b"@a=b;c COMMAND";
        let (tags, n) = parse_tags(input);
        assert_eq!(tags, tags_of(&[("a", "b"), ("c", "")]));
        assert_eq!(&input[n..], b"COMMAND");
    }

    #[test]
    fn test_parse_tags_stops_before_line_end() {
        let input = b"@a=b\r\n";
        let (tags, n) = parse_tags(input);
        assert_eq!(tags, tags_of(&[("a", "b")]));
        assert_eq!(&input[n..], b"\r\n");
    }

    #[test]
    fn test_parse_tags_duplicate_last_wins() {
        let (tags, _) = parse_tags(b"@tag1=1;tag2=3;tag1=5 COMMAND");
        assert_eq!(tags, tags_of(&[("tag1", "5"), ("tag2", "3")]));
    }

    #[test]
    fn test_parse_tags_empty_key_dropped() {
        let (tags, _) = parse_tags(b"@=v;;k=1 X");
        assert_eq!(tags, tags_of(&[("k", "1")]));
    }

    #[test]
    fn test_parse_tags_equals_in_value_dropped() {
        let (tags, _) = parse_tags(b"@a=b=c X");
        assert_eq!(tags.get("a"), Some("bc"));
    }

    #[test]
    fn test_parse_tags_dangling_escape() {
        let (tags, n) = parse_tags(b"@tag1=value1\\");
        assert_eq!(tags.get("tag1"), Some("value1"));
        assert_eq!(n, 13);
    }

    #[test]
    fn test_parse_tags_marker_only() {
        let (tags, n) = parse_tags(b"@");
        assert!(tags.is_empty());
        assert_eq!(n, 1);
    }

    #[test]
    fn test_display_escapes_values() {
        let tags = tags_of(&[("a", "b\\and\nk"), ("d", "gh;764"), ("k", "")]);
        assert_eq!(tags.to_string(), "a=b\\\\and\\nk;d=gh\\:764;k");
    }

    #[test]
    fn test_insert_overwrites() {
        let mut tags = Tags::new();
        assert_eq!(tags.insert("msgid", "a"), None);
        assert_eq!(tags.insert("msgid", "b"), Some("a".to_string()));
        assert_eq!(tags.len(), 1);
        assert!(tags.contains_key("msgid"));
        assert_eq!(tags.remove("msgid"), Some("b".to_string()));
        assert!(tags.is_empty());
    }

    #[test]
    fn test_unescape_combined() {
        let input = "a\\:b\\sc\\\\d\\re\\nf";
        let expected = "a;b c\\d\re\nf";
        assert_eq!(unescape_tag_value(input), expected);
    }

    #[test]
    fn test_unescape_trailing_backslash() {
        assert_eq!(unescape_tag_value("test\\"), "test");
    }

    #[test]
    fn test_unescape_unknown_escape() {
        assert_eq!(unescape_tag_value("a\\xb"), "axb");
    }

    #[test]
    fn test_escape_roundtrip() {
        let test_values = vec![
            "simple",
            "with space",
            "with;semicolon",
            "with\\backslash",
            "with\nnewline",
            "with\rcarriage",
            "complex; \\ \n \r all",
        ];

        for original in test_values {
            let mut escaped = String::new();
            escape_tag_value(&mut escaped, original).unwrap();
            assert_eq!(unescape_tag_value(&escaped), original);

            let line = format!("@k={} X", escaped);
            let (tags, _) = parse_tags(line.as_bytes());
            assert_eq!(
                tags.get("k"),
                Some(original),
                "Roundtrip failed: '{}' -> '{}'",
                original,
                escaped
            );
        }
    }
}
