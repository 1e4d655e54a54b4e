use crate::util::{consumed, is_token_end, skip_byte, take_field, text};

use super::types::Prefix;

/// Decode a leading `:name!user@host` prefix.
///
/// Returns the prefix and the number of bytes consumed. Input that does not
/// start with `:` yields an empty prefix and consumes nothing. A terminating
/// space is consumed; CR and LF are left for the caller.
pub fn parse_prefix(input: &[u8]) -> (Prefix, usize) {
    match input.split_first() {
        Some((b':', body)) => {
            let (prefix, rest) = split_fields(body);
            (prefix, consumed(input, rest))
        }
        _ => (Prefix::default(), 0),
    }
}

/// Split the prefix body (after the `:`) into its fields.
///
/// Returns the prefix and the remaining input, with a terminating space
/// already skipped.
pub(super) fn split_fields(body: &[u8]) -> (Prefix, &[u8]) {
    let mut prefix = Prefix::default();

    let (name, mut rest) = take_field(body, |b| b == b'!' || b == b'@' || is_token_end(b));
    prefix.name = text(name);

    if let Some((b'!', after)) = rest.split_first() {
        let (user, r) = take_field(after, |b| b == b'@' || is_token_end(b));
        prefix.user = text(user);
        rest = r;
    }

    if let Some((b'@', after)) = rest.split_first() {
        let (host, r) = take_field(after, is_token_end);
        prefix.host = text(host);
        rest = r;
    }

    (prefix, skip_byte(rest, b' '))
}
