//! Byte scanning helpers shared by the sub-parsers.
//!
//! Every sub-parser works on an immutable `&[u8]` view and reports how many
//! bytes it consumed as `input.len() - rest.len()`. Nothing here ever indexes
//! past the end of its input.

use nom::bytes::complete::take_till;
use nom::IResult;

/// CR or LF.
#[inline]
pub(crate) fn is_line_end(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

/// Space, CR or LF.
#[inline]
pub(crate) fn is_token_end(b: u8) -> bool {
    b == b' ' || is_line_end(b)
}

/// Split `input` at the first byte matching `stop`, returning `(field, rest)`.
///
/// The stop byte, if any, stays at the head of `rest`.
pub(crate) fn take_field<F>(input: &[u8], stop: F) -> (&[u8], &[u8])
where
    F: Fn(u8) -> bool,
{
    let res: IResult<&[u8], &[u8], ()> = take_till(stop)(input);
    match res {
        Ok((rest, field)) => (field, rest),
        // complete take_till accepts an empty match, so this arm is unreachable
        Err(_) => (input, &input[input.len()..]),
    }
}

/// Drop `byte` from the head of `input` if it is there.
#[inline]
pub(crate) fn skip_byte(input: &[u8], byte: u8) -> &[u8] {
    match input.split_first() {
        Some((&b, rest)) if b == byte => rest,
        _ => input,
    }
}

/// Bytes consumed between `input` and a suffix `rest` of it.
#[inline]
pub(crate) fn consumed(input: &[u8], rest: &[u8]) -> usize {
    input.len() - rest.len()
}

/// Decode a field, replacing invalid UTF-8 with U+FFFD.
#[inline]
pub(crate) fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
