//! Fuzz target for IRC line parsing
//!
//! Feeds arbitrary bytes to the parser and checks that it neither panics nor
//! reports consuming more than it was given, and that rendering the result
//! and parsing it again is stable.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_wire::Message;

fuzz_target!(|data: &[u8]| {
    let (msg, n) = Message::parse(data);
    assert!(n <= data.len());

    // Strict parsing must agree whenever it succeeds
    if let Ok((strict, m)) = Message::parse_utf8(data) {
        assert_eq!(strict, msg);
        assert_eq!(m, n);
    }

    // Rendering must never panic; one more pass is a fixed point on params
    let line = msg.to_line();
    let (again, _) = Message::parse(line.as_bytes());
    let (third, _) = Message::parse(again.to_line().as_bytes());
    assert_eq!(again, third);
});
