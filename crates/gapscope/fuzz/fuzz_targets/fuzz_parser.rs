//! Fuzz target for the delimited text parser.
//!
//! The parser must never panic, and every parsed record must come from a
//! table with a header.

#![no_main]

use gapscope::input::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let text = String::from_utf8_lossy(data);
    let table = Parser::new().parse_str(&text);
    assert!(table.rows.is_empty() || !table.headers.is_empty());
});
