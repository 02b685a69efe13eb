#![no_main]

//! Fuzz target for the log line parser
//!
//! Arbitrary bytes must never panic the grammar, the line parser or the
//! stream adapter.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = gitviz_log::parse_commit(s);
        let _ = gitviz_log::grammar::match_line(s);
    }

    for result in gitviz_log::parse_commits(data) {
        let _ = std::hint::black_box(result);
    }
});
