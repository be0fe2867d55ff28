//! Fuzz target for the numeric normalizer.
//!
//! Any string either normalizes to a finite number or to nothing.

#![no_main]

use gapline::parse_numeric;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000 {
        return;
    }

    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(v) = parse_numeric(s) {
            assert!(v.is_finite());
        }
    }
});
