//! Fuzz target for image size parsing.

#![no_main]

use bboxes::boxes::ImageSize;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = s.parse::<ImageSize>();
    }
});
