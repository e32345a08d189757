//! Fuzz target for nested JSON batch construction.
//!
//! This fuzzer feeds arbitrary byte sequences through JSON parsing and
//! batch construction for every format, checking for panics, crashes,
//! or hangs.

#![no_main]

use bboxes::boxes::{AnyBox, BoxFormat, BoxOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    for strict in [false, true] {
        let options = BoxOptions::with_image_size(640, 480).strict(strict);
        for format in BoxFormat::ALL {
            let _ = AnyBox::from_nested(format, &value, options);
        }
    }
});
