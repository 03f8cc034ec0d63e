#![no_main]

use libfuzzer_sys::fuzz_target;
use texfast::domain::services::{LogSanitizer, DEFAULT_SANITIZE_PATTERN};

fuzz_target!(|data: &[u8]| {
    if let Ok(sanitizer) = LogSanitizer::new(DEFAULT_SANITIZE_PATTERN) {
        let _ = sanitizer.sanitize(data);
    }
});
