#![no_main]

use libfuzzer_sys::fuzz_target;
use texfast::domain::services::{
    PreambleAdapter, RegexMarker, SourceSplitter, DEFAULT_SPLIT_PATTERN,
};
use texfast::domain::value_objects::MarkerPolicy;

fuzz_target!(|data: &[u8]| {
    let Ok(marker) = RegexMarker::new(DEFAULT_SPLIT_PATTERN) else {
        return;
    };
    // Splitting arbitrary bytes must never panic, with or without the adapter
    let splitter = SourceSplitter::new(marker, MarkerPolicy::First);
    let _ = splitter.split(data, "job");
    let splitter = splitter.with_adapter(Some(PreambleAdapter::xetex()));
    let _ = splitter.split(data, "job");
});
