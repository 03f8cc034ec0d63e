//! Property tests for preamble/body splitting.

use proptest::prelude::*;

use texfast::domain::services::{
    count_lines, PreambleAdapter, RegexMarker, SourceSplitter, DEFAULT_SPLIT_PATTERN,
};
use texfast::domain::value_objects::MarkerPolicy;

/// Lines that never contain a split marker
fn plain_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 {}=.,]{0,40}")
        .unwrap()
        .prop_map(|s| format!("\\{s}"))
        .prop_filter("no marker or deferred package", |s| {
            !s.contains("begin{document}") && !s.contains("fontspec") && !s.contains("polyglossia")
        })
}

fn splitter() -> SourceSplitter {
    SourceSplitter::new(
        RegexMarker::new(DEFAULT_SPLIT_PATTERN).unwrap(),
        MarkerPolicy::First,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the body's line n is the source's line n for every body line.
    #[test]
    fn property_body_lines_align_with_source(
        preamble in proptest::collection::vec(plain_line(), 1..12),
        body in proptest::collection::vec(plain_line(), 0..12),
    ) {
        let source = format!(
            "{}\n\\begin{{document}}\n{}",
            preamble.join("\n"),
            body.join("\n")
        );
        let artifacts = splitter().split(source.as_bytes(), "job").unwrap();

        let source_lines: Vec<&str> = source.lines().collect();
        let body_text = String::from_utf8(artifacts.body).unwrap();
        let body_lines: Vec<&str> = body_text.lines().collect();
        let first = preamble.len();
        prop_assert_eq!(&body_lines[first..], &source_lines[first..]);
        prop_assert_eq!(artifacts.padding, preamble.len());
    }

    /// PROPERTY: splitting the same source twice gives identical files.
    #[test]
    fn property_split_is_deterministic(
        preamble in proptest::collection::vec(plain_line(), 0..8),
        body in proptest::collection::vec(plain_line(), 0..8),
    ) {
        let source = format!(
            "{}\n\\begin{{document}}\n{}",
            preamble.join("\n"),
            body.join("\n")
        );
        let a = splitter().split(source.as_bytes(), "job").unwrap();
        let b = splitter().split(source.as_bytes(), "job").unwrap();
        prop_assert_eq!(a, b);
    }

    /// PROPERTY: moved XeTeX lines plus padding keep the body aligned.
    #[test]
    fn property_adapter_keeps_alignment(
        before in proptest::collection::vec(plain_line(), 1..6),
        after in proptest::collection::vec(plain_line(), 0..6),
    ) {
        let mut preamble = before.clone();
        preamble.push("\\usepackage{fontspec}".to_string());
        preamble.extend(after.iter().cloned());
        let source = format!("{}\n\\begin{{document}}\nend\n", preamble.join("\n"));

        let artifacts = splitter()
            .with_adapter(Some(PreambleAdapter::xetex()))
            .split(source.as_bytes(), "job")
            .unwrap();
        prop_assert_eq!(artifacts.moved_lines, 1);

        let body_text = String::from_utf8(artifacts.body).unwrap();
        let marker_line = body_text
            .lines()
            .position(|l| l == "\\begin{document}")
            .unwrap();
        prop_assert_eq!(marker_line, preamble.len());
    }

    /// PROPERTY: arbitrary input never panics.
    #[test]
    fn property_split_never_panics(source in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = splitter().split(&source, "job");
        let _ = count_lines(&source);
    }
}
