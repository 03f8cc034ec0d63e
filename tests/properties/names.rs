//! Property tests for job name normalization.

use proptest::prelude::*;

use texfast::domain::value_objects::normalize_name;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: normalized names contain no spaces and are stable.
    #[test]
    fn property_normalize_is_idempotent(name in "\\PC{0,32}") {
        let once = normalize_name(&name);
        prop_assert!(!once.contains(' '));
        prop_assert_eq!(normalize_name(&once), once);
    }

    /// PROPERTY: ASCII names without spaces are left alone.
    #[test]
    fn property_plain_ascii_is_unchanged(name in "[A-Za-z0-9_.-]{1,32}") {
        prop_assert_eq!(normalize_name(&name), name);
    }
}
