//! Property-based tests for the name formatter.

use better_name::{format_name, title_case, truncate_chars, NameFormatter, MAX_NAME_LENGTH};
use proptest::prelude::*;

const NAME_PATTERN: &str = "[a-zA-Z0-9 '.\\-áéíóúčřšžåöüÁČŘŠŽÅÖÜİıŉßǰ\u{0301}\u{0307}\u{0308}]{0,40}";

proptest! {
    #[test]
    fn formatted_name_never_exceeds_limit(first in any::<String>(), last in any::<String>()) {
        let result = format_name(first.as_str(), last.as_str());
        prop_assert!(result.len_chars() <= MAX_NAME_LENGTH);
    }

    #[test]
    fn numeric_inputs_never_exceed_limit(first: i64, last: f64) {
        let result = format_name(first, last);
        prop_assert!(result.len_chars() <= MAX_NAME_LENGTH);
    }

    #[test]
    fn truncation_preserves_prefix(first in NAME_PATTERN, last in NAME_PATTERN) {
        let formatter = NameFormatter::default();
        let full = formatter.normalize(first.as_str(), last.as_str());
        let result = formatter.format(first.as_str(), last.as_str());

        prop_assert!(full.starts_with(result.as_str()));
        prop_assert_eq!(result.as_str(), truncate_chars(&full, MAX_NAME_LENGTH));
        if full.chars().count() <= MAX_NAME_LENGTH {
            prop_assert_eq!(result.as_str(), full.as_str());
        }
    }

    #[test]
    fn title_casing_is_idempotent(first in NAME_PATTERN, last in NAME_PATTERN) {
        let once = format_name(first.as_str(), last.as_str());
        let twice = title_case(once.as_str());
        prop_assert_eq!(once.as_str(), twice.as_str());
    }

    #[test]
    fn title_case_applied_twice_is_unchanged(text in NAME_PATTERN) {
        let once = title_case(&text);
        let twice = title_case(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn formatting_a_formatted_name_is_stable(first in "[a-z]{1,7}", last in "[a-z]{1,7}") {
        let once = format_name(first.as_str(), last.as_str());
        let twice = format_name(once.as_str(), "");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn tighter_limit_is_prefix_of_default(first in NAME_PATTERN, last in NAME_PATTERN, max in 1usize..=MAX_NAME_LENGTH) {
        let short = NameFormatter::with_max_length(max).unwrap().format(first.as_str(), last.as_str());
        let full = format_name(first.as_str(), last.as_str());

        prop_assert!(short.len_chars() <= max);
        prop_assert!(full.as_str().starts_with(short.as_str()));
    }
}
