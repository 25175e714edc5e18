//! Property tests for normalization and diet filtering.

use proptest::prelude::*;
use tadka_core::{filter_by_diet, normalize, DietPreference, DietTag, VarietyRecord};

const PROPTEST_CASES: u32 = 256;

fn arb_char() -> impl Strategy<Value = char> {
    // Mostly dish-like ASCII, plus punctuation, odd whitespace and non-ASCII
    // letters that normalization has to drop or fold.
    prop_oneof![
        12 => prop::sample::select(vec![
            'a', 'b', 'r', 'y', 'i', 'n', 'A', 'Z', '0', '9', '_', ' ',
        ]),
        3 => prop::sample::select(vec!['!', '-', '\'', ',', '.', '(', ')']),
        2 => prop::sample::select(vec!['\t', '\n', '\r', '\u{00A0}', '\u{3000}']),
        2 => Just('é'),
        1 => Just('ß'),
        1 => Just('İ'),          // lowercases to two chars
        1 => Just('\u{212A}'),   // Kelvin sign, lowercases to ASCII 'k'
        1 => Just('中'),
        1 => Just('😀'),
        1 => Just('\u{0301}'),   // combining acute accent
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_char(), 0..=48).prop_map(|chars| chars.into_iter().collect())
}

fn arb_record() -> impl Strategy<Value = VarietyRecord> {
    let diet = prop_oneof![
        Just(None),
        Just(Some(DietTag::Veg)),
        Just(Some(DietTag::NonVeg)),
    ];
    ("[A-Z][a-z]{0,8}", diet).prop_map(|(name, diet)| {
        let record = VarietyRecord::untagged(name, "desc");
        match diet {
            Some(tag) => record.with_diet(tag),
            None => record,
        }
    })
}

fn arb_preference() -> impl Strategy<Value = DietPreference> {
    prop_oneof![
        Just(DietPreference::Veg),
        Just(DietPreference::NonVeg),
        Just(DietPreference::None),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn normalize_is_idempotent(text in arb_text()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_is_canonical(text in any::<String>()) {
        let normalized = normalize(&text);
        prop_assert!(normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == ' '));
        prop_assert!(!normalized.starts_with(' '));
        prop_assert!(!normalized.ends_with(' '));
        prop_assert!(!normalized.contains("  "));
    }

    #[test]
    fn filter_by_diet_is_idempotent(
        records in prop::collection::vec(arb_record(), 0..16),
        preference in arb_preference(),
    ) {
        let once = filter_by_diet(&records, preference);
        prop_assert_eq!(filter_by_diet(&once, preference), once);
    }

    #[test]
    fn filter_by_diet_keeps_order_and_only_matching_tags(
        records in prop::collection::vec(arb_record(), 0..16),
        preference in arb_preference(),
    ) {
        let filtered = filter_by_diet(&records, preference);

        match preference.required_tag() {
            Some(tag) => {
                let expected: Vec<VarietyRecord> = records
                    .iter()
                    .filter(|r| r.diet == Some(tag))
                    .cloned()
                    .collect();
                prop_assert_eq!(filtered, expected);
            }
            None => prop_assert_eq!(filtered, records),
        }
    }
}
