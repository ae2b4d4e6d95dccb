//! Property-based tests for message splitting and secret comparison

use integration_telegram::{split_message, verify_secret_token};
use proptest::prelude::*;

proptest! {
    #[test]
    fn split_parts_respect_limit(text in "[a-zक-ह \n]{0,400}", max in 1usize..64) {
        let parts = split_message(&text, max);
        prop_assert!(!parts.is_empty());
        for part in &parts {
            prop_assert!(part.chars().count() <= max);
        }
    }

    #[test]
    fn split_preserves_non_whitespace(text in "[a-z ]{0,300}", max in 1usize..40) {
        let parts = split_message(&text, max);
        let original: String = text.split_whitespace().collect();
        let joined: String = parts.iter().flat_map(|p| p.split_whitespace()).collect();
        prop_assert_eq!(original, joined);
    }

    #[test]
    fn split_never_yields_blank_parts(text in "[a-z \n]{0,300}", max in 1usize..40) {
        prop_assume!(!text.trim().is_empty());
        let parts = split_message(&text, max);
        for part in &parts {
            prop_assert!(!part.trim().is_empty());
        }
    }

    #[test]
    fn secret_only_matches_itself(secret in "[A-Za-z0-9_-]{1,64}", other in "[A-Za-z0-9_-]{1,64}") {
        prop_assert!(verify_secret_token(Some(&secret), &secret));
        prop_assert_eq!(verify_secret_token(Some(&other), &secret), other == secret);
        prop_assert!(!verify_secret_token(None, &secret));
    }
}
