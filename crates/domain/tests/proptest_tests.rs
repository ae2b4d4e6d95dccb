//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{AnswerResult, BotCommand, DomainError, ProviderId, ProviderOrder};
use proptest::prelude::*;

fn provider_strategy() -> impl Strategy<Value = ProviderId> {
    prop_oneof![
        Just(ProviderId::Groq),
        Just(ProviderId::Gemini),
        Just(ProviderId::OpenAi),
    ]
}

// ============================================================================
// ProviderOrder Property Tests
// ============================================================================

mod provider_order_tests {
    use super::*;

    proptest! {
        #[test]
        fn from_available_is_never_empty(mask in prop::array::uniform3(any::<bool>())) {
            let order = ProviderOrder::from_available(|id| {
                let idx = ProviderId::ALL.iter().position(|p| *p == id).unwrap_or(0);
                mask[idx]
            });
            prop_assert!(!order.is_empty());
        }

        #[test]
        fn from_available_has_no_duplicates(mask in prop::array::uniform3(any::<bool>())) {
            let order = ProviderOrder::from_available(|id| {
                let idx = ProviderId::ALL.iter().position(|p| *p == id).unwrap_or(0);
                mask[idx]
            });
            let slice = order.as_slice();
            for (i, id) in slice.iter().enumerate() {
                prop_assert!(!slice[..i].contains(id));
            }
        }

        #[test]
        fn from_available_respects_preference(mask in prop::array::uniform3(any::<bool>())) {
            let order = ProviderOrder::from_available(|id| {
                let idx = ProviderId::ALL.iter().position(|p| *p == id).unwrap_or(0);
                mask[idx]
            });
            let slice = order.as_slice();
            prop_assert!(slice.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn new_accepts_exactly_duplicate_free_lists(
            ids in prop::collection::vec(provider_strategy(), 0..6)
        ) {
            let mut unique = ids.clone();
            unique.sort();
            unique.dedup();
            let has_duplicates = unique.len() != ids.len();

            match ProviderOrder::new(ids.clone()) {
                Ok(order) => {
                    prop_assert!(!ids.is_empty());
                    prop_assert!(!has_duplicates);
                    prop_assert_eq!(order.as_slice(), ids.as_slice());
                },
                Err(DomainError::EmptyProviderOrder) => prop_assert!(ids.is_empty()),
                Err(DomainError::DuplicateProvider(_)) => prop_assert!(has_duplicates),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
    }
}

// ============================================================================
// Answer and command Property Tests
// ============================================================================

mod answer_tests {
    use super::*;

    proptest! {
        #[test]
        fn apology_always_embeds_error(err in "[a-zA-Z0-9 :]{0,40}") {
            let answer = AnswerResult::apology(&err);
            prop_assert!(answer.is_apology());
            let expected = format!("(Tech: {err})");
            prop_assert!(answer.text.ends_with(&expected));
        }

        #[test]
        fn text_without_slash_is_never_a_command(text in "[^/\\s][^\\n]{0,40}") {
            prop_assert!(!BotCommand::is_command(&text));
            prop_assert!(BotCommand::parse(&text).is_none());
        }
    }
}
