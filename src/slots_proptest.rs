//! Property-based tests for slot substitution.
//!
//! These tests use proptest to generate random contents and slot values and
//! verify that the substitution invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::config::ScaffoldConfig;
    use crate::slots::{replace_slots, SlotReplacer};
    use proptest::prelude::*;
    use std::path::Path;

    fn txt_config(repo: &str, author: &str) -> ScaffoldConfig {
        ScaffoldConfig::new(repo, author).with_slot_path("**/*.txt")
    }

    proptest! {
        /// Property: files outside the slot paths are never modified
        #[test]
        fn unmatched_paths_are_untouched(content in ".*", repo in "[a-z]{1,12}") {
            let config = txt_config(&repo, "Ada");
            let out = replace_slots(Path::new("/out/sub/file.md"), &content, &config).unwrap();
            prop_assert_eq!(out, content);
        }

        /// Property: without slot paths nothing is ever modified, even content full of tokens
        #[test]
        fn empty_slot_paths_disable_substitution(prefix in ".*", suffix in ".*") {
            let config = ScaffoldConfig::new("Widget", "Ada");
            let content = format!("{}[REPO_NAME]{}[AUTHOR_NAME]", prefix, suffix);
            let out = replace_slots(Path::new("a.txt"), &content, &config).unwrap();
            prop_assert_eq!(out, content);
        }

        /// Property: no built-in token survives substitution when values are token-free
        #[test]
        fn builtin_tokens_are_fully_replaced(
            pieces in prop::collection::vec("[a-z ]{0,8}", 1..8),
            repo in "[A-Za-z]{1,10}",
            author in "[A-Za-z]{1,10}",
        ) {
            let config = txt_config(&repo, &author);
            let content = pieces.join("[REPO_NAME][AUTHOR_NAME]");
            let out = replace_slots(Path::new("dir/a.txt"), &content, &config).unwrap();
            prop_assert!(!out.contains("[REPO_NAME]"));
            prop_assert!(!out.contains("[AUTHOR_NAME]"));
            let expected = pieces.join(&format!("{}{}", repo, author));
            prop_assert_eq!(out, expected);
        }

        /// Property: the order in which custom slots are declared does not matter
        #[test]
        fn custom_slot_order_is_irrelevant(a in "[A-Z]{3,6}", b in "[a-z]{3,6}") {
            let first = txt_config("W", "A")
                .with_slot("<<ONE>>", a.clone())
                .with_slot("<<TWO>>", b.clone());
            let second = txt_config("W", "A")
                .with_slot("<<TWO>>", b.clone())
                .with_slot("<<ONE>>", a.clone());
            let content = "<<ONE>>/<<TWO>>/<<ONE>>";
            let r1 = SlotReplacer::new(&first).unwrap();
            let r2 = SlotReplacer::new(&second).unwrap();
            prop_assert_eq!(r1.replace_all(content), r2.replace_all(content));
        }
    }
}
