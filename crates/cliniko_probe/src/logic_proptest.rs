#[cfg(test)]
mod tests {
    use crate::artifacts::sanitize_label;
    use crate::logic::{classify, snippet, SNIPPET_CHARS};
    use crate::models::{OutcomeKind, ParamSet};
    use proptest::prelude::*;

    proptest! {
        // Only 200 can ever be a success
        #[test]
        fn test_non_200_is_never_success(status in 100u16..600, body in ".*") {
            prop_assume!(status != 200);
            prop_assert_ne!(classify(status, &body).kind(), OutcomeKind::Success);
        }

        // 404 and 422 map to their own kinds whatever the body
        #[test]
        fn test_404_and_422_ignore_body(body in ".*") {
            prop_assert_eq!(classify(404, &body).kind(), OutcomeKind::NotFound);
            prop_assert_eq!(classify(422, &body).kind(), OutcomeKind::ValidationError);
        }

        // Any JSON number or string answered with 200 is a success
        #[test]
        fn test_200_json_is_success(n in any::<i64>(), s in "[a-z]{0,12}") {
            prop_assert!(classify(200, &n.to_string()).is_success());
            let quoted = format!("\"{}\"", s);
            prop_assert!(classify(200, &quoted).is_success());
        }

        // Snippets never exceed the limit and are a prefix of the trimmed body
        #[test]
        fn test_snippet_is_bounded_prefix(body in "\\PC{0,400}") {
            let cut = snippet(&body);
            prop_assert!(cut.chars().count() <= SNIPPET_CHARS);
            prop_assert!(body.trim().starts_with(&cut));
        }

        // Sanitised labels are non-empty, safe and never hidden files
        #[test]
        fn test_sanitized_label_is_safe(label in "\\PC{0,64}") {
            let stem = sanitize_label(&label);
            prop_assert!(!stem.is_empty());
            prop_assert!(!stem.starts_with('.'));
            prop_assert!(stem
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
        }

        // Safe labels pass through unchanged
        #[test]
        fn test_safe_label_unchanged(label in "[A-Za-z0-9_-][A-Za-z0-9._-]{0,40}") {
            prop_assert_eq!(sanitize_label(&label), label);
        }

        // Parameter order is insertion order
        #[test]
        fn test_param_order_preserved(keys in prop::collection::hash_set("[a-z]{1,8}", 0..10)) {
            let keys: Vec<String> = keys.into_iter().collect();
            let params: ParamSet = keys.iter().map(|k| (k.clone(), "v".to_string())).collect();
            let seen: Vec<&str> = params.iter().map(|(k, _)| k).collect();
            let expected: Vec<&str> = keys.iter().map(String::as_str).collect();
            prop_assert_eq!(seen, expected);
        }
    }
}
