//! Property tests for the pure parts of the pipeline

use base64::Engine;
use proptest::prelude::*;

use pagebundle::Diff;
use pagebundle::encoder::{encode, mime_type_of};
use pagebundle::locator::css_urls;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The payload of an encoded resource decodes back to its bytes
    #[test]
    fn prop_encoded_payload_decodes(content in prop::collection::vec(any::<u8>(), 0..512)) {
        let uri = encode("application/octet-stream", &content);
        let payload = uri
            .strip_prefix("data:application/octet-stream;base64,")
            .expect("data URI prefix");

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .expect("valid base64");
        prop_assert_eq!(decoded, content);
    }

    /// MIME inference is total and always yields a type/subtype pair
    #[test]
    fn prop_mime_inference_is_total(url in ".*") {
        let mime = mime_type_of(&url);
        prop_assert!(mime.contains('/'));
    }

    /// An empty diff leaves any document untouched
    #[test]
    fn prop_empty_diff_is_identity(document in ".*") {
        prop_assert_eq!(Diff::new().apply(&document).expect("apply"), document);
    }

    /// Keys that never occur in the document change nothing
    #[test]
    fn prop_absent_keys_are_identity(document in "[a-m ]{0,64}", key in "[n-z]{1,8}") {
        let diff = Diff::single(key, "replacement");
        prop_assert_eq!(diff.apply(&document).expect("apply"), document);
    }

    /// Diffs with disjoint keys give the same document in either order, and merged
    #[test]
    fn prop_disjoint_diffs_commute(
        a_key in "A_[a-f]{3,6}",
        b_key in "B_[a-f]{3,6}",
        a_value in "[a-z]{0,8}",
        b_value in "[a-z]{0,8}",
        parts in prop::collection::vec(("[a-z ]{0,16}", any::<bool>()), 0..8),
    ) {
        let document: String = parts
            .iter()
            .map(|(filler, first)| format!("{filler}{}", if *first { &a_key } else { &b_key }))
            .collect();
        let a = Diff::single(a_key.as_str(), a_value);
        let b = Diff::single(b_key.as_str(), b_value);

        let a_then_b = b.apply(&a.apply(&document).expect("apply"))
            .expect("apply");
        let b_then_a = a.apply(&b.apply(&document).expect("apply"))
            .expect("apply");
        let merged = Diff::merge([a, b]).apply(&document).expect("apply");

        prop_assert_eq!(&a_then_b, &b_then_a);
        prop_assert_eq!(&a_then_b, &merged);
    }

    /// Every located reference is a substring of the scanned stylesheet
    #[test]
    fn prop_css_references_come_from_input(css in r#"[a-z(){};:'" \n.#/-]{0,128}"#) {
        for reference in css_urls(&css) {
            prop_assert!(!reference.is_empty());
            prop_assert!(css.contains(reference));
        }
    }
}
