//! Property tests for the answer pipeline.

use std::collections::HashSet;

use chatfmt::{process, ContentBlock, TableData};
use proptest::prelude::*;

/// Answer fragments that exercise every stage.
fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ,.!?]{0,24}",
        Just("**bold**".to_string()),
        Just("*soft*".to_string()),
        Just("\n".to_string()),
        Just("\n\n".to_string()),
        Just("\n---\n".to_string()),
        Just("Phone: 555".to_string()),
        Just("[TABLE:Known]".to_string()),
        Just("---[TABLE:Missing]---".to_string()),
        Just("[docs](https://x.com/docs)".to_string()),
        Just("[bad](javascript:alert(1))".to_string()),
        Just("<script>alert(1)</script>".to_string()),
        Just("<img src=x onerror=alert(1)>".to_string()),
        Just(" * **Item** ".to_string()),
        (0..4u8).prop_map(|n| format!("![pic](https://x.com/{}.png)", n)),
        (0..4u8).prop_map(|n| format!(" https://x.com/{}.png ", n)),
    ]
}

fn answer() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..12).prop_map(|parts| parts.concat())
}

fn tables() -> Vec<TableData> {
    vec![TableData::new("Known").with_headers(["A"]).with_row(["1"])]
}

proptest! {
    #[test]
    fn test_pipeline_is_idempotent(raw in answer(), dark in any::<bool>()) {
        let first = process(&raw, dark, &tables()).unwrap();
        let second = process(&raw, dark, &tables()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_images_are_unique(raw in answer()) {
        let content = process(&raw, false, &tables()).unwrap();
        let mut seen = HashSet::new();
        for image in &content.extracted_images {
            prop_assert!(seen.insert(image.url.clone()), "duplicate image {}", image.url);
        }
    }

    #[test]
    fn test_output_is_script_free(raw in answer()) {
        let content = process(&raw, false, &tables()).unwrap();
        for block in &content.blocks {
            if let Some(html) = block.html() {
                let lower = html.to_ascii_lowercase();
                prop_assert!(!lower.contains("<script"));
                prop_assert!(!lower.contains("onerror"));
                prop_assert!(!lower.contains("javascript:"));
                let sentinel = '\u{E000}';
                prop_assert!(!html.contains(sentinel));
                prop_assert!(!html.trim().is_empty());
            }
        }
    }

    #[test]
    fn test_tables_come_from_dataset(raw in answer()) {
        let content = process(&raw, false, &tables()).unwrap();
        let known = tables();
        for block in &content.blocks {
            if let ContentBlock::Table(table) = block {
                prop_assert_eq!(&table.table, &known[0]);
            }
        }
        prop_assert!(content.unresolved_tables.iter().all(|title| title == "Missing"));
    }

    #[test]
    fn test_arbitrary_text_never_fails(raw in "\\PC{0,200}") {
        prop_assert!(process(&raw, true, &[]).is_ok());
    }
}
