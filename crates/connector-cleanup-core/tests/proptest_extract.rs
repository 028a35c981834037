// crates/connector-cleanup-core/tests/proptest_extract.rs
// ============================================================================
// Module: Extraction Property-Based Tests
// Description: Arbitrary JSON documents through every extractor.
// Purpose: Ensure extraction never panics and never synthesizes identifiers.
// Dependencies: connector-cleanup-core, proptest, serde_json
// ============================================================================
//! ## Overview
//! Generates nested JSON values and checks that any extracted entity carries
//! the raw document's own string identifier.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use connector_cleanup_core::Namespace;
use connector_cleanup_core::Outcome;
use connector_cleanup_core::runtime::extract_asset;
use connector_cleanup_core::runtime::extract_contract_agreement;
use connector_cleanup_core::runtime::extract_contract_definition;
use proptest::prelude::*;
use serde_json::Map;
use serde_json::Value;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z@:/ ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("@id".to_string()),
                    Just("properties".to_string()),
                    Just("assetsSelector".to_string()),
                    Just("asset".to_string()),
                    Just("policy".to_string()),
                    "[a-z]{1,8}",
                ],
                inner,
                0 .. 5,
            )
            .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

fn raw_identifier(raw: &Value) -> Option<&str> {
    raw.get("@id").and_then(Value::as_str).filter(|id| !id.is_empty())
}

proptest! {
    #[test]
    fn extractors_only_keep_document_identifiers(raw in arb_json()) {
        let namespace = Namespace::default();
        let expected = raw_identifier(&raw);
        let asset = extract_asset(&raw, &namespace).ok();
        let definition = extract_contract_definition(&raw, &namespace).ok();
        let agreement = extract_contract_agreement(&raw, &namespace).ok();
        prop_assert_eq!(asset.as_ref().map(|item| item.id.as_str()), expected);
        prop_assert_eq!(definition.as_ref().map(|item| item.id.as_str()), expected);
        prop_assert_eq!(agreement.as_ref().map(|item| item.id.as_str()), expected);
        if let Some(asset) = asset {
            prop_assert!(!asset.display_name.is_empty());
        }
    }

    #[test]
    fn normalizer_accepts_arbitrary_bytes(code in 100u16 .. 600, body in prop::collection::vec(any::<u8>(), 0 .. 64)) {
        let outcome = Outcome::from_response(code, &body);
        prop_assert_eq!(outcome.status(), Some(code));
        prop_assert_eq!(outcome.is_success(), (200 .. 300).contains(&code));
    }
}
