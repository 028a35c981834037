// crates/connector-cleanup-core/tests/listing.rs
// ============================================================================
// Module: Endpoint Resolver Tests
// Description: Ordered strategy fallback for listing endpoints.
// Purpose: Ensure later strategies run only when earlier ones are unusable.
// Dependencies: connector-cleanup-core, serde_json
// ============================================================================
//! ## Overview
//! Uses the scripted management API to assert call counts, payloads, and the
//! degradation to empty collections.

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

mod common;

use connector_cleanup_core::runtime::ASSET_LIST_STRATEGIES;
use connector_cleanup_core::ContractDefinitionId;
use connector_cleanup_core::runtime::fetch_raw_contract_definition;
use connector_cleanup_core::runtime::first_usable_collection;
use connector_cleanup_core::runtime::list_assets;
use connector_cleanup_core::runtime::list_contract_agreements;
use connector_cleanup_core::runtime::list_contract_definitions;
use serde_json::json;

use crate::common::ScriptedApi;
use crate::common::default_query;
use crate::common::json_ok;
use crate::common::no_content;
use crate::common::status;
use crate::common::unreachable;

const ROUTES: [&str; 4] = [
    "GET /v3/assets",
    "POST /v3/assets/request",
    "POST /v2/assets/request",
    "GET /v2/assets",
];

#[test]
fn strategies_follow_version_order() {
    let routes: Vec<String> = ASSET_LIST_STRATEGIES
        .iter()
        .map(|strategy| format!("{} {}", strategy.method, strategy.request(&default_query()).path))
        .collect();
    assert_eq!(routes, ROUTES);
}

#[test]
fn usable_strategy_stops_the_chain() {
    for usable in 0 .. ROUTES.len() {
        let api = ScriptedApi::new();
        for route in &ROUTES[.. usable] {
            api.respond(route, status(500, "internal error"));
        }
        api.respond(ROUTES[usable], json_ok(&json!([{"@id": "a1"}])));

        let assets = list_assets(&api, &default_query());

        assert_eq!(assets.len(), 1, "strategy {usable}");
        assert_eq!(api.routes(), ROUTES[..= usable].to_vec(), "strategy {usable}");
    }
}

#[test]
fn empty_array_is_usable() {
    let api = ScriptedApi::new();
    api.respond("GET /v3/assets", json_ok(&json!([])));
    let assets = list_assets(&api, &default_query());
    assert!(assets.is_empty());
    assert_eq!(api.routes(), vec!["GET /v3/assets"]);
}

#[test]
fn non_array_bodies_fall_through() {
    let api = ScriptedApi::new();
    api.respond("GET /v3/assets", json_ok(&json!({"items": []})));
    api.respond("POST /v3/assets/request", no_content());
    api.respond("POST /v2/assets/request", unreachable());
    api.respond("GET /v2/assets", json_ok(&json!([{"@id": "legacy"}])));

    let assets = list_assets(&api, &default_query());

    assert_eq!(assets[0].id.as_str(), "legacy");
    assert_eq!(api.routes(), ROUTES.to_vec());
}

#[test]
fn non_json_body_is_reparsed_leniently() {
    let api = ScriptedApi::new();
    let body = "\u{feff}  [{\"@id\": \"bom\"}]\n";
    api.respond("GET /v3/assets", status(200, body));

    let assets = list_assets(&api, &default_query());

    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].id.as_str(), "bom");
    assert_eq!(api.routes().len(), 1);
}

#[test]
fn exhausted_strategies_yield_empty_list() {
    let api = ScriptedApi::new();
    for route in ROUTES {
        api.respond(route, status(200, "<html>maintenance</html>"));
    }
    assert!(list_assets(&api, &default_query()).is_empty());
    assert_eq!(api.routes(), ROUTES.to_vec());
}

#[test]
fn request_strategies_send_query_spec_and_get_strategies_send_limit() {
    let api = ScriptedApi::new();
    let resolved = first_usable_collection(&api, &ASSET_LIST_STRATEGIES, &default_query());
    assert!(resolved.is_none());

    let calls = api.calls();
    let expected_body = json!({
        "@context": {"@vocab": "https://w3id.org/edc/v0.0.1/ns/"},
        "@type": "QuerySpec",
        "limit": 500,
    });
    assert_eq!(calls[0].query, vec![("limit".to_string(), "500".to_string())]);
    assert_eq!(calls[0].body, None);
    assert_eq!(calls[1].body.as_ref(), Some(&expected_body));
    assert!(calls[1].query.is_empty());
    assert_eq!(calls[2].body.as_ref(), Some(&expected_body));
    assert_eq!(calls[3].query, vec![("limit".to_string(), "500".to_string())]);
}

#[test]
fn resolved_collection_names_its_strategy() {
    let api = ScriptedApi::new();
    api.respond("POST /v3/assets/request", json_ok(&json!([{"@id": "a1"}, {"@id": "a2"}])));
    let resolved = first_usable_collection(&api, &ASSET_LIST_STRATEGIES, &default_query()).unwrap();
    assert_eq!(resolved.strategy, &ASSET_LIST_STRATEGIES[1]);
    assert_eq!(resolved.items.len(), 2);
}

#[test]
fn dependency_listings_use_single_request_endpoints() {
    let api = ScriptedApi::new();
    api.respond(
        "POST /v2/contractdefinitions/request",
        json_ok(&json!([
            {"@id": "cd1", "assetsSelector": {
                "operandLeft": "https://w3id.org/edc/v0.0.1/ns/id",
                "operator": "=",
                "operandRight": "a1",
            }},
            {"no": "id"},
        ])),
    );
    api.respond(
        "POST /v2/contractagreements/request",
        json_ok(&json!([{"@id": "ag1", "assetId": "a1"}])),
    );

    let definitions = list_contract_definitions(&api, &default_query());
    let agreements = list_contract_agreements(&api, &default_query());

    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].target_asset_id.as_ref().map(|id| id.as_str()), Some("a1"));
    assert_eq!(agreements.len(), 1);
    assert_eq!(
        api.routes(),
        vec!["POST /v2/contractdefinitions/request", "POST /v2/contractagreements/request"]
    );
}

#[test]
fn failed_dependency_listing_degrades_to_empty() {
    let api = ScriptedApi::new();
    api.respond("POST /v2/contractdefinitions/request", status(401, r#"{"message":"denied"}"#));
    assert!(list_contract_definitions(&api, &default_query()).is_empty());
    assert!(list_contract_agreements(&api, &default_query()).is_empty());
}

#[test]
fn raw_definition_fetch_returns_json_or_none() {
    let api = ScriptedApi::new();
    api.respond("GET /v2/contractdefinitions/cd 1", json_ok(&json!({"@id": "cd 1"})));

    let raw = fetch_raw_contract_definition(&api, &ContractDefinitionId::new("cd 1"));
    assert_eq!(raw, Some(json!({"@id": "cd 1"})));

    let missing = fetch_raw_contract_definition(&api, &ContractDefinitionId::new("gone"));
    assert_eq!(missing, None);
}
