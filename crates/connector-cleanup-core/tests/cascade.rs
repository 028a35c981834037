// crates/connector-cleanup-core/tests/cascade.rs
// ============================================================================
// Module: Cascade Orchestrator Tests
// Description: Dependency planning, deletion order, and summary tallies.
// Purpose: Ensure dependents are deleted before assets and failures never halt.
// Dependencies: connector-cleanup-core, serde_json, tracing, tracing-subscriber
// ============================================================================
//! ## Overview
//! Drives full cleanup runs against the scripted management API and checks
//! call order and per-category counts. Log assertions install a scoped
//! `tracing-subscriber` writer with `tracing::subscriber::with_default`.

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

use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use connector_cleanup_core::Asset;
use connector_cleanup_core::AssetId;
use connector_cleanup_core::CleanupSummary;
use connector_cleanup_core::ContractAgreement;
use connector_cleanup_core::ContractAgreementId;
use connector_cleanup_core::ContractDefinition;
use connector_cleanup_core::ContractDefinitionId;
use connector_cleanup_core::DependencySnapshot;
use connector_cleanup_core::Tally;
use connector_cleanup_core::runtime::cascade_asset;
use connector_cleanup_core::runtime::run_cascade;
use serde_json::json;
use tracing::Level;

use crate::common::ScriptedApi;
use crate::common::default_query;
use crate::common::json_ok;
use crate::common::no_content;
use crate::common::status;

fn asset(id: &str) -> Asset {
    Asset {
        id: AssetId::new(id),
        display_name: id.to_string(),
    }
}

fn definition(id: &str, target: Option<&str>) -> ContractDefinition {
    ContractDefinition {
        id: ContractDefinitionId::new(id),
        access_policy_id: None,
        contract_policy_id: None,
        target_asset_id: target.map(AssetId::new),
    }
}

fn agreement(id: &str, target: Option<&str>) -> ContractAgreement {
    ContractAgreement {
        id: ContractAgreementId::new(id),
        target_asset_id: target.map(AssetId::new),
        provider_id: None,
        consumer_id: None,
    }
}

/// Scripts one definition and one agreement, both targeting `a1`.
fn scripted_catalogs() -> ScriptedApi {
    let api = ScriptedApi::new();
    api.respond(
        "POST /v2/contractdefinitions/request",
        json_ok(&json!([{"@id": "cd1", "assetsSelector": {
            "operandLeft": "https://w3id.org/edc/v0.0.1/ns/id",
            "operator": "=",
            "operandRight": "a1",
        }}])),
    );
    api.respond(
        "POST /v2/contractagreements/request",
        json_ok(&json!([{"@id": "ag1", "asset": {"@id": "a1"}}])),
    );
    api
}

/// Shared sink for formatted log output.
#[derive(Clone, Default)]
struct LogBuffer {
    /// Formatted bytes written so far.
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    /// Builds a plain-text subscriber writing into this buffer.
    fn subscriber(&self, level: Level) -> impl tracing::Subscriber + Send + Sync + 'static {
        let buffer = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || buffer.clone())
            .finish()
    }

    /// Returns the captured lines.
    fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.bytes.lock().unwrap()).lines().map(str::to_string).collect()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn dependents_are_deleted_before_each_asset() {
    let api = ScriptedApi::new();
    for route in [
        "DELETE /v2/contractdefinitions/cd1",
        "DELETE /v3/assets/a1",
        "DELETE /v2/contractagreements/ag1",
        "DELETE /v3/assets/a2",
    ] {
        api.respond(route, no_content());
    }
    let snapshot = DependencySnapshot {
        definitions: vec![definition("cd1", Some("a1"))],
        agreements: vec![agreement("ag1", Some("a2"))],
    };

    let summary = run_cascade(&api, &[asset("a1"), asset("a2")], &snapshot);

    assert_eq!(
        api.routes(),
        vec![
            "DELETE /v2/contractdefinitions/cd1",
            "DELETE /v3/assets/a1",
            "DELETE /v2/contractagreements/ag1",
            "DELETE /v3/assets/a2",
        ]
    );
    assert_eq!(
        summary,
        CleanupSummary {
            assets: Tally { deleted: 2, failed: 0 },
            contract_definitions: Tally { deleted: 1, failed: 0 },
            contract_agreements: Tally { deleted: 1, failed: 0 },
        }
    );
    assert!(!summary.has_failures());
}

#[test]
fn dependent_failures_do_not_block_the_asset_delete() {
    let api = ScriptedApi::new();
    api.respond("DELETE /v2/contractdefinitions/cd1", status(500, "boom"));
    api.respond("DELETE /v2/contractagreements/ag1", status(405, ""));
    api.respond("DELETE /v3/assets/a1", status(409, r#"[{"message":"still referenced"}]"#));
    let snapshot = DependencySnapshot {
        definitions: vec![definition("cd1", Some("a1"))],
        agreements: vec![agreement("ag1", Some("a1"))],
    };

    let summary = run_cascade(&api, &[asset("a1")], &snapshot);

    assert_eq!(
        api.routes(),
        vec![
            "DELETE /v2/contractdefinitions/cd1",
            "DELETE /v2/contractagreements/ag1",
            "DELETE /v3/assets/a1",
        ]
    );
    assert_eq!(summary.assets, Tally { deleted: 0, failed: 1 });
    assert_eq!(summary.contract_definitions, Tally { deleted: 0, failed: 1 });
    assert_eq!(summary.contract_agreements, Tally { deleted: 0, failed: 1 });
    assert!(summary.has_failures());
}

#[test]
fn plan_keeps_snapshot_order_and_ignores_unlinked_entities() {
    let snapshot = DependencySnapshot {
        definitions: vec![
            definition("cd2", Some("a1")),
            definition("cd-other", Some("a9")),
            definition("cd-none", None),
            definition("cd1", Some("a1")),
        ],
        agreements: vec![agreement("ag-none", None), agreement("ag1", Some("a1"))],
    };
    let selected = asset("a1");

    let plan = snapshot.plan_for(&selected);

    let definitions: Vec<&str> = plan.definitions.iter().map(|item| item.id.as_str()).collect();
    let agreements: Vec<&str> = plan.agreements.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(definitions, vec!["cd2", "cd1"]);
    assert_eq!(agreements, vec!["ag1"]);
}

#[test]
fn identifiers_match_case_sensitively() {
    let snapshot = DependencySnapshot {
        definitions: vec![definition("cd1", Some("A1"))],
        agreements: Vec::new(),
    };
    let selected = asset("a1");
    assert!(snapshot.plan_for(&selected).definitions.is_empty());
}

#[test]
fn cascade_asset_counts_only_its_own_asset() {
    let api = ScriptedApi::new();
    api.respond("DELETE /v3/assets/a1", no_content());
    let snapshot = DependencySnapshot {
        definitions: vec![definition("cd-other", Some("a2"))],
        agreements: Vec::new(),
    };
    let selected = asset("a1");

    let summary = cascade_asset(&api, &snapshot.plan_for(&selected));

    assert_eq!(summary.assets, Tally { deleted: 1, failed: 0 });
    assert_eq!(summary.contract_definitions.attempted(), 0);
    assert_eq!(api.routes(), vec!["DELETE /v3/assets/a1"]);
}

#[test]
fn failed_dependents_are_logged_with_the_blocked_asset() {
    let api = ScriptedApi::new();
    api.respond("DELETE /v2/contractdefinitions/cd1", status(500, "boom"));
    api.respond("DELETE /v2/contractagreements/ag1", status(405, ""));
    api.respond("DELETE /v3/assets/a1", no_content());
    let snapshot = DependencySnapshot {
        definitions: vec![definition("cd1", Some("a1"))],
        agreements: vec![agreement("ag1", Some("a1"))],
    };
    let selected = asset("a1");
    let logs = LogBuffer::default();

    let summary = tracing::subscriber::with_default(logs.subscriber(Level::WARN), || {
        cascade_asset(&api, &snapshot.plan_for(&selected))
    });

    let lines = logs.lines();
    let definition_line = lines
        .iter()
        .find(|line| line.contains("definition_id=cd1") && line.contains("asset_id=a1"))
        .unwrap_or_else(|| panic!("no definition warning in {lines:?}"));
    assert!(definition_line.contains("asset deletion may still be blocked"));
    let agreement_line = lines
        .iter()
        .find(|line| line.contains("agreement_id=ag1") && line.contains("asset_id=a1"))
        .unwrap_or_else(|| panic!("no agreement warning in {lines:?}"));
    assert!(agreement_line.contains("asset deletion will likely be blocked"));
    assert_eq!(summary.contract_definitions, Tally { deleted: 0, failed: 1 });
    assert_eq!(summary.contract_agreements, Tally { deleted: 0, failed: 1 });
    assert_eq!(summary.assets, Tally { deleted: 1, failed: 0 });
}

#[test]
fn confirmed_dependents_log_no_blocking_warning() {
    let api = ScriptedApi::new();
    api.respond("DELETE /v2/contractdefinitions/cd1", no_content());
    api.respond("DELETE /v3/assets/a1", no_content());
    let snapshot = DependencySnapshot {
        definitions: vec![definition("cd1", Some("a1"))],
        agreements: Vec::new(),
    };
    let selected = asset("a1");
    let logs = LogBuffer::default();

    tracing::subscriber::with_default(logs.subscriber(Level::WARN), || {
        cascade_asset(&api, &snapshot.plan_for(&selected))
    });

    assert!(logs.lines().iter().all(|line| !line.contains("blocked")), "{:?}", logs.lines());
}

#[test]
fn summaries_merge_per_category() {
    let mut total = CleanupSummary::default();
    let mut part = CleanupSummary::default();
    part.assets.record(true);
    part.contract_agreements.record(false);
    total.merge(part);
    total.merge(part);
    assert_eq!(total.assets, Tally { deleted: 2, failed: 0 });
    assert_eq!(total.contract_agreements, Tally { deleted: 0, failed: 2 });
    assert_eq!(
        serde_json::to_value(total).unwrap(),
        json!({
            "assets": {"deleted": 2, "failed": 0},
            "contractDefinitions": {"deleted": 0, "failed": 0},
            "contractAgreements": {"deleted": 0, "failed": 2},
        })
    );
}

#[test]
fn snapshot_fetch_lists_each_catalog_once() {
    let api = scripted_catalogs();

    let snapshot = DependencySnapshot::fetch(&api, &default_query());

    assert_eq!(snapshot.definitions, vec![definition("cd1", Some("a1"))]);
    assert_eq!(snapshot.agreements, vec![agreement("ag1", Some("a1"))]);
    assert_eq!(api.count("POST /v2/contractdefinitions/request"), 1);
    assert_eq!(api.count("POST /v2/contractagreements/request"), 1);
    assert_eq!(api.count("GET /v2/contractdefinitions/cd1"), 0);
}

#[test]
fn debug_logging_fetches_the_first_raw_definition_once() {
    let quiet = scripted_catalogs();
    let verbose = scripted_catalogs();
    verbose.respond(
        "GET /v2/contractdefinitions/cd1",
        json_ok(&json!({"@id": "cd1", "raw": true})),
    );
    let logs = LogBuffer::default();

    let plain = DependencySnapshot::fetch(&quiet, &default_query());
    let diagnosed = tracing::subscriber::with_default(logs.subscriber(Level::DEBUG), || {
        DependencySnapshot::fetch(&verbose, &default_query())
    });

    assert_eq!(quiet.count("GET /v2/contractdefinitions/cd1"), 0);
    assert_eq!(verbose.count("GET /v2/contractdefinitions/cd1"), 1);
    assert_eq!(diagnosed, plain);
    let lines = logs.lines();
    assert!(lines.iter().any(|line| line.contains("first processed contract definition")));
    assert!(lines.iter().any(|line| line.contains("first processed contract agreement")));
    assert!(lines.iter().any(|line| line.contains("raw contract definition")));
}

#[test]
fn debug_diagnostics_tolerate_a_missing_raw_definition() {
    let api = scripted_catalogs();
    let logs = LogBuffer::default();

    let snapshot = tracing::subscriber::with_default(logs.subscriber(Level::DEBUG), || {
        DependencySnapshot::fetch(&api, &default_query())
    });

    assert_eq!(api.count("GET /v2/contractdefinitions/cd1"), 1);
    assert_eq!(snapshot.definitions, vec![definition("cd1", Some("a1"))]);
    assert!(logs.lines().iter().all(|line| !line.contains("raw contract definition")));
}
