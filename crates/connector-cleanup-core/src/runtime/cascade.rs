// crates/connector-cleanup-core/src/runtime/cascade.rs
// ============================================================================
// Module: Cascade Orchestrator
// Description: Dependency-aware, best-effort deletion of selected assets.
// Purpose: Delete dependents before each asset and tally every outcome.
// Dependencies: serde_json, tracing, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The dependency catalogs are fetched once per run into a
//! [`DependencySnapshot`] and never refreshed. Each selected asset then walks
//! a fixed sequence: dependent contract definitions, dependent contract
//! agreements, the asset itself. Every step is attempted regardless of
//! earlier failures; outcomes accumulate in an explicit [`CleanupSummary`].
//!
//! ## Invariants
//! - Every dependent delete for an asset is attempted before the asset delete.
//! - Calls are strictly sequential.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use tracing::Level;

use crate::core::Asset;
use crate::core::ContractAgreement;
use crate::core::ContractDefinition;
use crate::core::QuerySpec;
use crate::interfaces::ManagementApi;
use crate::runtime::deletion::delete_asset;
use crate::runtime::deletion::delete_contract_agreement;
use crate::runtime::deletion::delete_contract_definition;
use crate::runtime::listing::fetch_raw_contract_definition;
use crate::runtime::listing::list_contract_agreements;
use crate::runtime::listing::list_contract_definitions;

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Point-in-time catalogs of contract definitions and agreements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySnapshot {
    /// Contract definitions in listing order.
    pub definitions: Vec<ContractDefinition>,
    /// Contract agreements in listing order.
    pub agreements: Vec<ContractAgreement>,
}

impl DependencySnapshot {
    /// Fetches both catalogs once.
    ///
    /// With debug logging enabled, the first entity of each catalog and the
    /// raw JSON of the first contract definition are logged.
    pub fn fetch<A: ManagementApi + ?Sized>(api: &A, query: &QuerySpec) -> Self {
        let definitions = list_contract_definitions(api, query);
        let agreements = list_contract_agreements(api, query);
        let snapshot = Self {
            definitions,
            agreements,
        };
        if tracing::enabled!(Level::DEBUG) {
            snapshot.log_diagnostics(api);
        }
        snapshot
    }

    /// Returns the dependents of an asset in snapshot order.
    #[must_use]
    pub fn plan_for<'a>(&'a self, asset: &'a Asset) -> AssetPlan<'a> {
        AssetPlan {
            asset,
            definitions: self
                .definitions
                .iter()
                .filter(|definition| definition.targets(&asset.id))
                .collect(),
            agreements: self
                .agreements
                .iter()
                .filter(|agreement| agreement.targets(&asset.id))
                .collect(),
        }
    }

    /// Logs the first processed entities and the first raw definition.
    fn log_diagnostics<A: ManagementApi + ?Sized>(&self, api: &A) {
        if let Some(first) = self.definitions.first() {
            tracing::debug!(definition = %to_json_text(first), "first processed contract definition");
            if let Some(raw) = fetch_raw_contract_definition(api, &first.id) {
                tracing::debug!(definition_id = %first.id, raw = %raw, "raw contract definition");
            }
        }
        if let Some(first) = self.agreements.first() {
            tracing::debug!(agreement = %to_json_text(first), "first processed contract agreement");
        }
    }
}

/// Renders an entity as compact JSON for diagnostics.
fn to_json_text<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Deletion plan for one selected asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPlan<'a> {
    /// Asset deleted last.
    pub asset: &'a Asset,
    /// Contract definitions whose selector targets the asset.
    pub definitions: Vec<&'a ContractDefinition>,
    /// Contract agreements covering the asset.
    pub agreements: Vec<&'a ContractAgreement>,
}

// ============================================================================
// SECTION: Summary
// ============================================================================

/// Deleted and failed counts for one entity category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Confirmed deletions.
    pub deleted: usize,
    /// Deletions that were not confirmed.
    pub failed: usize,
}

impl Tally {
    /// Records one deletion attempt.
    pub const fn record(&mut self, deleted: bool) {
        if deleted {
            self.deleted += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Returns the number of recorded attempts.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.deleted + self.failed
    }

    /// Adds another tally into this one.
    pub const fn merge(&mut self, other: Self) {
        self.deleted += other.deleted;
        self.failed += other.failed;
    }
}

/// Per-category outcome counts for a cleanup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupSummary {
    /// Asset deletions.
    pub assets: Tally,
    /// Contract definition deletions.
    pub contract_definitions: Tally,
    /// Contract agreement deletions.
    pub contract_agreements: Tally,
}

impl CleanupSummary {
    /// Adds another summary into this one.
    pub const fn merge(&mut self, other: Self) {
        self.assets.merge(other.assets);
        self.contract_definitions.merge(other.contract_definitions);
        self.contract_agreements.merge(other.contract_agreements);
    }

    /// Returns true when any category recorded a failure.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.assets.failed > 0
            || self.contract_definitions.failed > 0
            || self.contract_agreements.failed > 0
    }
}

// ============================================================================
// SECTION: Orchestration
// ============================================================================

/// Runs the cascade for every selected asset in selection order.
pub fn run_cascade<A: ManagementApi + ?Sized>(
    api: &A,
    selected: &[Asset],
    snapshot: &DependencySnapshot,
) -> CleanupSummary {
    let mut summary = CleanupSummary::default();
    for asset in selected {
        summary.merge(cascade_asset(api, &snapshot.plan_for(asset)));
    }
    summary
}

/// Deletes one asset's dependents and then the asset.
///
/// Returns the counts for this asset alone.
pub fn cascade_asset<A: ManagementApi + ?Sized>(api: &A, plan: &AssetPlan<'_>) -> CleanupSummary {
    let asset = plan.asset;
    let mut summary = CleanupSummary::default();
    tracing::info!(asset_id = %asset.id, name = %asset.display_name, "processing asset");

    if plan.definitions.is_empty() {
        tracing::info!(asset_id = %asset.id, "no dependent contract definitions found");
    } else {
        tracing::info!(
            asset_id = %asset.id,
            count = plan.definitions.len(),
            "deleting dependent contract definitions"
        );
    }
    for definition in &plan.definitions {
        let deleted = delete_contract_definition(api, &definition.id);
        if !deleted {
            tracing::warn!(
                asset_id = %asset.id,
                definition_id = %definition.id,
                "contract definition not deleted; asset deletion may still be blocked"
            );
        }
        summary.contract_definitions.record(deleted);
    }

    if plan.agreements.is_empty() {
        tracing::info!(asset_id = %asset.id, "no dependent contract agreements found");
    } else {
        tracing::info!(
            asset_id = %asset.id,
            count = plan.agreements.len(),
            "deleting dependent contract agreements"
        );
    }
    for agreement in &plan.agreements {
        let deleted = delete_contract_agreement(api, &agreement.id);
        if !deleted {
            tracing::warn!(
                asset_id = %asset.id,
                agreement_id = %agreement.id,
                "contract agreement not deleted; asset deletion will likely be blocked"
            );
        }
        summary.contract_agreements.record(deleted);
    }

    summary.assets.record(delete_asset(api, &asset.id));
    tracing::info!(
        asset_id = %asset.id,
        definitions_attempted = summary.contract_definitions.attempted(),
        agreements_attempted = summary.contract_agreements.attempted(),
        asset_deleted = summary.assets.deleted > 0,
        "asset processed"
    );
    summary
}
