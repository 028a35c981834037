// crates/connector-cleanup-core/src/core/model.rs
// ============================================================================
// Module: Connector Entity Model
// Description: Strongly typed assets, contract definitions, and agreements.
// Purpose: Carry extracted entity data through dependency resolution.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! These values are produced once per run by the entity extractor from raw
//! management API JSON and are immutable afterwards. Downstream logic never
//! inspects raw JSON; it only compares typed identifiers.
//!
//! ## Invariants
//! - Identifiers are opaque and compared case-sensitively.
//! - A missing `target_asset_id` means the dependency link is unknown, not an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::identifiers::AssetId;
use crate::core::identifiers::ContractAgreementId;
use crate::core::identifiers::ContractDefinitionId;
use crate::core::identifiers::ParticipantId;
use crate::core::identifiers::PolicyId;

// ============================================================================
// SECTION: Entities
// ============================================================================

/// Asset registered on the provider connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Asset identifier.
    pub id: AssetId,
    /// Best-effort display name; cosmetic only.
    pub display_name: String,
}

/// Contract definition offering assets under access and contract policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDefinition {
    /// Definition identifier.
    pub id: ContractDefinitionId,
    /// Access policy reference.
    pub access_policy_id: Option<PolicyId>,
    /// Contract policy reference.
    pub contract_policy_id: Option<PolicyId>,
    /// Asset selected by the first `id =` selector criterion.
    pub target_asset_id: Option<AssetId>,
}

impl ContractDefinition {
    /// Returns true when the definition selects the given asset.
    #[must_use]
    pub fn targets(&self, asset_id: &AssetId) -> bool {
        self.target_asset_id.as_ref() == Some(asset_id)
    }
}

/// Negotiated contract agreement referencing a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAgreement {
    /// Agreement identifier.
    pub id: ContractAgreementId,
    /// Asset covered by the agreement.
    pub target_asset_id: Option<AssetId>,
    /// Providing participant.
    pub provider_id: Option<ParticipantId>,
    /// Consuming participant.
    pub consumer_id: Option<ParticipantId>,
}

impl ContractAgreement {
    /// Returns true when the agreement covers the given asset.
    #[must_use]
    pub fn targets(&self, asset_id: &AssetId) -> bool {
        self.target_asset_id.as_ref() == Some(asset_id)
    }
}
