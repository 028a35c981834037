// crates/connector-cleanup-core/src/runtime/mod.rs
// ============================================================================
// Module: Connector Cleanup Runtime
// Description: Extraction, listing, deletion, and cascade logic.
// Purpose: Drive the cleanup workflow against a management API transport.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules talk to the connector only through
//! [`crate::interfaces::ManagementApi`]. Listing and deletion failures are
//! absorbed into empty collections and classified outcomes; nothing here
//! aborts a run.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod cascade;
pub mod deletion;
pub mod extract;
pub mod listing;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use cascade::AssetPlan;
pub use cascade::CleanupSummary;
pub use cascade::DependencySnapshot;
pub use cascade::Tally;
pub use cascade::cascade_asset;
pub use cascade::run_cascade;
pub use deletion::DeletionFailure;
pub use deletion::DeletionOutcome;
pub use deletion::EntityKind;
pub use deletion::delete_asset;
pub use deletion::delete_contract_agreement;
pub use deletion::delete_contract_definition;
pub use deletion::delete_entity;
pub use extract::SkipReason;
pub use extract::extract_all;
pub use extract::extract_asset;
pub use extract::extract_contract_agreement;
pub use extract::extract_contract_definition;
pub use listing::ASSET_LIST_STRATEGIES;
pub use listing::CONTRACT_AGREEMENT_LIST_STRATEGIES;
pub use listing::CONTRACT_DEFINITION_LIST_STRATEGIES;
pub use listing::ListStrategy;
pub use listing::ResolvedCollection;
pub use listing::StrategyPayload;
pub use listing::fetch_raw_contract_definition;
pub use listing::first_usable_collection;
pub use listing::list_assets;
pub use listing::list_contract_agreements;
pub use listing::list_contract_definitions;
