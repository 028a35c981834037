// crates/connector-cleanup-core/src/lib.rs
// ============================================================================
// Module: Connector Cleanup Core Library
// Description: Public API surface for the connector cleanup core.
// Purpose: Expose entity types, the transport interface, and cleanup runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Connector cleanup removes selected assets from a data-space connector
//! together with the contract definitions and agreements that reference
//! them. The core is transport-agnostic: it resolves version-specific
//! listing endpoints, extracts typed entities from heterogeneous JSON, and
//! runs a best-effort cascade through the [`ManagementApi`] interface.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ApiPath;
pub use interfaces::ApiRequest;
pub use interfaces::HttpMethod;
pub use interfaces::ManagementApi;
pub use runtime::AssetPlan;
pub use runtime::CleanupSummary;
pub use runtime::DeletionFailure;
pub use runtime::DeletionOutcome;
pub use runtime::DependencySnapshot;
pub use runtime::EntityKind;
pub use runtime::ListStrategy;
pub use runtime::ResolvedCollection;
pub use runtime::SkipReason;
pub use runtime::StrategyPayload;
pub use runtime::Tally;
