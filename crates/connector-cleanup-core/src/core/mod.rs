// crates/connector-cleanup-core/src/core/mod.rs
// ============================================================================
// Module: Connector Cleanup Core Types
// Description: Identifiers, entity model, vocabulary, and response outcomes.
// Purpose: Provide the typed values shared by listing, deletion, and cascade logic.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types are transient, per-run values. Nothing here performs I/O.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod model;
pub mod outcome;
pub mod vocabulary;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::AssetId;
pub use identifiers::ContractAgreementId;
pub use identifiers::ContractDefinitionId;
pub use identifiers::ParticipantId;
pub use identifiers::PolicyId;
pub use model::Asset;
pub use model::ContractAgreement;
pub use model::ContractDefinition;
pub use outcome::DETAIL_PREVIEW_CHARS;
pub use outcome::ERROR_PREVIEW_CHARS;
pub use outcome::ErrorPayload;
pub use outcome::Outcome;
pub use outcome::truncate_chars;
pub use vocabulary::DEFAULT_LIST_LIMIT;
pub use vocabulary::DEFAULT_NAMESPACE;
pub use vocabulary::Namespace;
pub use vocabulary::QuerySpec;
