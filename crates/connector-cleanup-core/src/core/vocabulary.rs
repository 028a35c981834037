// crates/connector-cleanup-core/src/core/vocabulary.rs
// ============================================================================
// Module: Connector Vocabulary
// Description: JSON-LD vocabulary namespace and query specification payloads.
// Purpose: Build namespaced property terms and listing request bodies.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Management API payloads are compacted JSON-LD. Property names may appear
//! either bare (`id`) or expanded against the connector vocabulary
//! (`https://w3id.org/edc/v0.0.1/ns/id`). [`Namespace`] produces the expanded
//! form, and [`QuerySpec`] renders the paging payload sent to `/request`
//! listing endpoints.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Canonical connector vocabulary URI.
pub const DEFAULT_NAMESPACE: &str = "https://w3id.org/edc/v0.0.1/ns/";

/// Default page size requested from listing endpoints.
pub const DEFAULT_LIST_LIMIT: u32 = 500;

// ============================================================================
// SECTION: Namespace
// ============================================================================

/// Vocabulary namespace used to expand property terms.
///
/// # Invariants
/// - The URI is used verbatim; no trailing separator is added or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    /// Creates a namespace from its vocabulary URI.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Returns the vocabulary URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expands a bare term into its namespaced form.
    #[must_use]
    pub fn term(&self, name: &str) -> String {
        format!("{}{name}", self.0)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

// ============================================================================
// SECTION: Query Specification
// ============================================================================

/// Paging query sent to `/request` listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Vocabulary used as the JSON-LD `@vocab`.
    pub namespace: Namespace,
    /// Maximum number of entries requested.
    pub limit: u32,
}

impl QuerySpec {
    /// Creates a query specification for the given namespace and limit.
    #[must_use]
    pub const fn new(namespace: Namespace, limit: u32) -> Self {
        Self {
            namespace,
            limit,
        }
    }

    /// Renders the JSON payload.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "@context": { "@vocab": self.namespace.as_str() },
            "@type": "QuerySpec",
            "limit": self.limit,
        })
    }
}
