// crates/connector-cleanup-core/src/runtime/listing.rs
// ============================================================================
// Module: Endpoint Resolver
// Description: Ordered, version-tolerant listing of connector collections.
// Purpose: Find the first endpoint variant that yields a usable JSON array.
// Dependencies: serde_json, tracing, crate::{core, interfaces, runtime::extract}
// ============================================================================

//! ## Overview
//! Deployed connectors expose different listing shapes (`GET` collections or
//! `POST .../request` query endpoints, under `/v3` or `/v2`). The fallback
//! policy is data: an ordered slice of [`ListStrategy`] descriptors evaluated
//! by [`first_usable_collection`]. A strategy is usable when its outcome
//! carries a JSON array, empty arrays included. Failed attempts have no side
//! effects and fall through to the next strategy; total exhaustion degrades
//! to an empty collection rather than an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::Asset;
use crate::core::ContractAgreement;
use crate::core::ContractDefinition;
use crate::core::ContractDefinitionId;
use crate::core::Namespace;
use crate::core::Outcome;
use crate::core::QuerySpec;
use crate::core::truncate_chars;
use crate::interfaces::ApiPath;
use crate::interfaces::ApiRequest;
use crate::interfaces::HttpMethod;
use crate::interfaces::ManagementApi;
use crate::runtime::extract::SkipReason;
use crate::runtime::extract::extract_all;
use crate::runtime::extract::extract_asset;
use crate::runtime::extract::extract_contract_agreement;
use crate::runtime::extract::extract_contract_definition;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Characters of an unusable listing response echoed into the log.
const UNUSABLE_PREVIEW_CHARS: usize = 300;

// ============================================================================
// SECTION: Strategy Descriptors
// ============================================================================

/// Request body sent by a listing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyPayload {
    /// No body.
    None,
    /// A [`QuerySpec`] body.
    QuerySpec,
}

/// One endpoint variant able to list a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStrategy {
    /// Operation label used in logs.
    pub operation: &'static str,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path segments below the management prefix.
    pub path: &'static [&'static str],
    /// Request body shape.
    pub payload: StrategyPayload,
    /// Whether the page size is sent as a `limit` query parameter.
    pub limit_query: bool,
}

impl ListStrategy {
    /// Builds the concrete request for this strategy.
    #[must_use]
    pub fn request(&self, query: &QuerySpec) -> ApiRequest {
        let body = match self.payload {
            StrategyPayload::None => None,
            StrategyPayload::QuerySpec => Some(query.to_json()),
        };
        let mut request =
            ApiRequest::new(self.operation, self.method, ApiPath::new(self.path), body);
        if self.limit_query {
            request = request.with_query("limit", query.limit);
        }
        request
    }
}

/// Asset listing variants, newest API first.
pub const ASSET_LIST_STRATEGIES: [ListStrategy; 4] = [
    ListStrategy {
        operation: "List Assets (GET /v3/assets)",
        method: HttpMethod::Get,
        path: &["v3", "assets"],
        payload: StrategyPayload::None,
        limit_query: true,
    },
    ListStrategy {
        operation: "List Assets (POST /v3/assets/request)",
        method: HttpMethod::Post,
        path: &["v3", "assets", "request"],
        payload: StrategyPayload::QuerySpec,
        limit_query: false,
    },
    ListStrategy {
        operation: "List Assets (POST /v2/assets/request)",
        method: HttpMethod::Post,
        path: &["v2", "assets", "request"],
        payload: StrategyPayload::QuerySpec,
        limit_query: false,
    },
    ListStrategy {
        operation: "List Assets (GET /v2/assets)",
        method: HttpMethod::Get,
        path: &["v2", "assets"],
        payload: StrategyPayload::None,
        limit_query: true,
    },
];

/// Contract definition listing variants.
pub const CONTRACT_DEFINITION_LIST_STRATEGIES: [ListStrategy; 1] = [ListStrategy {
    operation: "List Contract Definitions",
    method: HttpMethod::Post,
    path: &["v2", "contractdefinitions", "request"],
    payload: StrategyPayload::QuerySpec,
    limit_query: false,
}];

/// Contract agreement listing variants.
pub const CONTRACT_AGREEMENT_LIST_STRATEGIES: [ListStrategy; 1] = [ListStrategy {
    operation: "List Contract Agreements",
    method: HttpMethod::Post,
    path: &["v2", "contractagreements", "request"],
    payload: StrategyPayload::QuerySpec,
    limit_query: false,
}];

// ============================================================================
// SECTION: Driver
// ============================================================================

/// Raw collection produced by the first usable strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCollection<'s> {
    /// Strategy that produced the collection.
    pub strategy: &'s ListStrategy,
    /// Raw collection items.
    pub items: Vec<Value>,
}

/// Evaluates strategies in order and returns the first usable collection.
///
/// Strategies after the first usable one are never sent.
pub fn first_usable_collection<'s, A: ManagementApi + ?Sized>(
    api: &A,
    strategies: &'s [ListStrategy],
    query: &QuerySpec,
) -> Option<ResolvedCollection<'s>> {
    for strategy in strategies {
        let request = strategy.request(query);
        tracing::info!(operation = strategy.operation, path = %request.path, "attempting listing");
        let outcome = api.send(&request);
        match outcome {
            Outcome::Failed {
                status,
                ref error,
            } => {
                tracing::warn!(
                    operation = strategy.operation,
                    status,
                    error = %error,
                    "listing failed; trying next strategy"
                );
            }
            Outcome::TransportException {
                ref message,
            } => {
                tracing::warn!(
                    operation = strategy.operation,
                    error = %message,
                    "listing request failed; trying next strategy"
                );
            }
            outcome => {
                if let Some(items) = usable_collection(&outcome) {
                    tracing::info!(
                        operation = strategy.operation,
                        count = items.len(),
                        "listing succeeded"
                    );
                    return Some(ResolvedCollection {
                        strategy,
                        items,
                    });
                }
                let detail = outcome.detail_preview();
                tracing::warn!(
                    operation = strategy.operation,
                    response = truncate_chars(&detail, UNUSABLE_PREVIEW_CHARS),
                    "listing returned no usable collection; trying next strategy"
                );
            }
        }
    }
    None
}

/// Returns the JSON array carried by a success outcome.
///
/// Non-JSON bodies are re-parsed after stripping a byte-order mark and
/// surrounding whitespace, which the strict normalizer rejects.
fn usable_collection(outcome: &Outcome) -> Option<Vec<Value>> {
    match outcome {
        Outcome::Success {
            data: Value::Array(items),
            ..
        } => Some(items.clone()),
        Outcome::SuccessNonJson {
            ..
        } => {
            let cleaned = outcome.raw_text()?.trim_start_matches('\u{feff}').trim();
            match serde_json::from_str::<Value>(cleaned) {
                Ok(Value::Array(items)) => Some(items),
                _ => None,
            }
        }
        _ => None,
    }
}

// ============================================================================
// SECTION: Entity Listings
// ============================================================================

/// Lists assets through the four-step version fallback.
///
/// Returns an empty list when no strategy yields a collection.
pub fn list_assets<A: ManagementApi + ?Sized>(api: &A, query: &QuerySpec) -> Vec<Asset> {
    list_entities(api, &ASSET_LIST_STRATEGIES, query, "asset", extract_asset)
}

/// Lists contract definitions with their selector targets resolved.
pub fn list_contract_definitions<A: ManagementApi + ?Sized>(
    api: &A,
    query: &QuerySpec,
) -> Vec<ContractDefinition> {
    list_entities(
        api,
        &CONTRACT_DEFINITION_LIST_STRATEGIES,
        query,
        "contract definition",
        extract_contract_definition,
    )
}

/// Lists contract agreements with their asset references resolved.
pub fn list_contract_agreements<A: ManagementApi + ?Sized>(
    api: &A,
    query: &QuerySpec,
) -> Vec<ContractAgreement> {
    list_entities(
        api,
        &CONTRACT_AGREEMENT_LIST_STRATEGIES,
        query,
        "contract agreement",
        extract_contract_agreement,
    )
}

/// Fetches the raw JSON of one contract definition for diagnostics.
pub fn fetch_raw_contract_definition<A: ManagementApi + ?Sized>(
    api: &A,
    id: &ContractDefinitionId,
) -> Option<Value> {
    let request = ApiRequest::get(
        format!("Get Raw Contract Definition {id}"),
        ApiPath::new(&["v2", "contractdefinitions"]).join(id.as_str()),
    );
    match api.send(&request) {
        Outcome::Success {
            data, ..
        } => Some(data),
        outcome => {
            tracing::error!(
                definition_id = %id,
                status = outcome.status().unwrap_or_default(),
                detail = %outcome.detail_preview(),
                "failed to fetch raw contract definition"
            );
            None
        }
    }
}

/// Resolves a collection and extracts entities from it.
fn list_entities<A: ManagementApi + ?Sized, T>(
    api: &A,
    strategies: &[ListStrategy],
    query: &QuerySpec,
    kind: &str,
    extractor: fn(&Value, &Namespace) -> Result<T, SkipReason>,
) -> Vec<T> {
    let Some(collection) = first_usable_collection(api, strategies, query) else {
        let attempted: Vec<&str> = strategies.iter().map(|strategy| strategy.operation).collect();
        tracing::error!(
            kind,
            attempted = %attempted.join(", "),
            "could not retrieve {kind} list with any attempted endpoint"
        );
        return Vec::new();
    };
    let entities = extract_all(&collection.items, kind, &query.namespace, extractor);
    tracing::info!(
        kind,
        count = entities.len(),
        operation = collection.strategy.operation,
        "processed {kind} list"
    );
    entities
}
