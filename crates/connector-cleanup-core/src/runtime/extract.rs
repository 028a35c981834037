// crates/connector-cleanup-core/src/runtime/extract.rs
// ============================================================================
// Module: Entity Extractor
// Description: Converts heterogeneous management API JSON into typed entities.
// Purpose: Confine loosely typed JSON handling to one narrow layer.
// Dependencies: serde_json, thiserror, tracing, crate::core
// ============================================================================

//! ## Overview
//! Connector versions disagree on where they put names, selectors, and asset
//! references. Every lookup here walks an ordered candidate list and the
//! first usable value wins. Items without a string `@id` (or that are not
//! JSON objects) are skipped, never rejected as errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::Asset;
use crate::core::AssetId;
use crate::core::ContractAgreement;
use crate::core::ContractAgreementId;
use crate::core::ContractDefinition;
use crate::core::ContractDefinitionId;
use crate::core::Namespace;
use crate::core::ParticipantId;
use crate::core::PolicyId;
use crate::core::truncate_chars;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON-LD identifier key.
const ID_KEY: &str = "@id";

/// Fixed asset property keys tried before namespaced and discovered keys.
const NAME_CANDIDATES: [&str; 4] = ["asset:prop:name", "name", "id", "dct:title"];

/// Selector operand that identifies assets, independent of the configured vocabulary.
const CANONICAL_ID_OPERAND: &str = "https://w3id.org/edc/v0.0.1/ns/id";

/// Characters of a skipped item echoed into the log.
const SKIP_PREVIEW_CHARS: usize = 100;

// ============================================================================
// SECTION: Skip Reasons
// ============================================================================

/// Why a raw item produced no entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The item is not a JSON object.
    #[error("item is not a JSON object")]
    NotAnObject,
    /// The item has no non-empty string `@id`.
    #[error("item has no '@id'")]
    MissingIdentifier,
}

// ============================================================================
// SECTION: Extraction
// ============================================================================

/// Extracts an asset and its best-effort display name.
///
/// # Errors
///
/// Returns [`SkipReason`] when the item is not an object or lacks `@id`.
pub fn extract_asset(raw: &Value, namespace: &Namespace) -> Result<Asset, SkipReason> {
    let (object, id) = identified_object(raw)?;
    let display_name = asset_display_name(object, id, namespace);
    Ok(Asset {
        id: AssetId::new(id),
        display_name,
    })
}

/// Extracts a contract definition and the asset its selector targets.
///
/// # Errors
///
/// Returns [`SkipReason`] when the item is not an object or lacks `@id`.
pub fn extract_contract_definition(
    raw: &Value,
    namespace: &Namespace,
) -> Result<ContractDefinition, SkipReason> {
    let (object, id) = identified_object(raw)?;
    let target_asset_id = selector_criteria(object)
        .into_iter()
        .find_map(|criterion| criterion_target(criterion, namespace))
        .map(AssetId::new);
    Ok(ContractDefinition {
        id: ContractDefinitionId::new(id),
        access_policy_id: non_empty_str(object.get("accessPolicyId")).map(PolicyId::new),
        contract_policy_id: non_empty_str(object.get("contractPolicyId")).map(PolicyId::new),
        target_asset_id,
    })
}

/// Extracts a contract agreement and the asset it covers.
///
/// # Errors
///
/// Returns [`SkipReason`] when the item is not an object or lacks `@id`.
pub fn extract_contract_agreement(
    raw: &Value,
    namespace: &Namespace,
) -> Result<ContractAgreement, SkipReason> {
    let (object, id) = identified_object(raw)?;
    Ok(ContractAgreement {
        id: ContractAgreementId::new(id),
        target_asset_id: agreement_asset_reference(object, namespace).map(AssetId::new),
        provider_id: non_empty_str(object.get("providerId")).map(ParticipantId::new),
        consumer_id: non_empty_str(object.get("consumerId")).map(ParticipantId::new),
    })
}

/// Applies an extractor to every item, logging and dropping skipped items.
pub fn extract_all<T>(
    items: &[Value],
    kind: &str,
    namespace: &Namespace,
    extractor: fn(&Value, &Namespace) -> Result<T, SkipReason>,
) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match extractor(item, namespace) {
            Ok(entity) => Some(entity),
            Err(reason) => {
                let rendered = item.to_string();
                tracing::warn!(
                    kind,
                    %reason,
                    item = truncate_chars(&rendered, SKIP_PREVIEW_CHARS),
                    "skipping {kind} list entry"
                );
                None
            }
        })
        .collect()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the object and its identifier, or the reason it is skipped.
fn identified_object(raw: &Value) -> Result<(&Map<String, Value>, &str), SkipReason> {
    let object = raw.as_object().ok_or(SkipReason::NotAnObject)?;
    let id = non_empty_str(object.get(ID_KEY)).ok_or(SkipReason::MissingIdentifier)?;
    Ok((object, id))
}

/// Returns a non-empty string value.
fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|text| !text.is_empty())
}

/// Renders a non-empty string or a number as display text.
fn display_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Resolves an asset display name, falling back to the identifier.
fn asset_display_name(object: &Map<String, Value>, id: &str, namespace: &Namespace) -> String {
    let properties = object
        .get("properties")
        .and_then(Value::as_object)
        .or_else(|| object.get("asset:properties").and_then(Value::as_object));
    if let Some(name) = properties.and_then(|properties| property_name(properties, namespace)) {
        return name;
    }
    display_text(object.get("name"))
        .or_else(|| display_text(object.get("id")))
        .unwrap_or_else(|| id.to_string())
}

/// Walks the ordered name candidates of an asset property map.
fn property_name(properties: &Map<String, Value>, namespace: &Namespace) -> Option<String> {
    let fixed = NAME_CANDIDATES.iter().map(|key| (*key).to_string());
    let namespaced = [namespace.term("name"), namespace.term("id")];
    let discovered = properties
        .keys()
        .filter(|key| {
            let lowered = key.to_lowercase();
            lowered.contains("name") || lowered.contains("id")
        })
        .cloned();
    fixed
        .chain(namespaced)
        .chain(discovered)
        .find_map(|key| display_text(properties.get(&key)))
}

/// Assembles the ordered criteria list from the selector shapes in use.
fn selector_criteria(object: &Map<String, Value>) -> Vec<&Value> {
    criteria_list(object.get("assetsSelector"))
        .or_else(|| criteria_list(object.get("criterion")))
        .unwrap_or_default()
}

/// Reads a single criterion object or a criteria array.
fn criteria_list(value: Option<&Value>) -> Option<Vec<&Value>> {
    match value? {
        single @ Value::Object(_) => Some(vec![single]),
        Value::Array(items) => Some(items.iter().collect()),
        _ => None,
    }
}

/// Returns the asset a criterion selects when it is an `id =` criterion.
fn criterion_target<'a>(criterion: &'a Value, namespace: &Namespace) -> Option<&'a str> {
    let criterion = criterion.as_object()?;
    let operand_left = criterion.get("operandLeft").and_then(Value::as_str)?;
    let is_id_operand =
        operand_left == namespace.term("id") || operand_left == CANONICAL_ID_OPERAND;
    let is_equality = criterion.get("operator").and_then(Value::as_str) == Some("=");
    if !(is_id_operand && is_equality) {
        return None;
    }
    non_empty_str(criterion.get("operandRight"))
}

/// Resolves the asset referenced by an agreement through its fallback chain.
fn agreement_asset_reference<'a>(
    object: &'a Map<String, Value>,
    namespace: &Namespace,
) -> Option<&'a str> {
    non_empty_str(object.get("assetId"))
        .or_else(|| non_empty_str(object.get(&namespace.term("assetId"))))
        .or_else(|| non_empty_str(object.get("asset").and_then(|asset| asset.get(ID_KEY))))
        .or_else(|| {
            let target = object.get("policy")?.get("target")?;
            match target {
                Value::Object(_) => non_empty_str(target.get(ID_KEY)),
                other => non_empty_str(Some(other)),
            }
        })
}
