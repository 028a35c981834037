// crates/connector-cleanup-core/src/runtime/deletion.rs
// ============================================================================
// Module: Deletion Executor
// Description: Single-entity delete calls and their classification.
// Purpose: Decide whether a delete was confirmed and why it was not.
// Dependencies: thiserror, tracing, crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Each entity kind is deleted through exactly one endpoint version. The
//! response is classified into a [`DeletionOutcome`]; only a confirmed
//! deletion counts as success. Failures are logged here and never retried.
//!
//! Classification:
//! - 2xx without a body, or status 200/204 with any body -> deleted
//! - 409 -> dependency conflict (remaining references)
//! - 405 -> operation unsupported by the deployment
//! - 404 -> not found (already deleted or never existed)
//! - other non-2xx -> protocol failure with a bounded detail
//! - other 2xx with a body -> unexpected success, not counted as deleted

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::core::AssetId;
use crate::core::ContractAgreementId;
use crate::core::ContractDefinitionId;
use crate::core::Outcome;
use crate::interfaces::ApiPath;
use crate::interfaces::ApiRequest;
use crate::interfaces::ManagementApi;

// ============================================================================
// SECTION: Entity Kinds
// ============================================================================

/// Entity kinds the cleanup workflow deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Asset, deleted through `/v3/assets/{id}`.
    Asset,
    /// Contract definition, deleted through `/v2/contractdefinitions/{id}`.
    ContractDefinition,
    /// Contract agreement, deleted through `/v2/contractagreements/{id}`.
    ContractAgreement,
}

impl EntityKind {
    /// Returns the collection path of the delete endpoint.
    #[must_use]
    pub fn collection_path(self) -> ApiPath {
        match self {
            Self::Asset => ApiPath::new(&["v3", "assets"]),
            Self::ContractDefinition => ApiPath::new(&["v2", "contractdefinitions"]),
            Self::ContractAgreement => ApiPath::new(&["v2", "contractagreements"]),
        }
    }

    /// Returns the label used in operation names and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::ContractDefinition => "Contract Definition",
            Self::ContractAgreement => "Contract Agreement",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Why a delete was not confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeletionFailure {
    /// No response was received.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The entity still has dependents (409).
    #[error("conflict: {}", .message.as_deref().unwrap_or("entity still has dependents"))]
    DependencyConflict {
        /// Server-provided message, when present.
        message: Option<String>,
        /// Bounded response detail.
        detail: String,
    },
    /// The deployment does not permit this delete (405).
    #[error("method not allowed: {detail}")]
    Unsupported {
        /// Bounded response detail.
        detail: String,
    },
    /// The entity does not exist (404).
    #[error("not found: {detail}")]
    NotFound {
        /// Bounded response detail.
        detail: String,
    },
    /// Any other non-2xx response.
    #[error("status {status}: {detail}")]
    Protocol {
        /// HTTP status code.
        status: u16,
        /// Bounded response detail.
        detail: String,
    },
    /// A 2xx response other than 200/204 that carried a body.
    #[error("unexpected success status {status}")]
    UnexpectedSuccess {
        /// HTTP status code.
        status: u16,
    },
}

/// Classified result of a single delete call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// Deletion confirmed.
    Deleted {
        /// HTTP status code.
        status: u16,
    },
    /// Deletion not confirmed.
    Failed(DeletionFailure),
}

impl DeletionOutcome {
    /// Classifies a normalized delete response.
    #[must_use]
    pub fn classify(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::SuccessEmpty {
                status,
            } => Self::Deleted {
                status: *status,
            },
            Outcome::Success {
                status, ..
            }
            | Outcome::SuccessNonJson {
                status, ..
            } => {
                if matches!(status, 200 | 204) {
                    Self::Deleted {
                        status: *status,
                    }
                } else {
                    Self::Failed(DeletionFailure::UnexpectedSuccess {
                        status: *status,
                    })
                }
            }
            Outcome::Failed {
                status,
                error,
            } => {
                let detail = outcome.detail_preview();
                Self::Failed(match status {
                    409 => DeletionFailure::DependencyConflict {
                        message: error.message().map(str::to_string),
                        detail,
                    },
                    405 => DeletionFailure::Unsupported {
                        detail,
                    },
                    404 => DeletionFailure::NotFound {
                        detail,
                    },
                    _ => DeletionFailure::Protocol {
                        status: *status,
                        detail,
                    },
                })
            }
            Outcome::TransportException {
                message,
            } => Self::Failed(DeletionFailure::Transport(message.clone())),
        }
    }

    /// Returns true when the deletion was confirmed.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }
}

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Deletes one entity and returns the classified outcome.
pub fn delete_entity<A: ManagementApi + ?Sized>(
    api: &A,
    kind: EntityKind,
    id: &str,
) -> DeletionOutcome {
    let request = ApiRequest::delete(format!("Delete {kind} {id}"), kind.collection_path().join(id));
    let outcome = DeletionOutcome::classify(&api.send(&request));
    log_outcome(kind, id, &outcome);
    outcome
}

/// Deletes an asset; true when the deletion was confirmed.
pub fn delete_asset<A: ManagementApi + ?Sized>(api: &A, id: &AssetId) -> bool {
    delete_entity(api, EntityKind::Asset, id.as_str()).is_deleted()
}

/// Deletes a contract definition; true when the deletion was confirmed.
pub fn delete_contract_definition<A: ManagementApi + ?Sized>(
    api: &A,
    id: &ContractDefinitionId,
) -> bool {
    delete_entity(api, EntityKind::ContractDefinition, id.as_str()).is_deleted()
}

/// Deletes a contract agreement; true when the deletion was confirmed.
pub fn delete_contract_agreement<A: ManagementApi + ?Sized>(
    api: &A,
    id: &ContractAgreementId,
) -> bool {
    delete_entity(api, EntityKind::ContractAgreement, id.as_str()).is_deleted()
}

/// Writes the log line for a classified delete.
fn log_outcome(kind: EntityKind, id: &str, outcome: &DeletionOutcome) {
    let failure = match outcome {
        DeletionOutcome::Deleted {
            status,
        } => {
            tracing::info!(kind = kind.label(), id, status, "deleted");
            return;
        }
        DeletionOutcome::Failed(failure) => failure,
    };
    match (kind, failure) {
        (
            EntityKind::Asset,
            DeletionFailure::DependencyConflict {
                message, ..
            },
        ) => {
            tracing::warn!(
                kind = kind.label(),
                id,
                server_message = message.as_deref().unwrap_or("none"),
                "conflict (409): asset likely still has dependent contract definitions or agreements"
            );
        }
        (EntityKind::ContractAgreement, DeletionFailure::Unsupported { .. }) => {
            tracing::error!(
                kind = kind.label(),
                id,
                "method not allowed (405): this deployment does not permit agreement deletion"
            );
        }
        (_, failure) => {
            tracing::error!(kind = kind.label(), id, error = %failure, "deletion failed");
        }
    }
}
