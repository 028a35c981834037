// crates/connector-cleanup-core/src/core/identifiers.rs
// ============================================================================
// Module: Connector Cleanup Identifiers
// Description: Opaque identifiers for management API entities.
// Purpose: Keep asset, definition, agreement, and party IDs strongly typed.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers are opaque, case-sensitive strings taken verbatim from the
//! management API. They are produced only by the entity extractor and are
//! never synthesized or normalized.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Macro
// ============================================================================

/// Declares a transparent string identifier with the shared accessor surface.
macro_rules! opaque_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from its raw string form.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

opaque_identifier!(
    /// Asset identifier (`@id` of an asset).
    AssetId
);

opaque_identifier!(
    /// Contract definition identifier.
    ContractDefinitionId
);

opaque_identifier!(
    /// Contract agreement identifier.
    ContractAgreementId
);

opaque_identifier!(
    /// Access or contract policy identifier referenced by a definition.
    PolicyId
);

opaque_identifier!(
    /// Participant identifier of a provider or consumer.
    ParticipantId
);
