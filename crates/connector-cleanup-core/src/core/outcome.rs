// crates/connector-cleanup-core/src/core/outcome.rs
// ============================================================================
// Module: Response Outcomes
// Description: Uniform classification of management API responses.
// Purpose: Turn status codes and body bytes into a single outcome value.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`Outcome`] is the only shape in which transport results reach the
//! listing, extraction, and deletion logic. Classification is by status code
//! first (2xx is the success family) and then by body:
//! - 2xx + empty body -> [`Outcome::SuccessEmpty`]
//! - 2xx + JSON body -> [`Outcome::Success`]
//! - 2xx + unparseable body -> [`Outcome::SuccessNonJson`] (ambiguous, no usable data)
//! - non-2xx -> [`Outcome::Failed`] with a JSON or truncated text payload
//! - no response -> [`Outcome::TransportException`]
//!
//! Outcomes are logged by their callers, never by the normalizer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Value;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum characters of a non-JSON error body retained in an outcome.
pub const ERROR_PREVIEW_CHARS: usize = 500;

/// Maximum characters of failure detail written to logs.
pub const DETAIL_PREVIEW_CHARS: usize = 1000;

// ============================================================================
// SECTION: Error Payload
// ============================================================================

/// Body carried by a failed response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// Body parsed as JSON.
    Json(Value),
    /// Raw body text, truncated to [`ERROR_PREVIEW_CHARS`].
    Text(String),
}

impl ErrorPayload {
    /// Extracts the server message from `{"message"}` or `[{"message"}, ...]` payloads.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        let Self::Json(value) = self else {
            return None;
        };
        let object = match value {
            Value::Array(items) => items.first()?,
            other => other,
        };
        object.get("message").and_then(Value::as_str)
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Normalized result of a single management API call.
///
/// # Invariants
/// - Success variants always carry a status in `200..300`.
/// - [`Outcome::Failed`] always carries a status outside `200..300`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx response whose body parsed as JSON.
    Success {
        /// HTTP status code.
        status: u16,
        /// Parsed body.
        data: Value,
        /// Body text as received.
        raw_text: String,
    },
    /// 2xx response without a body.
    SuccessEmpty {
        /// HTTP status code.
        status: u16,
    },
    /// 2xx response whose body is not JSON.
    SuccessNonJson {
        /// HTTP status code.
        status: u16,
        /// Body text as received.
        raw_text: String,
    },
    /// Non-2xx response.
    Failed {
        /// HTTP status code.
        status: u16,
        /// Parsed or truncated error body.
        error: ErrorPayload,
    },
    /// No response was received.
    TransportException {
        /// Transport failure description.
        message: String,
    },
}

impl Outcome {
    /// Classifies a received response from its status code and body bytes.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        if (200 .. 300).contains(&status) {
            if body.is_empty() {
                return Self::SuccessEmpty {
                    status,
                };
            }
            let raw_text = String::from_utf8_lossy(body).into_owned();
            return match serde_json::from_slice::<Value>(body) {
                Ok(data) => Self::Success {
                    status,
                    data,
                    raw_text,
                },
                Err(_) => Self::SuccessNonJson {
                    status,
                    raw_text,
                },
            };
        }
        let error = match serde_json::from_slice::<Value>(body) {
            Ok(value) => ErrorPayload::Json(value),
            Err(_) => {
                let text = String::from_utf8_lossy(body);
                ErrorPayload::Text(truncate_chars(&text, ERROR_PREVIEW_CHARS).to_string())
            }
        };
        Self::Failed {
            status,
            error,
        }
    }

    /// Builds a transport failure outcome.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportException {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Success {
                status, ..
            }
            | Self::SuccessEmpty {
                status,
            }
            | Self::SuccessNonJson {
                status, ..
            }
            | Self::Failed {
                status, ..
            } => Some(*status),
            Self::TransportException {
                ..
            } => None,
        }
    }

    /// Returns true for the 2xx family.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::SuccessEmpty { .. } | Self::SuccessNonJson { .. })
    }

    /// Returns the parsed body of a JSON success.
    #[must_use]
    pub const fn json_data(&self) -> Option<&Value> {
        match self {
            Self::Success {
                data, ..
            } => Some(data),
            _ => None,
        }
    }

    /// Returns the raw body text of a success that carried a body.
    #[must_use]
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Self::Success {
                raw_text, ..
            }
            | Self::SuccessNonJson {
                raw_text, ..
            } => Some(raw_text),
            _ => None,
        }
    }

    /// Returns a bounded description of the outcome for log output.
    #[must_use]
    pub fn detail_preview(&self) -> String {
        let detail = match self {
            Self::Success {
                raw_text, ..
            }
            | Self::SuccessNonJson {
                raw_text, ..
            } => raw_text.clone(),
            Self::SuccessEmpty {
                ..
            } => String::from("no content"),
            Self::Failed {
                error, ..
            } => error.to_string(),
            Self::TransportException {
                message,
            } => message.clone(),
        };
        truncate_chars(&detail, DETAIL_PREVIEW_CHARS).to_string()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Truncates text to at most `max_chars` characters on a character boundary.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[.. index],
        None => text,
    }
}
