// crates/connector-cleanup-core/src/interfaces/mod.rs
// ============================================================================
// Module: Connector Cleanup Interfaces
// Description: Transport-agnostic management API request surface.
// Purpose: Define the contract between cleanup logic and the HTTP transport.
// Dependencies: serde_json, crate::core::outcome
// ============================================================================

//! ## Overview
//! Cleanup logic talks to the connector only through [`ManagementApi`]. A
//! request names its operation (for logs), verb, path segments, optional JSON
//! body, and query pairs; the transport answers with an [`Outcome`] and never
//! fails in any other way. Tests substitute scripted implementations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Value;

use crate::core::outcome::Outcome;

// ============================================================================
// SECTION: Request Types
// ============================================================================

/// HTTP verbs used by the cleanup workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Returns the canonical verb label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path below the management API prefix, kept as raw segments.
///
/// # Invariants
/// - Segments are stored unencoded; transports percent-encode them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    /// Raw path segments.
    segments: Vec<String>,
}

impl ApiPath {
    /// Builds a path from static segments.
    #[must_use]
    pub fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|segment| (*segment).to_string()).collect(),
        }
    }

    /// Appends a raw segment such as an entity identifier.
    #[must_use]
    pub fn join(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Returns the raw segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// A single management API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Human-readable operation label used in logs.
    pub operation: String,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path below the management prefix.
    pub path: ApiPath,
    /// Optional JSON body.
    pub body: Option<Value>,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Builds a `GET` request.
    #[must_use]
    pub fn get(operation: impl Into<String>, path: ApiPath) -> Self {
        Self::new(operation, HttpMethod::Get, path, None)
    }

    /// Builds a `POST` request with a JSON body.
    #[must_use]
    pub fn post_json(operation: impl Into<String>, path: ApiPath, body: Value) -> Self {
        Self::new(operation, HttpMethod::Post, path, Some(body))
    }

    /// Builds a `DELETE` request.
    #[must_use]
    pub fn delete(operation: impl Into<String>, path: ApiPath) -> Self {
        Self::new(operation, HttpMethod::Delete, path, None)
    }

    /// Adds a query string pair.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Builds a request from its parts.
    #[must_use]
    pub fn new(
        operation: impl Into<String>,
        method: HttpMethod,
        path: ApiPath,
        body: Option<Value>,
    ) -> Self {
        Self {
            operation: operation.into(),
            method,
            path,
            body,
            query: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Management API
// ============================================================================

/// Transport used to reach the connector management API.
///
/// Implementations issue exactly one network call per [`ManagementApi::send`]
/// and classify the result with [`Outcome::from_response`] or
/// [`Outcome::transport`].
pub trait ManagementApi {
    /// Sends a request and returns its normalized outcome.
    fn send(&self, request: &ApiRequest) -> Outcome;
}

impl<T: ManagementApi + ?Sized> ManagementApi for &T {
    fn send(&self, request: &ApiRequest) -> Outcome {
        (**self).send(request)
    }
}
