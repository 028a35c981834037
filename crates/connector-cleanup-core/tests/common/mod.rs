// crates/connector-cleanup-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Scripted management API and outcome builders.
// Purpose: Drive listing, deletion, and cascade logic without a network.
// Dependencies: connector-cleanup-core, serde_json
// ============================================================================

//! ## Overview
//! [`ScriptedApi`] answers requests from per-route queues keyed by
//! `"<METHOD> <path>"` and records every call for count and order assertions.
//! Unscripted routes answer 404.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::VecDeque;

use connector_cleanup_core::ApiRequest;
use connector_cleanup_core::ManagementApi;
use connector_cleanup_core::Namespace;
use connector_cleanup_core::Outcome;
use connector_cleanup_core::QuerySpec;
use serde_json::Value;

// ============================================================================
// SECTION: Scripted API
// ============================================================================

/// A request observed by [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Route key such as `DELETE /v3/assets/a1`.
    pub route: String,
    /// JSON body, when sent.
    pub body: Option<Value>,
    /// Query pairs.
    pub query: Vec<(String, String)>,
}

/// In-memory management API with scripted responses.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    /// Pending outcomes per route.
    routes: RefCell<HashMap<String, VecDeque<Outcome>>>,
    /// Calls in the order they were sent.
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedApi {
    /// Creates an API where every route answers 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an outcome for a route.
    pub fn respond(&self, route: &str, outcome: Outcome) -> &Self {
        self.routes.borrow_mut().entry(route.to_string()).or_default().push_back(outcome);
        self
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Returns the recorded route keys in call order.
    pub fn routes(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|call| call.route.clone()).collect()
    }

    /// Returns how many times a route was called.
    pub fn count(&self, route: &str) -> usize {
        self.calls.borrow().iter().filter(|call| call.route == route).count()
    }
}

impl ManagementApi for ScriptedApi {
    fn send(&self, request: &ApiRequest) -> Outcome {
        let route = format!("{} {}", request.method, request.path);
        self.calls.borrow_mut().push(RecordedCall {
            route: route.clone(),
            body: request.body.clone(),
            query: request.query.clone(),
        });
        self.routes
            .borrow_mut()
            .get_mut(&route)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(not_found)
    }
}

// ============================================================================
// SECTION: Outcome Builders
// ============================================================================

/// 200 with a JSON body.
pub fn json_ok(value: &Value) -> Outcome {
    Outcome::from_response(200, value.to_string().as_bytes())
}

/// 204 without a body.
pub fn no_content() -> Outcome {
    Outcome::from_response(204, b"")
}

/// Arbitrary status with a text or JSON body.
pub fn status(code: u16, body: &str) -> Outcome {
    Outcome::from_response(code, body.as_bytes())
}

/// 404 with a JSON error body.
pub fn not_found() -> Outcome {
    Outcome::from_response(404, br#"[{"message":"Object not found"}]"#)
}

/// Transport failure.
pub fn unreachable() -> Outcome {
    Outcome::transport("connection refused")
}

/// Default query specification.
pub fn default_query() -> QuerySpec {
    QuerySpec::new(Namespace::default(), 500)
}
