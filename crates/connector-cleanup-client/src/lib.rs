// crates/connector-cleanup-client/src/lib.rs
// ============================================================================
// Module: Connector Cleanup Client Library
// Description: HTTP transport for the connector management API.
// Purpose: Implement the core management API interface over blocking HTTP.
// Dependencies: connector-cleanup-core, reqwest
// ============================================================================

//! ## Overview
//! `connector-cleanup-client` sends [`connector_cleanup_core::ApiRequest`]
//! values to a connector management API and normalizes every response into
//! a [`connector_cleanup_core::Outcome`]. Requests are synchronous, bounded
//! by a timeout, and never follow redirects.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::ClientError;
pub use http::HttpManagementClient;
pub use http::ManagementClientConfig;
pub use http::default_user_agent;
