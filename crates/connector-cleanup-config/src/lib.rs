// crates/connector-cleanup-config/src/lib.rs
// ============================================================================
// Module: Connector Cleanup Config Library
// Description: Environment-file configuration for the cleanup utility.
// Purpose: Single source of truth for connection and limit settings.
// Dependencies: connector-cleanup-core, dotenvy, url
// ============================================================================

//! ## Overview
//! `connector-cleanup-config` loads connection settings from a dotenv-style
//! file and validates them before any network activity. Every error here is
//! fatal at startup.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
