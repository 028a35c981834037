// crates/connector-cleanup-cli/src/lib.rs
// ============================================================================
// Module: Connector Cleanup CLI Library
// Description: Shared helpers for the connector cleanup command-line tool.
// Purpose: Provide i18n, selection rules, prompts, and summary rendering.
// Dependencies: connector-cleanup-core
// ============================================================================

//! ## Overview
//! The binary entry point (`src/main.rs`) wires configuration, transport and
//! the cleanup runtime together. The operator-facing pieces live here so
//! they can be unit tested without a terminal or a connector.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
/// Interactive selection and confirmation prompts.
pub mod prompt;
/// Pure selection input rules.
pub mod selection;
/// End-of-run summary rendering.
pub mod summary;
