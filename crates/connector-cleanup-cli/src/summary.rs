// crates/connector-cleanup-cli/src/summary.rs
// ============================================================================
// Module: Summary Rendering
// Description: Localized text for the end-of-run cleanup summary.
// Purpose: Render per-category counts and the closing notes.
// Dependencies: connector-cleanup-core, crate::i18n
// ============================================================================

//! ## Overview
//! Deleted counts are always reported. Failed counts appear only for
//! categories that recorded at least one failure.

use connector_cleanup_core::CleanupSummary;

use crate::t;

/// Renders the summary as lines of localized text.
#[must_use]
pub fn render_summary(summary: &CleanupSummary) -> Vec<String> {
    let mut lines = vec![String::new(), t!("summary.header")];
    lines.push(t!("summary.assets.deleted", count = summary.assets.deleted));
    if summary.assets.failed > 0 {
        lines.push(t!("summary.assets.failed", count = summary.assets.failed));
    }
    lines.push(t!("summary.definitions.deleted", count = summary.contract_definitions.deleted));
    if summary.contract_definitions.failed > 0 {
        lines.push(t!("summary.definitions.failed", count = summary.contract_definitions.failed));
    }
    lines.push(t!("summary.agreements.deleted", count = summary.contract_agreements.deleted));
    if summary.contract_agreements.failed > 0 {
        lines.push(t!("summary.agreements.failed", count = summary.contract_agreements.failed));
    }
    lines.push(t!("summary.finished"));
    lines.push(t!("summary.note.scope"));
    lines.push(t!("summary.note.remaining"));
    lines
}
