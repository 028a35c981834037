// crates/connector-cleanup-cli/src/tests/prompt.rs
// ============================================================================
// Module: Interactive Prompt Tests
// Description: Unit tests for the selection menu and confirmation prompt.
// Purpose: Drive the prompts with scripted input and inspect their output.
// Dependencies: connector-cleanup-cli prompt module, connector-cleanup-core
// ============================================================================

//! ## Overview
//! Prompts run against in-memory readers and writers.

use std::io::Cursor;

use connector_cleanup_core::Asset;
use connector_cleanup_core::AssetId;

use crate::prompt::confirm_deletion;
use crate::prompt::prompt_selection;

fn assets() -> Vec<Asset> {
    ["alpha", "beta", "gamma"]
        .iter()
        .map(|id| Asset {
            id: AssetId::new(*id),
            display_name: format!("{id} name"),
        })
        .collect()
}

fn ids(selected: &[Asset]) -> Vec<&str> {
    selected.iter().map(|asset| asset.id.as_str()).collect()
}

fn run_selection(script: &str) -> (Vec<Asset>, String) {
    let assets = assets();
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    let selected = prompt_selection(&mut input, &mut output, &assets).unwrap();
    (selected, String::from_utf8(output).unwrap())
}

// ============================================================================
// SECTION: Selection
// ============================================================================

#[test]
fn menu_lists_assets_with_one_based_numbers() {
    let (_, output) = run_selection("N\n");
    assert!(output.contains("Available assets for deletion:"));
    assert!(output.contains("  1. ID: alpha (Name: alpha name)"));
    assert!(output.contains("  3. ID: gamma (Name: gamma name)"));
}

#[test]
fn numbers_then_enter_return_selection_in_listing_order() {
    let (selected, output) = run_selection("3,1\n\n");
    assert_eq!(ids(&selected), vec!["alpha", "gamma"]);
    assert!(output.contains("Currently selected for deletion:"));
    assert!(output.contains("  - gamma"));
}

#[test]
fn second_entry_toggles_an_asset_off() {
    let (selected, output) = run_selection("1,2\n1\n\n");
    assert_eq!(ids(&selected), vec!["beta"]);
    assert!(!output.contains("No assets currently selected."));
}

#[test]
fn all_selects_every_asset() {
    let (selected, output) = run_selection("a\n");
    assert_eq!(selected.len(), 3);
    assert!(output.contains("All 3 assets selected."));
}

#[test]
fn none_returns_empty_selection() {
    let (selected, output) = run_selection("2\nN\n");
    assert!(selected.is_empty());
    assert!(output.contains("No assets selected."));
}

#[test]
fn enter_without_selection_asks_again() {
    let (selected, output) = run_selection("\n2\n\n");
    assert_eq!(ids(&selected), vec!["beta"]);
    assert!(output.contains("Type 'N' if you want to select none"));
}

#[test]
fn invalid_and_out_of_range_input_is_reported() {
    let (selected, output) = run_selection("x\n7,1\n\n");
    assert_eq!(ids(&selected), vec!["alpha"]);
    assert!(output.contains("Invalid input. Please enter numbers, 'A', or 'N'."));
    assert!(output.contains("Invalid selection: '7'. Number out of range."));
}

#[test]
fn end_of_input_cancels_selection() {
    let (selected, output) = run_selection("1,2\n");
    assert!(selected.is_empty());
    assert!(output.contains("Selection cancelled by user."));
}

#[test]
fn empty_asset_list_reads_nothing() {
    let mut input = Cursor::new(b"1\n".to_vec());
    let mut output = Vec::new();
    let selected = prompt_selection(&mut input, &mut output, &[]).unwrap();
    assert!(selected.is_empty());
    assert!(output.is_empty());
    assert_eq!(input.position(), 0);
}

// ============================================================================
// SECTION: Confirmation
// ============================================================================

fn run_confirmation(script: &str, assume_yes: bool) -> (bool, String, u64) {
    let assets = assets();
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    let confirmed = confirm_deletion(&mut input, &mut output, &assets[.. 1], assume_yes).unwrap();
    (confirmed, String::from_utf8(output).unwrap(), input.position())
}

#[test]
fn only_yes_confirms() {
    assert!(run_confirmation("yes\n", false).0);
    assert!(run_confirmation("  YES \n", false).0);
    assert!(!run_confirmation("y\n", false).0);
    assert!(!run_confirmation("no\n", false).0);
    assert!(!run_confirmation("yess\n", false).0);
}

#[test]
fn declined_confirmation_reports_cancellation() {
    let (confirmed, output, _) = run_confirmation("no\n", false);
    assert!(!confirmed);
    assert!(output.contains("The following assets are selected for DELETION:"));
    assert!(output.contains("  - ID: alpha (Name: alpha name)"));
    assert!(output.contains("Deletion cancelled by user."));
}

#[test]
fn end_of_input_declines() {
    let (confirmed, output, _) = run_confirmation("", false);
    assert!(!confirmed);
    assert!(output.contains("Deletion cancelled by user."));
}

#[test]
fn assume_yes_skips_the_prompt() {
    let (confirmed, output, position) = run_confirmation("no\n", true);
    assert!(confirmed);
    assert_eq!(position, 0);
    assert!(output.contains("  - ID: alpha"));
    assert!(!output.contains("(yes/no)"));
}
