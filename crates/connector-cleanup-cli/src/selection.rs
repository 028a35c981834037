// crates/connector-cleanup-cli/src/selection.rs
// ============================================================================
// Module: Asset Selection
// Description: Pure interpretation of one line of selection input.
// Purpose: Keep the interactive toggle rules independent of the terminal.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! [`resolve_selection`] turns the current selection and one input line into
//! a [`SelectionStep`]. Indices are zero-based; the operator types one-based
//! numbers. Numbers typed again toggle an asset out of the selection.
//!
//! Input rules, after trimming and upper-casing:
//! - empty input finishes when something is selected, otherwise asks again
//! - a lone `A` selects everything and finishes
//! - a lone `N` clears the selection and finishes
//! - otherwise comma-separated parts build this round: `A` adds every index,
//!   `N` clears the round and stops parsing, in-range numbers are added,
//!   out-of-range numbers are reported and skipped
//! - any other part rejects the whole line and leaves the selection unchanged

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

// ============================================================================
// SECTION: Types
// ============================================================================

/// How a selection was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Empty input accepted the accumulated selection.
    Accepted,
    /// A lone `A` selected every asset.
    All,
    /// A lone `N` selected nothing.
    None,
}

/// Result of interpreting one line of selection input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionStep {
    /// Selection is final.
    Complete {
        /// Selected indices.
        selection: BTreeSet<usize>,
        /// How the selection was completed.
        completion: Completion,
    },
    /// Selection changed or stayed the same; keep prompting.
    Updated {
        /// Selection after toggling this round.
        selection: BTreeSet<usize>,
        /// Parts that named a number outside the list, as typed.
        out_of_range: Vec<String>,
    },
    /// Empty input while nothing is selected.
    NothingSelected,
    /// A part was neither a number, `A`, nor `N`; nothing changed.
    Rejected,
}

/// One parsed comma-separated part.
enum Part {
    /// Every index.
    All,
    /// Clear the round.
    None,
    /// A valid zero-based index.
    Index(usize),
    /// A number outside the list.
    OutOfRange,
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Interprets one line of selection input against the prior selection.
#[must_use]
pub fn resolve_selection(
    prior: &BTreeSet<usize>,
    input: &str,
    item_count: usize,
) -> SelectionStep {
    let choice = input.trim().to_uppercase();
    if choice.is_empty() {
        if prior.is_empty() {
            return SelectionStep::NothingSelected;
        }
        return SelectionStep::Complete {
            selection: prior.clone(),
            completion: Completion::Accepted,
        };
    }
    if choice == "A" {
        return SelectionStep::Complete {
            selection: (0 .. item_count).collect(),
            completion: Completion::All,
        };
    }
    if choice == "N" {
        return SelectionStep::Complete {
            selection: BTreeSet::new(),
            completion: Completion::None,
        };
    }

    let mut round = BTreeSet::new();
    let mut out_of_range = Vec::new();
    let mut valid_choice = false;
    for part in choice.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        match parse_part(part, item_count) {
            Some(Part::All) => {
                round.extend(0 .. item_count);
                valid_choice = true;
            }
            Some(Part::None) => {
                round.clear();
                valid_choice = true;
                break;
            }
            Some(Part::Index(index)) => {
                round.insert(index);
                valid_choice = true;
            }
            Some(Part::OutOfRange) => out_of_range.push(part.to_string()),
            None => return SelectionStep::Rejected,
        }
    }

    let mut selection = prior.clone();
    if valid_choice {
        for index in round {
            if !selection.remove(&index) {
                selection.insert(index);
            }
        }
    }
    SelectionStep::Updated {
        selection,
        out_of_range,
    }
}

/// Parses one upper-cased part; `None` when it is not a choice at all.
fn parse_part(part: &str, item_count: usize) -> Option<Part> {
    match part {
        "A" => return Some(Part::All),
        "N" => return Some(Part::None),
        _ => {}
    }
    let digits = part.strip_prefix(['+', '-']).unwrap_or(part);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    if part.starts_with('-') {
        return Some(Part::OutOfRange);
    }
    let number = digits.parse::<usize>().ok();
    match number {
        Some(number) if (1 ..= item_count).contains(&number) => Some(Part::Index(number - 1)),
        _ => Some(Part::OutOfRange),
    }
}
