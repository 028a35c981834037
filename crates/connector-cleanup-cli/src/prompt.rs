// crates/connector-cleanup-cli/src/prompt.rs
// ============================================================================
// Module: Interactive Prompts
// Description: Asset selection menu and deletion confirmation.
// Purpose: Drive the selection rules over any line reader and writer.
// Dependencies: connector-cleanup-core, crate::{i18n, selection}
// ============================================================================

//! ## Overview
//! Both prompts read whole lines from a [`BufRead`] and write localized text
//! to a [`Write`], so tests can script them with in-memory buffers. End of
//! input cancels: the selection prompt returns nothing and the confirmation
//! prompt declines.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::io;
use std::io::BufRead;
use std::io::Write;

use connector_cleanup_core::Asset;

use crate::selection::Completion;
use crate::selection::SelectionStep;
use crate::selection::resolve_selection;
use crate::t;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// The only answer that confirms deletion, compared case-insensitively.
pub const CONFIRMATION_WORD: &str = "yes";

// ============================================================================
// SECTION: Selection
// ============================================================================

/// Lists the assets and loops until the operator completes a selection.
///
/// Returns the selected assets in listing order; empty when nothing was
/// selected or input ended.
///
/// # Errors
///
/// Returns [`io::Error`] when reading input or writing output fails.
pub fn prompt_selection<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    assets: &[Asset],
) -> io::Result<Vec<Asset>> {
    if assets.is_empty() {
        return Ok(Vec::new());
    }
    writeln!(output)?;
    writeln!(output, "{}", t!("select.header"))?;
    for (index, asset) in assets.iter().enumerate() {
        writeln!(
            output,
            "{}",
            t!("select.item", index = index + 1, id = asset.id, name = asset.display_name)
        )?;
    }

    let mut selection = BTreeSet::new();
    loop {
        write!(output, "{}", t!("select.prompt"))?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            writeln!(output)?;
            writeln!(output, "{}", t!("select.cancelled"))?;
            return Ok(Vec::new());
        };
        match resolve_selection(&selection, &line, assets.len()) {
            SelectionStep::Complete {
                selection,
                completion,
            } => {
                match completion {
                    Completion::All => {
                        writeln!(output, "{}", t!("select.all", count = assets.len()))?;
                    }
                    Completion::None => writeln!(output, "{}", t!("select.none"))?,
                    Completion::Accepted => {}
                }
                return Ok(selection.iter().filter_map(|index| assets.get(*index)).cloned().collect());
            }
            SelectionStep::Updated {
                selection: updated,
                out_of_range,
            } => {
                for part in out_of_range {
                    writeln!(output, "{}", t!("select.out_of_range", part = part))?;
                }
                selection = updated;
                write_current_selection(output, assets, &selection)?;
            }
            SelectionStep::NothingSelected => writeln!(output, "{}", t!("select.empty_input"))?,
            SelectionStep::Rejected => writeln!(output, "{}", t!("select.invalid"))?,
        }
    }
}

/// Echoes the running selection after each update.
fn write_current_selection<W: Write>(
    output: &mut W,
    assets: &[Asset],
    selection: &BTreeSet<usize>,
) -> io::Result<()> {
    if selection.is_empty() {
        return writeln!(output, "{}", t!("select.current.empty"));
    }
    writeln!(output, "{}", t!("select.current.header"))?;
    for asset in selection.iter().filter_map(|index| assets.get(*index)) {
        writeln!(output, "{}", t!("select.current.item", id = asset.id))?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Confirmation
// ============================================================================

/// Lists the selected assets and asks for explicit confirmation.
///
/// When `assume_yes` is set the list is still shown but no input is read.
///
/// # Errors
///
/// Returns [`io::Error`] when reading input or writing output fails.
pub fn confirm_deletion<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    selected: &[Asset],
    assume_yes: bool,
) -> io::Result<bool> {
    writeln!(output)?;
    writeln!(output, "{}", t!("confirm.header"))?;
    for asset in selected {
        writeln!(output, "{}", t!("confirm.item", id = asset.id, name = asset.display_name))?;
    }
    if assume_yes {
        return Ok(true);
    }

    writeln!(output)?;
    write!(output, "{}", t!("confirm.prompt"))?;
    output.flush()?;
    let confirmed = read_line(input)?
        .is_some_and(|answer| answer.trim().eq_ignore_ascii_case(CONFIRMATION_WORD));
    if !confirmed {
        writeln!(output, "{}", t!("confirm.cancelled"))?;
    }
    Ok(confirmed)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads one line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
