//! console/update/classify.rs
//! Classification: for each selected tag, global value / per-file / skip.
//!
//! The decision itself (`decide`) is pure so it can be tested without
//! scripting a whole prompt sequence.

use anyhow::Result;

use super::super::state::{BatchRun, FieldClassification};
use super::super::terminal::Terminal;
use super::super::view;
use crate::core::tags::is_collection_wide_eligible;
use crate::core::types::SemanticTag;

/// Operator answer to the g/i/s prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Choice {
    Global,
    Individual,
    Skip,
}

pub(crate) fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim().to_ascii_lowercase().as_str() {
        "g" => Some(Choice::Global),
        "i" => Some(Choice::Individual),
        "s" => Some(Choice::Skip),
        _ => None,
    }
}

/// Map an answer to a classification.
/// - tags that aren't collection-wide are always per-file
/// - a blank global value means "no change", not per-file
pub(crate) fn decide(tag: SemanticTag, choice: Choice, global_value: &str) -> FieldClassification {
    if !is_collection_wide_eligible(tag) {
        return FieldClassification::PerFile;
    }

    match choice {
        Choice::Global => {
            let value = global_value.trim();
            if value.is_empty() {
                FieldClassification::Skipped
            } else {
                FieldClassification::Global(value.to_string())
            }
        }
        Choice::Individual => FieldClassification::PerFile,
        Choice::Skip => FieldClassification::Skipped,
    }
}

/// Walk the selection in order, show current values, record one decision
/// per tag in `run`.
pub(crate) fn classify_tags(term: &mut dyn Terminal, run: &mut BatchRun) -> Result<()> {
    view::heading(term, "Current Metadata Values");

    for tag in run.selected().to_vec() {
        view::current_values(term, run, tag);

        let classification = if is_collection_wide_eligible(tag) {
            let choice = ask_choice(term, tag)?;
            let value = match choice {
                Choice::Global => term.prompt(&format!("New {} value: ", tag.label()))?,
                _ => String::new(),
            };
            let decided = decide(tag, choice, &value);
            if choice == Choice::Global && decided == FieldClassification::Skipped {
                term.say(&format!("  Note: {} will remain unchanged", tag.label()));
            }
            decided
        } else {
            FieldClassification::PerFile
        };

        run.classify(tag, classification)?;
    }

    Ok(())
}

fn ask_choice(term: &mut dyn Terminal, tag: SemanticTag) -> Result<Choice> {
    term.say(&format!("\nOptions for {}:", tag.label()));
    term.say("  [g] Set global value (apply to all files)");
    term.say("  [i] Set individual values per file");
    term.say("  [s] Skip (no changes)");

    loop {
        if let Some(choice) = parse_choice(&term.prompt("Choice: ")?) {
            return Ok(choice);
        }
        term.say("Error: Please enter 'g', 'i', or 's'.");
    }
}
