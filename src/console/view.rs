//! console/view.rs
//! Screen text: banners, menus and summaries. Reads state, never mutates it.

use super::state::BatchRun;
use super::terminal::Terminal;
use crate::core::types::SemanticTag;

const RULE_WIDTH: usize = 60;

pub(crate) fn rule(term: &mut dyn Terminal) {
    term.say(&"-".repeat(RULE_WIDTH));
}

/// Blank line, then a title boxed by `=` rules.
pub(crate) fn heading(term: &mut dyn Terminal, title: &str) {
    let bar = "=".repeat(RULE_WIDTH);
    term.say(&format!("\n{bar}"));
    term.say(title);
    term.say(&bar);
}

pub(crate) fn banner(term: &mut dyn Terminal) {
    let bar = "=".repeat(RULE_WIDTH);
    term.say(&bar);
    term.say("Audio Metadata Editor");
    term.say(&bar);
    term.say("Supports: FLAC, MP3, M4A, OGG, OPUS, WAV");
    term.say("WMA: detected, not editable");
}

pub(crate) fn main_menu(term: &mut dyn Terminal) {
    heading(term, "Main Menu");
    term.say("  Enter directory path to begin");
    term.say("  [0] Exit application");
}

pub(crate) fn tag_menu(term: &mut dyn Terminal) {
    heading(term, "Setup Menu - Select Metadata Fields to Edit");
    for tag in SemanticTag::ALL {
        term.say(&format!("  [{}] {}", tag.key(), tag.label()));
    }
    term.say("\nInstructions: Enter numbers separated by spaces");
    term.say("Example: 1 3 4 7");
}

pub(crate) fn current_values(term: &mut dyn Terminal, run: &BatchRun, tag: SemanticTag) {
    term.say(&format!("\nCurrent {} Values:", tag.label()));
    rule(term);
    for line in run.survey.render(tag) {
        term.say(&line);
    }
}

/// What is about to happen, shown before the y/n confirmation.
pub(crate) fn plan(term: &mut dyn Terminal, run: &BatchRun) {
    let globals = run.global_values();

    heading(term, "Summary");
    term.say(&format!("Files to process: {}", run.files.len()));
    term.say(&format!("Global changes: {}", globals.len()));
    term.say(&format!("Per-file tags: {}", run.per_file_tags().len()));

    if !globals.is_empty() {
        term.say("\nGlobal values:");
        for (tag, value) in &globals {
            term.say(&format!("  {}: {}", tag.label(), value));
        }
    }
}

/// Counters after both passes.
pub(crate) fn run_summary(term: &mut dyn Terminal, run: &BatchRun) {
    heading(term, "Batch Operation Summary");
    if !run.global_values().is_empty() {
        let g = run.global_stats;
        term.say(&format!(
            "  Global edits: {} file(s), {} failed",
            g.applied, g.failed
        ));
    }
    term.say(&format!("  Per-file processed: {}", run.stats.processed));
    term.say(&format!("  Per-file skipped:   {}", run.stats.skipped));
    term.say(&format!("  Failed:             {}", run.stats.failed));
    term.say("");
}
