//! console/update/mod.rs
//!
//! The batch workflow, one step per submodule:
//! - `selection`: which tags
//! - `classify`: global / per-file / skip for each tag
//! - `global`: write global values to every file
//! - `review`: per-file edit, skip or quit
//!
//! This file wires the steps together and owns the y/n confirmation.

mod classify;
mod global;
mod review;
mod selection;

use anyhow::Result;
use tracing::info;

use super::state::BatchRun;
use super::terminal::Terminal;
use super::view;
use crate::core::error::{CommitError, OpenError};
use crate::core::survey::survey;
use crate::core::tags::TagStore;

/// Why one file in a pass did not get saved.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FileFailure {
    #[error("{0}")]
    Open(#[from] OpenError),
    #[error("{0}")]
    Commit(#[from] CommitError),
    #[error("no field could be written")]
    NothingWritten,
}

/// Tag selection, survey, then classification.
pub(crate) fn setup(store: &dyn TagStore, term: &mut dyn Terminal, run: &mut BatchRun) -> Result<()> {
    let tags = selection::select_tags(term)?;
    run.select(&tags);

    term.say("\nAnalyzing current metadata...");
    run.survey = survey(store, &run.files, &tags);

    classify::classify_tags(term, run)
}

pub(crate) fn confirm(term: &mut dyn Terminal) -> Result<bool> {
    loop {
        match term.prompt("\nProceed with editing? (y/n): ")?.to_ascii_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => term.say("Error: Please enter 'y' or 'n'."),
        }
    }
}

/// Global pass, then per-file pass, then the counters.
pub(crate) fn edit_files(store: &dyn TagStore, term: &mut dyn Terminal, run: &mut BatchRun) -> Result<()> {
    view::heading(term, &format!("Processing {} Audio File(s)", run.files.len()));

    global::apply_global_values(store, term, run);

    if run.per_file_tags().is_empty() {
        term.say("\nNo per-file edits required.");
    } else {
        review::review_files(store, term, run)?;
    }

    info!(
        processed = run.stats.processed,
        skipped = run.stats.skipped,
        failed = run.stats.failed,
        "batch finished"
    );
    view::run_summary(term, run);
    Ok(())
}
