//! console/update/global.rs
//! GlobalApplicationPass: write every global value to every file.
//!
//! Best-effort per tag and per file. A file that can't be opened or saved is
//! reported and counted; the pass always reaches the last file.

use tracing::{info, warn};

use super::FileFailure;
use super::super::state::BatchRun;
use super::super::terminal::Terminal;
use crate::core::tags::{TagStore, write_tag};
use crate::core::types::{AudioFile, SemanticTag};

pub(crate) fn apply_global_values(store: &dyn TagStore, term: &mut dyn Terminal, run: &mut BatchRun) {
    let values = run.global_values();
    if values.is_empty() {
        return;
    }

    term.say("\nApplying global values...");
    info!(files = run.files.len(), tags = values.len(), "global pass started");

    for file in &run.files {
        match apply_to_file(store, term, file, &values) {
            Ok(()) => run.global_stats.applied += 1,
            Err(e) => {
                warn!(path = %file.path.display(), "global pass failed: {e}");
                term.say(&format!("Error processing {}: {e}", file.file_name()));
                run.global_stats.failed += 1;
            }
        }
    }

    term.say(&format!(
        "Global values applied to {} of {} file(s).",
        run.global_stats.applied,
        run.files.len()
    ));
}

fn apply_to_file(
    store: &dyn TagStore,
    term: &mut dyn Terminal,
    file: &AudioFile,
    values: &[(SemanticTag, String)],
) -> Result<(), FileFailure> {
    let mut container = store.open(file)?;

    let mut written = 0;
    for (tag, value) in values {
        match write_tag(container.as_mut(), *tag, value) {
            Ok(()) => written += 1,
            Err(e) => term.say(&format!("  Warning: {e}")),
        }
    }

    // Some fields may have failed; save whatever did go in.
    if written == 0 {
        return Err(FileFailure::NothingWritten);
    }
    container.commit()?;
    info!(path = %file.path.display(), written, "global values saved");
    Ok(())
}
