//! console/update/review.rs
//! PerFileReview: walk the files in order and let the operator edit, skip or
//! stop. Runs after the global pass, so the values shown already include any
//! global edits.

use anyhow::Result;
use tracing::{info, warn};

use super::FileFailure;
use super::super::state::BatchRun;
use super::super::terminal::Terminal;
use super::super::view;
use crate::core::survey::NOT_SET;
use crate::core::tags::{TagContainer, TagStore, read_tag, write_tag};
use crate::core::types::{AudioFile, SemanticTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Edit,
    Skip,
    Quit,
}

/// Anything other than `s` or `q` means edit, including a bare Enter.
pub(crate) fn parse_action(input: &str) -> Action {
    match input.trim().to_ascii_lowercase().as_str() {
        "s" => Action::Skip,
        "q" => Action::Quit,
        _ => Action::Edit,
    }
}

/// Outcome of one file, before it is counted.
#[derive(Debug)]
enum Reviewed {
    Saved,
    Unchanged,
}

pub(crate) fn review_files(
    store: &dyn TagStore,
    term: &mut dyn Terminal,
    run: &mut BatchRun,
) -> Result<()> {
    let tags = run.per_file_tags();
    let total = run.files.len();

    for (i, file) in run.files.iter().enumerate() {
        term.say(&format!(
            "\n[{}/{}] File: {} {}",
            i + 1,
            total,
            file.file_name(),
            file.extension_label()
        ));
        view::rule(term);

        let container = match store.open(file) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %file.path.display(), "review could not open file: {e}");
                term.say(&format!("Error: Could not read {}: {e}", file.file_name()));
                run.stats.failed += 1;
                continue;
            }
        };

        let current: Vec<(SemanticTag, Option<String>)> = tags
            .iter()
            .map(|&t| (t, read_tag(container.as_ref(), t)))
            .collect();

        term.say("Current values:");
        for (tag, value) in &current {
            term.say(&format!(
                "  {}: {}",
                tag.label(),
                value.as_deref().unwrap_or(NOT_SET)
            ));
        }

        term.say("\nOptions: [Enter] to edit | [s] to skip | [q] to quit");
        match parse_action(&term.prompt("Action: ")?) {
            Action::Quit => {
                term.say("Batch operation terminated by user.");
                break;
            }
            Action::Skip => {
                term.say(&format!("Skipped: {}", file.file_name()));
                run.stats.skipped += 1;
            }
            Action::Edit => match edit_file(term, file, container, &current)? {
                Ok(Reviewed::Saved) => {
                    term.say(&format!("Success: Metadata saved for {}", file.file_name()));
                    run.stats.processed += 1;
                }
                Ok(Reviewed::Unchanged) => {
                    term.say(&format!("No changes made to {}", file.file_name()));
                    run.stats.skipped += 1;
                }
                Err(e) => {
                    warn!(path = %file.path.display(), "review failed: {e}");
                    term.say(&format!("Error: {}: {e}", file.file_name()));
                    run.stats.failed += 1;
                }
            },
        }
    }

    Ok(())
}

/// Prompt for each tag and save what changed. The outer `Result` is operator
/// I/O; the inner one is this file's outcome.
fn edit_file(
    term: &mut dyn Terminal,
    file: &AudioFile,
    mut container: Box<dyn TagContainer>,
    current: &[(SemanticTag, Option<String>)],
) -> Result<Result<Reviewed, FileFailure>> {
    term.say("\nEnter new values (press Enter to keep current value):");

    let mut edits = Vec::new();
    for (tag, value) in current {
        let shown = value.as_deref().unwrap_or(NOT_SET);
        let input = term.prompt(&format!("  {} [{}]: ", tag.label(), shown))?;
        if !input.is_empty() {
            edits.push((*tag, input));
        }
    }

    if edits.is_empty() {
        return Ok(Ok(Reviewed::Unchanged));
    }

    let mut written = 0;
    for (tag, value) in &edits {
        match write_tag(container.as_mut(), *tag, value) {
            Ok(()) => written += 1,
            Err(e) => term.say(&format!("  Warning: {e}")),
        }
    }
    if written == 0 {
        return Ok(Err(FileFailure::NothingWritten));
    }

    if let Err(e) = container.commit() {
        return Ok(Err(e.into()));
    }
    info!(path = %file.path.display(), written, "per-file edits saved");
    Ok(Ok(Reviewed::Saved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::state::{FieldClassification, RunStats};
    use crate::console::terminal::testing::ScriptedTerminal;
    use crate::core::tags::testing::MemoryStore;

    fn per_file_run(files: Vec<AudioFile>, tags: &[SemanticTag]) -> BatchRun {
        let mut run = BatchRun::new(files);
        run.select(tags);
        for &tag in tags {
            run.classify(tag, FieldClassification::PerFile).unwrap();
        }
        run
    }

    #[test]
    fn action_parsing() {
        assert_eq!(parse_action(""), Action::Edit);
        assert_eq!(parse_action("S"), Action::Skip);
        assert_eq!(parse_action(" q "), Action::Quit);
        assert_eq!(parse_action("whatever"), Action::Edit);
    }

    #[test]
    fn edit_skip_quit() {
        let store = MemoryStore::new();
        let f1 = store.add("/m/1.flac", &[(SemanticTag::Title, "Old")]);
        let f2 = store.add("/m/2.flac", &[]);
        let f3 = store.add("/m/3.flac", &[(SemanticTag::Title, "Three")]);
        let mut run = per_file_run(vec![f1.clone(), f2.clone(), f3.clone()], &[SemanticTag::Title]);
        let mut term = ScriptedTerminal::new(&["", "A", "s", "q"]);

        review_files(&store, &mut term, &mut run).unwrap();

        assert_eq!(
            run.stats,
            RunStats {
                processed: 1,
                skipped: 1,
                failed: 0
            }
        );
        assert_eq!(store.get(&f1, SemanticTag::Title).as_deref(), Some("A"));
        assert_eq!(store.get(&f3, SemanticTag::Title).as_deref(), Some("Three"));
        assert_eq!(store.commits(), [f1.path.clone()]);
        assert!(term.transcript.contains("Title [Old]: A"));
        assert!(term.transcript.contains("Skipped: 2.flac"));
        assert!(term.transcript.contains("Batch operation terminated by user."));
        assert!(term.transcript.contains("[3/3] File: 3.flac .FLAC"));
    }

    #[test]
    fn blank_answers_keep_values_and_skip_the_save() {
        let store = MemoryStore::new();
        let f = store.add("/m/a.mp3", &[(SemanticTag::Album, "LP")]);
        let mut run = per_file_run(vec![f.clone()], &[SemanticTag::Album, SemanticTag::Title]);
        let mut term = ScriptedTerminal::new(&["", "", ""]);

        review_files(&store, &mut term, &mut run).unwrap();

        assert!(store.commits().is_empty());
        assert_eq!(run.stats.skipped, 1);
        assert!(term.transcript.contains("Title [[Not Set]]: "));
        assert!(term.transcript.contains("No changes made to a.mp3"));
    }

    #[test]
    fn unreadable_and_unsaveable_files_count_as_failed() {
        let store = MemoryStore::new();
        let bad = store.add_corrupt("/m/1.ogg");
        let locked = store.add("/m/2.ogg", &[]);
        let good = store.add("/m/3.ogg", &[]);
        store.fail_commit(&locked);
        let mut run = per_file_run(vec![bad, locked.clone(), good.clone()], &[SemanticTag::Title]);
        // The corrupt file never reaches the action prompt.
        let mut term = ScriptedTerminal::new(&["", "T2", "", "T3"]);

        review_files(&store, &mut term, &mut run).unwrap();

        assert_eq!(run.stats.failed, 2);
        assert_eq!(run.stats.processed, 1);
        assert_eq!(store.get(&locked, SemanticTag::Title), None);
        assert_eq!(store.get(&good, SemanticTag::Title).as_deref(), Some("T3"));
    }

    #[test]
    fn bad_track_number_leaves_other_fields_saved() {
        let store = MemoryStore::new();
        let f = store.add("/m/a.flac", &[]);
        store.fail_writes(SemanticTag::TrackNumber);
        let mut run = per_file_run(vec![f.clone()], &[SemanticTag::TrackNumber, SemanticTag::Title]);
        let mut term = ScriptedTerminal::new(&["", "x", "Song"]);

        review_files(&store, &mut term, &mut run).unwrap();

        assert_eq!(run.stats.processed, 1);
        assert_eq!(store.get(&f, SemanticTag::Title).as_deref(), Some("Song"));
        assert!(term.transcript.contains("Warning: Could not set tracknumber"));
    }

    #[test]
    fn end_of_input_stops_the_pass() {
        let store = MemoryStore::new();
        let f = store.add("/m/a.flac", &[]);
        let mut run = per_file_run(vec![f], &[SemanticTag::Title]);
        let mut term = ScriptedTerminal::new(&[]);

        let err = review_files(&store, &mut term, &mut run).unwrap_err();
        assert!(crate::console::terminal::is_end_of_input(&err));
        assert!(store.commits().is_empty());
    }
}
