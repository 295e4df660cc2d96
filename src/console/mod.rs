//! console/mod.rs
//!
//! Interactive front end. One loop:
//! directory prompt -> discovery -> setup -> plan + confirm -> passes -> back
//! to the directory prompt.
//!
//! - `state`: per-run data (`BatchRun`)
//! - `update`: the steps that change it
//! - `view`: everything printed
//! - `terminal`: where lines come from and go to

mod state;
mod terminal;
mod update;
mod view;

use anyhow::Result;
use tracing::{debug, info};

pub(crate) use terminal::StdTerminal;
use terminal::{Terminal, is_end_of_input};

use crate::core::tags::TagStore;
use state::BatchRun;

/// Run until the operator enters `0` or input ends.
///
/// `initial` is a directory given on the command line; it is processed once
/// before the first prompt.
pub(crate) fn main_loop(
    store: &dyn TagStore,
    term: &mut dyn Terminal,
    initial: Option<String>,
) -> Result<()> {
    view::banner(term);

    let mut pending = initial;
    loop {
        let input = match pending.take() {
            Some(dir) => dir,
            None => {
                view::main_menu(term);
                match term.prompt("\nDirectory path: ") {
                    Ok(line) => line,
                    Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
                    Err(e) => return Err(e.into()),
                }
            }
        };

        if input == "0" {
            break;
        }
        if input.is_empty() {
            term.say("Error: Please enter a valid path.");
            continue;
        }

        match run_directory(store, term, &input) {
            Ok(_) => {}
            Err(e) if is_end_of_input(&e) => {
                debug!("input closed mid-run");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    term.say("\nApplication terminated. Goodbye.");
    Ok(())
}

/// One batch against one directory. Returns the finished run, or `None` when
/// nothing was edited (no files, or the operator said no).
pub(crate) fn run_directory(
    store: &dyn TagStore,
    term: &mut dyn Terminal,
    input: &str,
) -> Result<Option<BatchRun>> {
    let files = match crate::core::discover(input) {
        Ok(files) => files,
        Err(e) => {
            term.say(&format!("Error: {e}"));
            return Ok(None);
        }
    };

    if files.is_empty() {
        term.say("\nNo supported audio files found in the specified directory.");
        return Ok(None);
    }

    info!(count = files.len(), "audio files discovered");
    term.say(&format!("\nFound {} audio file(s).", files.len()));

    let mut run = BatchRun::new(files);
    update::setup(store, term, &mut run)?;
    view::plan(term, &run);

    if !update::confirm(term)? {
        term.say("Operation cancelled.");
        return Ok(None);
    }

    update::edit_files(store, term, &mut run)?;
    Ok(Some(run))
}
