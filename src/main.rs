//! retag
//!
//! # What this program is
//! An interactive terminal tool that batch-edits audio tags for every
//! supported file under a directory (FLAC, MP3, M4A, OGG, OPUS, WMA, WAV).
//!
//! # How a run goes
//! - Operator gives a directory; it's walked recursively for audio files.
//! - Operator picks which tags to look at.
//! - Current values are surveyed and shown grouped by value.
//! - Each collection-wide tag gets one global value, per-file review or skip.
//! - After a y/n confirmation: global values are written to every file, then
//!   files are reviewed one by one for the per-file tags.
//!
//! # Architecture
//! - `core::*` owns filesystem walking and all tag IO (one API over ID3,
//!   MP4 atoms and Vorbis comments).
//! - `console::*` owns prompts, run state and the order of passes. It never
//!   touches tag formats directly.
//!
//! # Logging
//! Diagnostics go to stderr through `tracing`, default level `warn`, so they
//! don't interleave with prompts. `--log-level debug` shows skipped files and
//! read faults.

mod console;
mod core;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::console::StdTerminal;
use crate::core::tags::DiskStore;

/// Exit status after Ctrl-C (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Parser, Debug)]
#[command(name = "retag", about = "Interactive batch editor for audio file tags")]
struct CliArgs {
    /// Directory to process first; prompts for one when omitted.
    directory: Option<PathBuf>,

    /// Log filter for stderr output (e.g. `info`, `retag=debug`).
    #[clap(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::builder().parse_lossy(&cli_args.log_level))
        .try_init()
        .context("failed to initialise logging")?;

    ctrlc::set_handler(|| {
        println!("\n\nOperation interrupted by user. Exiting application.");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .context("failed to install Ctrl-C handler")?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let initial = cli_args
        .directory
        .map(|dir| dir.to_string_lossy().into_owned());

    console::main_loop(&DiskStore, &mut StdTerminal, initial)
}
