//! core/mod.rs
//!
//! Everything that touches files:
//! - Discover candidate audio file paths (filesystem walk)
//! - Read/write tags through one normalized API (metadata IO)
//! - Survey current values across a file set
//!
//! The console layer never parses tags or walks directories itself; it calls
//! into here and gets plain data back.

pub mod error;
pub mod library;
pub mod survey;
pub mod tags;
pub mod types;

use error::DiscoveryError;
use types::AudioFile;

/// Discover supported audio files for a directory as the operator typed it.
///
/// - Quotes/whitespace/`~` handled by `library::normalize_input`
/// - Sorted by path (core owns ordering, the console shouldn't)
pub fn discover(raw_input: &str) -> Result<Vec<AudioFile>, DiscoveryError> {
    let root = library::normalize_input(raw_input);
    library::scan_audio_files(&root)
}
