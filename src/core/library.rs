//! core/library.rs
//! Directory input cleanup + recursive discovery of supported audio files.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::error::DiscoveryError;
use super::types::AudioFile;

/// Turn what the operator typed into a path:
/// - trims whitespace
/// - strips one layer of surrounding quotes (drag-and-drop from a file manager)
/// - expands a leading `~`
pub fn normalize_input(raw: &str) -> PathBuf {
    let s = raw.trim();
    let s = s.trim_matches('"').trim_matches('\'');
    expand_tilde(s)
}

fn expand_tilde(s: &str) -> PathBuf {
    let rest = match s.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(s),
    };

    match std::env::var_os("HOME") {
        Some(home) if rest.is_empty() => PathBuf::from(home),
        Some(home) => PathBuf::from(home).join(rest),
        None => PathBuf::from(s),
    }
}

/// Recursively collect supported audio files under `root`.
///
/// - Extension match is case-insensitive (see `FormatKind::from_path`)
/// - Unreadable subdirectories are skipped, not fatal
/// - Result is sorted by path, which is the order every pass visits files in
pub fn scan_audio_files(root: &Path) -> Result<Vec<AudioFile>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let mut out = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(file) = AudioFile::from_path(entry.into_path()) {
            out.push(file);
        }
    }

    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}
