//! Core data types shared between the tag layer and the console workflow.
//!
//! Rule of thumb:
//! - These are small, `Copy`-friendly identifiers and plain data
//! - No terminal code
//! - No tag parsing code
//!
//! `AudioFile` represents ONE discovered file on disk plus the container
//! format we decided it has.

use std::fmt;
use std::path::{Path, PathBuf};

/// A format-independent metadata field.
///
/// Declaration order is registry order (keys `1..9`), so `Ord` and
/// `SemanticTag::ALL` both follow what the selection menu shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SemanticTag {
    Artist,
    AlbumArtist,
    Album,
    Title,
    Genre,
    Date,
    TrackNumber,
    DiscNumber,
    Comment,
}

impl SemanticTag {
    pub const ALL: [SemanticTag; 9] = [
        SemanticTag::Artist,
        SemanticTag::AlbumArtist,
        SemanticTag::Album,
        SemanticTag::Title,
        SemanticTag::Genre,
        SemanticTag::Date,
        SemanticTag::TrackNumber,
        SemanticTag::DiscNumber,
        SemanticTag::Comment,
    ];

    /// Menu key the operator types to select this tag.
    pub fn key(self) -> &'static str {
        match self {
            SemanticTag::Artist => "1",
            SemanticTag::AlbumArtist => "2",
            SemanticTag::Album => "3",
            SemanticTag::Title => "4",
            SemanticTag::Genre => "5",
            SemanticTag::Date => "6",
            SemanticTag::TrackNumber => "7",
            SemanticTag::DiscNumber => "8",
            SemanticTag::Comment => "9",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    /// Canonical lowercase name. Vorbis-comment containers use it verbatim
    /// as their field name.
    pub fn name(self) -> &'static str {
        match self {
            SemanticTag::Artist => "artist",
            SemanticTag::AlbumArtist => "albumartist",
            SemanticTag::Album => "album",
            SemanticTag::Title => "title",
            SemanticTag::Genre => "genre",
            SemanticTag::Date => "date",
            SemanticTag::TrackNumber => "tracknumber",
            SemanticTag::DiscNumber => "discnumber",
            SemanticTag::Comment => "comment",
        }
    }

    /// Human label for prompts and headings.
    pub fn label(self) -> &'static str {
        match self {
            SemanticTag::Artist => "Artist",
            SemanticTag::AlbumArtist => "Album Artist",
            SemanticTag::Album => "Album",
            SemanticTag::Title => "Title",
            SemanticTag::Genre => "Genre",
            SemanticTag::Date => "Date",
            SemanticTag::TrackNumber => "Track Number",
            SemanticTag::DiscNumber => "Disc Number",
            SemanticTag::Comment => "Comment",
        }
    }
}

impl fmt::Display for SemanticTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Container formats we know how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Flac,
    Mp3,
    Mp4,
    OggVorbis,
    OggOpus,
    Wma,
    Wav,
}

impl FormatKind {
    /// Decide the format from a file extension (case-insensitive).
    /// Returns `None` for anything we don't process.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "flac" => Some(FormatKind::Flac),
            "mp3" => Some(FormatKind::Mp3),
            "m4a" => Some(FormatKind::Mp4),
            "ogg" => Some(FormatKind::OggVorbis),
            "opus" => Some(FormatKind::OggOpus),
            "wma" => Some(FormatKind::Wma),
            "wav" => Some(FormatKind::Wav),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormatKind::Flac => "FLAC",
            FormatKind::Mp3 => "MP3",
            FormatKind::Mp4 => "MP4",
            FormatKind::OggVorbis => "OGG Vorbis",
            FormatKind::OggOpus => "OGG Opus",
            FormatKind::Wma => "WMA",
            FormatKind::Wav => "WAV",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One discovered audio file.
///
/// The format is computed once, at discovery, and never re-derived from the
/// extension afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    /// Full file path on disk.
    pub path: PathBuf,

    pub format: FormatKind,
}

impl AudioFile {
    /// Build from a path, or `None` if the extension is unsupported.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let format = FormatKind::from_path(&path)?;
        Some(Self { path, format })
    }

    /// Base file name for display and survey grouping.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Uppercased extension with its dot, e.g. `.FLAC`.
    pub fn extension_label(&self) -> String {
        self.path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_uppercase()))
            .unwrap_or_default()
    }
}
