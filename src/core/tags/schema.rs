//! core/tags/schema.rs
//! Static registry: which tags are collection-wide, and where each semantic
//! tag lives inside each container family.

use crate::core::types::{FormatKind, SemanticTag};

/// Identifier of a tag slot inside one container's tag block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeKey {
    /// Vorbis comment field name (FLAC, OGG, Opus, WMA attribute names).
    Field(&'static str),
    /// ID3v2 frame id.
    Frame(&'static str),
    /// MP4 `ilst` text atom.
    Atom([u8; 4]),
    /// MP4 `ilst` numeric pair atom.
    Pair(NumberPair),
}

/// The two `(number, total)` atoms MP4 uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberPair {
    Track,
    Disc,
}

impl NumberPair {
    pub fn fourcc(self) -> [u8; 4] {
        match self {
            NumberPair::Track => *b"trkn",
            NumberPair::Disc => *b"disk",
        }
    }
}

/// ID3 comment frame. Unlike the `T***` frames it carries a language and a
/// description next to the text.
pub const COMMENT_FRAME: &str = "COMM";

/// Tags that are usually constant across an album, and so may be given one
/// value for the whole batch.
pub fn is_collection_wide_eligible(tag: SemanticTag) -> bool {
    matches!(
        tag,
        SemanticTag::Artist
            | SemanticTag::AlbumArtist
            | SemanticTag::Album
            | SemanticTag::Date
            | SemanticTag::Genre
    )
}

/// Where `tag` is stored for `format`. `None` means the format has no slot
/// for it; callers treat that as "nothing to read, nothing to write".
pub fn native_key(tag: SemanticTag, format: FormatKind) -> Option<NativeKey> {
    match format {
        FormatKind::Flac | FormatKind::OggVorbis | FormatKind::OggOpus | FormatKind::Wma => {
            Some(NativeKey::Field(tag.name()))
        }
        FormatKind::Mp3 | FormatKind::Wav => Some(NativeKey::Frame(id3_frame(tag))),
        FormatKind::Mp4 => Some(mp4_key(tag)),
    }
}

fn id3_frame(tag: SemanticTag) -> &'static str {
    match tag {
        SemanticTag::Title => "TIT2",
        SemanticTag::Artist => "TPE1",
        SemanticTag::Album => "TALB",
        SemanticTag::AlbumArtist => "TPE2",
        SemanticTag::Genre => "TCON",
        SemanticTag::Date => "TDRC",
        SemanticTag::TrackNumber => "TRCK",
        SemanticTag::DiscNumber => "TPOS",
        SemanticTag::Comment => COMMENT_FRAME,
    }
}

fn mp4_key(tag: SemanticTag) -> NativeKey {
    match tag {
        SemanticTag::Title => NativeKey::Atom(*b"\xa9nam"),
        SemanticTag::Artist => NativeKey::Atom(*b"\xa9ART"),
        SemanticTag::Album => NativeKey::Atom(*b"\xa9alb"),
        SemanticTag::AlbumArtist => NativeKey::Atom(*b"aART"),
        SemanticTag::Genre => NativeKey::Atom(*b"\xa9gen"),
        SemanticTag::Date => NativeKey::Atom(*b"\xa9day"),
        SemanticTag::Comment => NativeKey::Atom(*b"\xa9cmt"),
        SemanticTag::TrackNumber => NativeKey::Pair(NumberPair::Track),
        SemanticTag::DiscNumber => NativeKey::Pair(NumberPair::Disc),
    }
}
