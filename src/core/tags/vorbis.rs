//! core/tags/vorbis.rs
//! Vorbis comment containers: FLAC, OGG Vorbis, OGG Opus.
//!
//! Fields are lists of strings keyed by the semantic tag name. Reads take the
//! first entry; writes collapse the list to the single new value.

use std::fs::File;
use std::path::PathBuf;

use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::AudioFile as _;
use lofty::flac::FlacFile;
use lofty::ogg::{OpusFile, VorbisComments, VorbisFile};
use lofty::prelude::*;

use super::TagContainer;
use super::schema::{self, NativeKey};
use crate::core::error::{CommitError, OpenError, TagFault};
use crate::core::types::{AudioFile, FormatKind, SemanticTag};

pub(crate) struct VorbisContainer {
    path: PathBuf,
    format: FormatKind,
    comments: Option<VorbisComments>,
}

impl VorbisContainer {
    pub(crate) fn open(file: &AudioFile) -> Result<Self, OpenError> {
        let mut reader = File::open(&file.path)?;
        let options = ParseOptions::new();

        let comments = match file.format {
            FormatKind::Flac => FlacFile::read_from(&mut reader, options)
                .map(|f| f.vorbis_comments().cloned()),
            FormatKind::OggVorbis => VorbisFile::read_from(&mut reader, options)
                .map(|f| Some(f.vorbis_comments().clone())),
            FormatKind::OggOpus => OpusFile::read_from(&mut reader, options)
                .map(|f| Some(f.vorbis_comments().clone())),
            format => return Err(OpenError::Unsupported { format }),
        }
        .map_err(|e| OpenError::Codec(e.to_string()))?;

        Ok(Self {
            path: file.path.clone(),
            format: file.format,
            comments,
        })
    }

    fn field(&self, tag: SemanticTag) -> Option<&'static str> {
        match schema::native_key(tag, self.format)? {
            NativeKey::Field(name) => Some(name),
            _ => None,
        }
    }
}

impl TagContainer for VorbisContainer {
    fn format(&self) -> FormatKind {
        self.format
    }

    fn read(&self, tag: SemanticTag) -> Result<Option<String>, TagFault> {
        let (Some(name), Some(comments)) = (self.field(tag), &self.comments) else {
            return Ok(None);
        };
        Ok(comments.get(name).map(str::to_owned))
    }

    fn write(&mut self, tag: SemanticTag, value: &str) -> Result<(), TagFault> {
        let Some(name) = self.field(tag) else {
            return Ok(());
        };
        // `insert` drops every existing entry for the key.
        self.comments
            .get_or_insert_with(VorbisComments::default)
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<(), CommitError> {
        let Self { path, comments, .. } = *self;
        let Some(comments) = comments else {
            return Ok(());
        };

        comments
            .save_to_path(&path, WriteOptions::default())
            .map_err(|e| CommitError::new(&path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(format: FormatKind, comments: Option<VorbisComments>) -> VorbisContainer {
        VorbisContainer {
            path: PathBuf::from("/nowhere/track"),
            format,
            comments,
        }
    }

    #[test]
    fn every_tag_round_trips() {
        for format in [FormatKind::Flac, FormatKind::OggVorbis, FormatKind::OggOpus] {
            let mut c = with(format, None);
            for tag in SemanticTag::ALL {
                assert_eq!(c.read(tag).unwrap(), None);
                let value = format!("{} · {}", tag.label(), format);
                c.write(tag, &value).unwrap();
                assert_eq!(c.read(tag).unwrap(), Some(value), "{tag} on {format}");
            }
        }
    }

    #[test]
    fn write_collapses_multi_value_fields() {
        let mut comments = VorbisComments::default();
        comments.push("artist".to_string(), "First".to_string());
        comments.push("artist".to_string(), "Second".to_string());
        let mut c = with(FormatKind::Flac, Some(comments));

        assert_eq!(c.read(SemanticTag::Artist).unwrap().as_deref(), Some("First"));

        c.write(SemanticTag::Artist, "Only").unwrap();
        let comments = c.comments.as_ref().unwrap();
        let all: Vec<&str> = comments.get_all("artist").collect();
        assert_eq!(all, ["Only"]);
    }

    #[test]
    fn write_leaves_other_fields_alone() {
        let mut c = with(FormatKind::OggOpus, None);
        c.write(SemanticTag::Album, "Record").unwrap();
        c.write(SemanticTag::Title, "Song").unwrap();
        assert_eq!(c.read(SemanticTag::Album).unwrap().as_deref(), Some("Record"));
    }

    #[test]
    fn open_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["bad.flac", "bad.ogg", "bad.opus"] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"not audio at all").unwrap();
            let file = AudioFile::from_path(path).unwrap();
            assert!(
                matches!(VorbisContainer::open(&file), Err(OpenError::Codec(_))),
                "{name}"
            );
        }
    }
}
