//! core/tags/id3v2.rs
//! ID3v2 containers (MP3, and WAV files carrying an `id3 ` chunk).
//!
//! - A file may have no tag block at all: reads are absent, the first write
//!   creates an empty one
//! - Text frames are written as ID3v2.4, which stores text as UTF-8
//! - `comment` is a COMM frame: language "eng", empty description

use std::path::PathBuf;

use id3::frame::{Comment, Content};
use id3::{ErrorKind, Tag, TagLike, Version};

use super::TagContainer;
use super::schema::{self, COMMENT_FRAME, NativeKey};
use super::util::first_value;
use crate::core::error::{CommitError, OpenError, TagFault};
use crate::core::types::{AudioFile, FormatKind, SemanticTag};

pub(crate) struct Id3Container {
    path: PathBuf,
    format: FormatKind,
    tag: Option<Tag>,
}

impl Id3Container {
    /// Load the tag block. `id3` recognises the RIFF container itself, so MP3
    /// and WAV go through the same call.
    pub(crate) fn open(file: &AudioFile) -> Result<Self, OpenError> {
        let tag = match Tag::read_from_path(&file.path) {
            Ok(tag) => Some(tag),
            Err(e) if matches!(e.kind, ErrorKind::NoTag) => None,
            Err(e) => return Err(OpenError::Codec(e.to_string())),
        };

        Ok(Self {
            path: file.path.clone(),
            format: file.format,
            tag,
        })
    }

    fn frame_id(&self, tag: SemanticTag) -> Option<&'static str> {
        match schema::native_key(tag, self.format)? {
            NativeKey::Frame(id) => Some(id),
            _ => None,
        }
    }
}

impl TagContainer for Id3Container {
    fn format(&self) -> FormatKind {
        self.format
    }

    fn read(&self, tag: SemanticTag) -> Result<Option<String>, TagFault> {
        let (Some(id), Some(frames)) = (self.frame_id(tag), self.tag.as_ref()) else {
            return Ok(None);
        };

        if id == COMMENT_FRAME {
            return Ok(first_comment(frames));
        }
        Ok(text_frame(frames, id))
    }

    fn write(&mut self, tag: SemanticTag, value: &str) -> Result<(), TagFault> {
        let Some(id) = self.frame_id(tag) else {
            return Ok(());
        };
        let frames = self.tag.get_or_insert_with(Tag::new);

        if id == COMMENT_FRAME {
            // Replace with a single "eng" comment
            let _ = frames.remove(COMMENT_FRAME);
            let _ = frames.add_frame(Comment {
                lang: "eng".to_string(),
                description: String::new(),
                text: value.to_string(),
            });
        } else {
            frames.set_text(id, value);
        }
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<(), CommitError> {
        let Self { path, tag, .. } = *self;
        // Nothing was ever written and the file had no tag: leave it alone.
        let Some(tag) = tag else {
            return Ok(());
        };

        tag.write_to_path(&path, Version::Id3v24)
            .map_err(|e| CommitError::new(&path, e))
    }
}

/// First value of a plain text frame (T***).
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(first_value(s).to_string()),
        _ => None,
    }
}

fn first_comment(tag: &Tag) -> Option<String> {
    tag.comments().next().map(|c| c.text.clone())
}
