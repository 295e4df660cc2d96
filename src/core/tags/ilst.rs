//! core/tags/ilst.rs
//! MP4 (`.m4a`) containers: the `ilst` atom list.
//!
//! Track and disc are `(number, total)` pairs. We only edit the number and
//! always store the total as 0.

use std::fs::File;
use std::path::PathBuf;

use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::AudioFile as _;
use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst, Mp4File};
use lofty::prelude::*;

use super::TagContainer;
use super::schema::{self, NativeKey, NumberPair};
use super::util::parse_pair_number;
use crate::core::error::{CommitError, OpenError, TagFault};
use crate::core::types::{AudioFile, FormatKind, SemanticTag};

pub(crate) struct IlstContainer {
    path: PathBuf,
    ilst: Option<Ilst>,
}

impl IlstContainer {
    pub(crate) fn open(file: &AudioFile) -> Result<Self, OpenError> {
        let mut reader = File::open(&file.path)?;
        let mp4 = Mp4File::read_from(&mut reader, ParseOptions::new())
            .map_err(|e| OpenError::Codec(e.to_string()))?;

        Ok(Self {
            path: file.path.clone(),
            ilst: mp4.ilst().cloned(),
        })
    }
}

impl TagContainer for IlstContainer {
    fn format(&self) -> FormatKind {
        FormatKind::Mp4
    }

    fn read(&self, tag: SemanticTag) -> Result<Option<String>, TagFault> {
        let (Some(key), Some(ilst)) = (schema::native_key(tag, FormatKind::Mp4), &self.ilst) else {
            return Ok(None);
        };

        let value = match key {
            NativeKey::Atom(fourcc) => ilst
                .get(&AtomIdent::Fourcc(fourcc))
                .and_then(|atom| atom.data().find_map(text_data)),
            NativeKey::Pair(NumberPair::Track) => ilst.track().map(|n| n.to_string()),
            NativeKey::Pair(NumberPair::Disc) => ilst.disk().map(|n| n.to_string()),
            _ => None,
        };
        Ok(value)
    }

    fn write(&mut self, tag: SemanticTag, value: &str) -> Result<(), TagFault> {
        let Some(key) = schema::native_key(tag, FormatKind::Mp4) else {
            return Ok(());
        };

        match key {
            NativeKey::Atom(fourcc) => {
                let ilst = self.ilst.get_or_insert_with(Ilst::default);
                let ident = AtomIdent::Fourcc(fourcc);
                // `insert` merges into an existing atom, so clear it first
                let _ = ilst.remove(&ident);
                ilst.insert(Atom::new(ident, AtomData::UTF8(value.to_string())));
            }
            NativeKey::Pair(pair) => {
                // Parse before touching the tag so a bad value changes nothing.
                let n = parse_pair_number(value)?;
                let ilst = self.ilst.get_or_insert_with(Ilst::default);
                // Dropping the old atom drops its total too; lofty fills in 0.
                let _ = ilst.remove(&AtomIdent::Fourcc(pair.fourcc()));
                match pair {
                    NumberPair::Track => ilst.set_track(n),
                    NumberPair::Disc => ilst.set_disk(n),
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<(), CommitError> {
        let Self { path, ilst } = *self;
        let Some(ilst) = ilst else {
            return Ok(());
        };

        ilst.save_to_path(&path, WriteOptions::default())
            .map_err(|e| CommitError::new(&path, e))
    }
}

fn text_data(data: &AtomData) -> Option<String> {
    match data {
        AtomData::UTF8(s) | AtomData::UTF16(s) => Some(s.clone()),
        _ => None,
    }
}
