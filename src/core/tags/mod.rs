//! core/tags/mod.rs
//!
//! Tag normalization layer.
//! Public API:
//! - [`TagContainer`]: one loaded tag block, read/write by semantic tag
//! - [`TagStore`] / [`DiskStore`]: opens a container for a discovered file
//! - [`read_tag`]: never fails, every fault reads as "absent"
//! - [`write_tag`]: fails per tag with a [`WriteFault`] naming the tag
//!
//! Format dispatch happens once, in [`DiskStore::open`]. After that every
//! container knows its own native keys (see [`schema`]).

mod id3v2;
mod ilst;
pub mod schema;
mod util;
mod vorbis;

use tracing::debug;

use super::error::{CommitError, OpenError, TagFault, WriteFault};
use super::types::{AudioFile, FormatKind, SemanticTag};

pub use schema::is_collection_wide_eligible;

/// A single file's parsed tag block, exclusively owned for one
/// read or read+write+commit step.
pub trait TagContainer {
    fn format(&self) -> FormatKind;

    /// Current value of `tag`, or `None` when the slot is empty or the format
    /// has no slot for it. Never mutates.
    fn read(&self, tag: SemanticTag) -> Result<Option<String>, TagFault>;

    /// Replace the value of `tag`. A format without a slot for `tag` is a no-op.
    fn write(&mut self, tag: SemanticTag, value: &str) -> Result<(), TagFault>;

    /// Save edits back to the file and release the handle.
    fn commit(self: Box<Self>) -> Result<(), CommitError>;
}

/// Opens containers for discovered files.
pub trait TagStore {
    fn open(&self, file: &AudioFile) -> Result<Box<dyn TagContainer>, OpenError>;
}

/// Reads and writes tag blocks in place on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStore;

impl TagStore for DiskStore {
    fn open(&self, file: &AudioFile) -> Result<Box<dyn TagContainer>, OpenError> {
        let container: Box<dyn TagContainer> = match file.format {
            FormatKind::Mp3 | FormatKind::Wav => Box::new(id3v2::Id3Container::open(file)?),
            FormatKind::Mp4 => Box::new(ilst::IlstContainer::open(file)?),
            FormatKind::Flac | FormatKind::OggVorbis | FormatKind::OggOpus => {
                Box::new(vorbis::VorbisContainer::open(file)?)
            }
            // lofty has no ASF support
            FormatKind::Wma => return Err(OpenError::Unsupported { format: file.format }),
        };
        Ok(container)
    }
}

/// Read `tag` for display. Faults and empty strings both read as absent,
/// so inspecting metadata can never abort a survey or a review.
pub fn read_tag(container: &dyn TagContainer, tag: SemanticTag) -> Option<String> {
    match container.read(tag) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            debug!(%tag, format = %container.format(), "tag read failed: {e}");
            None
        }
    }
}

/// Write `tag`, attaching the tag name to any fault so the caller can warn
/// the operator and carry on with the next tag.
pub fn write_tag(
    container: &mut dyn TagContainer,
    tag: SemanticTag,
    value: &str,
) -> Result<(), WriteFault> {
    container
        .write(tag, value)
        .map_err(|fault| WriteFault { tag, fault })
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::testing::MemoryStore;
    use super::*;

    struct Faulty;

    impl TagContainer for Faulty {
        fn format(&self) -> FormatKind {
            FormatKind::Flac
        }
        fn read(&self, _tag: SemanticTag) -> Result<Option<String>, TagFault> {
            Err(TagFault::Codec("broken block".to_string()))
        }
        fn write(&mut self, _tag: SemanticTag, value: &str) -> Result<(), TagFault> {
            Err(TagFault::InvalidNumber(value.to_string()))
        }
        fn commit(self: Box<Self>) -> Result<(), CommitError> {
            Ok(())
        }
    }

    #[test]
    fn read_faults_become_absent() {
        assert_eq!(read_tag(&Faulty, SemanticTag::Artist), None);
    }

    #[test]
    fn write_faults_name_the_tag() {
        let err = write_tag(&mut Faulty, SemanticTag::TrackNumber, "x").unwrap_err();
        assert_eq!(err.tag, SemanticTag::TrackNumber);
        assert_eq!(
            err.to_string(),
            "Could not set tracknumber: invalid literal for an integer: 'x'"
        );
    }

    #[test]
    fn empty_values_read_as_absent() {
        let store = MemoryStore::new();
        let file = store.add("/m/a.flac", &[(SemanticTag::Album, "")]);
        let c = store.open(&file).unwrap();
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Album), None);
    }

    #[test]
    fn wma_is_routed_but_unsupported() {
        let file = AudioFile::from_path(PathBuf::from("/m/song.wma")).unwrap();
        assert!(matches!(
            DiskStore.open(&file),
            Err(OpenError::Unsupported {
                format: FormatKind::Wma
            })
        ));
    }

    #[test]
    fn disk_store_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["gone.mp3", "gone.m4a", "gone.flac", "gone.ogg"] {
            let file = AudioFile::from_path(dir.path().join(name)).unwrap();
            assert!(DiskStore.open(&file).is_err(), "{name}");
        }
    }

    #[test]
    fn disk_store_round_trips_mp3() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, [0xFFu8, 0xFB, 0x90, 0x00, 0, 0, 0, 0]).unwrap();
        let file = AudioFile::from_path(path).unwrap();

        let mut c = DiskStore.open(&file).unwrap();
        assert_eq!(c.format(), FormatKind::Mp3);
        write_tag(c.as_mut(), SemanticTag::Title, "Opening").unwrap();
        write_tag(c.as_mut(), SemanticTag::TrackNumber, "1").unwrap();
        c.commit().unwrap();

        let c = DiskStore.open(&file).unwrap();
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Title).as_deref(), Some("Opening"));
        assert_eq!(read_tag(c.as_ref(), SemanticTag::TrackNumber).as_deref(), Some("1"));
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Genre), None);
    }

    /// PCM WAV: RIFF header, 16-byte `fmt ` chunk, 4 bytes of silence.
    fn wav_bytes() -> Vec<u8> {
        let samples = [0u8; 4];
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + samples.len() as u32).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&8000u32.to_le_bytes());
        out.extend_from_slice(&16000u32.to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&(samples.len() as u32).to_le_bytes());
        out.extend_from_slice(&samples);
        out
    }

    /// `fLaC`, a zeroed STREAMINFO block, then a trailing PADDING block.
    fn flac_bytes() -> Vec<u8> {
        let mut out = b"fLaC".to_vec();
        out.extend_from_slice(&[0x00, 0x00, 0x00, 34]);
        out.extend_from_slice(&[0u8; 34]);
        out.extend_from_slice(&[0x81, 0x00, 0x00, 8]);
        out.extend_from_slice(&[0u8; 8]);
        out
    }

    #[test]
    fn disk_store_round_trips_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("take.wav");
        std::fs::write(&path, wav_bytes()).unwrap();
        let file = AudioFile::from_path(path.clone()).unwrap();

        let c = DiskStore.open(&file).unwrap();
        assert_eq!(c.format(), FormatKind::Wav);
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Artist), None);

        let mut c = DiskStore.open(&file).unwrap();
        write_tag(c.as_mut(), SemanticTag::Artist, "X").unwrap();
        write_tag(c.as_mut(), SemanticTag::Date, "1999").unwrap();
        c.commit().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");

        let c = DiskStore.open(&file).unwrap();
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Artist).as_deref(), Some("X"));
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Date).as_deref(), Some("1999"));
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Title), None);
    }

    #[test]
    fn disk_store_round_trips_flac() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("side-a.flac");
        std::fs::write(&path, flac_bytes()).unwrap();
        let file = AudioFile::from_path(path.clone()).unwrap();

        let mut c = DiskStore.open(&file).unwrap();
        assert_eq!(c.format(), FormatKind::Flac);
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Album), None);
        write_tag(c.as_mut(), SemanticTag::Album, "First Pressing").unwrap();
        write_tag(c.as_mut(), SemanticTag::TrackNumber, "3").unwrap();
        write_tag(c.as_mut(), SemanticTag::Comment, "remaster").unwrap();
        c.commit().unwrap();

        let c = DiskStore.open(&file).unwrap();
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Album).as_deref(), Some("First Pressing"));
        assert_eq!(read_tag(c.as_ref(), SemanticTag::TrackNumber).as_deref(), Some("3"));
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Comment).as_deref(), Some("remaster"));

        // A second save replaces the comment block instead of adding one.
        let mut c = DiskStore.open(&file).unwrap();
        write_tag(c.as_mut(), SemanticTag::Album, "Reissue").unwrap();
        c.commit().unwrap();

        assert_eq!(&std::fs::read(&path).unwrap()[..4], b"fLaC");
        let c = DiskStore.open(&file).unwrap();
        assert_eq!(read_tag(c.as_ref(), SemanticTag::Album).as_deref(), Some("Reissue"));
        assert_eq!(read_tag(c.as_ref(), SemanticTag::TrackNumber).as_deref(), Some("3"));
    }
}
