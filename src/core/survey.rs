//! core/survey.rs
//!
//! Read-only scan of a file set: for each selected tag, which files carry
//! which value. Used to show the operator what is there before editing.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::tags::{TagStore, read_tag};
use super::types::{AudioFile, SemanticTag};

pub const NOT_SET: &str = "[Not Set]";

/// A grouped value. `NotSet` is declared last so it orders after every real
/// value, however many there are.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SurveyValue {
    Set(String),
    NotSet,
}

impl SurveyValue {
    fn from_read(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => SurveyValue::Set(v),
            _ => SurveyValue::NotSet,
        }
    }
}

impl fmt::Display for SurveyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyValue::Set(v) => f.write_str(v),
            SurveyValue::NotSet => f.write_str(NOT_SET),
        }
    }
}

/// Value -> file names, in the order files were surveyed.
pub type Grouping = BTreeMap<SurveyValue, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Survey {
    groups: BTreeMap<SemanticTag, Grouping>,
    /// Size of the surveyed file set, including files that failed to open.
    total_files: usize,
}

impl Survey {
    pub fn grouping(&self, tag: SemanticTag) -> Option<&Grouping> {
        self.groups.get(&tag)
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    /// Display lines for one tag:
    /// - values in order, `[Not Set]` last
    /// - up to 3 file names per value, otherwise 2 plus a "more" line
    pub fn render(&self, tag: SemanticTag) -> Vec<String> {
        let Some(grouping) = self.groups.get(&tag).filter(|g| !g.is_empty()) else {
            return vec!["  No metadata found".to_string()];
        };

        let mut lines = Vec::new();
        for (value, files) in grouping {
            let count = files.len();
            let percentage = if self.total_files > 0 {
                count as f64 / self.total_files as f64 * 100.0
            } else {
                0.0
            };
            lines.push(format!("  '{value}' - {count} file(s) ({percentage:.1}%)"));

            if count <= 3 {
                lines.extend(files.iter().map(|f| format!("    - {f}")));
            } else {
                lines.extend(files.iter().take(2).map(|f| format!("    - {f}")));
                lines.push(format!("    ... and {} more", count - 2));
            }
        }
        lines
    }
}

/// Open each file once and group its file name under the current value of
/// every requested tag. Files that can't be opened are left out.
pub fn survey(store: &dyn TagStore, files: &[AudioFile], tags: &[SemanticTag]) -> Survey {
    let mut groups: BTreeMap<SemanticTag, Grouping> = BTreeMap::new();

    for file in files {
        let container = match store.open(file) {
            Ok(c) => c,
            Err(e) => {
                debug!(path = %file.path.display(), "survey skipped file: {e}");
                continue;
            }
        };

        let name = file.file_name();
        for &tag in tags {
            let value = SurveyValue::from_read(read_tag(container.as_ref(), tag));
            groups
                .entry(tag)
                .or_default()
                .entry(value)
                .or_default()
                .push(name.clone());
        }
    }

    Survey {
        groups,
        total_files: files.len(),
    }
}
