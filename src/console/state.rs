//! console/state.rs
//! Run state for one directory batch. Pure data + invariant checks, used by
//! the passes in `update/`.
//!
//! A `BatchRun` is created when a directory yields files and dropped when the
//! operator is back at the directory prompt. Nothing persists between runs.

use std::collections::BTreeMap;

use crate::core::survey::Survey;
use crate::core::tags::is_collection_wide_eligible;
use crate::core::types::{AudioFile, SemanticTag};

/// What the run does with one selected tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldClassification {
    /// One value written to every file.
    Global(String),
    /// Reviewed file by file.
    PerFile,
    /// Left untouched this run.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ClassificationError {
    #[error("{0} was not selected for this run")]
    NotSelected(SemanticTag),
    #[error("{0} is not collection-wide and can't take a global value")]
    NotEligible(SemanticTag),
    #[error("{0} is already classified")]
    AlreadyClassified(SemanticTag),
}

/// Per-file pass counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunStats {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Global pass counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GlobalStats {
    pub applied: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub(crate) struct BatchRun {
    /// Discovery order (sorted by path). Every pass walks this order.
    pub files: Vec<AudioFile>,
    pub survey: Survey,
    pub stats: RunStats,
    pub global_stats: GlobalStats,

    selected: Vec<SemanticTag>,
    classifications: BTreeMap<SemanticTag, FieldClassification>,
}

impl BatchRun {
    pub(crate) fn new(files: Vec<AudioFile>) -> Self {
        Self {
            files,
            survey: Survey::default(),
            stats: RunStats::default(),
            global_stats: GlobalStats::default(),
            selected: Vec::new(),
            classifications: BTreeMap::new(),
        }
    }

    /// Set the tag selection (duplicates collapse, first one wins).
    /// Clears any earlier classification.
    pub(crate) fn select(&mut self, tags: &[SemanticTag]) {
        self.selected.clear();
        for &tag in tags {
            if !self.selected.contains(&tag) {
                self.selected.push(tag);
            }
        }
        self.classifications.clear();
    }

    pub(crate) fn selected(&self) -> &[SemanticTag] {
        &self.selected
    }

    /// Record the decision for one tag. Each tag is classified once.
    pub(crate) fn classify(
        &mut self,
        tag: SemanticTag,
        classification: FieldClassification,
    ) -> Result<(), ClassificationError> {
        if !self.selected.contains(&tag) {
            return Err(ClassificationError::NotSelected(tag));
        }
        if self.classifications.contains_key(&tag) {
            return Err(ClassificationError::AlreadyClassified(tag));
        }
        if matches!(classification, FieldClassification::Global(_))
            && !is_collection_wide_eligible(tag)
        {
            return Err(ClassificationError::NotEligible(tag));
        }

        self.classifications.insert(tag, classification);
        Ok(())
    }

    pub(crate) fn classification(&self, tag: SemanticTag) -> Option<&FieldClassification> {
        self.classifications.get(&tag)
    }

    /// Global values in selection order.
    pub(crate) fn global_values(&self) -> Vec<(SemanticTag, String)> {
        self.selected
            .iter()
            .filter_map(|tag| match self.classifications.get(tag) {
                Some(FieldClassification::Global(v)) => Some((*tag, v.clone())),
                _ => None,
            })
            .collect()
    }

    /// Per-file tags in selection order.
    pub(crate) fn per_file_tags(&self) -> Vec<SemanticTag> {
        self.selected
            .iter()
            .copied()
            .filter(|tag| {
                matches!(
                    self.classifications.get(tag),
                    Some(FieldClassification::PerFile)
                )
            })
            .collect()
    }
}
