//! Run completion: the point where a finished run's report gets tagged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TaggerConfig;
use crate::tagger::{ClassTagger, DerivedTags};
use crate::types::Report;

/// Anything that can report which classes were applied during a run.
///
/// Returns `None` when the class list is unavailable, e.g. the catalog
/// does not carry one.
pub trait ClassSource {
    fn applied_classes(&self) -> Option<Vec<String>>;
}

impl ClassSource for [String] {
    fn applied_classes(&self) -> Option<Vec<String>> {
        Some(self.to_vec())
    }
}

impl ClassSource for Vec<String> {
    fn applied_classes(&self) -> Option<Vec<String>> {
        self.as_slice().applied_classes()
    }
}

/// A compiled catalog as handed back by the host after application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// `None` when the host's catalog format has no class list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<String>>,
}

impl ClassSource for Catalog {
    fn applied_classes(&self) -> Option<Vec<String>> {
        self.classes.clone()
    }
}

/// Why tagging did not happen for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Tagging is switched off in [`TaggerConfig`]
    Disabled,
    /// No class source was supplied, or it could not produce a class list
    MissingClassList,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Disabled => f.write_str("class tagging disabled"),
            SkipReason::MissingClassList => f.write_str("applied class list unavailable"),
        }
    }
}

/// Result of finishing a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    Tagged(DerivedTags),
    Skipped(SkipReason),
}

impl TagOutcome {
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        matches!(self, TagOutcome::Tagged(_))
    }
}

/// Hook called once per run after catalog application, before the report
/// is serialized.
#[derive(Debug, Clone, Default)]
pub struct RunCompletion {
    tagger: ClassTagger,
}

impl RunCompletion {
    #[must_use]
    pub fn new(config: TaggerConfig) -> Self {
        Self {
            tagger: ClassTagger::new(config),
        }
    }

    #[must_use]
    pub fn tagger(&self) -> &ClassTagger {
        &self.tagger
    }

    /// Tags `report` with the classes from `source`.
    ///
    /// Never fails: a missing class list is logged as a warning and the
    /// report is returned to the host without derived tags.
    pub fn finish(&self, report: &mut Report, source: Option<&dyn ClassSource>) -> TagOutcome {
        if !self.tagger.config().enabled {
            return TagOutcome::Skipped(SkipReason::Disabled);
        }

        let Some(classes) = source.and_then(ClassSource::applied_classes) else {
            tracing::warn!(
                host = %report.host,
                reason = %SkipReason::MissingClassList,
                "class source interface not found, could not extract classes for the report",
            );
            return TagOutcome::Skipped(SkipReason::MissingClassList);
        };

        TagOutcome::Tagged(self.tagger.tag_report(report, &classes))
    }
}
