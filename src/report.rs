//! Build reports: the non-fatal problems found while indexing.
//!
//! Indexing never fails as a whole. A missing directory, a broken sidecar or a
//! content file with an unreadable header each degrade one part of the result
//! and are recorded here instead of aborting the build. Every entry point hands
//! back an [`Indexed`] value: the result plus the [`BuildReport`] collected while
//! producing it, so callers (and tests) can tell a clean build from a degraded
//! one without scraping logs.
//!
//! Warnings are also logged through `tracing` at the moment they are recorded.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// One contained problem encountered during a build.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndexWarning {
    /// The content root or a sub-directory could not be read.
    #[error("content source unavailable: {}: {reason}", .path.display())]
    SourceUnavailable { path: PathBuf, reason: String },
    /// A sidecar or a content metadata header could not be read or parsed.
    #[error("malformed metadata in {}: {reason}", .path.display())]
    MetadataParse { path: PathBuf, reason: String },
    /// Two content files resolved to the same slug; the first one was kept.
    #[error("duplicate slug '{slug}': kept {}, skipped {}", .kept.display(), .skipped.display())]
    DuplicateSlug {
        slug: String,
        kept: PathBuf,
        skipped: PathBuf,
    },
    /// An adjacency query named a slug that is not in the sidebar sequence.
    #[error("no content unit with slug '{slug}'")]
    NotFound { slug: String },
}

/// Warnings accumulated over one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    warnings: Vec<IndexWarning>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    ///
    /// Unknown-slug lookups are routine for callers probing arbitrary pages, so
    /// they are logged at debug level; everything else is a content problem.
    pub fn push(&mut self, warning: IndexWarning) {
        match &warning {
            IndexWarning::NotFound { .. } => debug!("{warning}"),
            _ => warn!("{warning}"),
        }
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[IndexWarning] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Merge another build's warnings, skipping ones already recorded.
    ///
    /// They were logged when first pushed, so nothing is logged again.
    pub fn absorb(&mut self, other: BuildReport) {
        for warning in other.warnings {
            if !self.warnings.contains(&warning) {
                self.warnings.push(warning);
            }
        }
    }

    /// Whether two content files collided on a slug.
    pub fn has_duplicate_slugs(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, IndexWarning::DuplicateSlug { .. }))
    }
}

/// A build result together with the warnings collected while producing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indexed<T> {
    pub value: T,
    pub report: BuildReport,
}

impl<T> Indexed<T> {
    pub fn new(value: T, report: BuildReport) -> Self {
        Self { value, report }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Indexed<U> {
        Indexed {
            value: f(self.value),
            report: self.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_report_is_clean() {
        let report = BuildReport::new();
        assert!(report.is_clean());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn push_records_warning() {
        let mut report = BuildReport::new();
        report.push(IndexWarning::MetadataParse {
            path: PathBuf::from("guides/meta.json"),
            reason: "expected value at line 1 column 1".into(),
        });
        assert!(!report.is_clean());
        assert_eq!(report.len(), 1);
        assert!(!report.has_duplicate_slugs());
    }

    #[test]
    fn absorb_skips_repeats() {
        let missing = IndexWarning::NotFound { slug: "a".into() };
        let mut first = BuildReport::new();
        first.push(missing.clone());
        let mut second = BuildReport::new();
        second.push(missing);
        second.push(IndexWarning::NotFound { slug: "b".into() });

        first.absorb(second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn detects_duplicate_slugs() {
        let mut report = BuildReport::new();
        report.push(IndexWarning::DuplicateSlug {
            slug: "guides".into(),
            kept: PathBuf::from("guides/index.mdx"),
            skipped: PathBuf::from("guides.mdx"),
        });
        assert!(report.has_duplicate_slugs());
    }

    #[test]
    fn warning_messages_name_the_path() {
        let warning = IndexWarning::SourceUnavailable {
            path: PathBuf::from("src/content"),
            reason: "No such file or directory".into(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("src/content"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn warnings_serialize_with_kind_tag() {
        let warning = IndexWarning::NotFound {
            slug: "missing".into(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "not_found");
        assert_eq!(json["slug"], "missing");
    }

    #[test]
    fn indexed_map_keeps_report() {
        let mut report = BuildReport::new();
        report.push(IndexWarning::NotFound { slug: "x".into() });
        let indexed = Indexed::new(vec![1, 2, 3], report).map(|v| v.len());
        assert_eq!(indexed.value, 3);
        assert_eq!(indexed.report.len(), 1);
    }
}
