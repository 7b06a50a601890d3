//! Content unit discovery.
//!
//! Walks the content root and turns every file with a recognized extension into
//! a [`ContentUnit`]:
//!
//! ```text
//! src/content/
//! ├── meta.json                    # root sidecar (orders top-level pages and sections)
//! ├── introduction.mdx             → introduction
//! ├── pwa-plus/
//! │   ├── meta.json                # section sidecar
//! │   ├── index.mdx                → pwa-plus           (index collapses onto its directory)
//! │   ├── setup.mdx                → pwa-plus/setup
//! │   └── advanced/
//! │       └── caching.mdx          → pwa-plus/advanced/caching
//! └── .drafts/                     # hidden: skipped
//! ```
//!
//! ## Permissive loading
//!
//! One bad file must never take the index down. A missing root yields no units;
//! an unreadable directory or file, or a file with a malformed header, is
//! skipped. Each case is recorded in the [`BuildReport`].
//!
//! ## Explicit order
//!
//! A unit's `explicit_order` is its header `order` when present, otherwise the
//! entry for its file name (`setup.mdx`, then `setup`) in the enclosing
//! directory's sidecar `pages`.
//!
//! ## Duplicate slugs
//!
//! `foo.mdx` and `foo/index.mdx` both claim the slug `foo`. The walk is sorted
//! by file name, so the first claimant is deterministic; it is kept and every
//! later one is skipped with a [`IndexWarning::DuplicateSlug`].

use crate::config::IndexConfig;
use crate::frontmatter::{self, HeaderError};
use crate::naming;
use crate::report::{BuildReport, IndexWarning};
use crate::sidecar::{self, SidecarResolver};
use crate::types::ContentUnit;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Whether a walk entry is hidden (dot-prefixed). The root itself never is.
pub(crate) fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Parse one content file into a unit.
///
/// `explicit_order` holds only the header order here; sidecar fallback is the
/// caller's job because it depends on the directory being walked.
pub fn parse_unit(
    path: &Path,
    root: &Path,
    config: &IndexConfig,
) -> Result<ContentUnit, IndexWarning> {
    let malformed = |reason: String| IndexWarning::MetadataParse {
        path: path.to_path_buf(),
        reason,
    };

    let rel = path
        .strip_prefix(root)
        .map_err(|_| malformed(format!("not under content root {}", root.display())))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = config
        .content_stem(&file_name)
        .ok_or_else(|| malformed("not a recognized content file".into()))?;

    let content = fs::read_to_string(path).map_err(|e| IndexWarning::SourceUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let (metadata, body) =
        frontmatter::split(&content).map_err(|e: HeaderError| malformed(e.to_string()))?;

    let fallback = naming::fallback_title(rel, stem, &config.index_stem);
    let title =
        frontmatter::resolve(&[metadata.title.as_deref(), Some(&fallback)]).unwrap_or(fallback);

    Ok(ContentUnit {
        slug: naming::slug_for(rel, stem, &config.index_stem),
        title,
        file_name: file_name.clone(),
        explicit_order: metadata.order,
        body: body.to_string(),
        metadata,
    })
}

/// Load every content unit under `root`, in file-name walk order.
pub fn load_units(
    root: &Path,
    config: &IndexConfig,
    sidecars: &mut SidecarResolver,
    report: &mut BuildReport,
) -> Vec<ContentUnit> {
    if let Err(e) = fs::read_dir(root) {
        report.push(IndexWarning::SourceUnavailable {
            path: root.to_path_buf(),
            reason: e.to_string(),
        });
        return Vec::new();
    }

    let mut units = Vec::new();
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.push(IndexWarning::SourceUnavailable {
                    path: e.path().unwrap_or(root).to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if file_name == sidecars.file_name() {
            continue;
        }
        let Some(stem) = config.content_stem(&file_name) else {
            continue;
        };

        let mut unit = match parse_unit(entry.path(), root, config) {
            Ok(unit) => unit,
            Err(warning) => {
                report.push(warning);
                continue;
            }
        };
        if unit.explicit_order.is_none() {
            let dir = entry.path().parent().unwrap_or(root);
            let dir_sidecar = sidecars.load(dir, report);
            unit.explicit_order = sidecar::file_order(dir_sidecar.as_deref(), &file_name, stem);
        }

        match claimed.entry(unit.slug.clone()) {
            Entry::Occupied(first) => report.push(IndexWarning::DuplicateSlug {
                slug: unit.slug,
                kept: first.get().clone(),
                skipped: entry.path().to_path_buf(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(entry.path().to_path_buf());
                units.push(unit);
            }
        }
    }

    debug!("Loaded {} content units from {}", units.len(), root.display());
    units
}
