//! The flattened sidebar sequence and previous/next lookup.
//!
//! The tree alone does not say how loose top-level pages interleave with whole
//! sections, so the sequence a reader walks through is rebuilt from the flat
//! unit list:
//!
//! ```text
//! introduction            ┐ top-level pages, by root sidecar, then title
//! quick-start             ┘
//! pwa-plus                ┐ section "pwa-plus": its index and direct pages,
//! pwa-plus/setup          ┘ by the section sidecar
//! pwa-plus/advanced/...     folder "advanced", placed by the section sidecar's
//!                           `folders`, pages by advanced/meta.json
//! components/...            next section, by root sidecar `pages`
//! ```
//!
//! A top-level unit is a *section index* when the root sidecar lists its slug
//! in `pages` and some other unit lives below it. Section indexes open their
//! section instead of appearing among the top-level pages.

use crate::naming;
use crate::ordering::{self, SortKey};
use crate::report::{BuildReport, IndexWarning};
use crate::sidecar::{Sidecar, SidecarResolver, file_order, page_order};
use crate::types::ContentUnit;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// The neighbours of one unit in the flattened sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Adjacent {
    pub previous: Option<ContentUnit>,
    pub next: Option<ContentUnit>,
}

/// One section's units, bucketed into folders. The unlabeled folder (`""`)
/// holds the index and the direct pages.
type Folders = BTreeMap<String, Vec<ContentUnit>>;

/// Arrange `units` into the sidebar's top-to-bottom order.
///
/// `root` is the content root; sidecars are read through `sidecars`, so a
/// broken one degrades ordering to the next rule and lands in `report`.
pub fn flatten(
    units: Vec<ContentUnit>,
    root: &Path,
    sidecars: &mut SidecarResolver,
    report: &mut BuildReport,
) -> Vec<ContentUnit> {
    let root_sidecar = sidecars.load(root, report);
    let root_sidecar = root_sidecar.as_deref();

    let section_indexes: Vec<bool> = units
        .iter()
        .map(|u| is_section_index(u, &units, root_sidecar))
        .collect();

    let mut top_level = Vec::new();
    let mut sections: BTreeMap<String, Folders> = BTreeMap::new();
    for (unit, section_index) in units.into_iter().zip(section_indexes) {
        if naming::depth(&unit.slug) == 0 && !section_index {
            top_level.push(unit);
            continue;
        }
        let section = naming::top_segment(&unit.slug).to_string();
        let folder = match unit.slug.split('/').nth(1) {
            Some(folder) if naming::depth(&unit.slug) > 1 => folder.to_string(),
            _ => String::new(),
        };
        sections
            .entry(section)
            .or_default()
            .entry(folder)
            .or_default()
            .push(unit);
    }

    top_level.sort_by(|a, b| compare_pages(a, b, root_sidecar, None));
    let mut sequence = top_level;

    let mut ordered: Vec<(String, Folders)> = sections.into_iter().collect();
    ordered.sort_by(|(a, _), (b, _)| {
        compare_groups(a, b, |name| page_order(root_sidecar, name))
    });

    for (section, folders) in ordered {
        let section_dir = root.join(&section);
        let section_sidecar = sidecars.load(&section_dir, report);

        let mut folders: Vec<(String, Vec<ContentUnit>)> = folders.into_iter().collect();
        folders.sort_by(|(a, _), (b, _)| match (a.is_empty(), b.is_empty()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => compare_groups(a, b, |name| section_sidecar.as_ref()?.folder_order(name)),
        });

        for (folder, mut pages) in folders {
            let folder_sidecar = if folder.is_empty() {
                section_sidecar.clone()
            } else {
                sidecars.load(&section_dir.join(&folder), report)
            };
            let sidecar = folder_sidecar.as_deref();
            pages.sort_by(|a, b| compare_pages(a, b, sidecar, Some(section.as_str())));
            sequence.extend(pages);
        }
    }

    debug!("Flattened {} units under {}", sequence.len(), root.display());
    sequence
}

fn is_section_index(unit: &ContentUnit, units: &[ContentUnit], root: Option<&Sidecar>) -> bool {
    if naming::depth(&unit.slug) != 0 || page_order(root, &unit.slug).is_none() {
        return false;
    }
    let prefix = format!("{}/", unit.slug);
    units.iter().any(|other| other.slug.starts_with(&prefix))
}

/// Pages: the governing sidecar's entry, then title. Inside a section the
/// unit's own order sits between the two; top-level pages ignore it.
///
/// Inside a section, the section's own index is listed under `index`.
fn compare_pages(
    a: &ContentUnit,
    b: &ContentUnit,
    sidecar: Option<&Sidecar>,
    section: Option<&str>,
) -> Ordering {
    let key = |u: &ContentUnit| {
        let own = section.and(u.explicit_order);
        (listed_order(u, sidecar, section), own)
    };
    let (a_listed, a_own) = key(a);
    let (b_listed, b_own) = key(b);
    ordering::compare(
        &SortKey::leaf(&a.title, &a.slug)
            .ranked(a_listed)
            .then_ranked(a_own),
        &SortKey::leaf(&b.title, &b.slug)
            .ranked(b_listed)
            .then_ranked(b_own),
    )
}

/// A unit's entry in the governing sidecar, keyed by the last slug segment.
///
/// The exact file name is tried first unless the unit comes from an index
/// file.
fn listed_order(
    unit: &ContentUnit,
    sidecar: Option<&Sidecar>,
    section: Option<&str>,
) -> Option<f64> {
    if section == Some(unit.slug.as_str())
        && let Some(order) = page_order(sidecar, "index")
    {
        return Some(order);
    }
    let name = naming::last_segment(&unit.slug);
    if unit.stem() == name {
        file_order(sidecar, &unit.file_name, name)
    } else {
        page_order(sidecar, name)
    }
}

/// Sections and folders: a sidecar entry, then the name.
fn compare_groups(a: &str, b: &str, order_of: impl Fn(&str) -> Option<f64>) -> Ordering {
    ordering::compare(
        &SortKey::composite(a, a).ranked(order_of(a)),
        &SortKey::composite(b, b).ranked(order_of(b)),
    )
}

/// The units immediately before and after `slug` in `sequence`.
pub fn adjacent(sequence: &[ContentUnit], slug: &str) -> Result<Adjacent, IndexWarning> {
    let position = sequence
        .iter()
        .position(|u| u.slug == slug)
        .ok_or_else(|| IndexWarning::NotFound { slug: slug.into() })?;

    Ok(Adjacent {
        previous: position
            .checked_sub(1)
            .and_then(|i| sequence.get(i))
            .cloned(),
        next: sequence.get(position + 1).cloned(),
    })
}
