//! Section aggregation: units grouped by their first slug segment.
//!
//! Every top-level unit forms a section of its own, so `introduction` and
//! `pwa-plus/setup` land in sections `introduction` and `pwa-plus`. Groups are
//! placed by the root sidecar's `sections` mapping, then its `pages` mapping,
//! then by name. Units inside a group follow the caller's [`SortMode`].

use crate::naming;
use crate::ordering::{self, SortKey, SortMode};
use crate::sidecar::{Sidecar, page_order};
use crate::types::ContentUnit;
use serde::Serialize;
use std::collections::BTreeMap;

/// One section and its ordered units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub section: String,
    pub units: Vec<ContentUnit>,
}

pub fn aggregate(units: Vec<ContentUnit>, root: Option<&Sidecar>, mode: SortMode) -> Vec<Section> {
    let mut groups: BTreeMap<String, Vec<ContentUnit>> = BTreeMap::new();
    for unit in units {
        let section = naming::top_segment(&unit.slug).to_string();
        groups.entry(section).or_default().push(unit);
    }

    let mut sections: Vec<Section> = groups
        .into_iter()
        .map(|(section, mut units)| {
            ordering::sort_units(&mut units, mode);
            Section { section, units }
        })
        .collect();

    let key = |name: &str| {
        let section = root.and_then(|r| r.section_order(name));
        (section, page_order(root, name))
    };
    sections.sort_by(|a, b| {
        let (a_section, a_page) = key(&a.section);
        let (b_section, b_page) = key(&b.section);
        ordering::compare(
            &SortKey::composite(&a.section, &a.section)
                .ranked(a_section)
                .then_ranked(a_page),
            &SortKey::composite(&b.section, &b.section)
                .ranked(b_section)
                .then_ranked(b_page),
        )
    });
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;
    use crate::content::load_units;
    use crate::report::BuildReport;
    use crate::sidecar::SidecarResolver;
    use crate::test_helpers::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn sections_of(root: &Path, mode: SortMode) -> Vec<Section> {
        let config = IndexConfig::default();
        let mut sidecars = SidecarResolver::new(&config.sidecar_file);
        let mut report = BuildReport::new();
        let units = load_units(root, &config, &mut sidecars, &mut report);
        let root_sidecar = sidecars.load(root, &mut report);
        aggregate(units, root_sidecar.as_deref(), mode)
    }

    fn names(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.section.as_str()).collect()
    }

    #[test]
    fn fixture_sections_in_sidecar_order() {
        let tmp = setup_fixtures();
        let sections = sections_of(tmp.path(), SortMode::Order);

        assert_eq!(
            names(&sections),
            vec![
                "pwa-plus",
                "components",
                "introduction",
                "quick-start",
                "changelog",
                "roadmap"
            ]
        );
    }

    #[test]
    fn units_sorted_by_mode_within_section() {
        let tmp = setup_fixtures();
        let sections = sections_of(tmp.path(), SortMode::Order);
        let components = sections.iter().find(|s| s.section == "components").unwrap();

        assert_eq!(
            unit_slugs(&components.units),
            vec![
                "components/card",
                "components/forms/select",
                "components/button",
                "components/forms/input",
                "components/accordion"
            ]
        );

        let sections = sections_of(tmp.path(), SortMode::Alphabetical);
        let components = sections.iter().find(|s| s.section == "components").unwrap();
        assert_eq!(components.units[0].title, "Accordion");
    }

    #[test]
    fn without_sidecar_sections_sort_by_name() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "zeta/a.mdx", "");
        write_file(tmp.path(), "Alpha/b.mdx", "");
        write_file(tmp.path(), "beta.mdx", "");
        let sections = sections_of(tmp.path(), SortMode::Order);

        assert_eq!(names(&sections), vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn sections_mapping_beats_pages_mapping() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "meta.json",
            r#"{"pages": {"a": 1}, "sections": {"b": 5}}"#,
        );
        write_file(tmp.path(), "a/x.mdx", "");
        write_file(tmp.path(), "b/x.mdx", "");
        write_file(tmp.path(), "c/x.mdx", "");
        let sections = sections_of(tmp.path(), SortMode::Order);

        assert_eq!(names(&sections), vec!["b", "a", "c"]);
    }

    #[test]
    fn empty_source_yields_no_sections() {
        let tmp = TempDir::new().unwrap();
        assert!(sections_of(tmp.path(), SortMode::Order).is_empty());
        assert!(aggregate(Vec::new(), None, SortMode::Date).is_empty());
    }
}
