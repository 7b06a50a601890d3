//! The ordering engine: one comparator behind every list docnav sorts.
//!
//! Sibling nodes in the tree, top-level pages, sections, folders and the pages
//! inside each folder are all ordered by the same cascade:
//!
//! 1. **Kind**: pages ([`EntryKind::Leaf`]) before directories
//!    ([`EntryKind::Composite`]), whatever their order values.
//! 2. **Order presence**: an entry with an order before one without, whatever
//!    the number.
//! 3. **Order value**: ascending.
//! 4. **Name**: [`locale_cmp`], then raw string order.
//!
//! Call sites differ only in where the order numbers come from, so a
//! [`SortKey`] carries up to two order *tiers*. Steps 2–3 are applied to the
//! first tier, then to the second, before falling back to the name. The
//! flattener, for instance, ranks a folder's pages by the folder sidecar first
//! and by each page's own `order` second.
//!
//! A key also carries a unique `id` (the slug) as the last tie-break, which
//! makes the comparator total: two distinct entries never compare equal, so
//! every sort is reproducible regardless of input order.
//!
//! [`SortMode`] names the whole-list orderings offered to callers for flat
//! unit lists.

use crate::naming;
use crate::types::ContentUnit;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Pages sort before directories within one sibling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Leaf,
    Composite,
}

/// Everything the comparator looks at for one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey<'a> {
    pub kind: EntryKind,
    /// Order values by priority; later tiers only break ties of earlier ones.
    pub ranks: [Option<f64>; 2],
    /// Display name used for the alphabetical fallback.
    pub name: &'a str,
    /// Unique identity, compared last.
    pub id: &'a str,
}

impl<'a> SortKey<'a> {
    pub fn leaf(name: &'a str, id: &'a str) -> Self {
        Self {
            kind: EntryKind::Leaf,
            ranks: [None, None],
            name,
            id,
        }
    }

    pub fn composite(name: &'a str, id: &'a str) -> Self {
        Self {
            kind: EntryKind::Composite,
            ..Self::leaf(name, id)
        }
    }

    pub fn ranked(mut self, primary: Option<f64>) -> Self {
        self.ranks[0] = primary;
        self
    }

    pub fn then_ranked(mut self, secondary: Option<f64>) -> Self {
        self.ranks[1] = secondary;
        self
    }
}

/// Compare two entries with the full cascade.
pub fn compare(a: &SortKey, b: &SortKey) -> Ordering {
    a.kind
        .cmp(&b.kind)
        .then_with(|| compare_rank(a.ranks[0], b.ranks[0]))
        .then_with(|| compare_rank(a.ranks[1], b.ranks[1]))
        .then_with(|| locale_cmp(a.name, b.name))
        .then_with(|| a.id.cmp(b.id))
}

/// Present before absent; two present values ascending.
pub fn compare_rank(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Human-facing string order.
///
/// Letters compare case-insensitively first ("apple" < "Banana" < "cherry");
/// strings that differ only in case put lowercase first ("a" < "A"); anything
/// still equal falls back to code-point order so the result is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    folded(a)
        .cmp(folded(b))
        .then_with(|| {
            let upper = |s: &str| s.chars().map(char::is_uppercase).collect::<Vec<_>>();
            upper(a).cmp(&upper(b))
        })
        .then_with(|| a.cmp(b))
}

/// Named orderings for flat lists of content units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Explicit order first, then slug.
    #[default]
    Order,
    /// Title only; order values are ignored.
    Alphabetical,
    /// Newest `updatedAt` first; missing or unparsable dates last.
    Date,
    /// Top-level segment, then explicit order, then title.
    Section,
}

/// Compare two units under a named mode.
pub fn compare_units(a: &ContentUnit, b: &ContentUnit, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Order => compare(
            &SortKey::leaf(&a.slug, &a.slug).ranked(a.explicit_order),
            &SortKey::leaf(&b.slug, &b.slug).ranked(b.explicit_order),
        ),
        SortMode::Alphabetical => compare(
            &SortKey::leaf(&a.title, &a.slug),
            &SortKey::leaf(&b.title, &b.slug),
        ),
        SortMode::Date => timestamp(b)
            .cmp(&timestamp(a))
            .then_with(|| a.slug.cmp(&b.slug)),
        SortMode::Section => {
            locale_cmp(naming::top_segment(&a.slug), naming::top_segment(&b.slug)).then_with(
                || {
                    compare(
                        &SortKey::leaf(&a.title, &a.slug).ranked(a.explicit_order),
                        &SortKey::leaf(&b.title, &b.slug).ranked(b.explicit_order),
                    )
                },
            )
        }
    }
}

/// Sort units in place under a named mode.
pub fn sort_units(units: &mut [ContentUnit], mode: SortMode) {
    units.sort_by(|a, b| compare_units(a, b, mode));
}

/// `updatedAt` as milliseconds since the epoch; `i64::MIN` when missing or
/// unparsable, so such units sort as the oldest.
fn timestamp(unit: &ContentUnit) -> i64 {
    unit.updated_at()
        .and_then(parse_timestamp)
        .unwrap_or(i64::MIN)
}

/// Parse the date formats found in content headers.
///
/// Accepts RFC 3339 (`2024-03-01T10:00:00Z`), a bare date (`2024-03-01`,
/// midnight UTC), and a naive date-time with `T` or a space separator (UTC).
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::Frontmatter;

    fn unit(slug: &str, title: &str, order: Option<f64>, updated: Option<&str>) -> ContentUnit {
        ContentUnit {
            slug: slug.into(),
            title: title.into(),
            file_name: format!("{}.mdx", naming::last_segment(slug)),
            explicit_order: order,
            metadata: Frontmatter {
                updated_at: updated.map(String::from),
                ..Frontmatter::default()
            },
            body: String::new(),
        }
    }

    fn slugs(units: &[ContentUnit]) -> Vec<&str> {
        units.iter().map(|u| u.slug.as_str()).collect()
    }

    // =========================================================================
    // Cascade
    // =========================================================================

    #[test]
    fn leaf_before_composite_regardless_of_order() {
        let page = SortKey::leaf("zeta", "zeta");
        let dir = SortKey::composite("alpha", "alpha").ranked(Some(-100.0));
        assert_eq!(compare(&page, &dir), Ordering::Less);
        assert_eq!(compare(&dir, &page), Ordering::Greater);
    }

    #[test]
    fn ordered_before_unordered_regardless_of_value() {
        let ordered = SortKey::leaf("zeta", "zeta").ranked(Some(9999.0));
        let unordered = SortKey::leaf("alpha", "alpha");
        assert_eq!(compare(&ordered, &unordered), Ordering::Less);
    }

    #[test]
    fn numeric_ascending() {
        let a = SortKey::leaf("a", "a").ranked(Some(10.0));
        let b = SortKey::leaf("b", "b").ranked(Some(2.0));
        assert_eq!(compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn negative_and_fractional_orders() {
        let a = SortKey::leaf("a", "a").ranked(Some(-1.0));
        let b = SortKey::leaf("b", "b").ranked(Some(0.5));
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn second_tier_breaks_first_tier_absence() {
        let a = SortKey::leaf("a", "a").then_ranked(Some(2.0));
        let b = SortKey::leaf("b", "b").then_ranked(Some(1.0));
        assert_eq!(compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn first_tier_beats_second_tier() {
        let a = SortKey::leaf("a", "a").then_ranked(Some(1.0));
        let b = SortKey::leaf("b", "b").ranked(Some(50.0));
        assert_eq!(compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn equal_first_tier_falls_through() {
        let a = SortKey::leaf("a", "a").ranked(Some(1.0)).then_ranked(Some(5.0));
        let b = SortKey::leaf("b", "b").ranked(Some(1.0)).then_ranked(Some(3.0));
        assert_eq!(compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn name_fallback_then_id() {
        let a = SortKey::leaf("Setup", "x/setup");
        let b = SortKey::leaf("setup", "a/setup");
        // lowercase first among case-only differences
        assert_eq!(compare(&a, &b), Ordering::Greater);

        let c = SortKey::leaf("Setup", "b/setup");
        let d = SortKey::leaf("Setup", "a/setup");
        assert_eq!(compare(&c, &d), Ordering::Greater);
    }

    #[test]
    fn comparator_is_total_and_sorting_is_idempotent() {
        let names = ["beta", "Alpha", "alpha", "gamma", "Beta", "delta"];
        let mut keys: Vec<SortKey> = names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let order = if i % 2 == 0 { Some(1.0) } else { None };
                SortKey::leaf(n, n).ranked(order)
            })
            .collect();
        keys.sort_by(compare);
        let once: Vec<&str> = keys.iter().map(|k| k.id).collect();

        keys.reverse();
        keys.sort_by(compare);
        let twice: Vec<&str> = keys.iter().map(|k| k.id).collect();
        assert_eq!(once, twice);

        for a in &keys {
            for b in &keys {
                if a.id != b.id {
                    assert_ne!(compare(a, b), Ordering::Equal);
                }
            }
        }
    }

    // =========================================================================
    // locale_cmp
    // =========================================================================

    #[test]
    fn locale_cmp_is_case_insensitive_first() {
        let mut words = vec!["cherry", "Banana", "apple"];
        words.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(words, vec!["apple", "Banana", "cherry"]);
    }

    #[test]
    fn locale_cmp_lowercase_first_on_case_ties() {
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Intro", "intro"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn locale_cmp_prefix_first() {
        assert_eq!(locale_cmp("guide", "Guides"), Ordering::Less);
    }

    // =========================================================================
    // Sort modes
    // =========================================================================

    #[test]
    fn order_mode_falls_back_to_slug() {
        let mut units = vec![
            unit("b", "Alpha", None, None),
            unit("c", "Gamma", Some(2.0), None),
            unit("a", "Zulu", None, None),
            unit("d", "Delta", Some(1.0), None),
        ];
        sort_units(&mut units, SortMode::Order);
        assert_eq!(slugs(&units), vec!["d", "c", "a", "b"]);
    }

    #[test]
    fn alphabetical_mode_ignores_order() {
        let mut units = vec![
            unit("a", "Zulu", Some(1.0), None),
            unit("b", "alpha", None, None),
            unit("c", "Mike", Some(2.0), None),
        ];
        sort_units(&mut units, SortMode::Alphabetical);
        assert_eq!(slugs(&units), vec!["b", "c", "a"]);
    }

    #[test]
    fn date_mode_newest_first_missing_last() {
        let mut units = vec![
            unit("old", "Old", None, Some("2023-01-01")),
            unit("none", "None", None, None),
            unit("new", "New", None, Some("2024-06-01T12:00:00Z")),
            unit("junk", "Junk", None, Some("last tuesday")),
            unit("mid", "Mid", None, Some("2023-07-15 08:30:00")),
        ];
        sort_units(&mut units, SortMode::Date);
        assert_eq!(slugs(&units), vec!["new", "mid", "old", "junk", "none"]);
    }

    #[test]
    fn section_mode_groups_by_segment_then_order_then_title() {
        let mut units = vec![
            unit("guides/zeta", "Zeta", None, None),
            unit("api/b", "Bravo", None, None),
            unit("guides/alpha", "Alpha", None, None),
            unit("guides/setup", "Setup", Some(1.0), None),
            unit("api/a", "Charlie", None, None),
        ];
        sort_units(&mut units, SortMode::Section);
        assert_eq!(
            slugs(&units),
            vec!["api/b", "api/a", "guides/setup", "guides/alpha", "guides/zeta"]
        );
    }

    #[test]
    fn sort_mode_parses_lowercase() {
        let mode: SortMode = serde_json::from_str("\"alphabetical\"").unwrap();
        assert_eq!(mode, SortMode::Alphabetical);
        assert_eq!(SortMode::default(), SortMode::Order);
    }

    #[test]
    fn parse_timestamp_formats() {
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp("1970-01-01T00:00:01Z"), Some(1000));
        assert_eq!(parse_timestamp("1970-01-01T01:00:00+01:00"), Some(0));
        assert_eq!(parse_timestamp("1970-01-01 00:01:00"), Some(60_000));
        assert_eq!(parse_timestamp("March 3rd"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
