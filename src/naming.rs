//! Slug and fallback-title derivation from content paths.
//!
//! Every content unit is addressed by its path relative to the content root:
//! extension removed, separators normalized to `/`, and a terminal index stem
//! collapsed onto its directory:
//!
//! - `getting-started.mdx` → `getting-started`
//! - `guides/setup.mdx` → `guides/setup`
//! - `guides/index.mdx` → `guides`
//! - `index.mdx` → `index` (nothing to collapse onto at the root)
//!
//! Titles fall back to the last path component when a file has none: the stem
//! for ordinary files, the directory name for index files.

use std::path::{Component, Path};

/// Relative path components as strings, ignoring `.` and any root prefix.
fn segments(rel: &Path) -> Vec<String> {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Derive the slug for a content file.
///
/// `rel` is the file's path relative to the content root and `stem` its file
/// name without the content extension (the extension is supplied by the caller,
/// which already knows which ones are recognized).
pub fn slug_for(rel: &Path, stem: &str, index_stem: &str) -> String {
    let mut parts = segments(rel);
    parts.pop();
    if stem != index_stem || parts.is_empty() {
        parts.push(stem.to_string());
    }
    parts.join("/")
}

/// Title used when a content file's metadata has none.
pub fn fallback_title(rel: &Path, stem: &str, index_stem: &str) -> String {
    if stem == index_stem {
        let parts = segments(rel);
        if parts.len() >= 2 {
            return parts[parts.len() - 2].clone();
        }
    }
    stem.to_string()
}

/// Slash-joined path of a directory relative to the content root.
pub fn dir_slug(rel: &Path) -> String {
    segments(rel).join("/")
}

/// First `/`-separated segment of a slug.
pub fn top_segment(slug: &str) -> &str {
    slug.split('/').next().unwrap_or(slug)
}

/// Last `/`-separated segment of a slug.
pub fn last_segment(slug: &str) -> &str {
    slug.rsplit('/').next().unwrap_or(slug)
}

/// Number of `/` separators in a slug.
pub fn depth(slug: &str) -> usize {
    slug.matches('/').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn top_level_file() {
        assert_eq!(
            slug_for(Path::new("getting-started.mdx"), "getting-started", "index"),
            "getting-started"
        );
    }

    #[test]
    fn nested_file() {
        assert_eq!(
            slug_for(Path::new("guides/advanced/caching.mdx"), "caching", "index"),
            "guides/advanced/caching"
        );
    }

    #[test]
    fn index_collapses_onto_directory() {
        assert_eq!(slug_for(Path::new("foo/index.mdx"), "index", "index"), "foo");
        assert_eq!(
            slug_for(Path::new("foo/bar/index.mdx"), "index", "index"),
            "foo/bar"
        );
    }

    #[test]
    fn root_index_keeps_its_name() {
        assert_eq!(slug_for(Path::new("index.mdx"), "index", "index"), "index");
    }

    #[test]
    fn custom_index_stem() {
        assert_eq!(slug_for(Path::new("foo/README.md"), "README", "README"), "foo");
        assert_eq!(slug_for(Path::new("foo/index.md"), "index", "README"), "foo/index");
    }

    #[test]
    fn platform_separators_normalized() {
        let rel: PathBuf = ["guides", "setup.mdx"].iter().collect();
        assert_eq!(slug_for(&rel, "setup", "index"), "guides/setup");
    }

    #[test]
    fn dotted_stem_preserved() {
        assert_eq!(
            slug_for(Path::new("release/v1.2.mdx"), "v1.2", "index"),
            "release/v1.2"
        );
    }

    #[test]
    fn fallback_title_is_stem() {
        assert_eq!(
            fallback_title(Path::new("guides/setup.mdx"), "setup", "index"),
            "setup"
        );
    }

    #[test]
    fn fallback_title_for_index_is_directory() {
        assert_eq!(
            fallback_title(Path::new("guides/index.mdx"), "index", "index"),
            "guides"
        );
        assert_eq!(fallback_title(Path::new("index.mdx"), "index", "index"), "index");
    }

    #[test]
    fn segment_helpers() {
        assert_eq!(top_segment("guides/advanced/caching"), "guides");
        assert_eq!(top_segment("changelog"), "changelog");
        assert_eq!(last_segment("guides/advanced/caching"), "caching");
        assert_eq!(last_segment("changelog"), "changelog");
        assert_eq!(depth("changelog"), 0);
        assert_eq!(depth("guides/advanced/caching"), 2);
    }

    #[test]
    fn dir_slug_joins_components() {
        let rel: PathBuf = ["guides", "advanced"].iter().collect();
        assert_eq!(dir_slug(&rel), "guides/advanced");
        assert_eq!(dir_slug(Path::new("")), "");
    }
}
