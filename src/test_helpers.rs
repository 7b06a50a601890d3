//! Shared test utilities for the docnav test suite.
//!
//! Provides fixture setup, content-tree builders, panicking lookups and
//! order extractors for units and navigation nodes.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let units = engine_for(tmp.path()).flattened().value;
//!
//! assert_eq!(unit_slugs(&units)[0], "introduction");
//! assert_eq!(find_unit(&units, "pwa-plus").title, "Overview");
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::IndexConfig;
use crate::engine::Engine;
use crate::types::{ContentUnit, NavNode};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// A content file body with a `title` header and optional `order`.
pub fn page(title: &str, order: Option<f64>) -> String {
    match order {
        Some(order) => format!("---\ntitle: {title}\norder: {order}\n---\n"),
        None => format!("---\ntitle: {title}\n---\n"),
    }
}

/// An engine over `root` with default settings.
pub fn engine_for(root: &Path) -> Engine {
    Engine::new(IndexConfig {
        content_root: root.to_string_lossy().into_owned(),
        ..IndexConfig::default()
    })
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a unit by slug. Panics if not found.
pub fn find_unit<'a>(units: &'a [ContentUnit], slug: &str) -> &'a ContentUnit {
    units.iter().find(|u| u.slug == slug).unwrap_or_else(|| {
        let slugs = unit_slugs(units);
        panic!("unit '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a top-level node by slug. Panics if not found.
pub fn find_node<'a>(nodes: &'a [NavNode], slug: &str) -> &'a NavNode {
    nodes.iter().find(|n| n.slug() == slug).unwrap_or_else(|| {
        let slugs = node_slugs(nodes);
        panic!("node '{slug}' not found. Available: {slugs:?}")
    })
}

// =========================================================================
// Extractors
// =========================================================================

pub fn unit_slugs(units: &[ContentUnit]) -> Vec<&str> {
    units.iter().map(|u| u.slug.as_str()).collect()
}

pub fn node_slugs(nodes: &[NavNode]) -> Vec<&str> {
    nodes.iter().map(NavNode::slug).collect()
}

pub fn node_titles(nodes: &[NavNode]) -> Vec<&str> {
    nodes.iter().map(NavNode::title).collect()
}

/// Assert that every leaf precedes every composite, at every level.
pub fn assert_leaves_first(nodes: &[NavNode]) {
    let first_group = nodes.iter().position(|n| !n.is_leaf());
    if let Some(pos) = first_group {
        assert!(
            nodes[pos..].iter().all(|n| !n.is_leaf()),
            "leaf after composite in {:?}",
            node_slugs(nodes)
        );
    }
    for node in nodes {
        assert_leaves_first(node.children());
    }
}
