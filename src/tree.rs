//! Navigation tree construction.
//!
//! Mirrors the content directory: every directory becomes a
//! [`NavNode::Composite`] and every content file a [`NavNode::Leaf`]. Sibling
//! lists are sorted with [`ordering::compare`], so within one level pages always
//! come before sub-directories.
//!
//! ## Order resolution
//!
//! | Node | First | Then | Then |
//! |------|-------|------|------|
//! | Leaf | parent sidecar `pages["setup.mdx"]` | parent sidecar `pages["setup"]` | header `order` |
//! | Composite | parent sidecar `pages["advanced"]` | own sidecar `order` | none |
//!
//! A composite's title comes from its own sidecar `title`, else its directory
//! name. Anything that is neither a directory nor a recognized content file
//! (the sidecar itself included) contributes nothing.

use crate::config::IndexConfig;
use crate::content::{self, is_hidden};
use crate::naming;
use crate::ordering::{self, SortKey};
use crate::report::{BuildReport, IndexWarning};
use crate::sidecar::{Sidecar, SidecarResolver, file_order, page_order};
use crate::types::{NavGroup, NavLeaf, NavNode};
use std::path::Path;
use walkdir::WalkDir;

/// Build the navigation tree rooted at `root`.
///
/// A missing root yields an empty tree and a
/// [`IndexWarning::SourceUnavailable`].
pub fn build_tree(
    root: &Path,
    config: &IndexConfig,
    sidecars: &mut SidecarResolver,
    report: &mut BuildReport,
) -> Vec<NavNode> {
    if !root.is_dir() {
        report.push(IndexWarning::SourceUnavailable {
            path: root.to_path_buf(),
            reason: "content root is not a directory".into(),
        });
        return Vec::new();
    }
    build_level(root, Path::new(""), root, config, sidecars, report)
}

/// `rel` is `dir` relative to `root`.
fn build_level(
    dir: &Path,
    rel: &Path,
    root: &Path,
    config: &IndexConfig,
    sidecars: &mut SidecarResolver,
    report: &mut BuildReport,
) -> Vec<NavNode> {
    let dir_sidecar = sidecars.load(dir, report);
    let mut nodes = Vec::new();

    let children = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in children {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.push(IndexWarning::SourceUnavailable {
                    path: e.path().unwrap_or(dir).to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();

        if entry.file_type().is_dir() {
            let parent = dir_sidecar.as_deref();
            let child_rel = rel.join(&name);
            let child = Child {
                path: entry.path(),
                rel: &child_rel,
                name: &name,
            };
            let node = build_group(child, root, parent, config, sidecars, report);
            nodes.push(node);
        } else if name != sidecars.file_name()
            && let Some(stem) = config.content_stem(&name)
        {
            match content::parse_unit(entry.path(), root, config) {
                Ok(unit) => {
                    let order = file_order(dir_sidecar.as_deref(), &name, stem)
                        .or(unit.metadata.order);
                    nodes.push(NavNode::Leaf(NavLeaf {
                        slug: unit.slug,
                        title: unit.title,
                        label: unit.metadata.label,
                        nav_tag: unit.metadata.nav_tag,
                        nav_label: unit.metadata.nav_label,
                        nav_icon: unit.metadata.nav_icon,
                        nav_tag_variant: unit.metadata.nav_tag_variant,
                        keywords: unit.metadata.keywords,
                        order,
                    }));
                }
                Err(warning) => report.push(warning),
            }
        }
    }

    sort_siblings(&mut nodes);
    nodes
}

/// A sub-directory found while walking one level.
struct Child<'a> {
    path: &'a Path,
    rel: &'a Path,
    name: &'a str,
}

fn build_group(
    child: Child<'_>,
    root: &Path,
    parent_sidecar: Option<&Sidecar>,
    config: &IndexConfig,
    sidecars: &mut SidecarResolver,
    report: &mut BuildReport,
) -> NavNode {
    let Child { path, rel, name } = child;
    let children = build_level(path, rel, root, config, sidecars, report);
    let own_sidecar = sidecars.load(path, report);

    let order = page_order(parent_sidecar, name).or_else(|| own_sidecar.as_ref()?.order);
    let title = own_sidecar
        .as_ref()
        .and_then(|s| s.title.clone())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| name.to_string());
    let slug = naming::dir_slug(rel);

    NavNode::Composite(NavGroup {
        slug,
        title,
        order,
        children,
    })
}

/// Sort one sibling list: pages before directories, ordered before unordered,
/// then by order, then by title.
pub fn sort_siblings(nodes: &mut [NavNode]) {
    nodes.sort_by(|a, b| ordering::compare(&sort_key(a), &sort_key(b)));
}

fn sort_key(node: &NavNode) -> SortKey<'_> {
    let key = match node {
        NavNode::Leaf(_) => SortKey::leaf(node.title(), node.slug()),
        NavNode::Composite(_) => SortKey::composite(node.title(), node.slug()),
    };
    key.ranked(node.order())
}
