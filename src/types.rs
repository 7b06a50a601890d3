//! Shared types handed to the presentation layer.
//!
//! These are the shapes the engine produces: content units for flat listings
//! and adjacency, navigation nodes for the sidebar tree. All of them serialize
//! with camelCase keys and omit absent optional fields.

use crate::frontmatter::{Frontmatter, Keywords};
use serde::{Deserialize, Serialize};

/// One addressable document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUnit {
    /// Path relative to the content root, `/`-joined, index collapsed.
    pub slug: String,
    /// Header title, or the file/directory name when the header has none.
    pub title: String,
    /// Source file name, e.g. `setup.mdx`.
    #[serde(skip)]
    pub file_name: String,
    /// Header `order`, else the enclosing sidecar's `pages` entry for the stem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_order: Option<f64>,
    /// Header metadata exactly as parsed.
    pub metadata: Frontmatter,
    /// Document body after the header.
    pub body: String,
}

impl ContentUnit {
    /// File name without its extension; `index` for an index unit.
    pub fn stem(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map_or(self.file_name.as_str(), |(stem, _)| stem)
    }

    pub fn nav_tag(&self) -> Option<&str> {
        self.metadata.nav_tag.as_deref()
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.metadata.updated_at.as_deref()
    }
}

/// Sidebar tree node: a directory with children or a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavNode {
    Composite(NavGroup),
    Leaf(NavLeaf),
}

/// A directory in the sidebar tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavGroup {
    /// Directory path relative to the content root.
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    pub children: Vec<NavNode>,
}

/// A page in the sidebar tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLeaf {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_tag_variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Keywords>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
}

impl NavNode {
    pub fn slug(&self) -> &str {
        match self {
            NavNode::Composite(group) => &group.slug,
            NavNode::Leaf(leaf) => &leaf.slug,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            NavNode::Composite(group) => &group.title,
            NavNode::Leaf(leaf) => &leaf.title,
        }
    }

    pub fn order(&self) -> Option<f64> {
        match self {
            NavNode::Composite(group) => group.order,
            NavNode::Leaf(leaf) => leaf.order,
        }
    }

    pub fn children(&self) -> &[NavNode] {
        match self {
            NavNode::Composite(group) => &group.children,
            NavNode::Leaf(_) => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, NavNode::Leaf(_))
    }
}
