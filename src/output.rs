//! CLI output formatting for every query.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (group, page, section) is its semantic identity: title and
//! positional index. The slug and ordering details follow as indented context
//! lines, so the output reads as a sidebar inventory while still letting users
//! trace each entry back to a file.
//!
//! # Output Format
//!
//! ## Tree
//!
//! ```text
//! 001 Introduction
//!     Slug: introduction
//!     Order: 1
//! 005 PWA Plus (5 entries)
//!     Slug: pwa-plus
//!     001 Overview
//!         Slug: pwa-plus
//! ```
//!
//! ## Flatten / units
//!
//! ```text
//! 001 Introduction
//!     Slug: introduction
//! 002 Quick start
//!     Slug: quick-start
//!     Tag: New
//! ```
//!
//! ## Adjacent
//!
//! ```text
//! Previous: Setup (pwa-plus/setup)
//! Next: Caching strategies (pwa-plus/advanced/caching)
//! ```
//!
//! ## Sections
//!
//! ```text
//! 001 pwa-plus (7 pages)
//!     001 Overview
//!         Slug: pwa-plus
//! ```
//!
//! # Architecture
//!
//! Each query has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::report::BuildReport;
use crate::sections::Section;
use crate::sidebar::Adjacent;
use crate::types::{ContentUnit, NavNode};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional count.
///
/// ```text
/// 001 Introduction
/// 005 PWA Plus (5 entries)
/// ```
fn entity_header(index: usize, title: &str, count: Option<(usize, &str)>) -> String {
    match count {
        Some((n, noun)) => format!("{} {} ({} {})", format_index(index), title, n, noun),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Order values without a trailing `.0` when they are whole.
fn format_order(order: f64) -> String {
    if order.fract() == 0.0 && order.abs() < 1e15 {
        format!("{}", order as i64)
    } else {
        order.to_string()
    }
}

/// Context lines shared by every page-like entity.
fn unit_context(prefix: &str, slug: &str, order: Option<f64>, tag: Option<&str>) -> Vec<String> {
    let mut lines = vec![format!("{}Slug: {}", prefix, slug)];
    if let Some(order) = order {
        lines.push(format!("{}Order: {}", prefix, format_order(order)));
    }
    if let Some(tag) = tag {
        lines.push(format!("{}Tag: {}", prefix, tag));
    }
    lines
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Tree walker
// ============================================================================

/// A flattened node from walking the navigation tree.
struct TreeNode<'a> {
    depth: usize,
    position: usize,
    node: &'a NavNode,
}

/// Walk the navigation tree, assigning positional indices per sibling level.
/// Returns a flat list of nodes with depth and position for formatting.
fn walk_nav_tree(nav: &[NavNode]) -> Vec<TreeNode<'_>> {
    let mut nodes = Vec::new();
    walk_nav_tree_recursive(nav, 0, &mut nodes);
    nodes
}

fn walk_nav_tree_recursive<'a>(items: &'a [NavNode], depth: usize, nodes: &mut Vec<TreeNode<'a>>) {
    for (i, node) in items.iter().enumerate() {
        nodes.push(TreeNode {
            depth,
            position: i + 1,
            node,
        });
        walk_nav_tree_recursive(node.children(), depth + 1, nodes);
    }
}

// ============================================================================
// Tree
// ============================================================================

/// Format the navigation tree.
///
/// Groups show their entry count; leaves show their display label when it
/// differs from the title.
pub fn format_tree(nav: &[NavNode]) -> Vec<String> {
    let mut lines = Vec::new();
    for item in walk_nav_tree(nav) {
        let base = indent(item.depth);
        let context = format!("{}    ", base);
        match item.node {
            NavNode::Composite(group) => {
                let count = Some((group.children.len(), "entries"));
                let header = entity_header(item.position, &group.title, count);
                lines.push(format!("{}{}", base, header));
                lines.extend(unit_context(&context, &group.slug, group.order, None));
            }
            NavNode::Leaf(leaf) => {
                let header = entity_header(item.position, &leaf.title, None);
                lines.push(format!("{}{}", base, header));
                if let Some(label) = leaf.label.as_deref().filter(|l| *l != leaf.title) {
                    lines.push(format!("{}Label: {}", context, label));
                }
                let tag = leaf.nav_tag.as_deref();
                lines.extend(unit_context(&context, &leaf.slug, leaf.order, tag));
            }
        }
    }
    lines
}

pub fn print_tree(nav: &[NavNode]) {
    print_lines(format_tree(nav));
}

// ============================================================================
// Flat unit lists
// ============================================================================

/// Format a flat list of units (the sidebar sequence or a sorted listing).
pub fn format_units(units: &[ContentUnit]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, unit) in units.iter().enumerate() {
        lines.push(entity_header(i + 1, &unit.title, None));
        lines.extend(unit_context(
            "    ",
            &unit.slug,
            unit.explicit_order,
            unit.nav_tag(),
        ));
    }
    lines
}

pub fn print_units(units: &[ContentUnit]) {
    print_lines(format_units(units));
}

// ============================================================================
// Adjacency
// ============================================================================

fn neighbour_line(label: &str, unit: Option<&ContentUnit>) -> String {
    match unit {
        Some(unit) => format!("{}: {} ({})", label, unit.title, unit.slug),
        None => format!("{}: none", label),
    }
}

pub fn format_adjacent(adjacent: &Adjacent) -> Vec<String> {
    vec![
        neighbour_line("Previous", adjacent.previous.as_ref()),
        neighbour_line("Next", adjacent.next.as_ref()),
    ]
}

pub fn print_adjacent(adjacent: &Adjacent) {
    print_lines(format_adjacent(adjacent));
}

// ============================================================================
// Sections
// ============================================================================

pub fn format_sections(sections: &[Section]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        let count = Some((section.units.len(), "pages"));
        lines.push(entity_header(i + 1, &section.section, count));
        for (j, unit) in section.units.iter().enumerate() {
            lines.push(format!("    {}", entity_header(j + 1, &unit.title, None)));
            lines.extend(unit_context("        ", &unit.slug, unit.explicit_order, None));
        }
    }
    lines
}

pub fn print_sections(sections: &[Section]) {
    print_lines(format_sections(sections));
}

// ============================================================================
// Build report
// ============================================================================

/// Format the warnings collected during a build. A clean build prints nothing.
pub fn format_report(report: &BuildReport) -> Vec<String> {
    if report.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), format!("Warnings ({})", report.len())];
    lines.extend(report.warnings().iter().map(|w| format!("    {}", w)));
    lines
}

pub fn print_report(report: &BuildReport) {
    print_lines(format_report(report));
}
