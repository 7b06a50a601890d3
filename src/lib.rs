//! # docnav
//!
//! Derives a documentation site's navigable structure from its content tree.
//! Your filesystem is the manifest: directories become sidebar groups, content
//! files become pages, and optional per-directory `meta.json` sidecars pin the
//! order and titles.
//!
//! # Architecture: One Walk, Several Views
//!
//! Every query starts from the same two inputs, the content files and the
//! sidecars, and produces one structural view:
//!
//! ```text
//! content/ + meta.json ──┬─ tree      → nested sidebar (groups and pages)
//!                        ├─ sidebar   → flattened sequence → previous / next
//!                        └─ sections  → units grouped by first slug segment
//! ```
//!
//! Nothing is rendered here. A presentation layer consumes the views, usually
//! as JSON (`docnav tree --json`).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Walks the content root and parses each file into a [`types::ContentUnit`] |
//! | [`frontmatter`] | YAML metadata header splitting and lenient field parsing |
//! | [`sidecar`] | Per-directory `meta.json` overrides, memoized for one build |
//! | [`ordering`] | The shared comparator cascade and the named sort modes |
//! | [`tree`] | Recursive navigation tree builder |
//! | [`sidebar`] | Flattened sidebar sequence and adjacency lookup |
//! | [`sections`] | Section aggregation under a sort mode |
//! | [`engine`] | Entry points with an explicit, invalidatable cache |
//! | [`report`] | Non-fatal build warnings returned next to every result |
//! | [`config`] | `docnav.toml` loading, validation and merging |
//! | [`naming`] | Slug and fallback-title derivation from paths |
//! | [`types`] | Shapes handed to the presentation layer |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Comparator
//!
//! Tree siblings, top-level pages, sections, folders and folder pages are all
//! sorted by [`ordering::compare`]. Call sites only decide where the order
//! numbers come from, which keeps the tree and the flattened sidebar from
//! drifting apart.
//!
//! ## Degrade, Never Fail
//!
//! A broken sidecar or a malformed page costs that entry its ordering (or its
//! place), never the whole build. Problems are returned as a
//! [`report::BuildReport`] next to the value, so tests can assert on a
//! degraded build without capturing logs.
//!
//! ## Explicit Cache
//!
//! Only the flattened sequence is cached, inside an [`engine::Engine`] value the
//! caller owns, and [`engine::Engine::invalidate`] drops it. Two engines never
//! share state.

pub mod config;
pub mod content;
pub mod engine;
pub mod frontmatter;
pub mod naming;
pub mod ordering;
pub mod output;
pub mod report;
pub mod sections;
pub mod sidebar;
pub mod sidecar;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
