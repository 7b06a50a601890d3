//! Per-directory sidecar overrides (`meta.json`).
//!
//! Any directory in the content tree may carry a sidecar that supplies
//! ordering and titles not embedded in the content files themselves:
//!
//! ```json
//! {
//!   "title": "PWA Plus",
//!   "order": 3,
//!   "pages": { "index": 1, "setup": 2, "configuration.mdx": 3, "advanced": 4 },
//!   "folders": { "advanced": 1, "recipes": 2 },
//!   "sections": { "pwa-plus": 1 }
//! }
//! ```
//!
//! - `title` replaces the directory name as its display title.
//! - `order` is the directory's own position, used by its parent only when the
//!   parent's `pages` has no entry for it.
//! - `pages` maps child names (file name with or without extension, or
//!   sub-directory name) to an order.
//! - `folders` orders sub-folders inside a section of the flattened sidebar.
//! - `sections` orders the groups produced by the section aggregator (root only).
//!
//! Every key is optional and unknown keys are ignored. A mapping entry whose
//! value is not a number is skipped on its own. A sidecar that cannot be
//! read or parsed counts as absent: the resolver records a warning and callers
//! fall back to their next ordering rule.

use crate::report::{BuildReport, IndexWarning};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Parsed sidecar contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sidecar {
    pub title: Option<String>,
    pub order: Option<f64>,
    #[serde(deserialize_with = "lenient_orders")]
    pub pages: BTreeMap<String, f64>,
    #[serde(deserialize_with = "lenient_orders")]
    pub folders: BTreeMap<String, f64>,
    #[serde(deserialize_with = "lenient_orders")]
    pub sections: BTreeMap<String, f64>,
}

/// An order mapping where entries that are not finite numbers (or numeric
/// strings) are dropped one by one. A value that is not an object at all is
/// still an error.
fn lenient_orders<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, f64>, D::Error> {
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(d)?;
    let orders = raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, value)| {
            let order = match value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            Some((name, order.filter(|o| o.is_finite())?))
        })
        .collect();
    Ok(orders)
}

impl Sidecar {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn page_order(&self, name: &str) -> Option<f64> {
        self.pages.get(name).copied()
    }

    pub fn folder_order(&self, name: &str) -> Option<f64> {
        self.folders.get(name).copied()
    }

    pub fn section_order(&self, name: &str) -> Option<f64> {
        self.sections.get(name).copied()
    }
}

/// Order of a child named `name` in an optional sidecar's `pages` mapping.
pub fn page_order(sidecar: Option<&Sidecar>, name: &str) -> Option<f64> {
    sidecar.and_then(|s| s.page_order(name))
}

/// Order of a content file in `pages`: exact file name first, then stem.
pub fn file_order(sidecar: Option<&Sidecar>, file_name: &str, stem: &str) -> Option<f64> {
    page_order(sidecar, file_name).or_else(|| page_order(sidecar, stem))
}

/// Loads sidecars, remembering each directory's result for the resolver's
/// lifetime.
///
/// One resolver belongs to one build; dropping it is the invalidation.
#[derive(Debug)]
pub struct SidecarResolver {
    file_name: String,
    loaded: HashMap<PathBuf, Option<Rc<Sidecar>>>,
}

impl SidecarResolver {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            loaded: HashMap::new(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The sidecar for `dir`, or `None` when it is missing or unusable.
    ///
    /// Read and parse failures are recorded in `report` once per directory.
    pub fn load(&mut self, dir: &Path, report: &mut BuildReport) -> Option<Rc<Sidecar>> {
        if let Some(cached) = self.loaded.get(dir) {
            return cached.clone();
        }
        let sidecar = self.read(dir, report).map(Rc::new);
        self.loaded.insert(dir.to_path_buf(), sidecar.clone());
        sidecar
    }

    fn read(&self, dir: &Path, report: &mut BuildReport) -> Option<Sidecar> {
        let path = dir.join(&self.file_name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                report.push(IndexWarning::MetadataParse {
                    path,
                    reason: e.to_string(),
                });
                return None;
            }
        };
        match Sidecar::parse(&content) {
            Ok(sidecar) => Some(sidecar),
            Err(e) => {
                report.push(IndexWarning::MetadataParse {
                    path,
                    reason: e.to_string(),
                });
                None
            }
        }
    }
}
