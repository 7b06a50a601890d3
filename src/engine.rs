//! The indexing entry points.
//!
//! An [`Engine`] owns one configuration and answers every structural query
//! about the content tree. Each query performs a fresh walk with its own
//! [`SidecarResolver`], except the flattened sequence, which is kept after the
//! first build so repeated adjacency lookups within one render cycle do not
//! rewalk the tree. [`Engine::invalidate`] drops it; nothing else does.
//!
//! No query fails: problems are collected in the [`BuildReport`] returned
//! alongside each value.

use crate::config::IndexConfig;
use crate::content;
use crate::ordering::{self, SortMode};
use crate::report::{BuildReport, Indexed};
use crate::sections::{self, Section};
use crate::sidebar::{self, Adjacent};
use crate::sidecar::SidecarResolver;
use crate::tree;
use crate::types::{ContentUnit, NavNode};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct Engine {
    config: IndexConfig,
    flattened: Option<Indexed<Vec<ContentUnit>>>,
}

impl Engine {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            flattened: None,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn root(&self) -> PathBuf {
        self.config.content_root()
    }

    fn resolver(&self) -> SidecarResolver {
        SidecarResolver::new(&self.config.sidecar_file)
    }

    /// Every content unit, in file-name walk order.
    pub fn units(&self) -> Indexed<Vec<ContentUnit>> {
        let mut report = BuildReport::new();
        let mut sidecars = self.resolver();
        let units = content::load_units(&self.root(), &self.config, &mut sidecars, &mut report);
        Indexed::new(units, report)
    }

    /// Every content unit, sorted by `mode`.
    pub fn sorted_units(&self, mode: SortMode) -> Indexed<Vec<ContentUnit>> {
        self.units().map(|mut units| {
            ordering::sort_units(&mut units, mode);
            units
        })
    }

    /// The sidebar tree.
    pub fn navigation(&self) -> Indexed<Vec<NavNode>> {
        let mut report = BuildReport::new();
        let root = self.root();
        let nodes = tree::build_tree(&root, &self.config, &mut self.resolver(), &mut report);
        info!("Built navigation tree: {} top-level entries", nodes.len());
        Indexed::new(nodes, report)
    }

    /// The sidebar sequence, built on first use and then reused.
    pub fn flattened(&mut self) -> Indexed<Vec<ContentUnit>> {
        if let Some(cached) = &self.flattened {
            return cached.clone();
        }
        let built = self.build_flattened();
        self.flattened = Some(built.clone());
        built
    }

    fn build_flattened(&self) -> Indexed<Vec<ContentUnit>> {
        let root = self.root();
        let mut report = BuildReport::new();
        let mut sidecars = self.resolver();
        let units = content::load_units(&root, &self.config, &mut sidecars, &mut report);
        let sequence = sidebar::flatten(units, &root, &mut sidecars, &mut report);
        info!(
            "Flattened sidebar: {} units, {} warnings",
            sequence.len(),
            report.len()
        );
        Indexed::new(sequence, report)
    }

    /// Previous and next units around `slug`.
    ///
    /// An unknown slug gives an empty [`Adjacent`] and a `NotFound` entry in
    /// the report.
    pub fn adjacent(&mut self, slug: &str) -> Indexed<Adjacent> {
        let Indexed {
            value: sequence,
            mut report,
        } = self.flattened();
        let around = sidebar::adjacent(&sequence, slug).unwrap_or_else(|warning| {
            report.push(warning);
            Adjacent::default()
        });
        Indexed::new(around, report)
    }

    /// Units grouped by section, each group sorted by `mode`.
    pub fn sections(&self, mode: SortMode) -> Indexed<Vec<Section>> {
        let root = self.root();
        let mut report = BuildReport::new();
        let mut sidecars = self.resolver();
        let units = content::load_units(&root, &self.config, &mut sidecars, &mut report);
        let root_sidecar = sidecars.load(&root, &mut report);
        let grouped = sections::aggregate(units, root_sidecar.as_deref(), mode);
        Indexed::new(grouped, report)
    }

    /// Forget the cached sidebar sequence.
    pub fn invalidate(&mut self) {
        self.flattened = None;
    }
}
