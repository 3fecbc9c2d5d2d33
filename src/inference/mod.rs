//! Module inference
//!
//! Groups crawled pages into a two-level module/submodule hierarchy.
//!
//! Each page is assigned a segment list by the first strategy in the chain
//! that proposes one (URL path first, then page title). Segments are
//! formatted for display; the first names the module and the second, if
//! present, the submodule. Pages with no usable segments land in the
//! `General` module.
//!
//! # Example
//!
//! ```
//! use doc_module_extractor::document::{PageRecord, ParsedDocument};
//! use doc_module_extractor::inference::infer_structure;
//!
//! let pages = vec![PageRecord::new(
//!     "https://example.com/docs/api/users".to_string(),
//!     ParsedDocument::default(),
//!     String::new(),
//! )];
//! let tree = infer_structure(&pages, &["https://example.com/docs/"]);
//!
//! let api = tree.get("Api").unwrap();
//! assert!(api.submodule("Users").is_some());
//! ```

mod format;
mod strategy;

pub use format::format_segment;
pub use strategy::{
    relevant_path_segments, root_segments, title_segments, InferenceStrategy,
    LOW_INFORMATION_SEGMENTS, TITLE_SEPARATORS,
};

use crate::document::PageRecord;

/// Module name for pages no strategy could place
pub const GENERAL_MODULE: &str = "General";

/// A submodule and its pages in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submodule<'a> {
    pub name: String,
    pub pages: Vec<&'a PageRecord>,
}

/// A top-level module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module<'a> {
    pub name: String,

    /// Pages that belong to the module itself rather than a submodule
    pub pages: Vec<&'a PageRecord>,
    pub submodules: Vec<Submodule<'a>>,
}

impl<'a> Module<'a> {
    fn new(name: String) -> Self {
        Self {
            name,
            pages: Vec::new(),
            submodules: Vec::new(),
        }
    }

    /// Looks up a submodule by display name
    pub fn submodule(&self, name: &str) -> Option<&Submodule<'a>> {
        self.submodules.iter().find(|s| s.name == name)
    }

    /// Every page in the module and its submodules
    pub fn all_pages(&self) -> impl Iterator<Item = &'a PageRecord> + '_ {
        self.pages
            .iter()
            .chain(self.submodules.iter().flat_map(|s| s.pages.iter()))
            .copied()
    }

    fn submodule_mut(&mut self, name: String) -> &mut Submodule<'a> {
        let index = match self.submodules.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.submodules.push(Submodule {
                    name,
                    pages: Vec::new(),
                });
                self.submodules.len() - 1
            }
        };
        &mut self.submodules[index]
    }
}

/// The inferred hierarchy
///
/// Borrows the page records it was built from. Modules appear in the order
/// their first page was encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleTree<'a> {
    modules: Vec<Module<'a>>,
}

impl<'a> ModuleTree<'a> {
    pub fn modules(&self) -> &[Module<'a>] {
        &self.modules
    }

    pub fn get(&self, name: &str) -> Option<&Module<'a>> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn insert(&mut self, segments: Vec<String>, page: &'a PageRecord) {
        let mut segments = segments.into_iter();
        let module_name = segments
            .next()
            .unwrap_or_else(|| GENERAL_MODULE.to_string());

        let module = match self.modules.iter().position(|m| m.name == module_name) {
            Some(index) => &mut self.modules[index],
            None => {
                self.modules.push(Module::new(module_name));
                let last = self.modules.len() - 1;
                &mut self.modules[last]
            }
        };

        match segments.next() {
            Some(submodule_name) => module.submodule_mut(submodule_name).pages.push(page),
            None => module.pages.push(page),
        }
    }
}

/// Infers modules for pages of one documentation site
#[derive(Debug, Clone)]
pub struct ModuleInference {
    root_segments: Vec<String>,
    strategies: Vec<InferenceStrategy>,
}

impl ModuleInference {
    /// Creates an inference rooted at the directory of the first seed
    ///
    /// With no seeds every URL path is used in full.
    pub fn new<S: AsRef<str>>(seeds: &[S]) -> Self {
        let root_segments = seeds
            .first()
            .map(|seed| root_segments(seed.as_ref()))
            .unwrap_or_default();

        Self {
            root_segments,
            strategies: InferenceStrategy::CHAIN.to_vec(),
        }
    }

    /// Replaces the strategy chain
    pub fn with_strategies(mut self, strategies: Vec<InferenceStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn root_segments(&self) -> &[String] {
        &self.root_segments
    }

    /// Formatted segment key for a single page
    ///
    /// Never empty: pages no strategy can place get `["General"]`.
    pub fn segments_for(&self, page: &PageRecord) -> Vec<String> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.apply(page, &self.root_segments))
            .map(|raw| raw.iter().map(|s| format_segment(s)).collect())
            .unwrap_or_else(|| vec![GENERAL_MODULE.to_string()])
    }

    /// Builds the module tree for `pages`
    ///
    /// Segments past the second are ignored. Page order within each module
    /// and submodule follows the input order.
    pub fn infer_structure<'a>(&self, pages: &'a [PageRecord]) -> ModuleTree<'a> {
        tracing::info!("Inferring module structure for {} pages", pages.len());

        let mut tree = ModuleTree::default();
        for page in pages {
            let segments = self.segments_for(page);
            tracing::debug!("{} -> {:?}", page.url, segments);
            tree.insert(segments, page);
        }

        tracing::info!("Inferred {} modules", tree.len());
        tree
    }
}

/// Builds the module tree for `pages` crawled from `seeds`
pub fn infer_structure<'a, S: AsRef<str>>(pages: &'a [PageRecord], seeds: &[S]) -> ModuleTree<'a> {
    ModuleInference::new(seeds).infer_structure(pages)
}
