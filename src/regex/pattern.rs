use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::regex::ast::Node;
use crate::regex::definitions::{Definition, Definitions};
use crate::regex::matcher::{Extraction, match_nodes};

/// Post-processing applied to the extraction list of a successful top-level match.
pub type ExtractFn = dyn Fn(Vec<Extraction>, &str) -> Vec<Extraction> + Send + Sync;

/// A compiled pattern.
///
/// The node sequence is immutable and shared with the cache that produced it.
/// Definitions and the extraction function live behind shared handles, so
/// every clone of a `Pattern` observes `define` and `set_extract_fn` calls
/// made through any other clone.
#[derive(Clone)]
pub struct Pattern {
    source: Arc<str>,
    nodes: Arc<[Node]>,
    definitions: Definitions,
    extract_fn: Arc<RwLock<Option<Arc<ExtractFn>>>>,
    max_depth: usize,
}

impl Pattern {
    pub(crate) fn new(source: &str, nodes: Arc<[Node]>, max_depth: usize) -> Self {
        Pattern {
            source: Arc::from(source),
            nodes,
            definitions: Definitions::new(),
            extract_fn: Arc::new(RwLock::new(None)),
            max_depth,
        }
    }

    /// The text this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Maximum nesting of checkables entered while matching.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// True when both patterns were built from the same compiled nodes.
    pub fn shares_nodes(&self, other: &Pattern) -> bool {
        Arc::ptr_eq(&self.nodes, &other.nodes)
    }

    /// Registers or overwrites a named definition.
    ///
    /// The name takes effect wherever it is a set member, which includes
    /// plain characters since those compile to one-member sets.
    pub fn define(&self, name: char, value: impl Into<Definition>) -> Option<Definition> {
        self.definitions.define(name, value)
    }

    pub fn set_extract_fn<F>(&self, f: F)
    where
        F: Fn(Vec<Extraction>, &str) -> Vec<Extraction> + Send + Sync + 'static,
    {
        let f: Arc<ExtractFn> = Arc::new(f);
        *self.extract_fn.write() = Some(f);
    }

    /// Restores the identity extraction function.
    pub fn clear_extract_fn(&self) {
        *self.extract_fn.write() = None;
    }

    /// Returns the matched prefix of `input`, if any.
    pub fn match_prefix<'a>(&self, input: &'a str) -> Option<&'a str> {
        match_nodes(self, input).map(|(used, _)| &input[..used])
    }

    pub fn is_match(&self, input: &str) -> bool {
        match_nodes(self, input).is_some()
    }

    /// Returns the matched prefix and the extraction list, shaped by the
    /// installed extraction function. A failed match yields `(None, [])`.
    pub fn extract<'a>(&self, input: &'a str) -> (Option<&'a str>, Vec<Extraction>) {
        let Some((used, items)) = match_nodes(self, input) else {
            return (None, Vec::new());
        };
        let prefix = &input[..used];
        let extract_fn = self.extract_fn.read().clone();
        let items = match extract_fn {
            Some(f) => f(items, prefix),
            None => items,
        };
        (Some(prefix), items)
    }

    /// Like [`Pattern::extract`], but shapes the result with `f` instead of
    /// the installed extraction function.
    pub fn extract_with<'a, T>(
        &self,
        input: &'a str,
        f: impl FnOnce(Vec<Extraction>, &str) -> T,
    ) -> Option<(&'a str, T)> {
        let (used, items) = match_nodes(self, input)?;
        let prefix = &input[..used];
        Some((prefix, f(items, prefix)))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("nodes", &self.nodes)
            .field("definitions", &self.definitions)
            .finish_non_exhaustive()
    }
}
