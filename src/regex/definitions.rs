use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::regex::pattern::Pattern;

/// What a single-character name stands for inside a character set.
#[derive(Clone)]
pub enum Definition {
    /// The name matches this character instead of itself.
    Literal(char),
    /// The name asks a nested pattern to match the remaining input.
    Checkable(Pattern),
}

impl From<char> for Definition {
    fn from(c: char) -> Self {
        Definition::Literal(c)
    }
}

impl From<Pattern> for Definition {
    fn from(pattern: Pattern) -> Self {
        Definition::Checkable(pattern)
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Definition::Literal(c) => write!(f, "Literal({c:?})"),
            // Checkables may refer back to their owner; print the source only.
            Definition::Checkable(p) => write!(f, "Checkable({:?})", p.source()),
        }
    }
}

/// Named definitions shared by a pattern and every clone of it.
///
/// Cloning the handle does not copy the table, so a definition added
/// after compilation is seen by every holder, including patterns that were
/// registered as checkables earlier.
#[derive(Clone, Default)]
pub struct Definitions(Arc<RwLock<FxHashMap<char, Definition>>>);

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` under `name`, returning whatever it replaced.
    pub fn define(&self, name: char, value: impl Into<Definition>) -> Option<Definition> {
        self.0.write().insert(name, value.into())
    }

    /// Returns a copy of the entry so no lock is held while it is used.
    pub fn get(&self, name: char) -> Option<Definition> {
        self.0.read().get(&name).cloned()
    }

    pub fn remove(&self, name: char) -> Option<Definition> {
        self.0.write().remove(&name)
    }

    pub fn contains(&self, name: char) -> bool {
        self.0.read().contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// True when both handles point at the same table.
    pub fn is_shared_with(&self, other: &Definitions) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Definitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<char> = self.0.read().keys().copied().collect();
        names.sort_unstable();
        f.debug_tuple("Definitions").field(&names).finish()
    }
}
