use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::Config;
use crate::regex::ast::Node;
use crate::regex::error::CompileError;
use crate::regex::parser::parse_regex;
use crate::regex::pattern::Pattern;

static GLOBAL_CACHE: LazyLock<PatternCache> =
    LazyLock::new(|| PatternCache::new(&Config::from_env()));

/// Bounded, least-recently-used memo of compile results keyed by pattern text.
///
/// Failures are remembered as well as successes. Each lookup hands out a
/// fresh [`Pattern`] over the cached nodes, so definitions registered on one
/// compiled handle stay private to it and its clones.
pub struct PatternCache {
    capacity: usize,
    max_depth: usize,
    entries: Mutex<Entries>,
}

#[derive(Default)]
struct Entries {
    map: FxHashMap<Arc<str>, Entry>,
    clock: u64,
}

struct Entry {
    compiled: Result<Arc<[Node]>, CompileError>,
    last_used: u64,
}

impl PatternCache {
    pub fn new(config: &Config) -> Self {
        PatternCache {
            capacity: config.cache_capacity.max(1),
            max_depth: config.max_depth,
            entries: Mutex::new(Entries::default()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(&Config {
            cache_capacity: capacity,
            ..Config::default()
        })
    }

    /// The process-wide cache used by the crate-level functions.
    pub fn global() -> &'static PatternCache {
        &GLOBAL_CACHE
    }

    pub fn try_compile(&self, text: &str) -> Result<Pattern, CompileError> {
        let nodes = self.lookup(text)?;
        Ok(Pattern::new(text, nodes, self.max_depth))
    }

    /// Like [`PatternCache::try_compile`], with the error discarded.
    pub fn compile(&self, text: &str) -> Option<Pattern> {
        self.try_compile(text).ok()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.entries.lock().map.clear();
    }

    fn lookup(&self, text: &str) -> Result<Arc<[Node]>, CompileError> {
        {
            let mut entries = self.entries.lock();
            entries.clock += 1;
            let now = entries.clock;
            if let Some(entry) = entries.map.get_mut(text) {
                entry.last_used = now;
                debug!(pattern = text, "pattern cache hit");
                return entry.compiled.clone();
            }
        }

        // Parse without holding the lock; a racing insert of the same text
        // produces an identical result.
        let compiled = parse_regex(text).map(Arc::from);
        match &compiled {
            Ok(_) => debug!(pattern = text, "compiled pattern"),
            Err(err) => debug!(pattern = text, %err, "pattern failed to compile"),
        }

        let mut entries = self.entries.lock();
        if entries.map.len() >= self.capacity && !entries.map.contains_key(text) {
            let oldest = entries
                .map
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| Arc::clone(key));
            if let Some(oldest) = oldest {
                debug!(pattern = &*oldest, "evicting least recently used pattern");
                entries.map.remove(&oldest);
            }
        }
        entries.clock += 1;
        let last_used = entries.clock;
        let entry = entries.map.entry(Arc::from(text)).or_insert(Entry {
            compiled,
            last_used,
        });
        entry.compiled.clone()
    }
}
