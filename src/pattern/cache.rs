//! Process-wide memoization of compiled patterns.
//!
//! Programs use a small, fixed set of distinct pattern strings, so the
//! cache grows monotonically and never evicts. Failed compilations are
//! never cached, not even partially.

use super::error::PatternSyntaxError;
use super::node::Node;
use super::parser;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe source-text → compiled-tree cache.
///
/// Racing compiles of the same text may both parse, but converge on a
/// single cached tree: whichever insert lands first wins and the loser
/// adopts it, so repeated compiles are referentially stable.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: RwLock<HashMap<Arc<str>, Arc<Node>>>,
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the compiled tree for `source`, compiling on a miss.
    pub fn get_or_compile(
        &self,
        source: &str,
    ) -> Result<(Arc<str>, Arc<Node>), PatternSyntaxError> {
        // fast path
        if let Ok(compiled) = self.compiled.read() {
            if let Some((key, root)) = compiled.get_key_value(source) {
                tracing::trace!(pattern = source, "pattern cache hit");
                return Ok((Arc::clone(key), Arc::clone(root)));
            }
        }

        // parse outside any lock; evaluation state is not needed and
        // other compiles must not wait on this one
        let root = Arc::new(parser::parse(source)?);
        tracing::debug!(pattern = source, "compiled type pattern");

        let mut compiled = match self.compiled.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("PatternCache write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };

        // another thread may have compiled the same text while we did;
        // keep the first tree so callers share one instance
        if let Some((key, existing)) = compiled.get_key_value(source) {
            return Ok((Arc::clone(key), Arc::clone(existing)));
        }

        let key: Arc<str> = Arc::from(source);
        compiled.insert(Arc::clone(&key), Arc::clone(&root));
        Ok((key, root))
    }

    /// Number of cached patterns.
    pub fn len(&self) -> usize {
        self.read_len(|map| map.len())
    }

    /// Whether the cache holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.read_len(|map| map.is_empty())
    }

    fn read_len<R>(&self, f: impl FnOnce(&HashMap<Arc<str>, Arc<Node>>) -> R) -> R {
        match self.compiled.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => {
                tracing::warn!("PatternCache read lock was poisoned, recovering");
                f(&poisoned.into_inner())
            }
        }
    }
}
