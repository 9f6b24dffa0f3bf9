//! Engine entry points and the compiled-pattern handle.

use crate::pattern::{Node, PatternCache, PatternSyntaxError};
use crate::reflect::{Introspector, StructuralMatcher, TypeRegistry};
use crate::value::Value;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Shared evaluation state: the reflection capability and the
/// structural verdict cache. Held by every compiled pattern so
/// evaluation needs no engine in scope.
pub(crate) struct EvalContext {
    pub(crate) introspector: Arc<dyn Introspector>,
    pub(crate) structural: StructuralMatcher,
}

impl EvalContext {
    pub(crate) fn new(introspector: Arc<dyn Introspector>) -> Self {
        Self {
            introspector,
            structural: StructuralMatcher::new(),
        }
    }
}

/// A pattern compiled into an immutable evaluator tree.
///
/// Cheap to clone; clones share the tree and the evaluation state.
#[derive(Clone)]
pub struct CompiledPattern {
    source: Arc<str>,
    root: Arc<Node>,
    ctx: Arc<EvalContext>,
}

impl CompiledPattern {
    /// Does `value` match this pattern?
    ///
    /// Total: unrecognized or malformed values evaluate to `false`,
    /// never an error.
    pub fn evaluate(&self, value: &Value) -> bool {
        self.root.evaluate(value, &self.ctx)
    }

    /// The pattern text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The root of the evaluator tree.
    ///
    /// Two compiles of identical text through the same engine share one
    /// tree: `Arc::ptr_eq(a.ast(), b.ast())` holds.
    pub fn ast(&self) -> &Arc<Node> {
        &self.root
    }
}

impl std::fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("source", &self.source)
            .field("tree", &self.root.describe())
            .finish()
    }
}

/// The validation engine: a pattern cache plus shared evaluation state.
///
/// Most programs use the process-wide default through the free
/// functions [`compile`] and [`is`]; hosts that want scoped caches or a
/// custom [`Introspector`] construct their own.
pub struct TypeChecker {
    patterns: PatternCache,
    ctx: Arc<EvalContext>,
}

impl TypeChecker {
    /// Create an engine over the given reflection capability.
    pub fn new(introspector: Arc<dyn Introspector>) -> Self {
        Self {
            patterns: PatternCache::new(),
            ctx: Arc::new(EvalContext::new(introspector)),
        }
    }

    /// Create an engine over a [`TypeRegistry`].
    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        Self::new(registry)
    }

    /// Compile a pattern, consulting the cache first.
    ///
    /// Idempotent: repeated calls with identical text return a handle
    /// to the same cached tree.
    pub fn compile(&self, pattern: &str) -> Result<CompiledPattern, PatternSyntaxError> {
        let (source, root) = self.patterns.get_or_compile(pattern)?;
        Ok(CompiledPattern {
            source,
            root,
            ctx: Arc::clone(&self.ctx),
        })
    }

    /// Compile-then-evaluate convenience.
    pub fn is(&self, pattern: &str, value: &Value) -> Result<bool, PatternSyntaxError> {
        Ok(self.compile(pattern)?.evaluate(value))
    }

    /// The engine's pattern cache.
    pub fn pattern_cache(&self) -> &PatternCache {
        &self.patterns
    }

    /// The engine's structural verdict cache.
    pub fn structural_matcher(&self) -> &StructuralMatcher {
        &self.ctx.structural
    }
}

/// Process-wide type registry backing the default engine.
static GLOBAL_REGISTRY: Lazy<Arc<TypeRegistry>> = Lazy::new(|| Arc::new(TypeRegistry::new()));

/// Process-wide default engine.
static GLOBAL_CHECKER: Lazy<TypeChecker> =
    Lazy::new(|| TypeChecker::with_registry(Arc::clone(&GLOBAL_REGISTRY)));

/// The registry consulted by the process-wide default engine.
///
/// Hosts register their object model here once at startup.
pub fn global_registry() -> Arc<TypeRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}

/// Compile a pattern with the process-wide default engine.
pub fn compile(pattern: &str) -> Result<CompiledPattern, PatternSyntaxError> {
    GLOBAL_CHECKER.compile(pattern)
}

/// Compile-then-evaluate with the process-wide default engine.
pub fn is(pattern: &str, value: &Value) -> Result<bool, PatternSyntaxError> {
    GLOBAL_CHECKER.is(pattern, value)
}
