//! Structural ("duck typing") compatibility matching.
//!
//! A class looks like an interface when it could stand in for it at
//! every public call site, regardless of what it nominally declares:
//!
//! > When I see a bird that walks like a duck and swims like a duck and
//! > quacks like a duck, I call that bird a duck.

use super::{Introspector, MethodSig};
use dashmap::DashMap;
use std::sync::Arc;

/// Memoizing structural matcher.
///
/// Verdicts depend only on declared method signatures, never on
/// instance state, so they are computed at most once per
/// `(class, interface)` pair and cached forever. Concurrent callers may
/// race to compute the same verdict; whichever insert lands is
/// identical, and readers never observe a partial entry.
#[derive(Debug, Default)]
pub struct StructuralMatcher {
    verdicts: DashMap<(Arc<str>, Arc<str>), bool>,
}

impl StructuralMatcher {
    /// Create a matcher with an empty verdict cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Does `class` structurally satisfy `interface`?
    ///
    /// Nominal implementors pass immediately. Otherwise every public
    /// method of the interface must be matched by a method on the class
    /// that is public, agrees on static-ness, and requires at most as
    /// many mandatory parameters. Unknown names yield `false`, never an
    /// error.
    pub fn looks_like(
        &self,
        class: &str,
        interface: &str,
        introspector: &dyn Introspector,
    ) -> bool {
        let key = (Arc::<str>::from(class), Arc::<str>::from(interface));
        if let Some(verdict) = self.verdicts.get(&key) {
            return *verdict;
        }

        let verdict = Self::compute(class, interface, introspector);
        tracing::debug!(class, interface, verdict, "structural match computed");
        self.verdicts.insert(key, verdict);
        verdict
    }

    /// Number of memoized verdicts.
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    /// Whether no verdict has been computed yet.
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    fn compute(class: &str, interface: &str, introspector: &dyn Introspector) -> bool {
        // fast path: nominal satisfaction needs no method scan
        if introspector.is_subtype(class, interface) {
            return true;
        }

        if !introspector.class_exists(class) && !introspector.interface_exists(class) {
            return false;
        }

        let Some(wanted) = introspector.public_methods(interface) else {
            return false;
        };

        wanted
            .iter()
            .all(|sig| Self::satisfies(class, sig, introspector))
    }

    fn satisfies(class: &str, wanted: &MethodSig, introspector: &dyn Introspector) -> bool {
        let Some(found) = introspector.method(class, &wanted.name) else {
            return false;
        };

        // The candidate must be callable wherever the interface method
        // is: public, same static-ness, and contravariant arity (it may
        // require fewer arguments, never more).
        found.public
            && found.is_static == wanted.is_static
            && found.required_params <= wanted.required_params
    }
}
