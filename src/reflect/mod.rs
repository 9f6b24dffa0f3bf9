//! Reflection capability over the host object model.
//!
//! The engine never reflects on Rust types directly. Everything it
//! needs to know about classes and interfaces — existence, nominal
//! subtyping, declared method signatures — comes through the
//! [`Introspector`] trait, so production hosts plug in a populated
//! [`TypeRegistry`] while tests supply fixed method tables.

use std::sync::Arc;

/// Production introspector backed by registered class specs
pub mod registry;
/// Structural ("duck typing") compatibility matching
pub mod structural;

pub use registry::{ClassSpec, TypeRegistry};
pub use structural::StructuralMatcher;

/// Whether a registered type is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Concrete (instantiable) type
    Class,
    /// Abstract method surface
    Interface,
}

/// Declared signature of a single method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    /// Method name
    pub name: Arc<str>,
    /// Whether the method is publicly visible
    pub public: bool,
    /// Whether the method is static rather than an instance method
    pub is_static: bool,
    /// Number of mandatory (non-defaulted) parameters
    pub required_params: usize,
}

impl MethodSig {
    /// A public instance method with `required_params` mandatory parameters.
    pub fn public(name: impl AsRef<str>, required_params: usize) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            public: true,
            is_static: false,
            required_params,
        }
    }

    /// A public static method.
    pub fn public_static(name: impl AsRef<str>, required_params: usize) -> Self {
        Self {
            is_static: true,
            ..Self::public(name, required_params)
        }
    }

    /// A non-public instance method.
    pub fn private(name: impl AsRef<str>, required_params: usize) -> Self {
        Self {
            public: false,
            ..Self::public(name, required_params)
        }
    }
}

/// Read-only window onto the host's nominal type system.
///
/// All methods answer from declared metadata, never from instance
/// state, which is what makes structural verdicts safe to memoize.
pub trait Introspector: Send + Sync {
    /// Does a class with this name exist?
    fn class_exists(&self, name: &str) -> bool;

    /// Does an interface with this name exist?
    fn interface_exists(&self, name: &str) -> bool;

    /// Is `class` the same type as `ancestor`, a descendant of it, or a
    /// nominal implementor of it (transitively)?
    fn is_subtype(&self, class: &str, ancestor: &str) -> bool;

    /// Public methods visible on a type, inherited ones included.
    /// `None` if the type is unknown.
    fn public_methods(&self, name: &str) -> Option<Vec<MethodSig>>;

    /// Look up a method (any visibility) declared on or inherited by
    /// `class`. `None` if the class or the method is unknown.
    fn method(&self, class: &str, name: &str) -> Option<MethodSig>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_sig_constructors() {
        let sig = MethodSig::public("count", 0);
        assert!(sig.public);
        assert!(!sig.is_static);
        assert_eq!(sig.required_params, 0);

        let sig = MethodSig::public_static("of", 2);
        assert!(sig.public);
        assert!(sig.is_static);
        assert_eq!(sig.required_params, 2);

        let sig = MethodSig::private("rehash", 1);
        assert!(!sig.public);
        assert!(!sig.is_static);
        assert_eq!(&*sig.name, "rehash");
    }
}
