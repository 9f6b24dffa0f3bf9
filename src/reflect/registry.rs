//! Host-populated registry of class and interface metadata.

use super::{Introspector, MethodSig, TypeKind};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard};

/// Declared shape of a class or interface.
///
/// Built fluently and handed to [`TypeRegistry::register`]:
///
/// ```
/// use typeshape_rs::{ClassSpec, MethodSig};
///
/// let spec = ClassSpec::class("ArrayBag")
///     .implements("Countable")
///     .method(MethodSig::public("count", 0))
///     .method(MethodSig::public_static("from_slice", 1));
/// assert_eq!(spec.name(), "ArrayBag");
/// ```
#[derive(Debug, Clone)]
pub struct ClassSpec {
    name: Arc<str>,
    kind: TypeKind,
    parents: Vec<Arc<str>>,
    methods: Vec<MethodSig>,
}

impl ClassSpec {
    /// Start describing a concrete class.
    pub fn class(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            kind: TypeKind::Class,
            parents: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Start describing an interface.
    pub fn interface(name: impl AsRef<str>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::class(name)
        }
    }

    /// Name a parent class this type extends.
    pub fn extends(mut self, parent: impl AsRef<str>) -> Self {
        self.parents.push(Arc::from(parent.as_ref()));
        self
    }

    /// Name an interface this type nominally implements.
    pub fn implements(mut self, interface: impl AsRef<str>) -> Self {
        self.parents.push(Arc::from(interface.as_ref()));
        self
    }

    /// Declare a method on this type.
    pub fn method(mut self, sig: MethodSig) -> Self {
        self.methods.push(sig);
        self
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class or interface.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Methods declared directly on this type.
    pub fn methods(&self) -> &[MethodSig] {
        &self.methods
    }
}

/// Thread-safe name → [`ClassSpec`] table implementing [`Introspector`].
///
/// Hosts register their object model once at startup; lookups then run
/// concurrently behind a read lock. Re-registering a name replaces the
/// previous spec.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<Arc<str>, ClassSpec>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a type description.
    pub fn register(&self, spec: ClassSpec) {
        let mut types = match self.types.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("TypeRegistry write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        if types.insert(Arc::clone(&spec.name), spec).is_some() {
            tracing::debug!("type registration replaced an existing spec");
        }
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the registry holds no types.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Arc<str>, ClassSpec>> {
        match self.types.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("TypeRegistry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Walk `start` and its ancestors, child declarations shadowing
    /// inherited ones. `None` if `start` is unknown.
    fn resolved_methods(
        types: &HashMap<Arc<str>, ClassSpec>,
        start: &str,
    ) -> Option<Vec<MethodSig>> {
        types.get(start)?;

        let mut resolved: Vec<MethodSig> = Vec::new();
        let mut seen_names: HashSet<Arc<str>> = HashSet::new();
        let mut visited: HashSet<Arc<str>> = HashSet::new();
        let mut queue: Vec<Arc<str>> = vec![Arc::from(start)];

        while let Some(current) = queue.pop() {
            if !visited.insert(Arc::clone(&current)) {
                continue;
            }
            let Some(spec) = types.get(&current) else {
                continue;
            };
            for sig in &spec.methods {
                if seen_names.insert(Arc::clone(&sig.name)) {
                    resolved.push(sig.clone());
                }
            }
            queue.extend(spec.parents.iter().cloned());
        }

        Some(resolved)
    }
}

impl Introspector for TypeRegistry {
    fn class_exists(&self, name: &str) -> bool {
        self.read()
            .get(name)
            .is_some_and(|spec| spec.kind == TypeKind::Class)
    }

    fn interface_exists(&self, name: &str) -> bool {
        self.read()
            .get(name)
            .is_some_and(|spec| spec.kind == TypeKind::Interface)
    }

    fn is_subtype(&self, class: &str, ancestor: &str) -> bool {
        // every type is a subtype of itself, registered or not
        if class == ancestor {
            return true;
        }

        let types = self.read();
        let mut visited: HashSet<Arc<str>> = HashSet::new();
        let mut queue: Vec<Arc<str>> = vec![Arc::from(class)];

        while let Some(current) = queue.pop() {
            if &*current == ancestor {
                return true;
            }
            if !visited.insert(Arc::clone(&current)) {
                continue;
            }
            if let Some(spec) = types.get(&current) {
                queue.extend(spec.parents.iter().cloned());
            }
        }

        false
    }

    fn public_methods(&self, name: &str) -> Option<Vec<MethodSig>> {
        let types = self.read();
        let mut methods = Self::resolved_methods(&types, name)?;
        methods.retain(|sig| sig.public);
        Some(methods)
    }

    fn method(&self, class: &str, name: &str) -> Option<MethodSig> {
        let types = self.read();
        Self::resolved_methods(&types, class)?
            .into_iter()
            .find(|sig| &*sig.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> TypeRegistry {
        let registry = TypeRegistry::new();
        registry.register(
            ClassSpec::interface("Countable").method(MethodSig::public("count", 0)),
        );
        registry.register(
            ClassSpec::interface("Collection")
                .extends("Countable")
                .method(MethodSig::public("items", 0)),
        );
        registry.register(
            ClassSpec::class("BaseBag")
                .implements("Collection")
                .method(MethodSig::public("count", 0))
                .method(MethodSig::public("items", 0))
                .method(MethodSig::private("rehash", 0)),
        );
        registry.register(ClassSpec::class("SortedBag").extends("BaseBag"));
        registry
    }

    #[test]
    fn test_existence_is_kind_aware() {
        let registry = fixture();
        assert!(registry.class_exists("BaseBag"));
        assert!(!registry.class_exists("Countable"));
        assert!(registry.interface_exists("Countable"));
        assert!(!registry.interface_exists("BaseBag"));
        assert!(!registry.class_exists("Nope"));
    }

    #[test]
    fn test_subtype_is_transitive() {
        let registry = fixture();
        assert!(registry.is_subtype("SortedBag", "SortedBag"));
        assert!(registry.is_subtype("SortedBag", "BaseBag"));
        assert!(registry.is_subtype("SortedBag", "Collection"));
        assert!(registry.is_subtype("SortedBag", "Countable"));
        assert!(!registry.is_subtype("BaseBag", "SortedBag"));
        assert!(!registry.is_subtype("Unknown", "Countable"));
    }

    #[test]
    fn test_public_methods_filters_and_inherits() {
        let registry = fixture();
        let methods = registry.public_methods("SortedBag").unwrap();
        let mut names: Vec<&str> = methods.iter().map(|m| &*m.name).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["count", "items"]);
        assert!(registry.public_methods("Unknown").is_none());
    }

    #[test]
    fn test_method_lookup_sees_private_and_inherited() {
        let registry = fixture();
        let sig = registry.method("SortedBag", "rehash").unwrap();
        assert!(!sig.public);
        assert!(registry.method("SortedBag", "count").is_some());
        assert!(registry.method("SortedBag", "missing").is_none());
        assert!(registry.method("Unknown", "count").is_none());
    }

    #[test]
    fn test_child_declaration_shadows_parent() {
        let registry = fixture();
        registry.register(
            ClassSpec::class("StrictBag")
                .extends("BaseBag")
                .method(MethodSig::public("count", 1)),
        );
        let sig = registry.method("StrictBag", "count").unwrap();
        assert_eq!(sig.required_params, 1);
    }

    #[test]
    fn test_cyclic_parents_terminate() {
        let registry = TypeRegistry::new();
        registry.register(ClassSpec::interface("A").extends("B"));
        registry.register(ClassSpec::interface("B").extends("A"));
        assert!(!registry.is_subtype("A", "C"));
        assert!(registry.public_methods("A").unwrap().is_empty());
    }
}
