//! Runtime type-pattern validation engine
//!
//! This library validates runtime values against declarative *type
//! patterns*: short textual expressions describing shapes of data, such
//! as `"int[]"` (a non-empty array of integers), `"boolean,object"` (a
//! pair of a boolean and an object) or `"string|~Countable"` (a string,
//! or anything that structurally quacks like `Countable`).
//!
//! Patterns compile once into an immutable evaluator tree and are cached
//! by source text; evaluation is a total function that never fails.
//!
//! # Example
//!
//! ```
//! use typeshape_rs::{compile, Value};
//! use serde_json::json;
//!
//! # fn example() -> anyhow::Result<()> {
//! let pattern = compile("(string|(boolean,object))[]")?;
//!
//! assert!(pattern.evaluate(&Value::from(json!(["a", "b"]))));
//! assert!(!pattern.evaluate(&Value::from(json!([]))));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Structural matching
//!
//! Leaves prefixed with `~` are matched structurally (duck typing)
//! against an object's public method surface rather than its nominal
//! type. The engine reaches the host's object model through the
//! [`Introspector`] capability; [`TypeRegistry`] is the stock
//! implementation, populated by the host at startup:
//!
//! ```
//! use typeshape_rs::{global_registry, is, ClassSpec, MethodSig, Value};
//!
//! # fn example() -> anyhow::Result<()> {
//! global_registry().register(
//!     ClassSpec::interface("Countable").method(MethodSig::public("count", 0)),
//! );
//! global_registry().register(
//!     ClassSpec::class("Bag").method(MethodSig::public("count", 0)),
//! );
//!
//! // `Bag` never declares that it implements `Countable`, but it walks
//! // and quacks like one.
//! assert!(is("~Countable", &Value::object("Bag"))?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

// Re-export commonly used items
pub use checker::{compile, global_registry, is, CompiledPattern, TypeChecker};
pub use classify::{classify, MetaType};
pub use pattern::{Node, PatternCache, PatternSyntaxError};
pub use reflect::{
    ClassSpec, Introspector, MethodSig, StructuralMatcher, TypeKind, TypeRegistry,
};
pub use value::{ObjectRef, Value};

/// Engine entry points and the compiled-pattern handle
pub mod checker;

/// Meta-type classification of runtime values
pub mod classify;

/// Pattern grammar: parser, evaluator tree, compile cache
pub mod pattern;

/// Reflection capability over the host object model
pub mod reflect;

/// Runtime value universe
pub mod value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber with default settings
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
