//! Meta-type classification of runtime values.
//!
//! A pattern leaf without the `~` prefix names either a *meta-type* (a
//! predicate over primitive value categories such as `numeric` or
//! `scalar`), the wildcard `mixed`, or a concrete class/interface, in
//! which case the check is a nominal instance-of.

use crate::reflect::Introspector;
use crate::value::Value;

/// Closed table of meta-type predicates.
///
/// Several historical synonyms resolve to the same predicate
/// (`bool`/`boolean`, `int`/`integer`/`long`, `double`/`float`/`real`,
/// `callback`/`callable`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaType {
    /// Ordered or keyed container
    Array,
    /// Boolean
    Bool,
    /// Named invokable
    Callable,
    /// String naming a known class
    Class,
    /// Floating point number
    Float,
    /// Integer
    Int,
    /// String naming a known interface
    Interface,
    /// Null
    Null,
    /// Integer, float, or numeric string
    Numeric,
    /// Object instance
    Object,
    /// Opaque host handle
    Resource,
    /// Integer, float, string, or boolean
    Scalar,
    /// String
    String,
}

impl MetaType {
    /// Resolve a leaf name to a meta-type, if it names one.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "array" => MetaType::Array,
            "bool" | "boolean" => MetaType::Bool,
            "callback" | "callable" => MetaType::Callable,
            "class" => MetaType::Class,
            "double" | "float" | "real" => MetaType::Float,
            "int" | "integer" | "long" => MetaType::Int,
            "interface" => MetaType::Interface,
            "null" => MetaType::Null,
            "numeric" => MetaType::Numeric,
            "object" => MetaType::Object,
            "resource" => MetaType::Resource,
            "scalar" => MetaType::Scalar,
            "string" => MetaType::String,
            _ => return None,
        })
    }

    /// Apply the predicate to a value.
    pub fn matches(self, value: &Value, introspector: &dyn Introspector) -> bool {
        match self {
            MetaType::Array => matches!(value, Value::Array(_) | Value::Map(_)),
            MetaType::Bool => matches!(value, Value::Bool(_)),
            MetaType::Callable => matches!(value, Value::Callable(_)),
            MetaType::Class => match value {
                Value::String(name) => introspector.class_exists(name),
                _ => false,
            },
            MetaType::Float => matches!(value, Value::Float(_)),
            MetaType::Int => matches!(value, Value::Int(_)),
            MetaType::Interface => match value {
                Value::String(name) => introspector.interface_exists(name),
                _ => false,
            },
            MetaType::Null => matches!(value, Value::Null),
            MetaType::Numeric => match value {
                Value::Int(_) | Value::Float(_) => true,
                Value::String(s) => is_numeric_str(s),
                _ => false,
            },
            MetaType::Object => matches!(value, Value::Object(_)),
            MetaType::Resource => matches!(value, Value::Resource(_)),
            MetaType::Scalar => matches!(
                value,
                Value::Int(_) | Value::Float(_) | Value::String(_) | Value::Bool(_)
            ),
            MetaType::String => matches!(value, Value::String(_)),
        }
    }
}

/// Does `value` have type `name`?
///
/// `mixed` accepts everything. A name in the meta-type table applies
/// its predicate; any other name is treated as a class/interface and
/// the check becomes nominal instance-of through the introspector.
pub fn classify(value: &Value, name: &str, introspector: &dyn Introspector) -> bool {
    if name == "mixed" {
        return true;
    }

    if let Some(meta) = MetaType::from_name(name) {
        return meta.matches(value, introspector);
    }

    match value {
        Value::Object(obj) => introspector.is_subtype(obj.class(), name),
        _ => false,
    }
}

/// Decimal number syntax: optional leading whitespace, optional sign,
/// digits with optional fraction and exponent. Rejects hex and the
/// textual float specials (`inf`, `NaN`) that `f64::from_str` accepts.
fn is_numeric_str(s: &str) -> bool {
    let s = s.trim_start();
    if s.is_empty() {
        return false;
    }
    if s.chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return false;
    }
    s.parse::<f64>().is_ok()
}
