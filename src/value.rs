//! Runtime value universe checked by type patterns.

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// A runtime value that patterns evaluate against.
///
/// The universe is closed: every representable value falls into exactly
/// one of these variants, which is what lets evaluation be total.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value - using Arc for cheap cloning
    String(Arc<str>),
    /// Ordered container of values
    Array(Vec<Value>),
    /// Keyed container; entries keep insertion order
    Map(Vec<(Arc<str>, Value)>),
    /// Object instance, tagged with its concrete class name
    Object(ObjectRef),
    /// Named invokable (function or bound method)
    Callable(Arc<str>),
    /// Opaque host handle, tagged by kind (stream, socket, ...)
    Resource(Arc<str>),
}

/// A class-tagged handle into the host object model.
///
/// The engine never inspects instance state; the class name is all it
/// needs to answer nominal and structural questions through an
/// [`Introspector`](crate::Introspector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    class: Arc<str>,
}

impl ObjectRef {
    /// Create a handle for an instance of `class`.
    pub fn new(class: impl AsRef<str>) -> Self {
        Self {
            class: Arc::from(class.as_ref()),
        }
    }

    /// Concrete class name of the instance.
    pub fn class(&self) -> &str {
        &self.class
    }
}

impl Value {
    /// Shorthand for an object value of the given class.
    pub fn object(class: impl AsRef<str>) -> Self {
        Value::Object(ObjectRef::new(class))
    }

    /// Shorthand for a named callable value.
    pub fn callable(name: impl AsRef<str>) -> Self {
        Value::Callable(Arc::from(name.as_ref()))
    }

    /// Shorthand for a resource handle of the given kind.
    pub fn resource(kind: impl AsRef<str>) -> Self {
        Value::Resource(Arc::from(kind.as_ref()))
    }

    /// Shorthand for a string value.
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Arc::from(s.as_ref()))
    }

    /// Element count if this value is a container (array or map).
    pub fn container_len(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Iterate container elements in natural order: array order for
    /// arrays, insertion order for maps (keys are not visited).
    pub fn elements(&self) -> Option<Elements<'_>> {
        match self {
            Value::Array(items) => Some(Elements(ElementsInner::Array(items.iter()))),
            Value::Map(entries) => Some(Elements(ElementsInner::Map(entries.iter()))),
            _ => None,
        }
    }
}

/// Iterator over the elements of a container [`Value`].
pub struct Elements<'a>(ElementsInner<'a>);

enum ElementsInner<'a> {
    Array(std::slice::Iter<'a, Value>),
    Map(std::slice::Iter<'a, (Arc<str>, Value)>),
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.0 {
            ElementsInner::Array(iter) => iter.next(),
            ElementsInner::Map(iter) => iter.next().map(|(_, v)| v),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.0 {
            ElementsInner::Array(iter) => iter.size_hint(),
            ElementsInner::Map(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for Elements<'_> {}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    tracing::warn!("unable to convert JSON number: {:?}", n);
                    Value::Float(0.0)
                }
            }
            JsonValue::String(s) => Value::String(Arc::from(s)),
            JsonValue::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            JsonValue::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Arc::from(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

// Custom Serialize to handle Arc<str> transparently; non-data variants
// render as single-entry tag maps so log output stays unambiguous.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(&**key, value)?;
                }
                map.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$class", obj.class())?;
                map.end()
            }
            Value::Callable(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$callable", &**name)?;
                map.end()
            }
            Value::Resource(kind) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$resource", &**kind)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!(true)), Value::Bool(true));
        assert_eq!(Value::from(json!(42)), Value::Int(42));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!("hi")), Value::string("hi"));
    }

    #[test]
    fn test_from_json_containers() {
        let value = Value::from(json!([1, "two"]));
        assert_eq!(
            value,
            Value::Array(vec![Value::Int(1), Value::string("two")])
        );

        let value = Value::from(json!({"a": 1}));
        match value {
            Value::Map(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(&*entries[0].0, "a");
                assert_eq!(entries[0].1, Value::Int(1));
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn test_container_len() {
        assert_eq!(Value::from(json!([1, 2, 3])).container_len(), Some(3));
        assert_eq!(Value::from(json!({"a": 1})).container_len(), Some(1));
        assert_eq!(Value::Int(1).container_len(), None);
        assert_eq!(Value::object("Foo").container_len(), None);
    }

    #[test]
    fn test_elements_visits_map_values_in_order() {
        let value = Value::Map(vec![
            (Arc::from("b"), Value::Int(2)),
            (Arc::from("a"), Value::Int(1)),
        ]);
        let seen: Vec<&Value> = value.elements().unwrap().collect();
        assert_eq!(seen, vec![&Value::Int(2), &Value::Int(1)]);
    }

    #[test]
    fn test_elements_is_exact_size() {
        let value = Value::from(json!([1, 2]));
        let iter = value.elements().unwrap();
        assert_eq!(iter.len(), 2);
    }

    #[test]
    fn test_serialize_roundtrips_through_json() {
        let value = Value::from(json!({"a": [1, true, "x"]}));
        let encoded = serde_json::to_value(&value).unwrap();
        assert_eq!(encoded, json!({"a": [1, true, "x"]}));
    }

    #[test]
    fn test_serialize_object_tag() {
        let encoded = serde_json::to_value(Value::object("Bag")).unwrap();
        assert_eq!(encoded, json!({"$class": "Bag"}));
    }
}
