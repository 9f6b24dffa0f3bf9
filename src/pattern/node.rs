//! Evaluator tree nodes.
//!
//! A compiled pattern is an immutable tree of these nodes, built once
//! by the parser and never mutated, which makes concurrent read-only
//! evaluation safe without locks.

use crate::checker::EvalContext;
use crate::classify::classify;
use crate::value::Value;
use std::sync::Arc;

/// One node of a compiled pattern.
///
/// The set is closed and dispatch is an exhaustive `match`; each
/// variant carries exactly the data its semantics need.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Fixed-arity container match: one child per element, in the
    /// container's natural iteration order. Always ≥ 2 children (a
    /// singleton never gets a wrapper node).
    Sequence(Vec<Node>),
    /// Matches if any child matches. Always ≥ 2 children.
    Alternative(Vec<Node>),
    /// Container whose size lies in `[min, max]` and whose every
    /// element matches the inner node.
    Repetition {
        /// Pattern each element must match
        node: Box<Node>,
        /// Minimum element count
        min: usize,
        /// Maximum element count; `None` means unbounded
        max: Option<usize>,
    },
    /// A named type check: meta-type, `mixed`, or class/interface name;
    /// `structural` is set when the pattern used the `~` prefix.
    Leaf {
        /// Meta-type keyword, `mixed`, or class/interface name
        name: Arc<str>,
        /// Match by public method surface instead of nominal type
        structural: bool,
    },
}

impl Node {
    /// Does `value` match this node? Total; never fails.
    pub(crate) fn evaluate(&self, value: &Value, ctx: &EvalContext) -> bool {
        match self {
            Node::Sequence(children) => {
                let Some(elements) = value.elements() else {
                    return false;
                };
                if elements.len() != children.len() {
                    return false;
                }
                children
                    .iter()
                    .zip(elements)
                    .all(|(child, element)| child.evaluate(element, ctx))
            }

            Node::Alternative(children) => {
                children.iter().any(|child| child.evaluate(value, ctx))
            }

            Node::Repetition { node, min, max } => {
                let Some(elements) = value.elements() else {
                    return false;
                };
                let count = elements.len();
                if count < *min {
                    return false;
                }
                if max.is_some_and(|max| count > max) {
                    return false;
                }
                // vacuously true for an empty container when min = 0
                elements.into_iter().all(|element| node.evaluate(element, ctx))
            }

            Node::Leaf { name, structural } => {
                if *structural {
                    match value {
                        Value::Object(obj) => ctx.structural.looks_like(
                            obj.class(),
                            name,
                            ctx.introspector.as_ref(),
                        ),
                        _ => false,
                    }
                } else {
                    classify(value, name, ctx.introspector.as_ref())
                }
            }
        }
    }

    /// Render the node back into pattern syntax, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Node::Sequence(children) => {
                let parts: Vec<String> = children.iter().map(Node::describe).collect();
                format!("({})", parts.join(","))
            }
            Node::Alternative(children) => {
                let parts: Vec<String> = children.iter().map(Node::describe).collect();
                format!("({})", parts.join("|"))
            }
            Node::Repetition { node, min, max } => {
                let range = match (*min, *max) {
                    (1, None) => String::from(""),
                    (min, None) => format!("{min}.."),
                    (min, Some(max)) if min == max => format!("{min}"),
                    (min, Some(max)) => format!("{min}..{max}"),
                };
                format!("{}[{}]", node.describe(), range)
            }
            Node::Leaf { name, structural } => {
                if *structural {
                    format!("~{name}")
                } else {
                    name.to_string()
                }
            }
        }
    }
}
