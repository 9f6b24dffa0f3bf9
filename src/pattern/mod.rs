//! Pattern grammar: parser, evaluator tree, compile cache.
//!
//! Grammar (operator precedence low → high: `,` < `|` < `[...]` < `(...)`):
//!
//! ```text
//! list      = or { ',' or }
//! or        = repeated { '|' repeated }
//! repeated  = term [ '[' range? ']' ]
//! term      = '(' list ')' | leaf
//! leaf      = ['~'] identifier
//! range     = digits? ('..' digits?)?
//! ```
//!
//! Examples:
//!
//! ```text
//! string                       matches only strings
//! string|integer               strings or integers
//! boolean[]                    non-empty arrays of booleans
//! boolean,object               a pair of a boolean and an object
//! (string|(boolean,object))[]  non-empty arrays of either
//! int[10]                      exactly ten integers
//! int[0..]                     zero or more integers
//! int[..5]                     one to five integers
//! ~Countable                   anything that quacks like Countable
//! ```

/// Compile cache keyed by pattern source text
pub mod cache;
/// Compile-time error type
pub mod error;
/// Evaluator tree nodes
pub mod node;
/// Recursive-descent pattern compiler
pub mod parser;

pub use cache::PatternCache;
pub use error::PatternSyntaxError;
pub use node::Node;
