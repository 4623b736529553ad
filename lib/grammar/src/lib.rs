//! A typed syntax tree for the subset of SPARQL 1.1 that the query generation emits.
//!
//! Every node implements [Display](std::fmt::Display), which renders the exact text the node
//! contributes to the final query. Rendering is a pure function over the tree. Nodes that are
//! structurally incomplete (e.g., an empty UNION or a FILTER over an empty conjunction) are
//! programming errors and abort rendering with a panic instead of emitting partial query text.
//!
//! # Relevant Resources
//! - [SPARQL 1.1 Query Language Grammar](https://www.w3.org/TR/sparql11-query/#grammar)

mod expression;
mod path;
mod pattern;
mod query;
mod term;
mod triple;

pub use expression::*;
pub use path::*;
pub use pattern::*;
pub use query::*;
pub use term::*;
pub use triple::*;
