//! Shapes that describe which graph fragment to retrieve for a resource and how they are lowered
//! into SPARQL.
//!
//! Shape graphs are read once by a [ShapeGraphReader] into the typed [NodeShape] and
//! [PropertyShape] structures. The [ShapeProcessor] then lowers these structures into WHERE clause
//! fragments and CONSTRUCT template triples for a given focus node.
//!
//! # Relevant Resources
//! - [SHACL Property Paths](https://www.w3.org/TR/shacl/#property-paths)

mod bnode;
mod path;
mod processor;
mod reader;
mod shape;

pub use path::*;
pub use processor::*;
pub use reader::*;
pub use shape::*;
