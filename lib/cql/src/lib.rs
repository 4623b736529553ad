//! Translation of CQL2-JSON filter documents into SPARQL graph patterns.
//!
//! A document is first read into a [CqlExpression]. The [CqlTranslator] then lowers the expression
//! into a [GroupGraphPattern](ldquery_grammar::GroupGraphPattern) over `?focus_node`:
//!
//! - `and` keeps its operands in one block, `or` creates a UNION with one branch per operand, and
//!   `not` wraps its operand in `FILTER NOT EXISTS`.
//! - Comparisons, `like` and `in` bind the property of the focus node and constrain the bound
//!   value.
//! - Spatial relations compare the geometry of the focus node with a GeoJSON geometry, using the
//!   configured [SpatialTarget].
//! - Temporal relations are expressed as comparisons of the bounds of both operands.
//! - Any other operator is looked up in a [CqlFunctionRegistry].
//!
//! # Relevant Resources
//! - [OGC CQL2](https://docs.ogc.org/is/21-065r2/21-065r2.html)
//! - [GeoSPARQL](https://docs.ogc.org/is/22-047r1/22-047r1.html)

mod ast;
mod functions;
mod geometry;
mod spatial;
mod temporal;
mod translator;
mod value;

pub use ast::*;
pub use functions::*;
pub use geometry::*;
pub use spatial::*;
pub use temporal::*;
pub use translator::*;
pub use value::*;
