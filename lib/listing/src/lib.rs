//! Builders for the queries of listing endpoints.
//!
//! The [QueryAssembler] composes the final CONSTRUCT query of an object or listing request from a
//! lowered profile, the selection of the listed focus nodes, and an optional [SearchQuery]. The
//! remaining builders produce standalone queries over the same selection:
//!
//! - [CountQuery] counts the selected focus nodes.
//! - [FacetQuery] counts the selected focus nodes per property value.
//! - [SearchQuery] ranks literals that match a search term.
//!
//! Query string parameters of a listing are read into [ListingParams] and turned into
//! [Pagination], [Ordering], [DatetimeFilter], and [bbox_filter].

mod assembler;
mod count;
mod facet;
mod filters;
mod params;
mod search;
mod selection;

pub use assembler::*;
pub use count::*;
pub use facet::*;
pub use filters::*;
pub use params::{ListingParams, OrderValue, Ordering, Pagination, SortDirection};
pub use search::*;
