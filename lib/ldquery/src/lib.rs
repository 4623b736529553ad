#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]

mod cache;
mod compiler;
mod config;

pub use cache::*;
pub use compiler::*;
pub use config::*;

pub mod model {
    pub use ldquery_model::*;
}

pub mod grammar {
    pub use ldquery_grammar::*;
}

pub mod shacl {
    pub use ldquery_shacl::*;
}

pub mod cql {
    pub use ldquery_cql::*;
}

pub mod listing {
    pub use ldquery_listing::*;
}
