mod error;
pub mod vocab;

pub use error::*;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::{
    BlankNode, BlankNodeRef, Graph, IriParseError, Literal, LiteralRef, NamedNode, NamedNodeRef,
    NamedOrBlankNode, NamedOrBlankNodeRef, Subject, SubjectRef, Term, TermRef, Triple, TripleRef,
    Variable, VariableNameParseError, VariableRef,
};
pub use oxsdatatypes::{Date, DateTime, ParseDateTimeError};
