use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A structural problem in a shape graph.
///
/// These errors indicate a configuration problem of the shapes that drive the query generation. They
/// are never caused by the filter a client sends and are therefore kept apart from [CqlError].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShapeError {
    #[error("The shape {shape} does not declare a sh:path.")]
    MissingPath { shape: String },
    #[error("The node shape {shape} does not declare a target class.")]
    MissingTargetClass { shape: String },
    #[error("The endpoint shape {shape} does not declare a hierarchy level.")]
    MissingHierarchyLevel { shape: String },
    #[error("The RDF list starting at {node} is malformed: {message}")]
    MalformedList { node: String, message: String },
    #[error("Unsupported property path at {node}: {message}")]
    UnsupportedPath { node: String, message: String },
    #[error("The shape {shape} is ambiguous: {message}")]
    Ambiguous { shape: String, message: String },
    #[error("Invalid value for {predicate} on {shape}: {value}")]
    InvalidValue {
        shape: String,
        predicate: String,
        value: String,
    },
    #[error("The shape {0} could not be found.")]
    NotFound(String),
    #[error("Could not parse the shape graph: {0}")]
    Syntax(String),
}

/// The kind of a temporal operand, used when reporting unsupported temporal relations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemporalOperandKind {
    Instant,
    Interval,
}

impl Display for TemporalOperandKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TemporalOperandKind::Instant => f.write_str("instant"),
            TemporalOperandKind::Interval => f.write_str("interval"),
        }
    }
}

/// An invalid CQL2-JSON filter.
///
/// These errors are caused by the filter document itself and are reported back to the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CqlError {
    #[error("Malformed CQL2-JSON document: {0}")]
    Malformed(String),
    #[error("The operator '{0}' is not supported.")]
    UnsupportedOperator(String),
    #[error("The operator '{operator}' expects {expected} arguments but got {actual}.")]
    Arity {
        operator: String,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid argument for '{operator}': {message}")]
    InvalidArgument { operator: String, message: String },
    #[error("The temporal operator '{operator}' is not defined for {left} and {right} operands.")]
    UnsupportedTemporal {
        operator: String,
        left: TemporalOperandKind,
        right: TemporalOperandKind,
    },
    #[error("Unknown queryable '{0}'.")]
    UnknownQueryable(String),
    #[error("The queryable '{name}' could not be lowered.")]
    Queryable {
        name: String,
        #[source]
        source: ShapeError,
    },
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Invalid date or datetime '{0}'.")]
    InvalidDateTime(String),
    #[error("Not supported: {0}")]
    Unsupported(String),
}

/// Any error that can occur while building a query.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryBuildError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Cql(#[from] CqlError),
    #[error("Invalid value for the parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },
}

impl QueryBuildError {
    /// Returns true if the error was caused by the request rather than by the configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QueryBuildError::Cql(_) | QueryBuildError::InvalidParameter { .. }
        )
    }
}
