use ldquery_grammar::PathExpr;
use ldquery_model::NamedNode;

/// A SHACL property path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    Direct(NamedNode),
    Inverse(Box<PropertyPath>),
    Sequence(Vec<PropertyPath>),
    Alternative(Vec<PropertyPath>),
    ZeroOrMore(Box<PropertyPath>),
    OneOrMore(Box<PropertyPath>),
    ZeroOrOne(Box<PropertyPath>),
}

impl PropertyPath {
    /// The number of node variables needed to bind every hop of the path.
    ///
    /// Only sequences introduce intermediate nodes. Any other path binds a single node, as the
    /// intermediate nodes of alternatives and cardinality paths cannot be bound separately.
    pub fn hop_count(&self) -> usize {
        match self {
            PropertyPath::Sequence(elements) => elements.len(),
            _ => 1,
        }
    }

    /// Returns the predicate of a direct path.
    pub fn as_direct(&self) -> Option<&NamedNode> {
        match self {
            PropertyPath::Direct(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns the predicate of an inverse direct path.
    pub fn as_inverse_direct(&self) -> Option<&NamedNode> {
        match self {
            PropertyPath::Inverse(inner) => inner.as_direct(),
            _ => None,
        }
    }

    /// Returns true for `*`, `+`, and `?` paths.
    pub fn is_cardinality(&self) -> bool {
        matches!(
            self,
            PropertyPath::ZeroOrMore(_) | PropertyPath::OneOrMore(_) | PropertyPath::ZeroOrOne(_)
        )
    }

    /// Converts the path into a single SPARQL path expression.
    pub fn to_path_expr(&self) -> PathExpr {
        match self {
            PropertyPath::Direct(iri) => PathExpr::Iri(iri.clone()),
            PropertyPath::Inverse(inner) => PathExpr::Inverse(Box::new(inner.to_path_expr())),
            PropertyPath::Sequence(elements) => {
                PathExpr::Sequence(elements.iter().map(Self::to_path_expr).collect())
            }
            PropertyPath::Alternative(members) => {
                PathExpr::Alternative(members.iter().map(Self::to_path_expr).collect())
            }
            PropertyPath::ZeroOrMore(inner) => {
                PathExpr::ZeroOrMore(Box::new(inner.to_path_expr()))
            }
            PropertyPath::OneOrMore(inner) => PathExpr::OneOrMore(Box::new(inner.to_path_expr())),
            PropertyPath::ZeroOrOne(inner) => PathExpr::ZeroOrOne(Box::new(inner.to_path_expr())),
        }
    }
}

/// A property path of a shape together with the extensions that affect the CONSTRUCT template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapePath {
    pub path: PropertyPath,
    /// Collapses the path to a single `(focus, alias, terminal)` triple in the CONSTRUCT template.
    pub alias: Option<NamedNode>,
}

impl ShapePath {
    pub fn new(path: PropertyPath) -> Self {
        Self { path, alias: None }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: Option<NamedNode>) -> Self {
        self.alias = alias;
        self
    }
}

impl From<PropertyPath> for ShapePath {
    fn from(value: PropertyPath) -> Self {
        Self::new(value)
    }
}
