use itertools::Itertools;
use ldquery_model::{NamedNode, NamedNodeRef};
use std::fmt::{Display, Formatter};

/// A SPARQL property path expression.
///
/// The renderer adds parentheses only where the SPARQL grammar requires them. For example, a
/// modifier can only be applied to a primary path, so `ZeroOrMore(Inverse(p))` renders as `(^p)*`
/// while `Inverse(ZeroOrMore(p))` renders as `^p*`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathExpr {
    Iri(NamedNode),
    Inverse(Box<PathExpr>),
    Sequence(Vec<PathExpr>),
    Alternative(Vec<PathExpr>),
    ZeroOrMore(Box<PathExpr>),
    OneOrMore(Box<PathExpr>),
    ZeroOrOne(Box<PathExpr>),
}

impl PathExpr {
    pub fn inverse(path: impl Into<PathExpr>) -> Self {
        PathExpr::Inverse(Box::new(path.into()))
    }

    /// Returns the predicate if this path is a single IRI.
    pub fn as_iri(&self) -> Option<&NamedNode> {
        match self {
            PathExpr::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            PathExpr::Alternative(_) => 0,
            PathExpr::Sequence(_) => 1,
            PathExpr::Inverse(_) => 2,
            PathExpr::ZeroOrMore(_) | PathExpr::OneOrMore(_) | PathExpr::ZeroOrOne(_) => 3,
            PathExpr::Iri(_) => 4,
        }
    }

    fn fmt_operand(&self, min_precedence: u8, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl Display for PathExpr {
    #[allow(clippy::panic, reason = "Indicates programming error")]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathExpr::Iri(iri) => write!(f, "{iri}"),
            PathExpr::Inverse(inner) => {
                f.write_str("^")?;
                inner.fmt_operand(3, f)
            }
            PathExpr::ZeroOrMore(inner) => {
                inner.fmt_operand(4, f)?;
                f.write_str("*")
            }
            PathExpr::OneOrMore(inner) => {
                inner.fmt_operand(4, f)?;
                f.write_str("+")
            }
            PathExpr::ZeroOrOne(inner) => {
                inner.fmt_operand(4, f)?;
                f.write_str("?")
            }
            PathExpr::Sequence(elements) => {
                if elements.is_empty() {
                    panic!("A sequence path must have at least one element.");
                }
                write!(
                    f,
                    "{}",
                    elements
                        .iter()
                        .map(|element| Operand(element, 2))
                        .format("/")
                )
            }
            PathExpr::Alternative(members) => {
                if members.is_empty() {
                    panic!("An alternative path must have at least one member.");
                }
                write!(
                    f,
                    "{}",
                    members
                        .iter()
                        .map(|member| Operand(member, 1))
                        .format("|")
                )
            }
        }
    }
}

struct Operand<'a>(&'a PathExpr, u8);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt_operand(self.1, f)
    }
}

impl From<NamedNode> for PathExpr {
    fn from(value: NamedNode) -> Self {
        PathExpr::Iri(value)
    }
}

impl From<NamedNodeRef<'_>> for PathExpr {
    fn from(value: NamedNodeRef<'_>) -> Self {
        PathExpr::Iri(value.into_owned())
    }
}
