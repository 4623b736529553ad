use ldquery_model::vocab::xsd;
use ldquery_model::{BlankNode, Literal, NamedNode, NamedNodeRef, Variable};
use std::fmt::{Display, Formatter};

/// Creates a variable from a name that is known to be valid.
///
/// All variable names used by the query generation are made up of ASCII letters, digits and
/// underscores.
pub fn var(name: impl Into<String>) -> Variable {
    Variable::new_unchecked(name)
}

/// A term that can appear in a triple pattern, a VALUES block, or an expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(Variable),
    NamedNode(NamedNode),
    Literal(Literal),
    BlankNode(BlankNode),
}

impl Term {
    /// Creates a variable term.
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(var(name))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Variable(variable) => write!(f, "{variable}"),
            Term::NamedNode(node) => write!(f, "{node}"),
            Term::Literal(literal) => fmt_literal(literal, f),
            Term::BlankNode(node) => write!(f, "{node}"),
        }
    }
}

impl From<Variable> for Term {
    fn from(value: Variable) -> Self {
        Term::Variable(value)
    }
}

impl From<NamedNode> for Term {
    fn from(value: NamedNode) -> Self {
        Term::NamedNode(value)
    }
}

impl From<NamedNodeRef<'_>> for Term {
    fn from(value: NamedNodeRef<'_>) -> Self {
        Term::NamedNode(value.into_owned())
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Term::Literal(value)
    }
}

impl From<BlankNode> for Term {
    fn from(value: BlankNode) -> Self {
        Term::BlankNode(value)
    }
}

/// Writes a literal using the short SPARQL syntax where the grammar allows it.
///
/// Integers, decimals and booleans in their lexical form are written without quotes and datatype.
/// Everything else uses the N-Triples syntax, which is also valid SPARQL.
pub(crate) fn fmt_literal(literal: &Literal, f: &mut Formatter<'_>) -> std::fmt::Result {
    let value = literal.value();
    let datatype = literal.datatype();
    let short = (datatype == xsd::INTEGER && is_integer_lexical(value))
        || (datatype == xsd::DECIMAL && is_decimal_lexical(value))
        || (datatype == xsd::BOOLEAN && matches!(value, "true" | "false"));
    if short {
        f.write_str(value)
    } else {
        write!(f, "{literal}")
    }
}

fn is_integer_lexical(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal_lexical(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    match unsigned.split_once('.') {
        Some((int, frac)) => {
            !frac.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
