use crate::term::fmt_literal;
use crate::{GroupGraphPattern, Term};
use itertools::Itertools;
use ldquery_model::{Literal, NamedNode, Variable};
use std::fmt::{Display, Formatter};

/// The relational operators of SPARQL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl ComparisonOperator {
    /// Returns the operator for its CQL2 / SPARQL symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "=" => ComparisonOperator::Equal,
            "<>" | "!=" => ComparisonOperator::NotEqual,
            "<" => ComparisonOperator::Less,
            "<=" => ComparisonOperator::LessOrEqual,
            ">" => ComparisonOperator::Greater,
            ">=" => ComparisonOperator::GreaterOrEqual,
            _ => return None,
        })
    }
}

impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterOrEqual => ">=",
        })
    }
}

/// The built-in functions used by the query generation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Str,
    LCase,
    Regex,
    IsBlank,
    Sha256,
    Concat,
    Uri,
    Bound,
    /// An extension function identified by an IRI (e.g., a GeoSPARQL function).
    Custom(NamedNode),
}

impl Function {
    /// The accepted number of arguments (inclusive bounds).
    fn arity(&self) -> (usize, usize) {
        match self {
            Function::Str
            | Function::LCase
            | Function::IsBlank
            | Function::Sha256
            | Function::Uri
            | Function::Bound => (1, 1),
            Function::Regex => (2, 3),
            Function::Concat => (1, usize::MAX),
            Function::Custom(_) => (0, usize::MAX),
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Function::Str => f.write_str("STR"),
            Function::LCase => f.write_str("LCASE"),
            Function::Regex => f.write_str("REGEX"),
            Function::IsBlank => f.write_str("isBLANK"),
            Function::Sha256 => f.write_str("SHA256"),
            Function::Concat => f.write_str("CONCAT"),
            Function::Uri => f.write_str("URI"),
            Function::Bound => f.write_str("BOUND"),
            Function::Custom(iri) => write!(f, "{iri}"),
        }
    }
}

/// An aggregate of a SELECT projection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Aggregate {
    /// `COUNT(*)` if the expression is [None].
    Count {
        distinct: bool,
        expression: Option<Box<Expression>>,
    },
    Sum {
        distinct: bool,
        expression: Box<Expression>,
    },
}

impl Display for Aggregate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (name, distinct, expression) = match self {
            Aggregate::Count {
                distinct,
                expression,
            } => ("COUNT", *distinct, expression.as_deref()),
            Aggregate::Sum {
                distinct,
                expression,
            } => ("SUM", *distinct, Some(expression.as_ref())),
        };
        write!(f, "{name}(")?;
        if distinct {
            f.write_str("DISTINCT ")?;
        }
        match expression {
            Some(expression) => write!(f, "{expression}")?,
            None => f.write_str("*")?,
        }
        f.write_str(")")
    }
}

/// A SPARQL expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    Variable(Variable),
    NamedNode(NamedNode),
    Literal(Literal),
    Or(Vec<Expression>),
    And(Vec<Expression>),
    Comparison(Box<Expression>, ComparisonOperator, Box<Expression>),
    In(Box<Expression>, Vec<Expression>),
    NotIn(Box<Expression>, Vec<Expression>),
    Not(Box<Expression>),
    FunctionCall(Function, Vec<Expression>),
    Exists(Box<GroupGraphPattern>),
    NotExists(Box<GroupGraphPattern>),
    Aggregate(Aggregate),
}

impl Expression {
    pub fn comparison(
        left: impl Into<Expression>,
        operator: ComparisonOperator,
        right: impl Into<Expression>,
    ) -> Self {
        Expression::Comparison(Box::new(left.into()), operator, Box::new(right.into()))
    }

    pub fn call(function: Function, args: impl IntoIterator<Item = Expression>) -> Self {
        Expression::FunctionCall(function, args.into_iter().collect())
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Expression::Not(Box::new(self))
    }

    fn is_primary(&self) -> bool {
        matches!(
            self,
            Expression::Variable(_)
                | Expression::NamedNode(_)
                | Expression::Literal(_)
                | Expression::FunctionCall(..)
                | Expression::Aggregate(_)
        )
    }

    fn fmt_operand(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_primary() {
            write!(f, "{self}")
        } else {
            write!(f, "({self})")
        }
    }
}

impl Display for Expression {
    #[allow(clippy::panic, reason = "Indicates programming error")]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Variable(variable) => write!(f, "{variable}"),
            Expression::NamedNode(node) => write!(f, "{node}"),
            Expression::Literal(literal) => fmt_literal(literal, f),
            Expression::Or(operands) | Expression::And(operands) => {
                let separator = if matches!(self, Expression::Or(_)) {
                    " || "
                } else {
                    " && "
                };
                if operands.is_empty() {
                    panic!("A logical expression must have at least one operand.");
                }
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(separator)?;
                    }
                    operand.fmt_operand(f)?;
                }
                Ok(())
            }
            Expression::Comparison(left, operator, right) => {
                left.fmt_operand(f)?;
                write!(f, " {operator} ")?;
                right.fmt_operand(f)
            }
            Expression::In(needle, haystack) | Expression::NotIn(needle, haystack) => {
                needle.fmt_operand(f)?;
                if matches!(self, Expression::NotIn(..)) {
                    f.write_str(" NOT IN (")?;
                } else {
                    f.write_str(" IN (")?;
                }
                write!(f, "{})", haystack.iter().format(", "))
            }
            Expression::Not(inner) => {
                f.write_str("!")?;
                inner.fmt_operand(f)
            }
            Expression::FunctionCall(function, args) => {
                let (min, max) = function.arity();
                if args.len() < min || args.len() > max {
                    panic!("{function} does not accept {} arguments.", args.len());
                }
                write!(f, "{function}({})", args.iter().format(", "))
            }
            Expression::Exists(pattern) => write!(f, "EXISTS {pattern}"),
            Expression::NotExists(pattern) => write!(f, "NOT EXISTS {pattern}"),
            Expression::Aggregate(aggregate) => write!(f, "{aggregate}"),
        }
    }
}

impl From<Variable> for Expression {
    fn from(value: Variable) -> Self {
        Expression::Variable(value)
    }
}

impl From<NamedNode> for Expression {
    fn from(value: NamedNode) -> Self {
        Expression::NamedNode(value)
    }
}

impl From<Literal> for Expression {
    fn from(value: Literal) -> Self {
        Expression::Literal(value)
    }
}

impl From<Aggregate> for Expression {
    fn from(value: Aggregate) -> Self {
        Expression::Aggregate(value)
    }
}

impl TryFrom<Term> for Expression {
    type Error = Term;

    /// Blank nodes are not allowed in expressions and are returned as the error.
    fn try_from(value: Term) -> Result<Self, Self::Error> {
        match value {
            Term::Variable(variable) => Ok(Expression::Variable(variable)),
            Term::NamedNode(node) => Ok(Expression::NamedNode(node)),
            Term::Literal(literal) => Ok(Expression::Literal(literal)),
            Term::BlankNode(_) => Err(value),
        }
    }
}
