use crate::{PathExpr, Term};
use ldquery_model::{NamedNode, NamedNodeRef, Variable};
use std::fmt::{Display, Formatter};

/// The predicate position of a [TriplePattern].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Variable(Variable),
    Path(PathExpr),
}

impl Verb {
    /// Returns the predicate term if this verb can be used in a CONSTRUCT template.
    pub fn as_simple_predicate(&self) -> Option<Term> {
        match self {
            Verb::Variable(variable) => Some(Term::Variable(variable.clone())),
            Verb::Path(PathExpr::Iri(iri)) => Some(Term::NamedNode(iri.clone())),
            Verb::Path(_) => None,
        }
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Verb::Variable(variable) => write!(f, "{variable}"),
            Verb::Path(path) => write!(f, "{path}"),
        }
    }
}

impl From<Variable> for Verb {
    fn from(value: Variable) -> Self {
        Verb::Variable(value)
    }
}

impl From<PathExpr> for Verb {
    fn from(value: PathExpr) -> Self {
        Verb::Path(value)
    }
}

impl From<NamedNode> for Verb {
    fn from(value: NamedNode) -> Self {
        Verb::Path(PathExpr::Iri(value))
    }
}

impl From<NamedNodeRef<'_>> for Verb {
    fn from(value: NamedNodeRef<'_>) -> Self {
        Verb::Path(PathExpr::Iri(value.into_owned()))
    }
}

/// A triple pattern of a WHERE clause. The predicate may be a property path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: Term,
    pub verb: Verb,
    pub object: Term,
}

impl TriplePattern {
    pub fn new(subject: impl Into<Term>, verb: impl Into<Verb>, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            verb: verb.into(),
            object: object.into(),
        }
    }

    /// Returns the CONSTRUCT counterpart of this pattern, if the predicate is not a path.
    pub fn to_simple(&self) -> Option<SimpleTriple> {
        let predicate = self.verb.as_simple_predicate()?;
        Some(SimpleTriple {
            subject: self.subject.clone(),
            predicate,
            object: self.object.clone(),
        })
    }
}

impl Display for TriplePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.verb, self.object)
    }
}

/// A triple of a CONSTRUCT template. The predicate is either an IRI or a variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SimpleTriple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl SimpleTriple {
    pub fn new(
        subject: impl Into<Term>,
        predicate: impl Into<Term>,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Returns the WHERE clause counterpart of this triple.
    #[allow(clippy::panic, reason = "Indicates programming error")]
    pub fn to_pattern(&self) -> TriplePattern {
        let verb = match &self.predicate {
            Term::Variable(variable) => Verb::Variable(variable.clone()),
            Term::NamedNode(iri) => Verb::Path(PathExpr::Iri(iri.clone())),
            other => panic!("{other} cannot be used as a predicate."),
        };
        TriplePattern {
            subject: self.subject.clone(),
            verb,
            object: self.object.clone(),
        }
    }
}

impl Display for SimpleTriple {
    #[allow(clippy::panic, reason = "Indicates programming error")]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !matches!(self.predicate, Term::Variable(_) | Term::NamedNode(_)) {
            panic!("{} cannot be used as a predicate.", self.predicate);
        }
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

impl From<SimpleTriple> for TriplePattern {
    fn from(value: SimpleTriple) -> Self {
        value.to_pattern()
    }
}
