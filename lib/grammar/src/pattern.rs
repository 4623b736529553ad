use crate::{Expression, SimpleTriple, SubSelect, Term, TriplePattern};
use itertools::Itertools;
use ldquery_model::{NamedNode, Variable};
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};

/// The content of a `{ ... }` block.
///
/// Triples and patterns are rendered in insertion order. Consecutive triples are kept in a single
/// [`GraphPattern::Triples`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GroupGraphPattern {
    patterns: Vec<GraphPattern>,
}

impl GroupGraphPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triples(triples: impl IntoIterator<Item = TriplePattern>) -> Self {
        let mut block = Self::new();
        for triple in triples {
            block.add_triple(triple);
        }
        block
    }

    pub fn add_triple(&mut self, triple: TriplePattern) {
        match self.patterns.last_mut() {
            Some(GraphPattern::Triples(run)) => run.push(triple),
            _ => self.patterns.push(GraphPattern::Triples(vec![triple])),
        }
    }

    pub fn add_pattern(&mut self, pattern: GraphPattern) {
        match pattern {
            GraphPattern::Triples(triples) => {
                for triple in triples {
                    self.add_triple(triple);
                }
            }
            pattern => self.patterns.push(pattern),
        }
    }

    /// Moves the content of `other` to the end of this block.
    pub fn append(&mut self, other: GroupGraphPattern) {
        for pattern in other.patterns {
            self.add_pattern(pattern);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The elements of the block in rendering order.
    pub fn patterns(&self) -> &[GraphPattern] {
        &self.patterns
    }

    /// The triples at the top level of the block.
    pub fn triples(&self) -> impl Iterator<Item = &TriplePattern> {
        self.patterns.iter().flat_map(|pattern| match pattern {
            GraphPattern::Triples(triples) => triples.as_slice(),
            _ => &[][..],
        })
    }

    /// Collects the triples that bind solutions of this block in a form usable by a CONSTRUCT template.
    ///
    /// Triples nested in OPTIONAL, UNION, and plain groups are included. Triples inside filters,
    /// SERVICE calls, and sub-selects are not, as their bindings are not visible to the template.
    /// Triples whose predicate is a path expression cannot be represented in a template and are
    /// skipped.
    pub fn construct_triples(&self) -> Vec<SimpleTriple> {
        let mut result = Vec::new();
        self.collect_construct_triples(&mut result);
        dedup_triples(result)
    }

    fn collect_construct_triples(&self, result: &mut Vec<SimpleTriple>) {
        for pattern in &self.patterns {
            match pattern {
                GraphPattern::Triples(triples) => {
                    result.extend(triples.iter().filter_map(TriplePattern::to_simple));
                }
                GraphPattern::Optional(inner) | GraphPattern::Group(inner) => {
                    inner.collect_construct_triples(result);
                }
                GraphPattern::Union(branches) => {
                    for branch in branches {
                        branch.collect_construct_triples(result);
                    }
                }
                GraphPattern::Filter(_)
                | GraphPattern::Values(_)
                | GraphPattern::Bind(..)
                | GraphPattern::Service { .. }
                | GraphPattern::SubSelect(_) => {}
            }
        }
    }
}

impl Display for GroupGraphPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("{\n")?;
        for pattern in &self.patterns {
            writeln!(f, "{pattern}")?;
        }
        f.write_str("}")
    }
}

/// Removes duplicated triples while keeping the first occurrence of each triple in place.
pub fn dedup_triples<T: Clone + Eq + std::hash::Hash>(triples: Vec<T>) -> Vec<T> {
    let mut seen = FxHashSet::default();
    triples
        .into_iter()
        .filter(|triple| seen.insert(triple.clone()))
        .collect()
}

/// A VALUES block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InlineData {
    pub variables: Vec<Variable>,
    /// One row per solution. `None` renders as `UNDEF`.
    pub rows: Vec<Vec<Option<Term>>>,
}

impl InlineData {
    /// Creates a VALUES block for a single variable.
    pub fn single(variable: Variable, values: impl IntoIterator<Item = Term>) -> Self {
        Self {
            variables: vec![variable],
            rows: values.into_iter().map(|value| vec![Some(value)]).collect(),
        }
    }
}

impl Display for InlineData {
    #[allow(clippy::panic, reason = "Indicates programming error")]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.variables.is_empty() {
            panic!("A VALUES block must bind at least one variable.");
        }
        let cell = |value: &Option<Term>| match value {
            Some(term) => term.to_string(),
            None => "UNDEF".to_owned(),
        };
        if let [variable] = self.variables.as_slice() {
            write!(f, "VALUES {variable} {{ ")?;
            for row in &self.rows {
                if row.len() != 1 {
                    panic!("The VALUES row {row:?} does not match the variables.");
                }
                write!(f, "{} ", cell(&row[0]))?;
            }
            return f.write_str("}");
        }
        writeln!(f, "VALUES ({}) {{", self.variables.iter().format(" "))?;
        for row in &self.rows {
            if row.len() != self.variables.len() {
                panic!("The VALUES row {row:?} does not match the variables.");
            }
            writeln!(f, "({})", row.iter().map(cell).format(" "))?;
        }
        f.write_str("}")
    }
}

/// An element of a group graph pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphPattern {
    /// A run of consecutive triples.
    Triples(Vec<TriplePattern>),
    Optional(GroupGraphPattern),
    /// `{ A } UNION { B } ...`. A single branch renders as a plain group.
    Union(Vec<GroupGraphPattern>),
    Group(GroupGraphPattern),
    Filter(Expression),
    Values(InlineData),
    Bind(Expression, Variable),
    Service {
        name: NamedNode,
        silent: bool,
        pattern: GroupGraphPattern,
    },
    SubSelect(Box<SubSelect>),
}

impl GraphPattern {
    pub fn filter_not_exists(pattern: GroupGraphPattern) -> Self {
        GraphPattern::Filter(Expression::NotExists(Box::new(pattern)))
    }

    pub fn filter_exists(pattern: GroupGraphPattern) -> Self {
        GraphPattern::Filter(Expression::Exists(Box::new(pattern)))
    }

    pub fn values(variable: Variable, values: impl IntoIterator<Item = Term>) -> Self {
        GraphPattern::Values(InlineData::single(variable, values))
    }
}

impl Display for GraphPattern {
    #[allow(clippy::panic, reason = "Indicates programming error")]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphPattern::Triples(triples) => {
                if triples.is_empty() {
                    panic!("A triples block must contain at least one triple.");
                }
                write!(f, "{}", triples.iter().format("\n"))
            }
            GraphPattern::Optional(pattern) => write!(f, "OPTIONAL {pattern}"),
            GraphPattern::Union(branches) => {
                if branches.is_empty() {
                    panic!("A UNION must have at least one branch.");
                }
                write!(f, "{}", branches.iter().format("\nUNION\n"))
            }
            GraphPattern::Group(pattern) => write!(f, "{pattern}"),
            GraphPattern::Filter(expression) => match expression {
                Expression::Exists(pattern) => write!(f, "FILTER EXISTS {pattern}"),
                Expression::NotExists(pattern) => write!(f, "FILTER NOT EXISTS {pattern}"),
                _ => write!(f, "FILTER({expression})"),
            },
            GraphPattern::Values(data) => write!(f, "{data}"),
            GraphPattern::Bind(expression, variable) => {
                write!(f, "BIND({expression} AS {variable})")
            }
            GraphPattern::Service {
                name,
                silent,
                pattern,
            } => {
                if *silent {
                    write!(f, "SERVICE SILENT {name} {pattern}")
                } else {
                    write!(f, "SERVICE {name} {pattern}")
                }
            }
            GraphPattern::SubSelect(select) => write!(f, "{{\n{select}\n}}"),
        }
    }
}
