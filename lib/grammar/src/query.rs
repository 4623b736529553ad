use crate::pattern::dedup_triples;
use crate::{Expression, GroupGraphPattern, SimpleTriple};
use itertools::Itertools;
use ldquery_model::Variable;
use std::fmt::{Display, Formatter};

/// An ORDER BY condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderCondition {
    Asc(Expression),
    Desc(Expression),
}

impl Display for OrderCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderCondition::Asc(expression) => write!(f, "ASC({expression})"),
            OrderCondition::Desc(expression) => write!(f, "DESC({expression})"),
        }
    }
}

/// GROUP BY, ORDER BY, LIMIT, and OFFSET of a query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SolutionModifier {
    pub group_by: Vec<Variable>,
    pub order_by: Vec<OrderCondition>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SolutionModifier {
    pub fn is_empty(&self) -> bool {
        self.group_by.is_empty()
            && self.order_by.is_empty()
            && self.limit.is_none()
            && self.offset.is_none()
    }
}

impl Display for SolutionModifier {
    /// Writes every present modifier on its own line, each preceded by a line break.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.group_by.is_empty() {
            write!(f, "\nGROUP BY {}", self.group_by.iter().format(" "))?;
        }
        if !self.order_by.is_empty() {
            write!(f, "\nORDER BY {}", self.order_by.iter().format(" "))?;
        }
        if let Some(limit) = self.limit {
            write!(f, "\nLIMIT {limit}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, "\nOFFSET {offset}")?;
        }
        Ok(())
    }
}

/// A single element of a SELECT projection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Projection {
    Variable(Variable),
    Expression(Expression, Variable),
}

impl Display for Projection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Projection::Variable(variable) => write!(f, "{variable}"),
            Projection::Expression(expression, variable) => {
                write!(f, "({expression} AS {variable})")
            }
        }
    }
}

impl From<Variable> for Projection {
    fn from(value: Variable) -> Self {
        Projection::Variable(value)
    }
}

/// The SELECT clause of a sub-select.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectClause {
    pub distinct: bool,
    /// `SELECT *` if [None].
    pub projection: Option<Vec<Projection>>,
}

impl Display for SelectClause {
    #[allow(clippy::panic, reason = "Indicates programming error")]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        match &self.projection {
            None => f.write_str("*"),
            Some(projection) if projection.is_empty() => {
                panic!("A SELECT clause must project at least one variable.")
            }
            Some(projection) => write!(f, "{}", projection.iter().format(" ")),
        }
    }
}

/// A SELECT query nested in a group graph pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubSelect {
    pub select: SelectClause,
    pub where_clause: GroupGraphPattern,
    pub modifier: SolutionModifier,
}

impl Display for SubSelect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\nWHERE {}{}",
            self.select, self.where_clause, self.modifier
        )
    }
}

/// A CONSTRUCT query, the final product of the query generation.
///
/// The template never contains a triple twice. Once built, the query is not mutated anymore and
/// rendering it is a pure function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstructQuery {
    template: Vec<SimpleTriple>,
    where_clause: GroupGraphPattern,
    modifier: SolutionModifier,
}

impl ConstructQuery {
    pub fn new(
        template: Vec<SimpleTriple>,
        where_clause: GroupGraphPattern,
        modifier: SolutionModifier,
    ) -> Self {
        Self {
            template: dedup_triples(template),
            where_clause,
            modifier,
        }
    }

    /// Creates a query whose template consists of the triples bound by the WHERE clause.
    pub fn from_where_clause(where_clause: GroupGraphPattern) -> Self {
        Self::new(
            where_clause.construct_triples(),
            where_clause,
            SolutionModifier::default(),
        )
    }

    pub fn template(&self) -> &[SimpleTriple] {
        &self.template
    }

    pub fn where_clause(&self) -> &GroupGraphPattern {
        &self.where_clause
    }

    pub fn modifier(&self) -> &SolutionModifier {
        &self.modifier
    }

    /// Renders the query text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for ConstructQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CONSTRUCT {\n")?;
        for triple in &self.template {
            writeln!(f, "{triple}")?;
        }
        write!(f, "}}\nWHERE {}{}", self.where_clause, self.modifier)
    }
}
