use crate::params::{invalid, Pagination};
use ldquery_cql::{escape_regex, FOCUS_NODE};
use ldquery_grammar::{
    var, Aggregate, ComparisonOperator, ConstructQuery, Expression, Function, GraphPattern,
    GroupGraphPattern, OrderCondition, Projection, SelectClause, SimpleTriple, SolutionModifier,
    SubSelect, Term, TriplePattern,
};
use ldquery_model::vocab::{prez, rdf};
use ldquery_model::{Literal, NamedNode, QueryBuildError, Variable};
use tracing::debug;

/// How a literal matches the search term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum MatchKind {
    /// The whole literal equals the term, ignoring case.
    Exact,
    Prefix,
    Substring,
}

impl MatchKind {
    const ALL: [MatchKind; 3] = [MatchKind::Exact, MatchKind::Prefix, MatchKind::Substring];

    fn weight(self) -> i64 {
        match self {
            MatchKind::Exact => 100,
            MatchKind::Prefix => 20,
            MatchKind::Substring => 10,
        }
    }

    fn filter(self, matched: &Variable, term: &str) -> Expression {
        let regex = |pattern: String| {
            Expression::call(
                Function::Regex,
                [
                    matched.clone().into(),
                    Literal::new_simple_literal(pattern).into(),
                    Literal::new_simple_literal("i").into(),
                ],
            )
        };
        match self {
            MatchKind::Exact => Expression::comparison(
                Expression::call(Function::LCase, [matched.clone().into()]),
                ComparisonOperator::Equal,
                Literal::new_simple_literal(term.to_lowercase()),
            ),
            MatchKind::Prefix => regex(format!("^{}", escape_regex(term))),
            MatchKind::Substring => regex(escape_regex(term)),
        }
    }
}

/// A weighted search for literals of a fixed set of predicates.
///
/// Every predicate is matched three times: exactly (weight 100), as a prefix (weight 20), and as a
/// substring (weight 10). The weights of one focus node, predicate and literal are summed. Each
/// result is identified by the SHA-256 hash of the focus node, predicate, literal and weight, so
/// running the same query on the same data yields the same identifiers.
#[derive(Clone, Debug)]
pub struct SearchQuery {
    term: String,
    predicates: Vec<NamedNode>,
    selection: GroupGraphPattern,
}

impl SearchQuery {
    pub fn new(
        term: impl Into<String>,
        predicates: Vec<NamedNode>,
    ) -> Result<Self, QueryBuildError> {
        let term = term.into();
        if term.trim().is_empty() {
            return Err(invalid("q", "the search term is empty"));
        }
        if predicates.is_empty() {
            return Err(invalid("predicates", "at least one predicate is required"));
        }
        Ok(Self {
            term,
            predicates,
            selection: GroupGraphPattern::new(),
        })
    }

    /// Restricts the searched focus nodes.
    #[must_use]
    pub fn with_selection(mut self, selection: GroupGraphPattern) -> Self {
        self.selection.append(selection);
        self
    }

    /// The variables of a search result.
    pub fn result_projection() -> Vec<Projection> {
        let hash_input = [var(FOCUS_NODE), var("pred"), var("match"), var("weight")]
            .into_iter()
            .map(|variable| Expression::call(Function::Str, [variable.into()]));
        let hash = Expression::call(
            Function::Uri,
            [Expression::call(
                Function::Concat,
                [
                    Literal::new_simple_literal("urn:hash:").into(),
                    Expression::call(
                        Function::Sha256,
                        [Expression::call(Function::Concat, hash_input)],
                    ),
                ],
            )],
        );
        vec![
            var(FOCUS_NODE).into(),
            var("pred").into(),
            var("match").into(),
            var("weight").into(),
            Projection::Expression(hash, var("hashID")),
        ]
    }

    /// The CONSTRUCT triples that describe a search result.
    pub fn template() -> Vec<SimpleTriple> {
        let hash_id = var("hashID");
        vec![
            SimpleTriple::new(hash_id.clone(), prez::SEARCH_RESULT_WEIGHT, var("weight")),
            SimpleTriple::new(hash_id.clone(), prez::SEARCH_RESULT_PREDICATE, var("pred")),
            SimpleTriple::new(hash_id.clone(), prez::SEARCH_RESULT_MATCH, var("match")),
            SimpleTriple::new(hash_id.clone(), prez::SEARCH_RESULT_URI, var(FOCUS_NODE)),
            SimpleTriple::new(hash_id, rdf::TYPE, prez::SEARCH_RESULT),
        ]
    }

    /// The summed weights per focus node, predicate and literal.
    ///
    /// ```sparql
    /// {
    ///   SELECT ?focus_node ?pred ?match (SUM(?w) AS ?weight)
    ///   WHERE {
    ///     VALUES ?pred { ... }
    ///     { ?focus_node ?pred ?match . BIND(100 AS ?w) FILTER(LCASE(?match) = "term") }
    ///     UNION ...
    ///   }
    ///   GROUP BY ?focus_node ?pred ?match
    /// }
    /// ```
    pub fn weighted_matches(&self) -> GraphPattern {
        let focus = var(FOCUS_NODE);
        let predicate = var("pred");
        let matched = var("match");

        let branches = MatchKind::ALL
            .into_iter()
            .map(|kind| {
                let mut branch = GroupGraphPattern::from_triples([TriplePattern::new(
                    focus.clone(),
                    predicate.clone(),
                    matched.clone(),
                )]);
                branch.add_pattern(GraphPattern::Bind(
                    Literal::from(kind.weight()).into(),
                    var("w"),
                ));
                branch.add_pattern(GraphPattern::Filter(kind.filter(&matched, &self.term)));
                branch
            })
            .collect();

        let mut where_clause = self.selection.clone();
        where_clause.add_pattern(GraphPattern::values(
            predicate.clone(),
            self.predicates.iter().cloned().map(Term::from),
        ));
        where_clause.add_pattern(GraphPattern::Union(branches));

        let sum = Aggregate::Sum {
            distinct: false,
            expression: Box::new(var("w").into()),
        };
        GraphPattern::SubSelect(Box::new(SubSelect {
            select: SelectClause {
                distinct: false,
                projection: Some(vec![
                    focus.clone().into(),
                    predicate.clone().into(),
                    matched.clone().into(),
                    Projection::Expression(sum.into(), var("weight")),
                ]),
            },
            where_clause,
            modifier: SolutionModifier {
                group_by: vec![focus, predicate, matched],
                ..SolutionModifier::default()
            },
        }))
    }

    /// The modifier of a page of results, ordered by descending weight.
    ///
    /// One more row than the page size is requested to detect whether a next page exists.
    pub fn page_modifier(pagination: Pagination) -> SolutionModifier {
        SolutionModifier {
            order_by: vec![OrderCondition::Desc(var("weight").into())],
            limit: Some(pagination.limit.saturating_add(1)),
            offset: Some(pagination.offset),
            ..SolutionModifier::default()
        }
    }

    /// Builds a standalone search query.
    pub fn build(&self, pagination: Pagination) -> ConstructQuery {
        let mut inner = GroupGraphPattern::new();
        inner.add_pattern(self.weighted_matches());
        let mut where_clause = GroupGraphPattern::new();
        where_clause.add_pattern(GraphPattern::SubSelect(Box::new(SubSelect {
            select: SelectClause {
                distinct: false,
                projection: Some(Self::result_projection()),
            },
            where_clause: inner,
            modifier: Self::page_modifier(pagination),
        })));
        debug!(
            term = %self.term,
            predicates = self.predicates.len(),
            "Built search query"
        );
        ConstructQuery::new(Self::template(), where_clause, SolutionModifier::default())
    }
}
