use ldquery_cql::FOCUS_NODE;
use ldquery_grammar::{
    var, Aggregate, ConstructQuery, GraphPattern, GroupGraphPattern, Projection, SelectClause,
    SimpleTriple, SolutionModifier, SubSelect, Term, TriplePattern,
};
use ldquery_model::vocab::{prez, rdf};
use ldquery_model::BlankNode;
use tracing::debug;

/// Counts the distinct focus nodes of a selection.
///
/// ```sparql
/// CONSTRUCT { _:count prez:count ?count . }
/// WHERE {
///   SELECT (COUNT(DISTINCT ?focus_node) AS ?count)
///   WHERE { <selection> }
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct CountQuery {
    selection: GroupGraphPattern,
}

impl CountQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Without a selection, every typed resource is counted.
    #[must_use]
    pub fn with_selection(mut self, selection: GroupGraphPattern) -> Self {
        self.selection.append(selection);
        self
    }

    pub fn build(&self) -> ConstructQuery {
        let mut selection = self.selection.clone();
        if selection.is_empty() {
            selection.add_triple(TriplePattern::new(
                var(FOCUS_NODE),
                rdf::TYPE,
                var("focus_class"),
            ));
        }

        let count = var("count");
        let aggregate = Aggregate::Count {
            distinct: true,
            expression: Some(Box::new(var(FOCUS_NODE).into())),
        };
        let mut where_clause = GroupGraphPattern::new();
        where_clause.add_pattern(GraphPattern::SubSelect(Box::new(SubSelect {
            select: SelectClause {
                distinct: false,
                projection: Some(vec![Projection::Expression(
                    aggregate.into(),
                    count.clone(),
                )]),
            },
            where_clause: selection,
            modifier: SolutionModifier::default(),
        })));

        let template = vec![SimpleTriple::new(
            Term::from(BlankNode::new_unchecked("count")),
            prez::COUNT,
            count,
        )];
        debug!(
            triples = self.selection.triples().count(),
            patterns = self.selection.patterns().len(),
            "Built count query"
        );
        ConstructQuery::new(template, where_clause, SolutionModifier::default())
    }
}
