use ldquery_cql::FOCUS_NODE;
use ldquery_grammar::{
    var, GraphPattern, GroupGraphPattern, Projection, SelectClause, SolutionModifier, SubSelect,
};

/// `{ SELECT DISTINCT ?focus_node WHERE { selection } modifier }`
pub(crate) fn distinct_focus_nodes(
    selection: GroupGraphPattern,
    modifier: SolutionModifier,
) -> GraphPattern {
    select_distinct(vec![var(FOCUS_NODE).into()], selection, modifier)
}

pub(crate) fn select_distinct(
    projection: Vec<Projection>,
    selection: GroupGraphPattern,
    modifier: SolutionModifier,
) -> GraphPattern {
    GraphPattern::SubSelect(Box::new(SubSelect {
        select: SelectClause {
            distinct: true,
            projection: Some(projection),
        },
        where_clause: selection,
        modifier,
    }))
}
