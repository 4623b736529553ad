use ldquery_grammar::{
    var, Expression, Function, GraphPattern, GroupGraphPattern, SimpleTriple, Term,
};

/// Builds the nested OPTIONAL blocks that retrieve chains of blank nodes hanging off `focus`.
///
/// Level `d` binds `?bn_o_d ?bn_p_{d+1} ?bn_o_{d+1}` and only descends further if `?bn_o_d` is a
/// blank node. The first level additionally binds `focus ?bn_p_1 ?bn_o_1`. Returns the pattern
/// and the triples it contributes to the CONSTRUCT template, or [None] for a depth of zero.
pub(crate) fn bnode_chain(focus: &Term, max_depth: u32) -> Option<(GraphPattern, Vec<SimpleTriple>)> {
    if max_depth == 0 {
        return None;
    }
    let mut construct = Vec::new();
    let pattern = bnode_level(focus, 1, max_depth, &mut construct);
    Some((pattern, construct))
}

fn bnode_level(
    focus: &Term,
    depth: u32,
    max_depth: u32,
    construct: &mut Vec<SimpleTriple>,
) -> GraphPattern {
    let object = var(format!("bn_o_{depth}"));

    let mut triples = Vec::new();
    if depth == 1 {
        triples.push(SimpleTriple::new(
            focus.clone(),
            var("bn_p_1"),
            object.clone(),
        ));
    }
    triples.push(SimpleTriple::new(
        object.clone(),
        var(format!("bn_p_{}", depth + 1)),
        var(format!("bn_o_{}", depth + 1)),
    ));

    let mut block =
        GroupGraphPattern::from_triples(triples.iter().map(SimpleTriple::to_pattern));
    construct.extend(triples);
    block.add_pattern(GraphPattern::Filter(Expression::call(
        Function::IsBlank,
        [object.into()],
    )));
    if depth < max_depth {
        block.add_pattern(bnode_level(focus, depth + 1, max_depth, construct));
    }
    GraphPattern::Optional(block)
}
