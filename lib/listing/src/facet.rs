use crate::selection::distinct_focus_nodes;
use ldquery_cql::FOCUS_NODE;
use ldquery_grammar::{
    var, Aggregate, ConstructQuery, Expression, GraphPattern, GroupGraphPattern, Projection,
    SelectClause, SimpleTriple, SolutionModifier, SubSelect, Term, TriplePattern,
};
use ldquery_model::vocab::{prez, rdf};
use ldquery_model::{BlankNode, Literal, ShapeError};
use ldquery_shacl::{NodeScope, PropertyShape, ShapeKind, ShapePath, ShapeProcessor};
use tracing::debug;

/// Counts the focus nodes of a selection per value of one or more properties.
///
/// ```sparql
/// CONSTRUCT {
///   _:facet prez:facetName ?facetName .
///   _:facet prez:facetValue ?facetValue .
///   _:facet prez:facetCount ?facetCount .
/// }
/// WHERE {
///   SELECT ?facetName ?facetValue (COUNT(DISTINCT ?focus_node) AS ?facetCount)
///   WHERE {
///     { SELECT DISTINCT ?focus_node WHERE { <selection> } }
///     { <path 1> BIND(<name 1> AS ?facetName) BIND(<value 1> AS ?facetValue) }
///     UNION ...
///   }
///   GROUP BY ?facetName ?facetValue
/// }
/// ```
///
/// Every path of the facet shape is one facet. Its name is the alias of the path, or the
/// predicate for direct paths.
#[derive(Clone, Debug)]
pub struct FacetQuery {
    facets: PropertyShape,
    selection: GroupGraphPattern,
}

impl FacetQuery {
    pub fn new(facets: PropertyShape) -> Self {
        Self {
            facets,
            selection: GroupGraphPattern::new(),
        }
    }

    /// Restricts the counted focus nodes. Without a selection, every typed resource is counted.
    #[must_use]
    pub fn with_selection(mut self, selection: GroupGraphPattern) -> Self {
        self.selection.append(selection);
        self
    }

    pub fn build(&self) -> Result<ConstructQuery, ShapeError> {
        let focus = Term::var(FOCUS_NODE);
        let processor = ShapeProcessor::new(ShapeKind::Profile, focus.clone());
        let mut scope = NodeScope::new(ShapeKind::Profile.variable_prefix(0));

        let paths = self
            .facets
            .and_paths
            .iter()
            .chain(&self.facets.union_paths)
            .collect::<Vec<_>>();
        if paths.is_empty() {
            return Err(ShapeError::MissingPath {
                shape: self.facets.id.clone(),
            });
        }
        let mut branches = paths
            .into_iter()
            .map(|path| self.facet_branch(&processor, &mut scope, path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut selection = self.selection.clone();
        if selection.is_empty() {
            selection.add_triple(TriplePattern::new(focus, rdf::TYPE, var("focus_class")));
        }
        let mut counted = GroupGraphPattern::new();
        counted.add_pattern(distinct_focus_nodes(selection, SolutionModifier::default()));
        match branches.len() {
            1 => counted.append(branches.remove(0)),
            _ => counted.add_pattern(GraphPattern::Union(branches)),
        }

        let facet_name = var("facetName");
        let facet_value = var("facetValue");
        let facet_count = var("facetCount");
        let count = Aggregate::Count {
            distinct: true,
            expression: Some(Box::new(var(FOCUS_NODE).into())),
        };
        let mut where_clause = GroupGraphPattern::new();
        where_clause.add_pattern(GraphPattern::SubSelect(Box::new(SubSelect {
            select: SelectClause {
                distinct: false,
                projection: Some(vec![
                    facet_name.clone().into(),
                    facet_value.clone().into(),
                    Projection::Expression(count.into(), facet_count.clone()),
                ]),
            },
            where_clause: counted,
            modifier: SolutionModifier {
                group_by: vec![facet_name.clone(), facet_value.clone()],
                ..SolutionModifier::default()
            },
        })));

        let facet = Term::from(BlankNode::new_unchecked("facet"));
        let template = vec![
            SimpleTriple::new(facet.clone(), prez::FACET_NAME, facet_name),
            SimpleTriple::new(facet.clone(), prez::FACET_VALUE, facet_value),
            SimpleTriple::new(facet, prez::FACET_COUNT, facet_count),
        ];
        debug!(shape = %self.facets.id, "Built facet query");
        Ok(ConstructQuery::new(
            template,
            where_clause,
            SolutionModifier::default(),
        ))
    }

    /// Lowers one facet path and binds its name and value.
    fn facet_branch(
        &self,
        processor: &ShapeProcessor,
        scope: &mut NodeScope,
        path: &ShapePath,
    ) -> Result<GroupGraphPattern, ShapeError> {
        let shape = PropertyShape::from_path(self.facets.id.clone(), path.clone());
        let fragment = processor.lower_property_shape(&shape, scope)?;
        let value = fragment
            .terminal
            .and_then(|terminal| Expression::try_from(terminal).ok())
            .ok_or_else(|| ShapeError::UnsupportedPath {
                node: self.facets.id.clone(),
                message: "a facet path must end in a value node".to_owned(),
            })?;
        let name: Expression = match (&path.alias, path.path.as_direct()) {
            (Some(alias), _) => alias.clone().into(),
            (None, Some(predicate)) => predicate.clone().into(),
            (None, None) => {
                Literal::new_simple_literal(path.path.to_path_expr().to_string()).into()
            }
        };

        let mut branch = fragment.where_clause;
        branch.add_pattern(GraphPattern::Bind(name, var("facetName")));
        branch.add_pattern(GraphPattern::Bind(value, var("facetValue")));
        Ok(branch)
    }
}
