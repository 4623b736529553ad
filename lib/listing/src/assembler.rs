use crate::params::{invalid, OrderValue, Ordering, Pagination};
use crate::search::SearchQuery;
use crate::selection::select_distinct;
use ldquery_cql::FOCUS_NODE;
use ldquery_grammar::{
    var, ConstructQuery, GroupGraphPattern, Projection, SolutionModifier, TriplePattern,
};
use ldquery_model::vocab::{rdf, rdfs};
use ldquery_model::QueryBuildError;
use ldquery_shacl::ShapeFragment;
use tracing::debug;

/// Composes the final query of an object or listing request.
///
/// The profile fragment describes the triples returned for every focus node. A listing first
/// selects the focus nodes of one page in a sub-select:
///
/// ```sparql
/// CONSTRUCT { <profile> <search result> }
/// WHERE {
///   {
///     SELECT DISTINCT ?focus_node <search variables> <ordering variable>
///     WHERE { <selection> <search matches> <ordering triple> }
///     ORDER BY ... LIMIT ... OFFSET ...
///   }
///   <profile>
/// }
/// ```
///
/// Assembly is a structural step. The fragments are expected to be correct already.
#[derive(Clone, Debug)]
pub struct QueryAssembler {
    profile: ShapeFragment,
    selection: GroupGraphPattern,
    search: Option<SearchQuery>,
    ordering: Option<Ordering>,
    pagination: Option<Pagination>,
}

impl QueryAssembler {
    /// The query of a single resource. The profile was lowered for the fixed focus node, so no
    /// sub-select is needed.
    pub fn object(profile: ShapeFragment) -> ConstructQuery {
        let query = ConstructQuery::new(
            profile.construct,
            profile.where_clause,
            SolutionModifier::default(),
        );
        debug!(
            template = query.template().len(),
            "Assembled object query"
        );
        query
    }

    pub fn listing(profile: ShapeFragment) -> Self {
        Self {
            profile,
            selection: GroupGraphPattern::new(),
            search: None,
            ordering: None,
            pagination: None,
        }
    }

    /// Restricts the listed focus nodes, e.g., with an endpoint shape or a CQL filter.
    #[must_use]
    pub fn with_selection(mut self, selection: GroupGraphPattern) -> Self {
        self.selection.append(selection);
        self
    }

    /// Lists the search results instead of plain focus nodes.
    #[must_use]
    pub fn with_search(mut self, search: SearchQuery) -> Self {
        self.search = Some(search);
        self
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn build(self) -> Result<ConstructQuery, QueryBuildError> {
        let Self {
            profile,
            selection,
            search,
            ordering,
            pagination,
        } = self;

        // Only profile and search triples are returned. Selection triples never reach the template.
        let mut template = profile.construct;
        let mut where_clause = GroupGraphPattern::new();
        let needs_subselect = !selection.is_empty()
            || search.is_some()
            || ordering.is_some()
            || pagination.is_some();

        if needs_subselect {
            let mut projection: Vec<Projection> = vec![var(FOCUS_NODE).into()];
            let mut inner = selection;
            let mut modifier = SolutionModifier::default();

            match &search {
                Some(search) => {
                    inner.add_pattern(search.weighted_matches());
                    projection = SearchQuery::result_projection();
                    template.extend(SearchQuery::template());
                    if let Some(pagination) = pagination {
                        modifier = SearchQuery::page_modifier(pagination);
                    }
                }
                None => {
                    if inner.is_empty() {
                        inner.add_triple(TriplePattern::new(
                            var(FOCUS_NODE),
                            rdf::TYPE,
                            var("focus_class"),
                        ));
                    }
                    if let Some(pagination) = pagination {
                        modifier.limit = Some(pagination.limit);
                        modifier.offset = Some(pagination.offset);
                    }
                }
            }

            if let Some(ordering) = &ordering {
                match (ordering.value, &ordering.predicate) {
                    (OrderValue::Weight, _) if search.is_none() => {
                        return Err(invalid(
                            "order_by_value",
                            "ordering by weight requires a search term",
                        ));
                    }
                    (OrderValue::Weight, _) => {}
                    (value, predicate) => {
                        let predicate = match (value, predicate) {
                            (_, Some(predicate)) => predicate.clone(),
                            (OrderValue::Label, None) => rdfs::LABEL.into_owned(),
                            _ => {
                                return Err(invalid(
                                    "order_by",
                                    "ordering by value requires a predicate",
                                ))
                            }
                        };
                        inner.add_triple(TriplePattern::new(
                            var(FOCUS_NODE),
                            predicate,
                            value.variable(),
                        ));
                        projection.push(value.variable().into());
                    }
                }
                modifier.order_by = vec![ordering.condition()];
            }

            where_clause.add_pattern(select_distinct(projection, inner, modifier));
        }

        where_clause.append(profile.where_clause);

        let query = ConstructQuery::new(template, where_clause, SolutionModifier::default());
        debug!(
            subselect = needs_subselect,
            search = search.is_some(),
            length = query.render().len(),
            "Assembled listing query"
        );
        Ok(query)
    }
}
