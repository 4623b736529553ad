use crate::cache::{LabelCacheRef, MemLabelCache, MemShapeGraphCache, ShapeGraphCacheRef};
use crate::config::CompilerConfig;
use ldquery_cql::{
    CqlExpression, CqlFunctionRegistryRef, CqlTranslator, DefaultCqlFunctionRegistry, FOCUS_NODE,
};
use ldquery_grammar::{
    var, ConstructQuery, GraphPattern, GroupGraphPattern, SimpleTriple, SolutionModifier, Term,
    TriplePattern,
};
use ldquery_listing::{
    bbox_filter, CountQuery, DatetimeFilter, FacetQuery, ListingParams, QueryAssembler,
    SearchQuery,
};
use ldquery_model::vocab::prez;
use ldquery_model::{
    Graph, Literal, NamedNode, NamedNodeRef, QueryBuildError, ShapeError, SubjectRef,
};
use ldquery_shacl::{NodeShape, PropertyShape, ShapeGraphReader, ShapeKind, ShapeProcessor};
use oxttl::TurtleParser;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// The input of a listing, count, or facet query.
#[derive(Clone, Debug, Default)]
pub struct ListingRequest {
    /// Selects the focus nodes of the endpoint.
    pub endpoint: Option<NodeShape>,
    /// A CQL2-JSON filter document.
    pub filter: Option<Value>,
    pub params: ListingParams,
    /// A search term. Listings then return search results.
    pub search: Option<String>,
}

/// Compiles profiles, endpoint shapes, and CQL2-JSON filters into SPARQL CONSTRUCT queries.
///
/// A compiler holds no per-request state. Every query is built from scratch, so the variable
/// numbering of one query never depends on a previous one. Shape graphs and labels are read from
/// injected caches that may be shared with other compilers.
///
/// ```
/// # use ldquery::Compiler;
/// # use ldquery::model::NamedNode;
/// let compiler = Compiler::default();
/// let shapes = NamedNode::new("http://example.com/shapes")?;
/// compiler.load_shapes(shapes.clone(), r"
///     @prefix sh: <http://www.w3.org/ns/shacl#> .
///     <http://example.com/Profile> sh:targetClass <http://example.com/Dataset> ;
///         sh:property [ sh:path <http://example.com/title> ] .
/// ")?;
/// let profile = compiler.node_shape(shapes.as_ref(), NamedNode::new("http://example.com/Profile")?.as_ref())?;
/// let query = compiler.object_query(&profile, NamedNode::new("http://example.com/item")?)?;
/// assert!(query.render().contains("<http://example.com/item> <http://example.com/title>"));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone, Debug)]
pub struct Compiler {
    config: CompilerConfig,
    shapes: ShapeGraphCacheRef,
    labels: LabelCacheRef,
    functions: CqlFunctionRegistryRef,
    queryables: FxHashMap<String, PropertyShape>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl Compiler {
    /// Creates a compiler with in-memory caches and the default CQL functions.
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            shapes: Arc::new(MemShapeGraphCache::new()),
            labels: Arc::new(MemLabelCache::new()),
            functions: Arc::new(DefaultCqlFunctionRegistry::default()),
            queryables: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_shape_cache(mut self, shapes: ShapeGraphCacheRef) -> Self {
        self.shapes = shapes;
        self
    }

    #[must_use]
    pub fn with_label_cache(mut self, labels: LabelCacheRef) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_functions(mut self, functions: CqlFunctionRegistryRef) -> Self {
        self.functions = functions;
        self
    }

    /// Declares `name` as a CQL queryable whose values are reached through `shape`.
    #[must_use]
    pub fn with_queryable(mut self, name: impl Into<String>, shape: PropertyShape) -> Self {
        self.queryables.insert(name.into(), shape);
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn shape_cache(&self) -> &ShapeGraphCacheRef {
        &self.shapes
    }

    pub fn label_cache(&self) -> &LabelCacheRef {
        &self.labels
    }

    /// Parses a shape graph written in Turtle.
    pub fn parse_shapes(turtle: &str) -> Result<Graph, ShapeError> {
        let mut graph = Graph::new();
        for triple in TurtleParser::new().for_slice(turtle.as_bytes()) {
            let triple = triple.map_err(|error| ShapeError::Syntax(error.to_string()))?;
            graph.insert(&triple);
        }
        debug!(triples = graph.len(), "Parsed shape graph");
        Ok(graph)
    }

    /// Parses a shape graph and stores it in the shape cache under `iri`.
    pub fn load_shapes(&self, iri: NamedNode, turtle: &str) -> Result<Arc<Graph>, ShapeError> {
        let graph = Arc::new(Self::parse_shapes(turtle)?);
        self.shapes.insert(iri, Arc::clone(&graph));
        Ok(graph)
    }

    fn shape_graph(&self, graph: NamedNodeRef<'_>) -> Result<Arc<Graph>, ShapeError> {
        self.shapes
            .get(graph)
            .ok_or_else(|| ShapeError::NotFound(graph.to_string()))
    }

    /// Reads the node shape `shape` from the cached shape graph `graph`.
    pub fn node_shape(
        &self,
        graph: NamedNodeRef<'_>,
        shape: NamedNodeRef<'_>,
    ) -> Result<NodeShape, ShapeError> {
        let graph = self.shape_graph(graph)?;
        ShapeGraphReader::new(&graph).node_shape(shape)
    }

    /// Reads the property shape `shape` from the cached shape graph `graph`.
    pub fn property_shape(
        &self,
        graph: NamedNodeRef<'_>,
        shape: NamedNodeRef<'_>,
    ) -> Result<PropertyShape, ShapeError> {
        let graph = self.shape_graph(graph)?;
        ShapeGraphReader::new(&graph).property_shape(SubjectRef::NamedNode(shape))
    }

    /// Creates the CQL translator of this compiler.
    pub fn translator(&self) -> CqlTranslator {
        CqlTranslator::new(Arc::clone(&self.functions))
            .with_queryables(self.queryables.clone())
            .with_spatial_target(self.config.spatial_target)
            .with_crs(self.config.default_crs.clone())
    }

    /// The query of a single resource described by `profile`.
    pub fn object_query(
        &self,
        profile: &NodeShape,
        focus: NamedNode,
    ) -> Result<ConstructQuery, QueryBuildError> {
        let fragment = ShapeProcessor::new(ShapeKind::Profile, focus).lower_node_shape(profile)?;
        Ok(QueryAssembler::object(fragment))
    }

    /// The query of one page of a listing described by `profile`.
    pub fn listing_query(
        &self,
        profile: &NodeShape,
        request: &ListingRequest,
    ) -> Result<ConstructQuery, QueryBuildError> {
        let fragment = ShapeProcessor::new(ShapeKind::Profile, var(FOCUS_NODE))
            .lower_node_shape(profile)?;
        let pagination = request
            .params
            .pagination(self.config.default_limit, self.config.max_limit)?;

        let mut assembler = QueryAssembler::listing(fragment)
            .with_selection(self.selection(request)?)
            .with_pagination(pagination);
        if let Some(ordering) = request
            .params
            .ordering(
                self.config.listing_order_predicate.clone(),
                request.search.is_some(),
            )?
        {
            assembler = assembler.with_ordering(ordering);
        }
        if let Some(term) = &request.search {
            assembler = assembler.with_search(self.search(term)?);
        }
        assembler.build()
    }

    /// Counts the focus nodes of a listing.
    ///
    /// Pagination, ordering, and search are ignored.
    pub fn count_query(&self, request: &ListingRequest) -> Result<ConstructQuery, QueryBuildError> {
        Ok(CountQuery::new()
            .with_selection(self.selection(request)?)
            .build())
    }

    /// Counts the focus nodes of a listing per value of the paths of `facets`.
    pub fn facet_query(
        &self,
        facets: &PropertyShape,
        request: &ListingRequest,
    ) -> Result<ConstructQuery, QueryBuildError> {
        Ok(FacetQuery::new(facets.clone())
            .with_selection(self.selection(request)?)
            .build()?)
    }

    /// A standalone search over the configured search predicates.
    pub fn search_query(
        &self,
        term: &str,
        params: &ListingParams,
    ) -> Result<ConstructQuery, QueryBuildError> {
        let pagination = params.pagination(self.config.default_limit, self.config.max_limit)?;
        Ok(self.search(term)?.build(pagination))
    }

    /// The query returning the triples matched by a CQL2-JSON filter.
    pub fn cql_query(&self, cql: &Value) -> Result<ConstructQuery, QueryBuildError> {
        let expression = CqlExpression::from_json(cql)?;
        Ok(self.translator().construct_query(&expression)?)
    }

    /// The query of the labels of the IRIs that are not cached yet.
    ///
    /// Returns [None] if every label is cached. The query binds the label of each IRI through every
    /// configured label predicate:
    ///
    /// ```sparql
    /// CONSTRUCT { ?iri prez:label ?label . }
    /// WHERE {
    ///   VALUES ?iri { ... }
    ///   VALUES ?label_predicate { ... }
    ///   ?iri ?label_predicate ?label .
    /// }
    /// ```
    pub fn label_query(&self, iris: &[NamedNode]) -> Option<ConstructQuery> {
        let missing = self.labels.missing(iris);
        debug!(
            requested = iris.len(),
            missing = missing.len(),
            "Label lookup"
        );
        if missing.is_empty() || self.config.label_predicates.is_empty() {
            return None;
        }

        let iri = var("iri");
        let predicate = var("label_predicate");
        let label = var("label");
        let mut where_clause = GroupGraphPattern::new();
        where_clause.add_pattern(GraphPattern::values(
            iri.clone(),
            missing.into_iter().map(Term::from),
        ));
        where_clause.add_pattern(GraphPattern::values(
            predicate.clone(),
            self.config
                .label_predicates
                .iter()
                .cloned()
                .map(Term::from),
        ));
        where_clause.add_triple(TriplePattern::new(iri.clone(), predicate, label.clone()));
        Some(ConstructQuery::new(
            vec![SimpleTriple::new(iri, prez::LABEL, label)],
            where_clause,
            SolutionModifier::default(),
        ))
    }

    /// Stores the labels returned by a [label query](Self::label_query).
    pub fn cache_labels(&self, labels: impl IntoIterator<Item = (NamedNode, Literal)>) {
        for (iri, label) in labels {
            self.labels.insert(iri, label);
        }
    }

    fn search(&self, term: &str) -> Result<SearchQuery, QueryBuildError> {
        SearchQuery::new(term, self.config.search_predicates.clone())
    }

    /// Collects everything that restricts the focus nodes of a listing.
    fn selection(&self, request: &ListingRequest) -> Result<GroupGraphPattern, QueryBuildError> {
        let focus = Term::var(FOCUS_NODE);
        let mut selection = GroupGraphPattern::new();

        if let Some(endpoint) = &request.endpoint {
            let fragment =
                ShapeProcessor::new(ShapeKind::Endpoint, focus.clone()).lower_node_shape(endpoint)?;
            selection.append(fragment.where_clause);
        }
        if let Some(filter) = &request.filter {
            let expression = CqlExpression::from_json(filter)?;
            selection.append(self.translator().translate(&expression)?);
        }
        if !request.params.bbox.is_empty() {
            let crs = request
                .params
                .filter_crs
                .as_deref()
                .unwrap_or(&self.config.default_crs);
            bbox_filter(
                &request.params.bbox,
                crs,
                self.config.spatial_target,
                &focus,
                &mut selection,
            )?;
        }
        if let Some(datetime) = &request.params.datetime {
            datetime.parse::<DatetimeFilter>()?.lower(
                &self.config.temporal_predicate,
                &focus,
                &mut selection,
            );
        }
        Ok(selection)
    }
}
