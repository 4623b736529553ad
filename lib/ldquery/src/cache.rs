use dashmap::DashMap;
use ldquery_model::{Graph, Literal, NamedNode, NamedNodeRef};
use rustc_hash::FxHasher;
use std::fmt::Debug;
use std::hash::BuildHasherDefault;
use std::sync::Arc;
use tracing::debug;

/// A reference-counted pointer to an implementation of the [ShapeGraphCache] trait.
pub type ShapeGraphCacheRef = Arc<dyn ShapeGraphCache>;

/// Holds the shape graphs that a [Compiler](crate::Compiler) reads profiles and endpoint shapes
/// from.
///
/// Graphs are identified by an IRI and handed out as shared, immutable values. Refreshing a graph
/// means inserting a new [Arc]; compilations that still hold the old graph are not affected.
pub trait ShapeGraphCache: Debug + Send + Sync {
    fn get(&self, iri: NamedNodeRef<'_>) -> Option<Arc<Graph>>;

    /// Inserts or replaces the graph identified by `iri`.
    fn insert(&self, iri: NamedNode, graph: Arc<Graph>);

    /// Removes the graph identified by `iri`. Returns whether the graph was present.
    fn invalidate(&self, iri: NamedNodeRef<'_>) -> bool;

    fn invalidate_all(&self);
}

/// A reference-counted pointer to an implementation of the [LabelCache] trait.
pub type LabelCacheRef = Arc<dyn LabelCache>;

/// Holds the labels of IRIs that have already been retrieved.
pub trait LabelCache: Debug + Send + Sync {
    fn get(&self, iri: NamedNodeRef<'_>) -> Option<Literal>;

    fn insert(&self, iri: NamedNode, label: Literal);

    fn invalidate(&self, iri: NamedNodeRef<'_>) -> bool;

    fn invalidate_all(&self);

    /// Returns the IRIs of `iris` without a cached label, keeping their order.
    fn missing(&self, iris: &[NamedNode]) -> Vec<NamedNode> {
        iris.iter()
            .filter(|iri| self.get(iri.as_ref()).is_none())
            .cloned()
            .collect()
    }
}

type FxDashMap<K, V> = DashMap<K, V, BuildHasherDefault<FxHasher>>;

/// An in-memory [ShapeGraphCache].
///
/// Reads never block on a concurrent refresh of a different graph.
#[derive(Debug, Default)]
pub struct MemShapeGraphCache {
    graphs: FxDashMap<NamedNode, Arc<Graph>>,
}

impl MemShapeGraphCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShapeGraphCache for MemShapeGraphCache {
    fn get(&self, iri: NamedNodeRef<'_>) -> Option<Arc<Graph>> {
        let graph = self
            .graphs
            .get(&iri.into_owned())
            .map(|entry| Arc::clone(entry.value()));
        debug!(graph = %iri, hit = graph.is_some(), "Shape graph lookup");
        graph
    }

    fn insert(&self, iri: NamedNode, graph: Arc<Graph>) {
        debug!(graph = %iri, triples = graph.len(), "Caching shape graph");
        self.graphs.insert(iri, graph);
    }

    fn invalidate(&self, iri: NamedNodeRef<'_>) -> bool {
        let removed = self.graphs.remove(&iri.into_owned()).is_some();
        debug!(graph = %iri, removed, "Invalidated shape graph");
        removed
    }

    fn invalidate_all(&self) {
        debug!(graphs = self.graphs.len(), "Invalidated all shape graphs");
        self.graphs.clear();
    }
}

/// An in-memory [LabelCache].
#[derive(Debug, Default)]
pub struct MemLabelCache {
    labels: FxDashMap<NamedNode, Literal>,
}

impl MemLabelCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LabelCache for MemLabelCache {
    fn get(&self, iri: NamedNodeRef<'_>) -> Option<Literal> {
        self.labels
            .get(&iri.into_owned())
            .map(|entry| entry.value().clone())
    }

    fn insert(&self, iri: NamedNode, label: Literal) {
        self.labels.insert(iri, label);
    }

    fn invalidate(&self, iri: NamedNodeRef<'_>) -> bool {
        self.labels.remove(&iri.into_owned()).is_some()
    }

    fn invalidate_all(&self) {
        debug!(labels = self.labels.len(), "Invalidated all labels");
        self.labels.clear();
    }
}
