//! Vocabulary constants used by the query generation.

/// RDF vocabulary.
pub mod rdf {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    pub const TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
    pub const VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#value");
    pub const FIRST: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#first");
    pub const REST: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#rest");
    pub const NIL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#nil");
}

/// RDFS vocabulary.
pub mod rdfs {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

    pub const LABEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label");
    pub const RESOURCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#Resource");
}

/// XML Schema datatypes.
pub mod xsd {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const BOOLEAN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#boolean");
    pub const DATE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#date");
    pub const DATE_TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#dateTime");
    pub const DECIMAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#decimal");
    pub const DOUBLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#double");
    pub const INTEGER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#integer");
    pub const STRING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#string");
}

/// SHACL vocabulary.
pub mod sh {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/ns/shacl#";

    pub const ALTERNATIVE_PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#alternativePath");
    pub const CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#class");
    pub const FILTER_SHAPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#filterShape");
    pub const HAS_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#hasValue");
    pub const IN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#in");
    pub const INVERSE_PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#inversePath");
    pub const MAX_COUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#maxCount");
    pub const MIN_COUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#minCount");
    pub const NODE_SHAPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#NodeShape");
    pub const ONE_OR_MORE_PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#oneOrMorePath");
    pub const OR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#or");
    pub const PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#path");
    pub const PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#property");
    pub const PROPERTY_SHAPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#PropertyShape");
    pub const TARGET_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#targetClass");
    pub const THIS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#this");
    pub const UNION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#union");
    pub const ZERO_OR_MORE_PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#zeroOrMorePath");
    pub const ZERO_OR_ONE_PATH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#zeroOrOnePath");
}

/// Extensions to SHACL that drive the query generation.
pub mod shext {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://example.com/shacl-extension#";

    pub const ALL_PREDICATE_VALUES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.com/shacl-extension#allPredicateValues");
    pub const BNODE_DEPTH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.com/shacl-extension#bnode-depth");
    pub const PATH_ALIAS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://example.com/shacl-extension#pathAlias");
}

/// Prez ontology.
pub mod ont {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "https://prez.dev/ont/";

    pub const HIERARCHY_LEVEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/ont/hierarchyLevel");
}

/// Prez result vocabulary.
pub mod prez {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "https://prez.dev/";

    pub const COUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/count");
    pub const FACET_COUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/facetCount");
    pub const FACET_NAME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/facetName");
    pub const FACET_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/facetValue");
    pub const LABEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/label");
    pub const SEARCH_RESULT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/SearchResult");
    pub const SEARCH_RESULT_MATCH: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/searchResultMatch");
    pub const SEARCH_RESULT_PREDICATE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/searchResultPredicate");
    pub const SEARCH_RESULT_URI: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/searchResultURI");
    pub const SEARCH_RESULT_WEIGHT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://prez.dev/searchResultWeight");
}

/// GeoSPARQL ontology.
pub mod geo {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.opengis.net/ont/geosparql#";

    pub const AS_WKT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#asWKT");
    pub const HAS_GEOMETRY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#hasGeometry");
    pub const WKT_LITERAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#wktLiteral");
    pub const SF_INTERSECTS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#sfIntersects");
    pub const SF_WITHIN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#sfWithin");
    pub const SF_CONTAINS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#sfContains");
    pub const SF_DISJOINT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#sfDisjoint");
    pub const SF_EQUALS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#sfEquals");
    pub const SF_OVERLAPS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#sfOverlaps");
    pub const SF_TOUCHES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#sfTouches");
    pub const SF_CROSSES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/ont/geosparql#sfCrosses");
}

/// GeoSPARQL functions.
pub mod geof {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.opengis.net/def/function/geosparql/";

    pub const SF_INTERSECTS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/function/geosparql/sfIntersects");
    pub const SF_WITHIN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/function/geosparql/sfWithin");
    pub const SF_CONTAINS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/function/geosparql/sfContains");
    pub const SF_DISJOINT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/function/geosparql/sfDisjoint");
    pub const SF_EQUALS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/function/geosparql/sfEquals");
    pub const SF_OVERLAPS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/function/geosparql/sfOverlaps");
    pub const SF_TOUCHES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/function/geosparql/sfTouches");
    pub const SF_CROSSES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.opengis.net/def/function/geosparql/sfCrosses");
}

/// QLever spatial search service.
pub mod qlss {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "https://qlever.cs.uni-freiburg.de/spatialSearch/";

    pub const ALGORITHM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/algorithm");
    pub const LIBSPATIALJOIN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/libspatialjoin");
    pub const LEFT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/left");
    pub const RIGHT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/right");
    pub const PAYLOAD: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/payload");
    pub const JOIN_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/joinType");
    pub const INTERSECTS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/intersects");
    pub const CONTAINS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/contains");
    pub const COVERS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/covers");
    pub const TOUCHES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/touches");
    pub const CROSSES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/crosses");
    pub const OVERLAPS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/overlaps");
    pub const EQUALS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/equals");
    pub const WITHIN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://qlever.cs.uni-freiburg.de/spatialSearch/within");
}

/// SOSA ontology.
pub mod sosa {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/ns/sosa/";

    pub const HAS_FEATURE_OF_INTEREST: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/hasFeatureOfInterest");
    pub const HAS_RESULT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/hasResult");
    pub const HAS_SIMPLE_RESULT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/hasSimpleResult");
    pub const IS_FEATURE_OF_INTEREST_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/isFeatureOfInterestOf");
    pub const OBSERVED_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/sosa/observedProperty");
}

/// TERN ontology.
pub mod tern {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "https://w3id.org/tern/ontologies/tern/";

    pub const ATTRIBUTE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://w3id.org/tern/ontologies/tern/attribute");
    pub const HAS_ATTRIBUTE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://w3id.org/tern/ontologies/tern/hasAttribute");
    pub const HAS_SIMPLE_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://w3id.org/tern/ontologies/tern/hasSimpleValue");
    pub const HAS_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://w3id.org/tern/ontologies/tern/hasValue");
}

/// schema.org vocabulary.
pub mod schema {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "https://schema.org/";

    pub const ADDITIONAL_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/additionalProperty");
    pub const NAME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/name");
    pub const PROPERTY_ID: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/propertyID");
    pub const TEMPORAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/temporal");
    pub const VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/value");
}

/// PROV ontology.
pub mod prov {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/ns/prov#";

    pub const AGENT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#agent");
    pub const HAD_ROLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#hadRole");
    pub const QUALIFIED_ATTRIBUTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#qualifiedAttribution");
}

/// SKOS vocabulary.
pub mod skos {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2004/02/skos/core#";

    pub const DEFINITION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#definition");
    pub const PREF_LABEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2004/02/skos/core#prefLabel");
}

/// Dublin Core terms.
pub mod dcterms {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://purl.org/dc/terms/";

    pub const DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/description");
    pub const TITLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
}
