use ldquery_grammar::{var, ConstructQuery, SolutionModifier};
use ldquery_model::{Graph, NamedNode, ShapeError};
use ldquery_shacl::{NodeShape, ShapeFragment, ShapeGraphReader, ShapeKind, ShapeProcessor};
use oxttl::TurtleParser;

const PREFIXES: &str = "\
@prefix ex: <http://ex/> .
@prefix ont: <https://prez.dev/ont/> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix sh: <http://www.w3.org/ns/shacl#> .
@prefix shext: <http://example.com/shacl-extension#> .
";

pub fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://ex/{local}"))
}

/// Parses a Turtle document. The common prefixes are declared implicitly.
pub fn parse_graph(turtle: &str) -> Graph {
    let document = format!("{PREFIXES}{turtle}");
    let mut graph = Graph::new();
    for triple in TurtleParser::new().for_slice(document.as_bytes()) {
        let triple = triple.unwrap_or_else(|error| panic!("Invalid test shape: {error}"));
        graph.insert(&triple);
    }
    graph
}

/// Reads the node shape `ex:Shape`.
pub fn read_shape(turtle: &str) -> Result<NodeShape, ShapeError> {
    let graph = parse_graph(turtle);
    ShapeGraphReader::new(&graph).node_shape(ex("Shape").as_ref())
}

/// Lowers the node shape `ex:Shape` for `?focus_node` and renders the resulting query.
pub fn lower(kind: ShapeKind, turtle: &str) -> Result<String, ShapeError> {
    lower_with(ShapeProcessor::new(kind, var("focus_node")), turtle)
}

pub fn lower_with(processor: ShapeProcessor, turtle: &str) -> Result<String, ShapeError> {
    let shape = read_shape(turtle)?;
    let fragment = processor.lower_node_shape(&shape)?;
    Ok(render(fragment))
}

pub fn render(fragment: ShapeFragment) -> String {
    let query = ConstructQuery::new(
        fragment.construct,
        fragment.where_clause,
        SolutionModifier::default(),
    )
    .render();
    assert_valid_sparql(&query);
    query
}

/// Asserts that the rendered query is accepted by a SPARQL parser.
pub fn assert_valid_sparql(query: &str) {
    if let Err(error) = spargebra::Query::parse(query, None) {
        panic!("Generated query is not valid SPARQL: {error}\n{query}");
    }
}
