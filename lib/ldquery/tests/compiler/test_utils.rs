use ldquery::model::NamedNode;
use ldquery::{Compiler, CompilerConfig};

pub const SHAPES: &str = r#"
@prefix ex: <http://ex/> .
@prefix ont: <https://prez.dev/ont/> .
@prefix sh: <http://www.w3.org/ns/shacl#> .

ex:DatasetProfile a sh:NodeShape ;
    sh:targetClass ex:Dataset ;
    sh:property [ sh:path ex:title ] .

ex:Datasets a sh:NodeShape ;
    ont:hierarchyLevel 1 ;
    sh:targetClass ex:Dataset .

ex:Facets sh:path ex:theme .
"#;

pub fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://ex/{local}"))
}

/// A compiler with [SHAPES] loaded as `ex:shapes`.
pub fn compiler(config: CompilerConfig) -> Compiler {
    let compiler = Compiler::new(config);
    compiler.load_shapes(ex("shapes"), SHAPES).unwrap();
    compiler
}

pub fn assert_valid_sparql(query: &str) {
    if let Err(error) = spargebra::Query::parse(query, None) {
        panic!("Generated query is not valid SPARQL: {error}\n{query}");
    }
}
