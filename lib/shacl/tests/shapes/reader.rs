use crate::test_utils::{ex, parse_graph, read_shape};
use ldquery_model::vocab::rdf;
use ldquery_model::{ShapeError, TermRef};
use ldquery_shacl::{PropertyPath, ShapeGraphReader};

#[test]
fn test_reads_shape_structure() {
    let shape = read_shape(
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:B , ex:A ;
            shext:bnode-depth 3 ;
            ont:hierarchyLevel 1 ;
            sh:property [
                sh:path [ sh:alternativePath ( ex:p [ sh:oneOrMorePath [ sh:inversePath ex:q ] ] ) ] ;
                sh:minCount 0 ;
                sh:class ex:C
            ] .
        ",
    )
    .unwrap();

    assert_eq!(shape.target_classes, vec![ex("A"), ex("B")]);
    assert_eq!(shape.bnode_depth, Some(3));
    assert_eq!(shape.hierarchy_level, Some(1));
    let [property] = shape.property_shapes.as_slice() else {
        panic!("expected one property shape");
    };
    assert_eq!(property.min_count, Some(0));
    assert_eq!(property.classes, vec![ex("C")]);
    assert_eq!(
        property.and_paths[0].path,
        PropertyPath::Alternative(vec![
            PropertyPath::Direct(ex("p")),
            PropertyPath::OneOrMore(Box::new(PropertyPath::Inverse(Box::new(
                PropertyPath::Direct(ex("q"))
            )))),
        ])
    );
}

#[test]
fn test_reads_rdf_lists() {
    let graph = parse_graph("ex:s ex:list ( ex:a ex:b ex:c ) .");
    let reader = ShapeGraphReader::new(&graph);
    let Some(head) = graph.object_for_subject_predicate(ex("s").as_ref(), ex("list").as_ref())
    else {
        panic!("list not found");
    };
    let elements = reader.list(head).unwrap();
    assert_eq!(
        elements,
        vec![
            TermRef::NamedNode(ex("a").as_ref()),
            TermRef::NamedNode(ex("b").as_ref()),
            TermRef::NamedNode(ex("c").as_ref()),
        ]
    );
    assert!(reader.list(TermRef::NamedNode(rdf::NIL)).unwrap().is_empty());
}

#[test]
fn test_cyclic_list_is_rejected() {
    let error = read_shape(
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:A ;
            sh:property [ sh:path _:cell ] .
        _:cell rdf:first ex:a ; rdf:rest _:cell .
        ",
    )
    .unwrap_err();
    assert!(matches!(error, ShapeError::MalformedList { .. }));
}

#[test]
fn test_property_shape_without_path_is_rejected() {
    let error = read_shape(
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:A ;
            sh:property [ sh:minCount 1 ] .
        ",
    )
    .unwrap_err();
    assert!(matches!(error, ShapeError::MissingPath { .. }));
}

#[test]
fn test_class_and_or_together_are_ambiguous() {
    let error = read_shape(
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:A ;
            sh:property [
                sh:path ex:p ;
                sh:class ex:C ;
                sh:or ( [ sh:class ex:D ] )
            ] .
        ",
    )
    .unwrap_err();
    assert!(matches!(error, ShapeError::Ambiguous { .. }));
}

#[test]
fn test_unknown_path_construct_is_rejected() {
    let error = read_shape(
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:A ;
            sh:property [ sh:path [ ex:unknown ex:p ] ] .
        ",
    )
    .unwrap_err();
    assert!(matches!(error, ShapeError::UnsupportedPath { .. }));
}

#[test]
fn test_invalid_count_is_rejected() {
    let error = read_shape(
        r#"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:A ;
            sh:property [ sh:path ex:p ; sh:minCount "many" ] .
        "#,
    )
    .unwrap_err();
    assert!(matches!(error, ShapeError::InvalidValue { .. }));
}

#[test]
fn test_unknown_shape_is_not_found() {
    let error = read_shape("ex:Other a sh:NodeShape .").unwrap_err();
    assert!(matches!(error, ShapeError::NotFound(_)));
}
