use crate::test_utils::{ex, lower, lower_with};
use ldquery_grammar::var;
use ldquery_model::ShapeError;
use ldquery_shacl::{ShapeKind, ShapeProcessor};

#[test]
fn test_sequence_collapses_into_path_expression() {
    let processor = ShapeProcessor::new(ShapeKind::Endpoint, var("focus_node"))
        .with_path_node("path_node_2", ex("catalog"));
    let query = lower_with(
        processor,
        r"
        ex:Shape a sh:NodeShape ;
            ont:hierarchyLevel 2 ;
            sh:targetClass ex:Item ;
            sh:property [
                sh:path ( [ sh:inversePath ex:member ] ex:parent ) ;
                sh:class ex:Catalog
            ] .
        ",
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Item> .
    <http://ex/catalog> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Catalog> .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Item> .
    ?focus_node ^<http://ex/member>/<http://ex/parent> <http://ex/catalog> .
    <http://ex/catalog> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Catalog> .
    }
    ");
}

#[test]
fn test_node_numbering_continues_across_property_shapes() {
    let query = lower(
        ShapeKind::Endpoint,
        r"
        ex:Shape a sh:NodeShape ;
            ont:hierarchyLevel 1 ;
            sh:targetClass ex:Item ;
            sh:property [ sh:path ex:a ] , [ sh:path [ sh:alternativePath ( ex:b ex:c ) ] ] .
        ",
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Item> .
    ?focus_node <http://ex/b> ?path_node_1 .
    ?focus_node <http://ex/c> ?path_node_1 .
    ?focus_node <http://ex/a> ?path_node_2 .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Item> .
    ?focus_node <http://ex/b>|<http://ex/c> ?path_node_1 .
    ?focus_node <http://ex/a> ?path_node_2 .
    }
    ");
}

#[test]
fn test_endpoint_requires_hierarchy_level() {
    let error = lower(
        ShapeKind::Endpoint,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Item ;
            sh:property [ sh:path ex:a ] .
        ",
    )
    .unwrap_err();
    assert!(matches!(error, ShapeError::MissingHierarchyLevel { .. }));
}

#[test]
fn test_shape_requires_target_class() {
    let error = lower(
        ShapeKind::Profile,
        r"
        ex:Shape a sh:NodeShape ;
            sh:property [ sh:path ex:a ] .
        ",
    )
    .unwrap_err();
    assert!(matches!(error, ShapeError::MissingTargetClass { .. }));
}

#[test]
fn test_max_count_zero_rejects_complex_paths() {
    let error = lower(
        ShapeKind::Profile,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Item ;
            sh:property [ sh:path ( ex:a ex:b ) ; sh:maxCount 0 ] .
        ",
    )
    .unwrap_err();
    assert!(matches!(error, ShapeError::UnsupportedPath { .. }));
}

#[test]
fn test_exclusions_get_their_own_variables() {
    let query = lower(
        ShapeKind::Endpoint,
        r"
        ex:Shape a sh:NodeShape ;
            ont:hierarchyLevel 1 ;
            sh:targetClass ex:Item ;
            sh:property [ sh:path ex:secret ; sh:maxCount 0 ] ,
                [ sh:path ex:internal ; sh:maxCount 0 ] ,
                [ sh:path shext:allPredicateValues ] .
        ",
    )
    .unwrap();
    assert_eq!(query.matches("NOT IN").count(), 2);
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Item> .
    ?focus_node ?path_preds_1 ?path_excluded_pred_vals_1 .
    ?focus_node ?path_preds_2 ?path_excluded_pred_vals_2 .
    ?focus_node ?path_preds_3 ?path_vals_3 .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Item> .
    ?focus_node ?path_preds_1 ?path_excluded_pred_vals_1 .
    FILTER(?path_preds_1 NOT IN (<http://ex/internal>))
    ?focus_node ?path_preds_2 ?path_excluded_pred_vals_2 .
    FILTER(?path_preds_2 NOT IN (<http://ex/secret>))
    ?focus_node ?path_preds_3 ?path_vals_3 .
    }
    ");
}

#[test]
fn test_filter_values_are_numbered_across_property_shapes() {
    let query = lower(
        ShapeKind::Endpoint,
        r"
        ex:Shape a sh:NodeShape ;
            ont:hierarchyLevel 1 ;
            sh:targetClass ex:Item ;
            sh:property [
                sh:path ex:member ;
                sh:filterShape [
                    sh:property [ sh:path ex:status ; sh:in ( ex:Published ex:Approved ) ]
                ]
            ] , [
                sh:path ex:part ;
                sh:filterShape [
                    sh:property [ sh:path ex:theme ; sh:in ( ex:Soil ex:Water ) ]
                ]
            ] .
        ",
    )
    .unwrap();
    assert!(query.contains("VALUES ?path_filter_1"));
    assert!(query.contains("VALUES ?path_filter_2"));
}
