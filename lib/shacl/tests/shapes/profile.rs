use crate::test_utils::lower;
use ldquery_shacl::ShapeKind;

#[test]
fn test_direct_inverse_and_sequence_paths() {
    let query = lower(
        ShapeKind::Profile,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Dataset ;
            sh:property [ sh:path ex:title ] ,
                [ sh:path [ sh:inversePath ex:member ] ] ,
                [ sh:path ( ex:creator ex:name ) ] .
        ",
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/title> ?prof_1_node_1 .
    ?prof_2_node_1 <http://ex/member> ?focus_node .
    ?focus_node <http://ex/creator> ?prof_3_node_1 .
    ?prof_3_node_1 <http://ex/name> ?prof_3_node_2 .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/title> ?prof_1_node_1 .
    ?prof_2_node_1 <http://ex/member> ?focus_node .
    ?focus_node <http://ex/creator> ?prof_3_node_1 .
    ?prof_3_node_1 <http://ex/name> ?prof_3_node_2 .
    }
    ");
}

#[test]
fn test_alias_collapses_construct_triples() {
    let query = lower(
        ShapeKind::Profile,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Dataset ;
            sh:property [
                sh:path ( ex:qualifiedAttribution ex:agent ) ;
                shext:pathAlias ex:agentAlias
            ] .
        ",
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/agentAlias> ?prof_1_node_2 .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/qualifiedAttribution> ?prof_1_node_1 .
    ?prof_1_node_1 <http://ex/agent> ?prof_1_node_2 .
    }
    ");
}

#[test]
fn test_sequence_with_alternative_and_cardinality_hops() {
    let query = lower(
        ShapeKind::Profile,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Dataset ;
            sh:property [
                sh:path (
                    ex:hasPart
                    [ sh:alternativePath ( ex:label [ sh:inversePath ex:labelOf ] ) ]
                    [ sh:zeroOrMorePath ex:broader ]
                )
            ] .
        ",
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/hasPart> ?prof_1_node_1 .
    ?prof_1_node_1 <http://ex/label> ?prof_1_node_2 .
    ?prof_1_node_2 <http://ex/labelOf> ?prof_1_node_1 .
    ?prof_1_node_2 <http://ex/broader> ?prof_1_node_3 .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/hasPart> ?prof_1_node_1 .
    {
    ?prof_1_node_1 <http://ex/label> ?prof_1_node_2 .
    }
    UNION
    {
    ?prof_1_node_2 <http://ex/labelOf> ?prof_1_node_1 .
    }
    ?prof_1_node_2 <http://ex/broader>* ?prof_1_node_3 .
    }
    ");
}

#[test]
fn test_optional_shape_with_alternative_classes() {
    let query = lower(
        ShapeKind::Profile,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Dataset ;
            sh:property [
                sh:path ex:publisher ;
                sh:minCount 0 ;
                sh:or ( [ sh:class ex:Person ] [ sh:class ex:Organisation ] )
            ] .
        ",
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/publisher> ?prof_1_node_1 .
    ?prof_1_node_1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> ?prof_1_node_classes_1 .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    OPTIONAL {
    ?focus_node <http://ex/publisher> ?prof_1_node_1 .
    ?prof_1_node_1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> ?prof_1_node_classes_1 .
    VALUES ?prof_1_node_classes_1 { <http://ex/Person> <http://ex/Organisation> }
    }
    }
    ");
}

#[test]
fn test_max_count_zero_excludes_predicates() {
    let query = lower(
        ShapeKind::Profile,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Dataset ;
            sh:property [ sh:path ex:secret , ex:internal ; sh:maxCount 0 ] .
        ",
    )
    .unwrap();
    assert!(!query.contains("?focus_node <http://ex/secret>"));
    assert_eq!(query.matches("NOT IN").count(), 1);
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node ?prof_1_preds_1 ?prof_1_excluded_pred_vals_1 .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node ?prof_1_preds_1 ?prof_1_excluded_pred_vals_1 .
    FILTER(?prof_1_preds_1 NOT IN (<http://ex/internal>, <http://ex/secret>))
    }
    ");
}

#[test]
fn test_all_predicate_values_and_blank_node_depth() {
    let query = lower(
        ShapeKind::Profile,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass rdfs:Resource ;
            shext:bnode-depth 2 ;
            sh:property [ sh:path shext:allPredicateValues ] .
        ",
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node ?prof_1_preds_1 ?prof_1_vals_1 .
    ?focus_node ?bn_p_1 ?bn_o_1 .
    ?bn_o_1 ?bn_p_2 ?bn_o_2 .
    ?bn_o_2 ?bn_p_3 ?bn_o_3 .
    }
    WHERE {
    ?focus_node ?prof_1_preds_1 ?prof_1_vals_1 .
    OPTIONAL {
    ?focus_node ?bn_p_1 ?bn_o_1 .
    ?bn_o_1 ?bn_p_2 ?bn_o_2 .
    FILTER(isBLANK(?bn_o_1))
    OPTIONAL {
    ?bn_o_2 ?bn_p_3 ?bn_o_3 .
    FILTER(isBLANK(?bn_o_2))
    }
    }
    }
    ");
}

#[test]
fn test_union_paths_with_alias() {
    let query = lower(
        ShapeKind::Profile,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Dataset ;
            sh:property [
                sh:path [
                    sh:union (
                        ex:title
                        [ sh:path ( ex:label ex:value ) ; shext:pathAlias ex:labelValue ]
                    )
                ]
            ] .
        ",
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/title> ?prof_1_node_1 .
    ?focus_node <http://ex/labelValue> ?prof_1_node_3 .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    {
    ?focus_node <http://ex/title> ?prof_1_node_1 .
    BIND(?prof_1_node_1 AS ?prof_1_node_4)
    }
    UNION
    {
    ?focus_node <http://ex/label> ?prof_1_node_2 .
    ?prof_1_node_2 <http://ex/value> ?prof_1_node_3 .
    BIND(?prof_1_node_3 AS ?prof_1_node_4)
    }
    }
    ");
}

#[test]
fn test_filter_shape_constrains_focus_node() {
    let query = lower(
        ShapeKind::Profile,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Dataset , ex:Catalog ;
            sh:property [
                sh:path ex:member ;
                sh:filterShape [
                    sh:property [ sh:path ex:status ; sh:in ( ex:Published ex:Approved ) ]
                ]
            ] .
        ",
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> ?focus_classes .
    ?focus_node <http://ex/member> ?prof_1_node_1 .
    ?focus_node <http://ex/status> ?prof_1_filter_1 .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> ?focus_classes .
    VALUES ?focus_classes { <http://ex/Catalog> <http://ex/Dataset> }
    ?focus_node <http://ex/member> ?prof_1_node_1 .
    VALUES ?prof_1_filter_1 { <http://ex/Published> <http://ex/Approved> }
    ?focus_node <http://ex/status> ?prof_1_filter_1 .
    }
    ");
}

#[test]
fn test_full_text_search_paths_end_in_search_node() {
    let query = lower(
        ShapeKind::Fts,
        r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Dataset ;
            sh:property [ sh:path ( ex:creator ex:name ) ] , [ sh:path ex:title ] .
        ",
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/title> ?fts_search_node .
    ?focus_node <http://ex/creator> ?prof_2_node_1 .
    ?prof_2_node_1 <http://ex/name> ?fts_search_node .
    }
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/title> ?fts_search_node .
    ?focus_node <http://ex/creator> ?prof_2_node_1 .
    ?prof_2_node_1 <http://ex/name> ?fts_search_node .
    }
    ");
}

#[test]
fn test_lowering_is_deterministic() {
    let shape = r"
        ex:Shape a sh:NodeShape ;
            sh:targetClass ex:Dataset ;
            sh:property [ sh:path ex:b ] , [ sh:path ex:a ] , [ sh:path ( ex:c ex:d ) ] .
        ";
    assert_eq!(
        lower(ShapeKind::Profile, shape).unwrap(),
        lower(ShapeKind::Profile, shape).unwrap()
    );
}
