use crate::test_utils::translate_with;
use ldquery_cql::CqlTranslator;
use ldquery_model::{CqlError, NamedNode};
use ldquery_shacl::{PropertyPath, PropertyShape, ShapePath};
use serde_json::json;

fn direct(iri: &str) -> PropertyPath {
    PropertyPath::Direct(NamedNode::new_unchecked(iri))
}

fn translator() -> CqlTranslator {
    CqlTranslator::default()
        .with_queryable(
            "height",
            PropertyShape::from_path(
                "height",
                PropertyPath::Sequence(vec![direct("http://ex/attr"), direct("http://ex/value")]),
            ),
        )
        .with_queryable(
            "name",
            PropertyShape::from_path(
                "name",
                PropertyPath::Alternative(vec![
                    direct("http://ex/name"),
                    direct("http://ex/label"),
                ]),
            ),
        )
}

#[test]
fn test_queryable_sequence_binds_every_hop() {
    let query = translate_with(
        &translator(),
        &json!({"op": ">=", "args": [{"property": "height"}, 10]}),
    )
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://ex/attr> ?var_1_node_1 .
    ?var_1_node_1 <http://ex/value> ?var_1_node_2 .
    }
    WHERE {
    ?focus_node <http://ex/attr> ?var_1_node_1 .
    ?var_1_node_1 <http://ex/value> ?var_1_node_2 .
    FILTER(?var_1_node_2 >= 10)
    }
    ");
}

#[test]
fn test_equality_on_queryable_filters() {
    let query = translate_with(
        &translator(),
        &json!({"op": "=", "args": [{"property": "name"}, "Soil"]}),
    )
    .unwrap();
    insta::assert_snapshot!(query, @r#"
    CONSTRUCT {
    }
    WHERE {
    ?focus_node <http://ex/name>|<http://ex/label> ?var_1_node_1 .
    FILTER(?var_1_node_1 = "Soil")
    }
    "#);
}

#[test]
fn test_queryables_are_numbered_per_operand() {
    let query = translate_with(
        &translator(),
        &json!({"op": "and", "args": [
            {"op": "<", "args": [{"property": "height"}, 3]},
            {"op": "like", "args": [{"property": "name"}, "S%"]}
        ]}),
    )
    .unwrap();
    insta::assert_snapshot!(query, @r#"
    CONSTRUCT {
    ?focus_node <http://ex/attr> ?var_1_node_1 .
    ?var_1_node_1 <http://ex/value> ?var_1_node_2 .
    }
    WHERE {
    ?focus_node <http://ex/attr> ?var_1_node_1 .
    ?var_1_node_1 <http://ex/value> ?var_1_node_2 .
    FILTER(?var_1_node_2 < 3)
    ?focus_node <http://ex/name>|<http://ex/label> ?var_2_node_1 .
    FILTER(REGEX(?var_2_node_1, "^S.*$", "i"))
    }
    "#);
}

#[test]
fn test_union_queryable_binds_one_value_node() {
    let translator = CqlTranslator::default().with_queryable(
        "label",
        PropertyShape {
            id: "label".to_owned(),
            union_paths: vec![
                ShapePath::from(direct("http://ex/prefLabel")),
                ShapePath::from(direct("http://ex/altLabel")),
            ],
            ..PropertyShape::default()
        },
    );
    let query = translate_with(
        &translator,
        &json!({"op": "=", "args": [{"property": "label"}, "Soil"]}),
    )
    .unwrap();
    insta::assert_snapshot!(query, @r#"
    CONSTRUCT {
    ?focus_node <http://ex/prefLabel> ?var_1_node_1 .
    ?focus_node <http://ex/altLabel> ?var_1_node_2 .
    }
    WHERE {
    {
    ?focus_node <http://ex/prefLabel> ?var_1_node_1 .
    BIND(?var_1_node_1 AS ?var_1_node_3)
    }
    UNION
    {
    ?focus_node <http://ex/altLabel> ?var_1_node_2 .
    BIND(?var_1_node_2 AS ?var_1_node_3)
    }
    FILTER(?var_1_node_3 = "Soil")
    }
    "#);
}

#[test]
fn test_inverse_queryable_is_unsupported() {
    assert!(matches!(
        translate_with(
            &translator(),
            &json!({"op": "=", "args": [{"property": "^height"}, 10]})
        ),
        Err(CqlError::Unsupported(_))
    ));
}
