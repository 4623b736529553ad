use crate::test_utils::translate;
use serde_json::json;

#[test]
fn test_equality_on_predicate_binds_values() {
    let query = translate(&json!({
        "op": "=",
        "args": [{"property": "http://ex/type"}, "http://ex/Foo"]
    }))
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://ex/type> ?var_1 .
    }
    WHERE {
    ?focus_node <http://ex/type> ?var_1 .
    VALUES ?var_1 { <http://ex/Foo> }
    }
    ");
}

#[test]
fn test_other_comparisons_filter() {
    let query = translate(&json!({
        "op": "and",
        "args": [
            {"op": "<", "args": [{"property": "http://ex/height"}, 2.5]},
            {"op": "<>", "args": [{"property": "http://ex/created"}, {"date": "2020-01-01"}]}
        ]
    }))
    .unwrap();
    insta::assert_snapshot!(query, @r#"
    CONSTRUCT {
    ?focus_node <http://ex/height> ?var_1 .
    ?focus_node <http://ex/created> ?var_2 .
    }
    WHERE {
    ?focus_node <http://ex/height> ?var_1 .
    FILTER(?var_1 < 2.5)
    ?focus_node <http://ex/created> ?var_2 .
    FILTER(?var_2 != "2020-01-01"^^<http://www.w3.org/2001/XMLSchema#date>)
    }
    "#);
}

#[test]
fn test_like_becomes_anchored_case_insensitive_regex() {
    let query = translate(&json!({
        "op": "like",
        "args": [{"property": "http://ex/label"}, "foo%bar_"]
    }))
    .unwrap();
    insta::assert_snapshot!(query, @r#"
    CONSTRUCT {
    ?focus_node <http://ex/label> ?var_1 .
    }
    WHERE {
    ?focus_node <http://ex/label> ?var_1 .
    FILTER(REGEX(?var_1, "^foo.*bar.$", "i"))
    }
    "#);
}

#[test]
fn test_in_on_inverse_property() {
    let query = translate(&json!({
        "op": "in",
        "args": [{"property": "^http://ex/member"}, ["http://ex/a", 3]]
    }))
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?var_1 <http://ex/member> ?focus_node .
    }
    WHERE {
    ?var_1 <http://ex/member> ?focus_node .
    VALUES ?var_1 { <http://ex/a> 3 }
    }
    ");
}

#[test]
fn test_unknown_property_name() {
    let error = translate(&json!({
        "op": "=",
        "args": [{"property": "height"}, 3]
    }))
    .unwrap_err();
    assert_eq!(error.to_string(), "Unknown queryable 'height'.");
}

#[test]
fn test_translation_is_deterministic() {
    let cql = json!({
        "op": "or",
        "args": [
            {"op": "like", "args": [{"property": "http://ex/label"}, "a%"]},
            {"op": "in", "args": [{"property": "http://ex/type"}, ["http://ex/A", "http://ex/B"]]}
        ]
    });
    assert_eq!(translate(&cql).unwrap(), translate(&cql).unwrap());
}
