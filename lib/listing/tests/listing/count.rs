use crate::test_utils::{cql_selection, render};
use ldquery_listing::CountQuery;
use serde_json::json;

#[test]
fn test_count_of_selection() {
    let selection = cql_selection(&json!({
        "op": "=",
        "args": [{"property": "http://ex/type"}, "http://ex/Foo"]
    }));
    let query = CountQuery::new().with_selection(selection).build();
    insta::assert_snapshot!(render(&query), @r"
    CONSTRUCT {
    _:count <https://prez.dev/count> ?count .
    }
    WHERE {
    {
    SELECT (COUNT(DISTINCT ?focus_node) AS ?count)
    WHERE {
    ?focus_node <http://ex/type> ?var_1 .
    VALUES ?var_1 { <http://ex/Foo> }
    }
    }
    }
    ");
}

#[test]
fn test_count_without_selection_counts_typed_resources() {
    let query = render(&CountQuery::new().build());
    assert!(query.contains(
        "?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> ?focus_class ."
    ));
}
