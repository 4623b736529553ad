use crate::test_utils::translate;
use ldquery_model::{CqlError, TemporalOperandKind};
use serde_json::json;

#[test]
fn test_interval_during_interval() {
    let query = translate(&json!({
        "op": "t_during",
        "args": [
            {"interval": [{"property": "http://ex/start"}, {"property": "http://ex/end"}]},
            {"interval": ["2020-01-01", "2021-01-01T00:00:00Z"]}
        ]
    }))
    .unwrap();
    insta::assert_snapshot!(query, @r#"
    CONSTRUCT {
    ?focus_node <http://ex/start> ?var_1 .
    ?focus_node <http://ex/end> ?var_2 .
    }
    WHERE {
    ?focus_node <http://ex/start> ?var_1 .
    ?focus_node <http://ex/end> ?var_2 .
    FILTER((?var_1 > "2020-01-01"^^<http://www.w3.org/2001/XMLSchema#date>) && (?var_2 < "2021-01-01T00:00:00Z"^^<http://www.w3.org/2001/XMLSchema#dateTime>))
    }
    "#);
}

#[test]
fn test_instant_before_half_bounded_interval() {
    let query = translate(&json!({
        "op": "t_before",
        "args": [
            {"property": "http://ex/date"},
            {"interval": [{"timestamp": "2020-06-01T12:00:00Z"}, ".."]}
        ]
    }))
    .unwrap();
    insta::assert_snapshot!(query, @r#"
    CONSTRUCT {
    ?focus_node <http://ex/date> ?var_1 .
    }
    WHERE {
    ?focus_node <http://ex/date> ?var_1 .
    FILTER(?var_1 < "2020-06-01T12:00:00Z"^^<http://www.w3.org/2001/XMLSchema#dateTime>)
    }
    "#);
}

#[test]
fn test_vacuous_relation_is_decided_statically() {
    let query = translate(&json!({
        "op": "t_after",
        "args": [{"property": "http://ex/date"}, {"interval": ["..", ".."]}]
    }))
    .unwrap();
    insta::assert_snapshot!(query, @r"
    CONSTRUCT {
    ?focus_node <http://ex/date> ?var_1 .
    }
    WHERE {
    ?focus_node <http://ex/date> ?var_1 .
    FILTER(false)
    }
    ");
}

#[test]
fn test_interval_relation_rejects_instant() {
    let error = translate(&json!({
        "op": "t_overlaps",
        "args": [{"property": "http://ex/date"}, {"interval": ["2020-01-01", "2021-01-01"]}]
    }))
    .unwrap_err();
    assert!(matches!(
        error,
        CqlError::UnsupportedTemporal {
            left: TemporalOperandKind::Instant,
            right: TemporalOperandKind::Interval,
            ..
        }
    ));
}

#[test]
fn test_invalid_date_is_rejected() {
    assert!(matches!(
        translate(&json!({
            "op": "t_after",
            "args": [{"property": "http://ex/date"}, "2020-02-30"]
        })),
        Err(CqlError::InvalidDateTime(_))
    ));
}
