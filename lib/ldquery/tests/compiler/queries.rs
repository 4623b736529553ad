use crate::test_utils::{assert_valid_sparql, compiler, ex};
use ldquery::cql::SpatialTarget;
use ldquery::listing::{ListingParams, OrderValue, SortDirection};
use ldquery::model::QueryBuildError;
use ldquery::{CompilerConfig, ListingRequest};
use serde_json::json;

fn render(query: Result<ldquery::grammar::ConstructQuery, QueryBuildError>) -> String {
    let query = query.unwrap().render();
    assert_valid_sparql(&query);
    query
}

fn datasets_request() -> ListingRequest {
    let compiler = compiler(CompilerConfig::default());
    ListingRequest {
        endpoint: Some(
            compiler
                .node_shape(ex("shapes").as_ref(), ex("Datasets").as_ref())
                .unwrap(),
        ),
        ..ListingRequest::default()
    }
}

#[test]
fn test_object_query() {
    let compiler = compiler(CompilerConfig::default());
    let profile = compiler
        .node_shape(ex("shapes").as_ref(), ex("DatasetProfile").as_ref())
        .unwrap();
    insta::assert_snapshot!(render(compiler.object_query(&profile, ex("item"))), @r"
    CONSTRUCT {
    <http://ex/item> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    <http://ex/item> <http://ex/title> ?prof_1_node_1 .
    }
    WHERE {
    <http://ex/item> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    <http://ex/item> <http://ex/title> ?prof_1_node_1 .
    }
    ");
}

#[test]
fn test_filtered_and_ordered_listing() {
    let compiler = compiler(CompilerConfig::default());
    let profile = compiler
        .node_shape(ex("shapes").as_ref(), ex("DatasetProfile").as_ref())
        .unwrap();
    let request = ListingRequest {
        filter: Some(json!({"op": "=", "args": [{"property": "http://ex/theme"}, "http://ex/Soil"]})),
        params: ListingParams {
            page: 2,
            limit: Some(5),
            order_by: Some("http://ex/title".to_owned()),
            ..ListingParams::default()
        },
        ..datasets_request()
    };
    insta::assert_snapshot!(render(compiler.listing_query(&profile, &request)), @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/title> ?prof_1_node_1 .
    }
    WHERE {
    {
    SELECT DISTINCT ?focus_node ?order_by_val
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/theme> ?var_1 .
    VALUES ?var_1 { <http://ex/Soil> }
    ?focus_node <http://ex/title> ?order_by_val .
    }
    ORDER BY ASC(STR(?order_by_val))
    LIMIT 5
    OFFSET 5
    }
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/title> ?prof_1_node_1 .
    }
    ");
}

#[test]
fn test_configured_order_predicate_and_direction() {
    let compiler = compiler(CompilerConfig {
        listing_order_predicate: Some(ex("title")),
        ..CompilerConfig::default()
    });
    let profile = compiler
        .node_shape(ex("shapes").as_ref(), ex("DatasetProfile").as_ref())
        .unwrap();
    let request = ListingRequest {
        params: ListingParams {
            order_by_direction: Some(SortDirection::Desc),
            ..ListingParams::default()
        },
        ..ListingRequest::default()
    };
    let query = render(compiler.listing_query(&profile, &request));
    assert!(query.contains("?focus_node <http://ex/title> ?order_by_val ."));
    assert!(query.contains("ORDER BY DESC(STR(?order_by_val))\nLIMIT 20\nOFFSET 0"));
}

#[test]
fn test_order_by_label() {
    let compiler = compiler(CompilerConfig {
        listing_order_predicate: Some(ex("title")),
        ..CompilerConfig::default()
    });
    let profile = compiler
        .node_shape(ex("shapes").as_ref(), ex("DatasetProfile").as_ref())
        .unwrap();
    let request = ListingRequest {
        params: ListingParams {
            order_by_value: Some(OrderValue::Label),
            ..ListingParams::default()
        },
        ..datasets_request()
    };
    insta::assert_snapshot!(render(compiler.listing_query(&profile, &request)), @r"
    CONSTRUCT {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/title> ?prof_1_node_1 .
    }
    WHERE {
    {
    SELECT DISTINCT ?focus_node ?label
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://www.w3.org/2000/01/rdf-schema#label> ?label .
    }
    ORDER BY ASC(STR(?label))
    LIMIT 20
    OFFSET 0
    }
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    ?focus_node <http://ex/title> ?prof_1_node_1 .
    }
    ");
}

#[test]
fn test_order_by_weight_of_search() {
    let compiler = compiler(CompilerConfig::default());
    let profile = compiler
        .node_shape(ex("shapes").as_ref(), ex("DatasetProfile").as_ref())
        .unwrap();
    let request = ListingRequest {
        search: Some("soil".to_owned()),
        params: ListingParams {
            order_by_value: Some(OrderValue::Weight),
            order_by_direction: Some(SortDirection::Asc),
            ..ListingParams::default()
        },
        ..datasets_request()
    };
    let query = render(compiler.listing_query(&profile, &request));
    assert!(query.contains("ORDER BY ASC(?weight)\nLIMIT 21\nOFFSET 0"));

    let request = ListingRequest {
        search: None,
        ..request
    };
    assert!(matches!(
        compiler.listing_query(&profile, &request),
        Err(QueryBuildError::InvalidParameter {
            name: "order_by_value",
            ..
        })
    ));
}

#[test]
fn test_order_by_value_needs_a_predicate() {
    let compiler = compiler(CompilerConfig::default());
    let profile = compiler
        .node_shape(ex("shapes").as_ref(), ex("DatasetProfile").as_ref())
        .unwrap();
    let request = ListingRequest {
        params: ListingParams {
            order_by_value: Some(OrderValue::OrderByVal),
            ..ListingParams::default()
        },
        ..ListingRequest::default()
    };
    let error = compiler.listing_query(&profile, &request).unwrap_err();
    assert!(error.is_client_error());
    assert!(matches!(
        error,
        QueryBuildError::InvalidParameter { name: "order_by", .. }
    ));
}

#[test]
fn test_bbox_and_datetime_restrict_the_selection() {
    let compiler = compiler(CompilerConfig::default());
    let request = ListingRequest {
        params: ListingParams {
            bbox: vec![140.0, -30.0, 150.0, -20.0],
            datetime: Some("2020-01-01T00:00:00Z/..".to_owned()),
            ..ListingParams::default()
        },
        ..datasets_request()
    };
    let query = render(compiler.count_query(&request));
    assert!(query.contains("?focus_node <http://www.opengis.net/ont/geosparql#hasGeometry> ?geom_bnode_bbox ."));
    assert!(query.contains("sfIntersects>(?geom_var_bbox, \"<http://www.opengis.net/def/crs/OGC/1.3/CRS84> POLYGON"));
    assert!(query.contains("?focus_node <https://schema.org/temporal> ?datetime ."));
    assert!(query.contains("FILTER(?datetime >= \"2020-01-01T00:00:00Z\"^^<http://www.w3.org/2001/XMLSchema#dateTime>)"));
    assert!(query.contains("SELECT (COUNT(DISTINCT ?focus_node) AS ?count)"));
}

#[test]
fn test_facets_of_endpoint() {
    let compiler = compiler(CompilerConfig::default());
    let facets = compiler
        .property_shape(ex("shapes").as_ref(), ex("Facets").as_ref())
        .unwrap();
    let query = render(compiler.facet_query(&facets, &datasets_request()));
    assert!(query.contains("?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> ."));
    assert!(query.contains("BIND(<http://ex/theme> AS ?facetName)"));
    assert!(query.contains("GROUP BY ?facetName ?facetValue"));
}

#[test]
fn test_search_uses_configured_predicates() {
    let compiler = compiler(CompilerConfig {
        search_predicates: vec![ex("name")],
        ..CompilerConfig::default()
    });
    let query = render(compiler.search_query("soil", &ListingParams::default()));
    assert!(query.contains("VALUES ?pred { <http://ex/name> }"));
    assert!(query.contains("LIMIT 21\nOFFSET 0"));
}

#[test]
fn test_listing_with_search_returns_results() {
    let compiler = compiler(CompilerConfig::default());
    let profile = compiler
        .node_shape(ex("shapes").as_ref(), ex("DatasetProfile").as_ref())
        .unwrap();
    let request = ListingRequest {
        search: Some("soil".to_owned()),
        ..datasets_request()
    };
    let query = render(compiler.listing_query(&profile, &request));
    assert!(query.contains("?hashID <https://prez.dev/searchResultURI> ?focus_node ."));
    assert!(query.contains("GROUP BY ?focus_node ?pred ?match"));
}

#[test]
fn test_queryables_are_resolved() {
    let base = compiler(CompilerConfig::default());
    let theme = base
        .property_shape(ex("shapes").as_ref(), ex("Facets").as_ref())
        .unwrap();
    let compiler = base.with_queryable("theme", theme);
    let query = render(compiler.cql_query(&json!({
        "op": "=",
        "args": [{"property": "theme"}, "http://ex/Soil"]
    })));
    assert!(query.contains("?focus_node <http://ex/theme> ?var_1_node_1 ."));
}

#[test]
fn test_spatial_target_is_configurable() {
    let compiler = compiler(CompilerConfig {
        spatial_target: SpatialTarget::QLever,
        ..CompilerConfig::default()
    });
    let query = render(compiler.cql_query(&json!({
        "op": "s_intersects",
        "args": [{"property": "geometry"}, {"type": "Point", "coordinates": [1, 2]}]
    })));
    assert!(query.contains("SERVICE <https://qlever.cs.uni-freiburg.de/spatialSearch/>"));
}

#[test]
fn test_client_errors() {
    let compiler = compiler(CompilerConfig::default());
    let profile = compiler
        .node_shape(ex("shapes").as_ref(), ex("DatasetProfile").as_ref())
        .unwrap();

    let request = ListingRequest {
        params: ListingParams {
            limit: Some(0),
            ..ListingParams::default()
        },
        ..ListingRequest::default()
    };
    let error = compiler.listing_query(&profile, &request).unwrap_err();
    assert!(error.is_client_error());
    assert!(matches!(
        error,
        QueryBuildError::InvalidParameter { name: "limit", .. }
    ));

    let error = compiler
        .cql_query(&json!({"op": "isNull", "args": [{"property": "http://ex/p"}]}))
        .unwrap_err();
    assert!(error.is_client_error());

    let request = ListingRequest {
        params: ListingParams {
            datetime: Some("../..".to_owned()),
            ..ListingParams::default()
        },
        ..ListingRequest::default()
    };
    assert!(compiler.count_query(&request).unwrap_err().is_client_error());
}

#[test]
fn test_endpoint_without_hierarchy_level_is_a_shape_error() {
    let compiler = compiler(CompilerConfig::default());
    let request = ListingRequest {
        endpoint: Some(
            compiler
                .node_shape(ex("shapes").as_ref(), ex("DatasetProfile").as_ref())
                .unwrap(),
        ),
        ..ListingRequest::default()
    };
    let error = compiler.count_query(&request).unwrap_err();
    assert!(!error.is_client_error());
    assert!(matches!(error, QueryBuildError::Shape(_)));
}
