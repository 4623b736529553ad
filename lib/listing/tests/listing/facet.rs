use crate::test_utils::{direct, ex, render};
use ldquery_grammar::{var, GroupGraphPattern, TriplePattern};
use ldquery_listing::FacetQuery;
use ldquery_model::vocab::rdf;
use ldquery_model::ShapeError;
use ldquery_shacl::{PropertyPath, PropertyShape, ShapePath};

fn datasets() -> GroupGraphPattern {
    GroupGraphPattern::from_triples([TriplePattern::new(
        var("focus_node"),
        rdf::TYPE,
        ex("Dataset"),
    )])
}

#[test]
fn test_single_facet() {
    let facets = PropertyShape::from_path("facets", direct("theme"));
    let query = FacetQuery::new(facets)
        .with_selection(datasets())
        .build()
        .unwrap();
    insta::assert_snapshot!(render(&query), @r"
    CONSTRUCT {
    _:facet <https://prez.dev/facetName> ?facetName .
    _:facet <https://prez.dev/facetValue> ?facetValue .
    _:facet <https://prez.dev/facetCount> ?facetCount .
    }
    WHERE {
    {
    SELECT ?facetName ?facetValue (COUNT(DISTINCT ?focus_node) AS ?facetCount)
    WHERE {
    {
    SELECT DISTINCT ?focus_node
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    }
    }
    ?focus_node <http://ex/theme> ?prof_1_node_1 .
    BIND(<http://ex/theme> AS ?facetName)
    BIND(?prof_1_node_1 AS ?facetValue)
    }
    GROUP BY ?facetName ?facetValue
    }
    }
    ");
}

#[test]
fn test_several_facets_form_a_union() {
    let facets = PropertyShape {
        id: "facets".to_owned(),
        and_paths: vec![
            direct("theme").into(),
            ShapePath::new(PropertyPath::Sequence(vec![direct("creator"), direct("name")]))
                .with_alias(Some(ex("creatorName"))),
        ],
        ..PropertyShape::default()
    };
    let query = FacetQuery::new(facets)
        .with_selection(datasets())
        .build()
        .unwrap();
    insta::assert_snapshot!(render(&query), @r"
    CONSTRUCT {
    _:facet <https://prez.dev/facetName> ?facetName .
    _:facet <https://prez.dev/facetValue> ?facetValue .
    _:facet <https://prez.dev/facetCount> ?facetCount .
    }
    WHERE {
    {
    SELECT ?facetName ?facetValue (COUNT(DISTINCT ?focus_node) AS ?facetCount)
    WHERE {
    {
    SELECT DISTINCT ?focus_node
    WHERE {
    ?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex/Dataset> .
    }
    }
    {
    ?focus_node <http://ex/theme> ?prof_1_node_1 .
    BIND(<http://ex/theme> AS ?facetName)
    BIND(?prof_1_node_1 AS ?facetValue)
    }
    UNION
    {
    ?focus_node <http://ex/creator> ?prof_1_node_2 .
    ?prof_1_node_2 <http://ex/name> ?prof_1_node_3 .
    BIND(<http://ex/creatorName> AS ?facetName)
    BIND(?prof_1_node_3 AS ?facetValue)
    }
    }
    GROUP BY ?facetName ?facetValue
    }
    }
    ");
}

#[test]
fn test_facet_without_selection_counts_typed_resources() {
    let facets = PropertyShape::from_path("facets", direct("theme"));
    let query = render(&FacetQuery::new(facets).build().unwrap());
    assert!(query.contains(
        "?focus_node <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> ?focus_class ."
    ));
}

#[test]
fn test_facet_shape_needs_a_path() {
    let facets = PropertyShape {
        id: "facets".to_owned(),
        ..PropertyShape::default()
    };
    assert!(matches!(
        FacetQuery::new(facets).build(),
        Err(ShapeError::MissingPath { .. })
    ));
}
