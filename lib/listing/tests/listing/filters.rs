use crate::test_utils::{ex, render};
use ldquery_cql::{SpatialTarget, DEFAULT_CRS, FOCUS_NODE};
use ldquery_grammar::{ConstructQuery, GroupGraphPattern, Term};
use ldquery_listing::{bbox_filter, DatetimeFilter};
use ldquery_model::QueryBuildError;

#[test]
fn test_bbox_intersects_focus_geometry() {
    let mut block = GroupGraphPattern::new();
    bbox_filter(
        &[0.0, 0.0, 1.0, 1.0],
        DEFAULT_CRS,
        SpatialTarget::GeoSparql,
        &Term::var(FOCUS_NODE),
        &mut block,
    )
    .unwrap();
    insta::assert_snapshot!(render(&ConstructQuery::from_where_clause(block)), @r#"
    CONSTRUCT {
    ?focus_node <http://www.opengis.net/ont/geosparql#hasGeometry> ?geom_bnode_bbox .
    ?geom_bnode_bbox <http://www.opengis.net/ont/geosparql#asWKT> ?geom_var_bbox .
    }
    WHERE {
    ?focus_node <http://www.opengis.net/ont/geosparql#hasGeometry> ?geom_bnode_bbox .
    ?geom_bnode_bbox <http://www.opengis.net/ont/geosparql#asWKT> ?geom_var_bbox .
    FILTER(<http://www.opengis.net/def/function/geosparql/sfIntersects>(?geom_var_bbox, "<http://www.opengis.net/def/crs/OGC/1.3/CRS84> POLYGON ((0 0, 0 1, 1 1, 1 0, 0 0))"^^<http://www.opengis.net/ont/geosparql#wktLiteral>))
    }
    "#);
}

#[test]
fn test_bbox_needs_four_values() {
    let mut block = GroupGraphPattern::new();
    let result = bbox_filter(
        &[0.0, 1.0],
        DEFAULT_CRS,
        SpatialTarget::GeoSparql,
        &Term::var(FOCUS_NODE),
        &mut block,
    );
    assert!(matches!(
        result,
        Err(QueryBuildError::InvalidParameter { name: "bbox", .. })
    ));
    assert!(block.is_empty());
}

#[test]
fn test_datetime_interval_filter() {
    let filter: DatetimeFilter = "2018-02-12T00:00:00Z/2018-03-18T12:31:12Z".parse().unwrap();
    let mut block = GroupGraphPattern::new();
    filter.lower(&ex("temporal"), &Term::var(FOCUS_NODE), &mut block);
    insta::assert_snapshot!(block.to_string(), @r#"
    {
    FILTER EXISTS {
    ?focus_node <http://ex/temporal> ?datetime .
    FILTER(?datetime >= "2018-02-12T00:00:00Z"^^<http://www.w3.org/2001/XMLSchema#dateTime>)
    FILTER(?datetime <= "2018-03-18T12:31:12Z"^^<http://www.w3.org/2001/XMLSchema#dateTime>)
    }
    }
    "#);
}
