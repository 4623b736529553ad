use crate::params::invalid;
use ldquery_cql::{Geometry, SpatialFilter, SpatialOperator, SpatialTarget};
use ldquery_grammar::{
    var, ComparisonOperator, Expression, GraphPattern, GroupGraphPattern, Term, TriplePattern,
};
use ldquery_model::vocab::xsd;
use ldquery_model::{DateTime, Literal, NamedNode, QueryBuildError};
use std::str::FromStr;

/// Restricts `?focus_node` to resources whose geometry intersects the bounding box.
///
/// The variables of the filter end with `_bbox`.
pub fn bbox_filter(
    bbox: &[f64],
    crs: &str,
    target: SpatialTarget,
    focus: &Term,
    block: &mut GroupGraphPattern,
) -> Result<(), QueryBuildError> {
    let geometry =
        Geometry::from_bbox(bbox).map_err(|error| invalid("bbox", &error.to_string()))?;
    SpatialFilter::new(SpatialOperator::Intersects, &geometry, crs)
        .lower(target, focus, "bbox", block)
        .map_err(|error| invalid("bbox", &error.to_string()))
}

/// The `datetime` parameter of a listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DatetimeFilter {
    /// `2018-02-12T23:20:50Z`
    Instant(Literal),
    /// `../2018-03-18T12:31:12Z`
    Until(Literal),
    /// `2018-02-12T00:00:00Z/..`
    From(Literal),
    /// `2018-02-12T00:00:00Z/2018-03-18T12:31:12Z`
    Between(Literal, Literal),
}

impl FromStr for DatetimeFilter {
    type Err = QueryBuildError;

    /// An empty side of an interval is read as `..`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let Some((start, end)) = value.split_once('/') else {
            return Ok(DatetimeFilter::Instant(datetime_literal(value)?));
        };
        match (bound(start)?, bound(end)?) {
            (Some(start), Some(end)) => Ok(DatetimeFilter::Between(start, end)),
            (Some(start), None) => Ok(DatetimeFilter::From(start)),
            (None, Some(end)) => Ok(DatetimeFilter::Until(end)),
            (None, None) => Err(invalid("datetime", "at least one bound is required")),
        }
    }
}

impl DatetimeFilter {
    /// Adds `FILTER EXISTS { ?focus_node predicate ?datetime . FILTER(...) }` to `block`.
    pub fn lower(&self, predicate: &NamedNode, focus: &Term, block: &mut GroupGraphPattern) {
        let datetime = var("datetime");
        let mut inner = GroupGraphPattern::from_triples([TriplePattern::new(
            focus.clone(),
            predicate.clone(),
            datetime.clone(),
        )]);
        let conditions = match self {
            DatetimeFilter::Instant(instant) => vec![(ComparisonOperator::Equal, instant)],
            DatetimeFilter::Until(end) => vec![(ComparisonOperator::LessOrEqual, end)],
            DatetimeFilter::From(start) => vec![(ComparisonOperator::GreaterOrEqual, start)],
            DatetimeFilter::Between(start, end) => vec![
                (ComparisonOperator::GreaterOrEqual, start),
                (ComparisonOperator::LessOrEqual, end),
            ],
        };
        for (operator, value) in conditions {
            inner.add_pattern(GraphPattern::Filter(Expression::comparison(
                datetime.clone(),
                operator,
                value.clone(),
            )));
        }
        block.add_pattern(GraphPattern::filter_exists(inner));
    }
}

fn bound(value: &str) -> Result<Option<Literal>, QueryBuildError> {
    match value {
        "" | ".." => Ok(None),
        value => datetime_literal(value).map(Some),
    }
}

fn datetime_literal(value: &str) -> Result<Literal, QueryBuildError> {
    DateTime::from_str(value)
        .map_err(|error| invalid("datetime", &format!("'{value}' is not a datetime: {error}")))?;
    Ok(Literal::new_typed_literal(value, xsd::DATE_TIME))
}
