use crate::geometry::Geometry;
use ldquery_grammar::{
    var, Expression, Function, GraphPattern, GroupGraphPattern, Term, TriplePattern,
};
use ldquery_model::vocab::{geo, geof, qlss};
use ldquery_model::{BlankNode, CqlError, Literal, NamedNode, NamedNodeRef};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The default coordinate reference system of spatial filters.
pub const DEFAULT_CRS: &str = "http://www.opengis.net/def/crs/OGC/1.3/CRS84";

/// The dialect used for spatial filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialTarget {
    /// GeoSPARQL filter functions.
    #[default]
    GeoSparql,
    /// The spatial join service of QLever.
    QLever,
    /// The GeoSPARQL relation predicates of GraphDB.
    GraphDb,
}

impl Display for SpatialTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SpatialTarget::GeoSparql => "geosparql",
            SpatialTarget::QLever => "qlever",
            SpatialTarget::GraphDb => "graphdb",
        })
    }
}

/// A spatial relation of CQL2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpatialOperator {
    Intersects,
    Within,
    Contains,
    Disjoint,
    Equals,
    Overlaps,
    Touches,
    Crosses,
}

impl SpatialOperator {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "s_intersects" => SpatialOperator::Intersects,
            "s_within" => SpatialOperator::Within,
            "s_contains" => SpatialOperator::Contains,
            "s_disjoint" => SpatialOperator::Disjoint,
            "s_equals" => SpatialOperator::Equals,
            "s_overlaps" => SpatialOperator::Overlaps,
            "s_touches" => SpatialOperator::Touches,
            "s_crosses" => SpatialOperator::Crosses,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            SpatialOperator::Intersects => "s_intersects",
            SpatialOperator::Within => "s_within",
            SpatialOperator::Contains => "s_contains",
            SpatialOperator::Disjoint => "s_disjoint",
            SpatialOperator::Equals => "s_equals",
            SpatialOperator::Overlaps => "s_overlaps",
            SpatialOperator::Touches => "s_touches",
            SpatialOperator::Crosses => "s_crosses",
        }
    }

    /// The GeoSPARQL filter function.
    fn function(self) -> NamedNodeRef<'static> {
        match self {
            SpatialOperator::Intersects => geof::SF_INTERSECTS,
            SpatialOperator::Within => geof::SF_WITHIN,
            SpatialOperator::Contains => geof::SF_CONTAINS,
            SpatialOperator::Disjoint => geof::SF_DISJOINT,
            SpatialOperator::Equals => geof::SF_EQUALS,
            SpatialOperator::Overlaps => geof::SF_OVERLAPS,
            SpatialOperator::Touches => geof::SF_TOUCHES,
            SpatialOperator::Crosses => geof::SF_CROSSES,
        }
    }

    /// The GeoSPARQL relation predicate.
    fn predicate(self) -> NamedNodeRef<'static> {
        match self {
            SpatialOperator::Intersects => geo::SF_INTERSECTS,
            SpatialOperator::Within => geo::SF_WITHIN,
            SpatialOperator::Contains => geo::SF_CONTAINS,
            SpatialOperator::Disjoint => geo::SF_DISJOINT,
            SpatialOperator::Equals => geo::SF_EQUALS,
            SpatialOperator::Overlaps => geo::SF_OVERLAPS,
            SpatialOperator::Touches => geo::SF_TOUCHES,
            SpatialOperator::Crosses => geo::SF_CROSSES,
        }
    }

    /// The join type of the QLever spatial join. The input geometry is the left side of the join,
    /// so the asymmetric relations are swapped.
    fn qlever_join_type(self) -> Option<NamedNodeRef<'static>> {
        match self {
            SpatialOperator::Intersects => Some(qlss::INTERSECTS),
            SpatialOperator::Within => Some(qlss::CONTAINS),
            SpatialOperator::Contains => Some(qlss::WITHIN),
            SpatialOperator::Equals => Some(qlss::EQUALS),
            SpatialOperator::Overlaps => Some(qlss::OVERLAPS),
            SpatialOperator::Touches => Some(qlss::TOUCHES),
            SpatialOperator::Crosses => Some(qlss::CROSSES),
            SpatialOperator::Disjoint => None,
        }
    }
}

/// A spatial relation between the geometry of a resource and a fixed input geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpatialFilter {
    operator: SpatialOperator,
    wkt: String,
    crs: String,
}

impl SpatialFilter {
    pub fn new(operator: SpatialOperator, geometry: &Geometry, crs: impl Into<String>) -> Self {
        Self {
            operator,
            wkt: geometry.to_wkt(),
            crs: crs.into(),
        }
    }

    /// Adds the filter to `block`.
    ///
    /// `subject` is the resource whose geometry is tested. The variables introduced by the filter
    /// end with `_{suffix}`.
    pub fn lower(
        &self,
        target: SpatialTarget,
        subject: &Term,
        suffix: &str,
        block: &mut GroupGraphPattern,
    ) -> Result<(), CqlError> {
        let geom_bnode = var(format!("geom_bnode_{suffix}"));
        let geom_var = var(format!("geom_var_{suffix}"));
        let geometry_triples = [
            TriplePattern::new(subject.clone(), geo::HAS_GEOMETRY, geom_bnode.clone()),
            TriplePattern::new(geom_bnode.clone(), geo::AS_WKT, geom_var.clone()),
        ];

        match target {
            SpatialTarget::GeoSparql => {
                for triple in geometry_triples {
                    block.add_triple(triple);
                }
                block.add_pattern(GraphPattern::Filter(Expression::call(
                    Function::Custom(self.operator.function().into_owned()),
                    [geom_var.into(), self.wkt_literal(true).into()],
                )));
            }
            SpatialTarget::GraphDb => {
                for triple in geometry_triples {
                    block.add_triple(triple);
                }
                block.add_pattern(GraphPattern::filter_exists(
                    GroupGraphPattern::from_triples([TriplePattern::new(
                        geom_bnode,
                        self.operator.predicate(),
                        self.wkt_literal(true),
                    )]),
                ));
            }
            SpatialTarget::QLever => {
                let join_type = self.operator.qlever_join_type().ok_or_else(|| {
                    CqlError::Unsupported(format!(
                        "the spatial operator '{}' on QLever",
                        self.operator.name()
                    ))
                })?;
                let input = var(format!("wkt_input_{suffix}"));
                let config = Term::from(BlankNode::new_unchecked(format!("config_{suffix}")));
                let mut service = GroupGraphPattern::from_triples([
                    TriplePattern::new(config.clone(), qlss::ALGORITHM, qlss::LIBSPATIALJOIN),
                    TriplePattern::new(config.clone(), qlss::LEFT, input.clone()),
                    TriplePattern::new(config.clone(), qlss::RIGHT, geom_var),
                    TriplePattern::new(config.clone(), qlss::PAYLOAD, subject.clone()),
                    TriplePattern::new(config, qlss::JOIN_TYPE, join_type),
                ]);
                service.add_pattern(GraphPattern::Group(GroupGraphPattern::from_triples(
                    geometry_triples,
                )));

                let mut group = GroupGraphPattern::new();
                group.add_pattern(GraphPattern::values(
                    input,
                    [self.wkt_literal(false).into()],
                ));
                group.add_pattern(GraphPattern::Service {
                    name: NamedNode::new_unchecked(qlss::NAMESPACE),
                    silent: false,
                    pattern: service,
                });
                block.add_pattern(GraphPattern::Group(group));
            }
        }
        Ok(())
    }

    fn wkt_literal(&self, with_crs: bool) -> Literal {
        let value = if with_crs {
            format!("<{}> {}", self.crs, self.wkt)
        } else {
            self.wkt.clone()
        };
        Literal::new_typed_literal(value, geo::WKT_LITERAL)
    }
}
