use ldquery_cql::{SpatialTarget, DEFAULT_CRS};
use ldquery_model::vocab::{dcterms, rdfs, schema, skos};
use ldquery_model::NamedNode;
use serde::{Deserialize, Serialize};

/// The configuration of a [Compiler](crate::Compiler).
///
/// Every field has a default, so a configuration file only needs to contain the values that
/// differ. IRIs are written as plain strings without angle brackets.
///
/// ```
/// # use ldquery::CompilerConfig;
/// let config: CompilerConfig = serde_json::from_str(r#"{"default_limit": 50}"#).unwrap();
/// assert_eq!(config.default_limit, 50);
/// assert_eq!(config.max_limit, 100);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// The dialect of spatial filters.
    pub spatial_target: SpatialTarget,
    /// The coordinate reference system of geometries without an explicit `filter-crs`.
    pub default_crs: String,
    /// The predicates whose literals are matched by a search.
    #[serde(with = "iri::list")]
    pub search_predicates: Vec<NamedNode>,
    /// The predicates that provide the label of a resource, in order of preference.
    #[serde(with = "iri::list")]
    pub label_predicates: Vec<NamedNode>,
    /// The predicate used by the `datetime` parameter of a listing.
    #[serde(with = "iri::single")]
    pub temporal_predicate: NamedNode,
    pub default_limit: u64,
    /// Larger limits are clamped to this value.
    pub max_limit: u64,
    /// Orders listings without an explicit `order_by` parameter.
    #[serde(with = "iri::optional")]
    pub listing_order_predicate: Option<NamedNode>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            spatial_target: SpatialTarget::default(),
            default_crs: DEFAULT_CRS.to_owned(),
            search_predicates: vec![
                rdfs::LABEL.into_owned(),
                skos::PREF_LABEL.into_owned(),
                dcterms::TITLE.into_owned(),
                dcterms::DESCRIPTION.into_owned(),
                skos::DEFINITION.into_owned(),
            ],
            label_predicates: vec![
                skos::PREF_LABEL.into_owned(),
                dcterms::TITLE.into_owned(),
                rdfs::LABEL.into_owned(),
                schema::NAME.into_owned(),
            ],
            temporal_predicate: schema::TEMPORAL.into_owned(),
            default_limit: 20,
            max_limit: 100,
            listing_order_predicate: None,
        }
    }
}

/// (De-)serializes IRIs as plain strings.
mod iri {
    use ldquery_model::NamedNode;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    fn parse<E: Error>(value: String) -> Result<NamedNode, E> {
        NamedNode::new(value).map_err(E::custom)
    }

    pub(super) mod single {
        use super::*;

        pub(crate) fn serialize<S: Serializer>(
            value: &NamedNode,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(value.as_str())
        }

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<NamedNode, D::Error> {
            parse(String::deserialize(deserializer)?)
        }
    }

    pub(super) mod optional {
        use super::*;

        pub(crate) fn serialize<S: Serializer>(
            value: &Option<NamedNode>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_some(value.as_str()),
                None => serializer.serialize_none(),
            }
        }

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NamedNode>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(parse)
                .transpose()
        }
    }

    pub(super) mod list {
        use super::*;
        use serde::ser::SerializeSeq;

        pub(crate) fn serialize<S: Serializer>(
            values: &[NamedNode],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(values.len()))?;
            for value in values {
                seq.serialize_element(value.as_str())?;
            }
            seq.end()
        }

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<NamedNode>, D::Error> {
            Vec::<String>::deserialize(deserializer)?
                .into_iter()
                .map(parse)
                .collect()
        }
    }
}
