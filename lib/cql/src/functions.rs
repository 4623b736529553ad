use crate::value::{json_to_term, json_to_terms};
use ldquery_grammar::{
    var, GraphPattern, GroupGraphPattern, PathExpr, Term, TriplePattern,
};
use ldquery_model::vocab::{prov, rdf, schema, sosa, tern};
use ldquery_model::{CqlError, NamedNode, NamedNodeRef, Variable};
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// A reference-counted pointer to a [CqlFunction].
pub type CqlFunctionRef = Arc<dyn CqlFunction>;

/// A custom CQL2 function that is lowered into a fixed graph pattern template.
pub trait CqlFunction: Debug + Send + Sync {
    /// The operator name used in CQL2-JSON documents.
    fn name(&self) -> &str;

    /// The number of positional arguments.
    fn arity(&self) -> usize;

    /// Adds the pattern of the function to `block`.
    ///
    /// The caller has already checked the number of arguments. Every variable introduced by the
    /// function ends with `suffix`.
    fn lower(
        &self,
        focus: &Term,
        args: &[Value],
        suffix: &str,
        block: &mut GroupGraphPattern,
    ) -> Result<(), CqlError>;
}

/// A reference-counted pointer to an implementation of the [CqlFunctionRegistry] trait.
pub type CqlFunctionRegistryRef = Arc<dyn CqlFunctionRegistry>;

/// Resolves operator names of CQL2-JSON documents to custom functions.
pub trait CqlFunctionRegistry: Debug + Send + Sync {
    /// Returns the function called `name`, if it is registered.
    fn function(&self, name: &str) -> Option<CqlFunctionRef>;
}

/// A registry that knows the observation, attribute, additional property and qualified
/// attribution functions.
#[derive(Debug)]
pub struct DefaultCqlFunctionRegistry {
    functions: FxHashMap<String, CqlFunctionRef>,
}

impl DefaultCqlFunctionRegistry {
    /// Creates a registry without any function.
    pub fn empty() -> Self {
        Self {
            functions: FxHashMap::default(),
        }
    }

    /// Registers `function`, replacing any function with the same name.
    pub fn register(&mut self, function: CqlFunctionRef) {
        self.functions.insert(function.name().to_owned(), function);
    }
}

impl Default for DefaultCqlFunctionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(FoiObservationFilterDirect));
        registry.register(Arc::new(FoiObservationFilterSequence));
        registry.register(Arc::new(HasObservation));
        registry.register(Arc::new(HasAttribute));
        registry.register(Arc::new(HasAdditional));
        registry.register(Arc::new(QualifiedAttribution));
        registry
    }
}

impl CqlFunctionRegistry for DefaultCqlFunctionRegistry {
    fn function(&self, name: &str) -> Option<CqlFunctionRef> {
        self.functions.get(name).cloned()
    }
}

/// `FOIObservationFilterDirect(p1, v1, p2, v2)`
///
/// ```sparql
/// ?focus_node sosa:isFeatureOfInterestOf|^sosa:hasFeatureOfInterest ?observation .
/// ?observation p1 v1 .
/// ?observation p2 v2 .
/// ```
#[derive(Debug)]
pub struct FoiObservationFilterDirect;

impl CqlFunction for FoiObservationFilterDirect {
    fn name(&self) -> &str {
        "FOIObservationFilterDirect"
    }

    fn arity(&self) -> usize {
        4
    }

    fn lower(
        &self,
        focus: &Term,
        args: &[Value],
        suffix: &str,
        block: &mut GroupGraphPattern,
    ) -> Result<(), CqlError> {
        let observation = var(format!("observation{suffix}"));
        block.add_triple(feature_to_observation(focus, &observation));
        block.add_triple(TriplePattern::new(
            observation.clone(),
            predicate(self.name(), &args[0])?,
            json_to_term(self.name(), &args[1])?,
        ));
        block.add_triple(TriplePattern::new(
            observation,
            predicate(self.name(), &args[2])?,
            json_to_term(self.name(), &args[3])?,
        ));
        Ok(())
    }
}

/// `FOIObservationFilterSequence(p1, v1, p2, p3, v2)`
///
/// Like [FoiObservationFilterDirect], but the second value is reached through `p2/p3`.
#[derive(Debug)]
pub struct FoiObservationFilterSequence;

impl CqlFunction for FoiObservationFilterSequence {
    fn name(&self) -> &str {
        "FOIObservationFilterSequence"
    }

    fn arity(&self) -> usize {
        5
    }

    fn lower(
        &self,
        focus: &Term,
        args: &[Value],
        suffix: &str,
        block: &mut GroupGraphPattern,
    ) -> Result<(), CqlError> {
        let observation = var(format!("observation{suffix}"));
        block.add_triple(feature_to_observation(focus, &observation));
        block.add_triple(TriplePattern::new(
            observation.clone(),
            predicate(self.name(), &args[0])?,
            json_to_term(self.name(), &args[1])?,
        ));
        block.add_triple(TriplePattern::new(
            observation,
            PathExpr::Sequence(vec![
                predicate(self.name(), &args[2])?.into(),
                predicate(self.name(), &args[3])?.into(),
            ]),
            json_to_term(self.name(), &args[4])?,
        ));
        Ok(())
    }
}

/// `hasObservation([properties], [results])`
///
/// Matches features with an observation of one of the properties whose result is one of the
/// values. The result is looked up as a simple result, a result, or the `rdf:value` of a result.
#[derive(Debug)]
pub struct HasObservation;

impl CqlFunction for HasObservation {
    fn name(&self) -> &str {
        "hasObservation"
    }

    fn arity(&self) -> usize {
        2
    }

    fn lower(
        &self,
        focus: &Term,
        args: &[Value],
        suffix: &str,
        block: &mut GroupGraphPattern,
    ) -> Result<(), CqlError> {
        let observation = var(format!("observation{suffix}"));
        let property = var(format!("obs_prop{suffix}"));
        let result = var(format!("result{suffix}"));
        block.add_triple(feature_to_observation(focus, &observation));
        block.add_triple(TriplePattern::new(
            observation.clone(),
            sosa::OBSERVED_PROPERTY,
            property.clone(),
        ));
        block.add_pattern(value_locations(
            &observation,
            [
                sosa::HAS_SIMPLE_RESULT.into(),
                sosa::HAS_RESULT.into(),
                sequence(sosa::HAS_RESULT, rdf::VALUE),
            ],
            &result,
        ));
        block.add_pattern(values(self.name(), property, &args[0])?);
        block.add_pattern(values(self.name(), result, &args[1])?);
        Ok(())
    }
}

/// `hasAttribute([attributes], [values])`
///
/// ```sparql
/// ?focus_node tern:hasAttribute ?attr .
/// ?attr tern:attribute $attributes .
/// { ?attr tern:hasSimpleValue $values } UNION { ?attr tern:hasValue $values }
/// UNION { ?attr tern:hasValue/rdf:value $values }
/// ```
#[derive(Debug)]
pub struct HasAttribute;

impl CqlFunction for HasAttribute {
    fn name(&self) -> &str {
        "hasAttribute"
    }

    fn arity(&self) -> usize {
        2
    }

    fn lower(
        &self,
        focus: &Term,
        args: &[Value],
        suffix: &str,
        block: &mut GroupGraphPattern,
    ) -> Result<(), CqlError> {
        let attribute = var(format!("attr_bn_var{suffix}"));
        let name = var(format!("attr_name_var{suffix}"));
        let result = var(format!("result{suffix}"));
        block.add_triple(TriplePattern::new(
            focus.clone(),
            tern::HAS_ATTRIBUTE,
            attribute.clone(),
        ));
        block.add_triple(TriplePattern::new(
            attribute.clone(),
            tern::ATTRIBUTE,
            name.clone(),
        ));
        block.add_pattern(value_locations(
            &attribute,
            [
                tern::HAS_SIMPLE_VALUE.into(),
                tern::HAS_VALUE.into(),
                sequence(tern::HAS_VALUE, rdf::VALUE),
            ],
            &result,
        ));
        block.add_pattern(values(self.name(), name, &args[0])?);
        block.add_pattern(values(self.name(), result, &args[1])?);
        Ok(())
    }
}

/// `hasAdditional([names or ids], [values])`
///
/// Matches `schema:additionalProperty` nodes by their `schema:propertyID` or `schema:name`.
#[derive(Debug)]
pub struct HasAdditional;

impl CqlFunction for HasAdditional {
    fn name(&self) -> &str {
        "hasAdditional"
    }

    fn arity(&self) -> usize {
        2
    }

    fn lower(
        &self,
        focus: &Term,
        args: &[Value],
        suffix: &str,
        block: &mut GroupGraphPattern,
    ) -> Result<(), CqlError> {
        let additional = var(format!("aprop_bn_var{suffix}"));
        let name = var(format!("aprop_name_or_id_var{suffix}"));
        let value = var(format!("value{suffix}"));
        block.add_triple(TriplePattern::new(
            focus.clone(),
            schema::ADDITIONAL_PROPERTY,
            additional.clone(),
        ));
        block.add_triple(TriplePattern::new(
            additional.clone(),
            PathExpr::Alternative(vec![schema::PROPERTY_ID.into(), schema::NAME.into()]),
            name.clone(),
        ));
        block.add_pattern(value_locations(
            &additional,
            [
                schema::VALUE.into(),
                rdf::VALUE.into(),
                sequence(schema::VALUE, rdf::VALUE),
            ],
            &value,
        ));
        block.add_pattern(values(self.name(), name, &args[0])?);
        block.add_pattern(values(self.name(), value, &args[1])?);
        Ok(())
    }
}

/// `qualifiedAttribution([roles], [agents])`
///
/// ```sparql
/// ?focus_node prov:qualifiedAttribution ?qa .
/// ?qa prov:hadRole $roles .
/// ?qa prov:agent $agents .
/// ```
#[derive(Debug)]
pub struct QualifiedAttribution;

impl CqlFunction for QualifiedAttribution {
    fn name(&self) -> &str {
        "qualifiedAttribution"
    }

    fn arity(&self) -> usize {
        2
    }

    fn lower(
        &self,
        focus: &Term,
        args: &[Value],
        suffix: &str,
        block: &mut GroupGraphPattern,
    ) -> Result<(), CqlError> {
        let attribution = var(format!("qa_bn_var{suffix}"));
        let role = var(format!("role_var{suffix}"));
        let agent = var(format!("agent_var{suffix}"));
        block.add_triple(TriplePattern::new(
            focus.clone(),
            prov::QUALIFIED_ATTRIBUTION,
            attribution.clone(),
        ));
        block.add_triple(TriplePattern::new(
            attribution.clone(),
            prov::HAD_ROLE,
            role.clone(),
        ));
        block.add_triple(TriplePattern::new(attribution, prov::AGENT, agent.clone()));
        block.add_pattern(values(self.name(), role, &args[0])?);
        block.add_pattern(values(self.name(), agent, &args[1])?);
        Ok(())
    }
}

fn feature_to_observation(focus: &Term, observation: &Variable) -> TriplePattern {
    TriplePattern::new(
        focus.clone(),
        PathExpr::Alternative(vec![
            sosa::IS_FEATURE_OF_INTEREST_OF.into(),
            PathExpr::inverse(sosa::HAS_FEATURE_OF_INTEREST),
        ]),
        observation.clone(),
    )
}

fn sequence(first: NamedNodeRef<'_>, second: NamedNodeRef<'_>) -> PathExpr {
    PathExpr::Sequence(vec![first.into(), second.into()])
}

/// `{ subject p1 object } UNION { subject p2 object } ...`
fn value_locations<const N: usize>(
    subject: &Variable,
    paths: [PathExpr; N],
    object: &Variable,
) -> GraphPattern {
    GraphPattern::Union(
        paths
            .into_iter()
            .map(|path| {
                GroupGraphPattern::from_triples([TriplePattern::new(
                    subject.clone(),
                    path,
                    object.clone(),
                )])
            })
            .collect(),
    )
}

fn values(operator: &str, variable: Variable, value: &Value) -> Result<GraphPattern, CqlError> {
    Ok(GraphPattern::values(
        variable,
        json_to_terms(operator, value)?,
    ))
}

fn predicate(operator: &str, value: &Value) -> Result<NamedNode, CqlError> {
    value
        .as_str()
        .and_then(|iri| NamedNode::new(iri).ok())
        .ok_or_else(|| CqlError::InvalidArgument {
            operator: operator.to_owned(),
            message: format!("{value} is not a predicate IRI"),
        })
}
