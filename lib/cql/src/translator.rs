use crate::ast::{CqlExpression, PropertyRef};
use crate::functions::{CqlFunctionRegistryRef, DefaultCqlFunctionRegistry};
use crate::spatial::{SpatialFilter, SpatialTarget, DEFAULT_CRS};
use crate::temporal::{temporal_filter, Period, TemporalOperand, TemporalValue};
use ldquery_grammar::{
    ComparisonOperator, ConstructQuery, Expression, Function, GraphPattern, GroupGraphPattern,
    Term, TriplePattern,
};
use ldquery_model::vocab::sh;
use ldquery_model::{CqlError, Literal, NamedNode};
use ldquery_shacl::{NodeScope, PropertyShape, ShapeKind, ShapeProcessor};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

/// The variable bound to the resources that are filtered.
pub const FOCUS_NODE: &str = "focus_node";

/// The property name that refers to the geometry of the focus node itself.
const GEOMETRY_PROPERTY: &str = "geometry";

/// Lowers CQL2 expressions into graph patterns over `?focus_node`.
///
/// Properties are either queryables, which are lowered through their property shape, or predicate
/// IRIs. A translator holds no per-expression state and can be shared between threads.
#[derive(Clone, Debug)]
pub struct CqlTranslator {
    queryables: FxHashMap<String, PropertyShape>,
    functions: CqlFunctionRegistryRef,
    spatial_target: SpatialTarget,
    crs: String,
}

impl Default for CqlTranslator {
    fn default() -> Self {
        Self::new(Arc::new(DefaultCqlFunctionRegistry::default()))
    }
}

impl CqlTranslator {
    pub fn new(functions: CqlFunctionRegistryRef) -> Self {
        Self {
            queryables: FxHashMap::default(),
            functions,
            spatial_target: SpatialTarget::default(),
            crs: DEFAULT_CRS.to_owned(),
        }
    }

    /// Declares `name` as a queryable whose values are reached through `shape`.
    #[must_use]
    pub fn with_queryable(mut self, name: impl Into<String>, shape: PropertyShape) -> Self {
        self.queryables.insert(name.into(), shape);
        self
    }

    #[must_use]
    pub fn with_queryables(mut self, queryables: FxHashMap<String, PropertyShape>) -> Self {
        self.queryables.extend(queryables);
        self
    }

    #[must_use]
    pub fn with_spatial_target(mut self, target: SpatialTarget) -> Self {
        self.spatial_target = target;
        self
    }

    /// Sets the coordinate reference system of the geometries in spatial filters.
    #[must_use]
    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = crs.into();
        self
    }

    /// Lowers `expression` into a group graph pattern.
    ///
    /// The variables of one expression are numbered from one.
    pub fn translate(&self, expression: &CqlExpression) -> Result<GroupGraphPattern, CqlError> {
        let mut translation = Translation {
            translator: self,
            focus: Term::var(FOCUS_NODE),
            counter: 0,
        };
        let mut block = GroupGraphPattern::new();
        translation.lower(expression, &mut block)?;
        debug!(
            variables = translation.counter,
            triples = block.triples().count(),
            patterns = block.patterns().len(),
            "Translated CQL expression"
        );
        Ok(block)
    }

    /// Creates a CONSTRUCT query that returns the triples matched by `expression`.
    pub fn construct_query(&self, expression: &CqlExpression) -> Result<ConstructQuery, CqlError> {
        Ok(ConstructQuery::from_where_clause(self.translate(expression)?))
    }
}

/// The state of translating a single expression.
struct Translation<'a> {
    translator: &'a CqlTranslator,
    focus: Term,
    counter: usize,
}

impl Translation<'_> {
    fn next_number(&mut self) -> usize {
        self.counter += 1;
        self.counter
    }

    fn lower(
        &mut self,
        expression: &CqlExpression,
        block: &mut GroupGraphPattern,
    ) -> Result<(), CqlError> {
        match expression {
            CqlExpression::And(children) => {
                for child in children {
                    self.lower(child, block)?;
                }
            }
            CqlExpression::Or(children) => {
                let branches = children
                    .iter()
                    .map(|child| {
                        let mut branch = GroupGraphPattern::new();
                        self.lower(child, &mut branch)?;
                        Ok(branch)
                    })
                    .collect::<Result<Vec<_>, CqlError>>()?;
                block.add_pattern(GraphPattern::Union(branches));
            }
            CqlExpression::Not(child) => {
                let mut inner = GroupGraphPattern::new();
                self.lower(child, &mut inner)?;
                block.add_pattern(GraphPattern::filter_not_exists(inner));
            }
            CqlExpression::Comparison {
                operator,
                property,
                value,
            } => {
                let name = operator.to_string();
                let number = self.next_number();
                let object = self.bind_property(&name, property, number, block)?;
                let is_plain = !self.is_queryable(property);
                match object {
                    Term::Variable(variable)
                        if *operator == ComparisonOperator::Equal && is_plain =>
                    {
                        block.add_pattern(GraphPattern::values(variable, [value.clone()]));
                    }
                    object => {
                        block.add_pattern(GraphPattern::Filter(Expression::comparison(
                            expression_of(&name, object)?,
                            *operator,
                            expression_of(&name, value.clone())?,
                        )));
                    }
                }
            }
            CqlExpression::Like { property, pattern } => {
                let number = self.next_number();
                let object = self.bind_property("like", property, number, block)?;
                block.add_pattern(GraphPattern::Filter(Expression::call(
                    Function::Regex,
                    [
                        expression_of("like", object)?,
                        Literal::new_simple_literal(like_to_regex(pattern)).into(),
                        Literal::new_simple_literal("i").into(),
                    ],
                )));
            }
            CqlExpression::In { property, values } => {
                let number = self.next_number();
                match self.bind_property("in", property, number, block)? {
                    Term::Variable(variable) => {
                        block.add_pattern(GraphPattern::values(variable, values.iter().cloned()));
                    }
                    object => {
                        let values = values
                            .iter()
                            .map(|value| expression_of("in", value.clone()))
                            .collect::<Result<Vec<_>, _>>()?;
                        block.add_pattern(GraphPattern::Filter(Expression::In(
                            Box::new(expression_of("in", object)?),
                            values,
                        )));
                    }
                }
            }
            CqlExpression::Spatial {
                operator,
                property,
                geometry,
            } => {
                let number = self.next_number();
                let subject = if property.name == GEOMETRY_PROPERTY
                    || property.name == sh::THIS.as_str()
                {
                    self.focus.clone()
                } else {
                    self.bind_property(operator.name(), property, number, block)?
                };
                SpatialFilter::new(*operator, geometry, self.translator.crs.clone()).lower(
                    self.translator.spatial_target,
                    &subject,
                    &number.to_string(),
                    block,
                )?;
            }
            CqlExpression::Temporal {
                operator,
                left,
                right,
            } => {
                operator.check_operands(left.kind(), right.kind())?;
                let left = self.period(operator.name(), left, block)?;
                let right = self.period(operator.name(), right, block)?;
                block.add_pattern(GraphPattern::Filter(temporal_filter(
                    *operator, &left, &right,
                )));
            }
            CqlExpression::Function { name, args } => {
                let function = self
                    .translator
                    .functions
                    .function(name)
                    .ok_or_else(|| CqlError::UnsupportedOperator(name.clone()))?;
                if args.len() != function.arity() {
                    return Err(CqlError::Arity {
                        operator: name.clone(),
                        expected: function.arity(),
                        actual: args.len(),
                    });
                }
                let suffix = format!("_{}", self.next_number());
                function.lower(&self.focus, args, &suffix, block)?;
            }
        }
        Ok(())
    }

    fn is_queryable(&self, property: &PropertyRef) -> bool {
        self.translator.queryables.contains_key(&property.name)
    }

    /// Binds the values of `property` of the focus node and returns the term holding them.
    fn bind_property(
        &self,
        operator: &str,
        property: &PropertyRef,
        number: usize,
        block: &mut GroupGraphPattern,
    ) -> Result<Term, CqlError> {
        if let Some(shape) = self.translator.queryables.get(&property.name) {
            if property.inverse {
                return Err(CqlError::Unsupported(format!(
                    "the inverse of the queryable '{}'",
                    property.name
                )));
            }
            let processor = ShapeProcessor::new(ShapeKind::Profile, self.focus.clone());
            let mut scope = NodeScope::new(format!("var_{number}"));
            let fragment = processor
                .lower_property_shape(shape, &mut scope)
                .map_err(|source| CqlError::Queryable {
                    name: property.name.clone(),
                    source,
                })?;
            block.append(fragment.where_clause);
            return fragment
                .terminal
                .ok_or_else(|| CqlError::InvalidArgument {
                    operator: operator.to_owned(),
                    message: format!("the queryable '{}' has no value node", property.name),
                });
        }

        let predicate = NamedNode::new(property.name.as_str())
            .map_err(|_| CqlError::UnknownQueryable(property.name.clone()))?;
        let object = Term::var(format!("var_{number}"));
        block.add_triple(if property.inverse {
            TriplePattern::new(object.clone(), predicate, self.focus.clone())
        } else {
            TriplePattern::new(self.focus.clone(), predicate, object.clone())
        });
        Ok(object)
    }

    fn period(
        &mut self,
        operator: &str,
        operand: &TemporalOperand,
        block: &mut GroupGraphPattern,
    ) -> Result<Period, CqlError> {
        Ok(match operand {
            TemporalOperand::Instant(value) => {
                Period::instant(self.temporal_value(operator, value, block)?)
            }
            TemporalOperand::Interval(start, end) => Period {
                start: start
                    .as_ref()
                    .map(|value| self.temporal_value(operator, value, block))
                    .transpose()?,
                end: end
                    .as_ref()
                    .map(|value| self.temporal_value(operator, value, block))
                    .transpose()?,
            },
        })
    }

    fn temporal_value(
        &mut self,
        operator: &str,
        value: &TemporalValue,
        block: &mut GroupGraphPattern,
    ) -> Result<Expression, CqlError> {
        match value {
            TemporalValue::Literal(literal) => Ok(literal.clone().into()),
            TemporalValue::Property(property) => {
                let number = self.next_number();
                let term = self.bind_property(operator, property, number, block)?;
                expression_of(operator, term)
            }
        }
    }
}

fn expression_of(operator: &str, term: Term) -> Result<Expression, CqlError> {
    Expression::try_from(term).map_err(|term| CqlError::InvalidArgument {
        operator: operator.to_owned(),
        message: format!("{term} cannot be used in a filter"),
    })
}

/// Translates a CQL2 `like` pattern into an anchored regular expression.
///
/// `%` matches any sequence of characters and `_` a single character. Both can be escaped with a
/// backslash. Every other character is matched literally.
pub fn like_to_regex(pattern: &str) -> String {
    let mut regex = String::from("^");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            '\\' => push_escaped(&mut regex, chars.next().unwrap_or('\\')),
            c => push_escaped(&mut regex, c),
        }
    }
    regex.push('$');
    regex
}

/// Escapes the metacharacters of XPath regular expressions, the dialect of SPARQL's `REGEX`.
pub fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut escaped, c);
    }
    escaped
}

fn push_escaped(target: &mut String, c: char) {
    if matches!(
        c,
        '\\' | '|' | '.' | '?' | '*' | '+' | '(' | ')' | '{' | '}' | '[' | ']' | '^' | '$' | '-'
    ) {
        target.push('\\');
    }
    target.push(c);
}
