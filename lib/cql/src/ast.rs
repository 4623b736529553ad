use crate::geometry::Geometry;
use crate::spatial::SpatialOperator;
use crate::temporal::{TemporalOperand, TemporalOperator};
use crate::value::{json_to_term, json_to_terms};
use ldquery_grammar::{ComparisonOperator, Term};
use ldquery_model::CqlError;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

/// A node of a CQL2-JSON document before it has been checked.
#[derive(Deserialize)]
struct RawNode {
    op: String,
    #[serde(default)]
    args: Vec<Value>,
}

/// A reference to a property, either the name of a queryable or a predicate IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyRef {
    pub name: String,
    /// Set if the name was prefixed with `^`.
    pub inverse: bool,
}

impl PropertyRef {
    pub fn new(name: &str) -> Self {
        match name.strip_prefix('^') {
            Some(name) => Self {
                name: name.to_owned(),
                inverse: true,
            },
            None => Self {
                name: name.to_owned(),
                inverse: false,
            },
        }
    }

    /// Reads a `{"property": "..."}` object.
    pub fn from_json(operator: &str, value: &Value) -> Result<Self, CqlError> {
        value
            .get("property")
            .and_then(Value::as_str)
            .map(Self::new)
            .ok_or_else(|| CqlError::InvalidArgument {
                operator: operator.to_owned(),
                message: format!("expected a property reference but got {value}"),
            })
    }
}

/// A CQL2-JSON filter expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CqlExpression {
    And(Vec<CqlExpression>),
    Or(Vec<CqlExpression>),
    Not(Box<CqlExpression>),
    Comparison {
        operator: ComparisonOperator,
        property: PropertyRef,
        value: Term,
    },
    Like {
        property: PropertyRef,
        pattern: String,
    },
    In {
        property: PropertyRef,
        values: Vec<Term>,
    },
    Spatial {
        operator: SpatialOperator,
        property: PropertyRef,
        geometry: Geometry,
    },
    Temporal {
        operator: TemporalOperator,
        left: TemporalOperand,
        right: TemporalOperand,
    },
    /// Any other operator. It is resolved against the registered custom functions during the
    /// translation.
    Function { name: String, args: Vec<Value> },
}

impl CqlExpression {
    /// Reads a CQL2-JSON document.
    pub fn from_json(value: &Value) -> Result<Self, CqlError> {
        let node = RawNode::deserialize(value)
            .map_err(|error| CqlError::Malformed(format!("{error} in {value}")))?;
        let operator = node.op.as_str();
        let args = node.args;

        if let Some(comparison) = ComparisonOperator::from_symbol(operator) {
            expect_arity(operator, &args, 2)?;
            return Ok(CqlExpression::Comparison {
                operator: comparison,
                property: PropertyRef::from_json(operator, &args[0])?,
                value: json_to_term(operator, &args[1])?,
            });
        }
        if let Some(spatial) = SpatialOperator::from_name(operator) {
            expect_arity(operator, &args, 2)?;
            return Ok(CqlExpression::Spatial {
                operator: spatial,
                property: PropertyRef::from_json(operator, &args[0])?,
                geometry: Geometry::from_json(&args[1])?,
            });
        }
        if let Some(temporal) = TemporalOperator::from_name(operator) {
            expect_arity(operator, &args, 2)?;
            return Ok(CqlExpression::Temporal {
                operator: temporal,
                left: TemporalOperand::from_json(operator, &args[0])?,
                right: TemporalOperand::from_json(operator, &args[1])?,
            });
        }

        match operator {
            "and" | "or" => {
                if args.is_empty() {
                    return Err(CqlError::InvalidArgument {
                        operator: operator.to_owned(),
                        message: "at least one argument is required".to_owned(),
                    });
                }
                let children = args
                    .iter()
                    .map(CqlExpression::from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(if operator == "and" {
                    CqlExpression::And(children)
                } else {
                    CqlExpression::Or(children)
                })
            }
            "not" => {
                expect_arity(operator, &args, 1)?;
                Ok(CqlExpression::Not(Box::new(CqlExpression::from_json(
                    &args[0],
                )?)))
            }
            "like" => {
                expect_arity(operator, &args, 2)?;
                let pattern = args[1]
                    .as_str()
                    .ok_or_else(|| CqlError::InvalidArgument {
                        operator: operator.to_owned(),
                        message: format!("the pattern {} is not a string", args[1]),
                    })?;
                Ok(CqlExpression::Like {
                    property: PropertyRef::from_json(operator, &args[0])?,
                    pattern: pattern.to_owned(),
                })
            }
            "in" => {
                let values = match args.as_slice() {
                    [_, list @ Value::Array(_)] => json_to_terms(operator, list)?,
                    [_, rest @ ..] if !rest.is_empty() => rest
                        .iter()
                        .map(|value| json_to_term(operator, value))
                        .collect::<Result<Vec<_>, _>>()?,
                    _ => {
                        return Err(CqlError::Arity {
                            operator: operator.to_owned(),
                            expected: 2,
                            actual: args.len(),
                        })
                    }
                };
                Ok(CqlExpression::In {
                    property: PropertyRef::from_json(operator, &args[0])?,
                    values,
                })
            }
            _ => Ok(CqlExpression::Function {
                name: operator.to_owned(),
                args,
            }),
        }
    }
}

impl FromStr for CqlExpression {
    type Err = CqlError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let value = serde_json::from_str::<Value>(text)
            .map_err(|error| CqlError::Malformed(error.to_string()))?;
        Self::from_json(&value)
    }
}

fn expect_arity(operator: &str, args: &[Value], expected: usize) -> Result<(), CqlError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CqlError::Arity {
            operator: operator.to_owned(),
            expected,
            actual: args.len(),
        })
    }
}
