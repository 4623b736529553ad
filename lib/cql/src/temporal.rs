//! The temporal relations of CQL2 expressed as comparisons of interval bounds.
//!
//! Both operands are seen as periods. An instant is a period whose start and end coincide, an
//! unbounded interval start (`".."`) lies before and an unbounded end after every other value.
//! Comparisons with an unbounded side are decided while building the query.

use crate::ast::PropertyRef;
use crate::value::{date_literal, temporal_literal, timestamp_literal};
use ldquery_grammar::{ComparisonOperator, Expression};
use ldquery_model::{CqlError, Literal, TemporalOperandKind};
use serde_json::Value;
use std::cmp::Ordering;

const OPERATORS: [(&str, TemporalOperator); 15] = [
    ("t_after", TemporalOperator::After),
    ("t_before", TemporalOperator::Before),
    ("t_contains", TemporalOperator::Contains),
    ("t_disjoint", TemporalOperator::Disjoint),
    ("t_during", TemporalOperator::During),
    ("t_equals", TemporalOperator::Equals),
    ("t_finishedBy", TemporalOperator::FinishedBy),
    ("t_finishes", TemporalOperator::Finishes),
    ("t_intersects", TemporalOperator::Intersects),
    ("t_meets", TemporalOperator::Meets),
    ("t_metBy", TemporalOperator::MetBy),
    ("t_overlappedBy", TemporalOperator::OverlappedBy),
    ("t_overlaps", TemporalOperator::Overlaps),
    ("t_startedBy", TemporalOperator::StartedBy),
    ("t_starts", TemporalOperator::Starts),
];

/// A temporal relation of CQL2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemporalOperator {
    After,
    Before,
    Contains,
    Disjoint,
    During,
    Equals,
    FinishedBy,
    Finishes,
    Intersects,
    Meets,
    MetBy,
    OverlappedBy,
    Overlaps,
    StartedBy,
    Starts,
}

impl TemporalOperator {
    pub fn from_name(name: &str) -> Option<Self> {
        OPERATORS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, operator)| *operator)
    }

    pub fn name(self) -> &'static str {
        OPERATORS
            .iter()
            .find(|(_, operator)| *operator == self)
            .map_or("", |(name, _)| *name)
    }

    /// Returns false for the relations that are only defined between two intervals.
    pub fn accepts_instants(self) -> bool {
        matches!(
            self,
            TemporalOperator::After
                | TemporalOperator::Before
                | TemporalOperator::Disjoint
                | TemporalOperator::Equals
                | TemporalOperator::Intersects
        )
    }

    /// Checks that the relation is defined for the given kinds of operands.
    pub fn check_operands(
        self,
        left: TemporalOperandKind,
        right: TemporalOperandKind,
    ) -> Result<(), CqlError> {
        let has_instant =
            left == TemporalOperandKind::Instant || right == TemporalOperandKind::Instant;
        if has_instant && !self.accepts_instants() {
            return Err(CqlError::UnsupportedTemporal {
                operator: self.name().to_owned(),
                left,
                right,
            });
        }
        Ok(())
    }
}

/// A bounded value of a temporal operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemporalValue {
    Property(PropertyRef),
    Literal(Literal),
}

/// An operand of a temporal relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemporalOperand {
    Instant(TemporalValue),
    /// Start and end of the interval. [None] is an unbounded side.
    Interval(Option<TemporalValue>, Option<TemporalValue>),
}

impl TemporalOperand {
    pub fn from_json(operator: &str, value: &Value) -> Result<Self, CqlError> {
        if let Some(interval) = value.get("interval") {
            return match interval.as_array().map(Vec::as_slice) {
                Some([start, end]) => Ok(TemporalOperand::Interval(
                    interval_bound(operator, start)?,
                    interval_bound(operator, end)?,
                )),
                _ => Err(invalid(
                    operator,
                    format!("an interval needs exactly two bounds but got {interval}"),
                )),
            };
        }
        if value.as_str() == Some("..") {
            return Err(invalid(operator, "an instant cannot be unbounded".to_owned()));
        }
        Ok(TemporalOperand::Instant(temporal_value(operator, value)?))
    }

    pub fn kind(&self) -> TemporalOperandKind {
        match self {
            TemporalOperand::Instant(_) => TemporalOperandKind::Instant,
            TemporalOperand::Interval(..) => TemporalOperandKind::Interval,
        }
    }
}

fn interval_bound(operator: &str, value: &Value) -> Result<Option<TemporalValue>, CqlError> {
    if value.as_str() == Some("..") {
        Ok(None)
    } else {
        temporal_value(operator, value).map(Some)
    }
}

fn temporal_value(operator: &str, value: &Value) -> Result<TemporalValue, CqlError> {
    match value {
        Value::String(text) => temporal_literal(text).map(TemporalValue::Literal),
        Value::Object(object) => {
            if object.contains_key("property") {
                PropertyRef::from_json(operator, value).map(TemporalValue::Property)
            } else if let Some(date) = object.get("date") {
                date_literal(date).map(TemporalValue::Literal)
            } else if let Some(timestamp) = object.get("timestamp") {
                timestamp_literal(timestamp).map(TemporalValue::Literal)
            } else {
                Err(invalid(operator, format!("unsupported temporal value {value}")))
            }
        }
        _ => Err(invalid(operator, format!("unsupported temporal value {value}"))),
    }
}

fn invalid(operator: &str, message: String) -> CqlError {
    CqlError::InvalidArgument {
        operator: operator.to_owned(),
        message,
    }
}

/// The resolved bounds of an operand. [None] is an unbounded side.
#[derive(Clone, Debug, PartialEq)]
pub struct Period {
    pub start: Option<Expression>,
    pub end: Option<Expression>,
}

impl Period {
    pub fn instant(value: Expression) -> Self {
        Self {
            start: Some(value.clone()),
            end: Some(value),
        }
    }

    fn start(&self) -> Endpoint<'_> {
        self.start.as_ref().map_or(Endpoint::NegInf, Endpoint::Value)
    }

    fn end(&self) -> Endpoint<'_> {
        self.end.as_ref().map_or(Endpoint::PosInf, Endpoint::Value)
    }
}

#[derive(Clone, Copy)]
enum Endpoint<'a> {
    NegInf,
    Value(&'a Expression),
    PosInf,
}

impl Endpoint<'_> {
    fn rank(self) -> u8 {
        match self {
            Endpoint::NegInf => 0,
            Endpoint::Value(_) => 1,
            Endpoint::PosInf => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Condition {
    Static(bool),
    Dynamic(Expression),
}

fn compare(left: Endpoint<'_>, operator: ComparisonOperator, right: Endpoint<'_>) -> Condition {
    if let (Endpoint::Value(left), Endpoint::Value(right)) = (left, right) {
        return Condition::Dynamic(Expression::comparison(
            left.clone(),
            operator,
            right.clone(),
        ));
    }
    let ordering = left.rank().cmp(&right.rank());
    Condition::Static(match operator {
        ComparisonOperator::Equal => ordering == Ordering::Equal,
        ComparisonOperator::NotEqual => ordering != Ordering::Equal,
        ComparisonOperator::Less => ordering == Ordering::Less,
        ComparisonOperator::LessOrEqual => ordering != Ordering::Greater,
        ComparisonOperator::Greater => ordering == Ordering::Greater,
        ComparisonOperator::GreaterOrEqual => ordering != Ordering::Less,
    })
}

fn all<const N: usize>(conditions: [Condition; N]) -> Condition {
    let mut operands = Vec::new();
    for condition in conditions {
        match condition {
            Condition::Static(false) => return Condition::Static(false),
            Condition::Static(true) => {}
            Condition::Dynamic(expression) => operands.push(expression),
        }
    }
    combine(operands, true, Expression::And)
}

fn any<const N: usize>(conditions: [Condition; N]) -> Condition {
    let mut operands = Vec::new();
    for condition in conditions {
        match condition {
            Condition::Static(true) => return Condition::Static(true),
            Condition::Static(false) => {}
            Condition::Dynamic(expression) => operands.push(expression),
        }
    }
    combine(operands, false, Expression::Or)
}

fn combine(
    mut operands: Vec<Expression>,
    empty: bool,
    connective: fn(Vec<Expression>) -> Expression,
) -> Condition {
    match operands.len() {
        0 => Condition::Static(empty),
        1 => Condition::Dynamic(operands.remove(0)),
        _ => Condition::Dynamic(connective(operands)),
    }
}

/// Builds the filter expression that holds if `left` and `right` are in the given relation.
///
/// Relations that can be decided without looking at the data become a boolean literal.
pub fn temporal_filter(operator: TemporalOperator, left: &Period, right: &Period) -> Expression {
    use ComparisonOperator::{Equal, Greater, GreaterOrEqual, Less, LessOrEqual};

    let (a_start, a_end, b_start, b_end) = (left.start(), left.end(), right.start(), right.end());
    let condition = match operator {
        TemporalOperator::After => compare(a_start, Greater, b_end),
        TemporalOperator::Before => compare(a_end, Less, b_start),
        TemporalOperator::Contains => all([
            compare(a_start, Less, b_start),
            compare(a_end, Greater, b_end),
        ]),
        TemporalOperator::Disjoint => any([
            compare(a_end, Less, b_start),
            compare(a_start, Greater, b_end),
        ]),
        TemporalOperator::During => all([
            compare(a_start, Greater, b_start),
            compare(a_end, Less, b_end),
        ]),
        TemporalOperator::Equals => all([
            compare(a_start, Equal, b_start),
            compare(a_end, Equal, b_end),
        ]),
        TemporalOperator::FinishedBy => all([
            compare(a_start, Less, b_start),
            compare(a_end, Equal, b_end),
        ]),
        TemporalOperator::Finishes => all([
            compare(a_start, Greater, b_start),
            compare(a_end, Equal, b_end),
        ]),
        TemporalOperator::Intersects => all([
            compare(a_start, LessOrEqual, b_end),
            compare(a_end, GreaterOrEqual, b_start),
        ]),
        TemporalOperator::Meets => compare(a_end, Equal, b_start),
        TemporalOperator::MetBy => compare(a_start, Equal, b_end),
        TemporalOperator::OverlappedBy => all([
            compare(a_start, Greater, b_start),
            compare(a_start, Less, b_end),
            compare(a_end, Greater, b_end),
        ]),
        TemporalOperator::Overlaps => all([
            compare(a_start, Less, b_start),
            compare(a_end, Greater, b_start),
            compare(a_end, Less, b_end),
        ]),
        TemporalOperator::StartedBy => all([
            compare(a_start, Equal, b_start),
            compare(a_end, Greater, b_end),
        ]),
        TemporalOperator::Starts => all([
            compare(a_start, Equal, b_start),
            compare(a_end, Less, b_end),
        ]),
    };
    match condition {
        Condition::Static(value) => Expression::Literal(Literal::from(value)),
        Condition::Dynamic(expression) => expression,
    }
}
