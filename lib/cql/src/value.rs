use ldquery_grammar::Term;
use ldquery_model::vocab::xsd;
use ldquery_model::{CqlError, Date, DateTime, Literal, NamedNode};
use serde_json::Value;
use std::str::FromStr;

/// Converts a CQL2-JSON value into an RDF term.
///
/// Strings starting with `http` become IRIs, every other string a plain literal. Numbers become
/// `xsd:integer` or `xsd:decimal` literals. `{"date": ...}` and `{"timestamp": ...}` become typed
/// literals after validating their lexical form.
pub fn json_to_term(operator: &str, value: &Value) -> Result<Term, CqlError> {
    match value {
        Value::String(text) if text.starts_with("http") => NamedNode::new(text.as_str())
            .map(Term::NamedNode)
            .map_err(|error| invalid(operator, format!("'{text}' is not a valid IRI: {error}"))),
        Value::String(text) => Ok(Literal::new_simple_literal(text.as_str()).into()),
        Value::Bool(value) => Ok(Literal::from(*value).into()),
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                Ok(Literal::from(integer).into())
            } else if let Some(float) = number.as_f64().filter(|float| float.is_finite()) {
                Ok(Literal::new_typed_literal(float.to_string(), xsd::DECIMAL).into())
            } else {
                Err(invalid(operator, format!("{number} is not a supported number")))
            }
        }
        Value::Object(object) => {
            if let Some(date) = object.get("date") {
                date_literal(date).map(Term::from)
            } else if let Some(timestamp) = object.get("timestamp") {
                timestamp_literal(timestamp).map(Term::from)
            } else {
                Err(invalid(operator, format!("unsupported value {value}")))
            }
        }
        Value::Null | Value::Array(_) => {
            Err(invalid(operator, format!("unsupported value {value}")))
        }
    }
}

/// Converts every element of a JSON array. A single non-array value is treated as a one element
/// array.
pub fn json_to_terms(operator: &str, value: &Value) -> Result<Vec<Term>, CqlError> {
    match value {
        Value::Array(values) if values.is_empty() => {
            Err(invalid(operator, "the list of values is empty".to_owned()))
        }
        Value::Array(values) => values
            .iter()
            .map(|value| json_to_term(operator, value))
            .collect(),
        value => Ok(vec![json_to_term(operator, value)?]),
    }
}

/// Parses `{"date": "2020-01-01"}`'s inner value into an `xsd:date` literal.
pub fn date_literal(value: &Value) -> Result<Literal, CqlError> {
    let text = value
        .as_str()
        .ok_or_else(|| CqlError::InvalidDateTime(value.to_string()))?;
    Date::from_str(text).map_err(|_| CqlError::InvalidDateTime(text.to_owned()))?;
    Ok(Literal::new_typed_literal(text, xsd::DATE))
}

/// Parses `{"timestamp": "2020-01-01T00:00:00Z"}`'s inner value into an `xsd:dateTime` literal.
pub fn timestamp_literal(value: &Value) -> Result<Literal, CqlError> {
    let text = value
        .as_str()
        .ok_or_else(|| CqlError::InvalidDateTime(value.to_string()))?;
    DateTime::from_str(text).map_err(|_| CqlError::InvalidDateTime(text.to_owned()))?;
    Ok(Literal::new_typed_literal(text, xsd::DATE_TIME))
}

/// Parses a bare temporal string. Strings with a time part become `xsd:dateTime`, others `xsd:date`.
pub fn temporal_literal(text: &str) -> Result<Literal, CqlError> {
    let value = Value::String(text.to_owned());
    if text.contains('T') {
        timestamp_literal(&value)
    } else {
        date_literal(&value)
    }
}

fn invalid(operator: &str, message: String) -> CqlError {
    CqlError::InvalidArgument {
        operator: operator.to_owned(),
        message,
    }
}
