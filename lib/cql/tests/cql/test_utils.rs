use ldquery_cql::{CqlExpression, CqlTranslator};
use ldquery_model::CqlError;
use serde_json::Value;

/// Translates `cql` with the default translator and renders the CONSTRUCT query.
pub fn translate(cql: &Value) -> Result<String, CqlError> {
    translate_with(&CqlTranslator::default(), cql)
}

pub fn translate_with(translator: &CqlTranslator, cql: &Value) -> Result<String, CqlError> {
    let expression = CqlExpression::from_json(cql)?;
    let query = translator.construct_query(&expression)?.render();
    assert_valid_sparql(&query);
    Ok(query)
}

/// Asserts that the rendered query is accepted by a SPARQL parser.
pub fn assert_valid_sparql(query: &str) {
    if let Err(error) = spargebra::Query::parse(query, None) {
        panic!("Generated query is not valid SPARQL: {error}\n{query}");
    }
}
