//! Expression evaluation boundary
//!
//! The runner never interprets expression syntax itself; it hands the raw
//! expression text and the flattened value context to an
//! [`ExpressionEvaluator`] and re-wraps failures during delay computation.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Syntax or evaluation failure reported by an evaluator.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EvalError(pub String);

/// Evaluates textual expressions against a context mapping.
pub trait ExpressionEvaluator: Send + Sync {
    fn evaluate(
        &self,
        expression: &str,
        context: &IndexMap<String, JsonValue>,
    ) -> std::result::Result<JsonValue, EvalError>;
}

/// Default evaluator backed by the tera template engine.
///
/// The expression is rendered one-off as `{{ <expression> }}`; tera's
/// expression grammar covers arithmetic, comparisons, variable lookup and
/// filters, which is enough for computed delays.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateEvaluator;

impl ExpressionEvaluator for TemplateEvaluator {
    fn evaluate(
        &self,
        expression: &str,
        context: &IndexMap<String, JsonValue>,
    ) -> std::result::Result<JsonValue, EvalError> {
        let mut ctx = tera::Context::new();
        for (key, value) in context {
            ctx.insert(key.as_str(), value);
        }

        let rendered = tera::Tera::one_off(&format!("{{{{ {} }}}}", expression), &ctx, false)
            .map_err(|e| EvalError(flatten_error(e)))?;

        Ok(parse_scalar(&rendered))
    }
}

/// tera nests the useful message in the error source chain.
fn flatten_error(err: tera::Error) -> String {
    use std::error::Error as _;

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

/// Rendered output comes back as text; recover the scalar kind.
fn parse_scalar(rendered: &str) -> JsonValue {
    let trimmed = rendered.trim();

    if let Ok(int) = trimmed.parse::<i64>() {
        return JsonValue::from(int);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        return JsonValue::from(float);
    }
    match trimmed {
        "true" => JsonValue::Bool(true),
        "false" => JsonValue::Bool(false),
        other => JsonValue::String(other.to_string()),
    }
}
