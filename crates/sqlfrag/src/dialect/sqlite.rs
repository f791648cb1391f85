use super::{Dialect, InOp};
use crate::error::{SqlError, SqlResult};
use crate::render::RenderContext;
use crate::value::Value;

/// SQLite rendering.
///
/// SQLite has no array binding, so `IN` binds one placeholder per element.
/// Above `in_max_values` elements the list is inlined as escaped literals to
/// stay clear of the engine's bound-parameter limit.
#[derive(Debug, Clone, Copy)]
pub struct SqliteDialect {
    in_max_values: usize,
}

impl SqliteDialect {
    /// Default element count above which `IN` lists are inlined.
    pub const DEFAULT_IN_MAX_VALUES: usize = 10;

    pub fn new() -> Self {
        Self {
            in_max_values: Self::DEFAULT_IN_MAX_VALUES,
        }
    }

    pub fn with_in_max_values(mut self, in_max_values: usize) -> Self {
        self.in_max_values = in_max_values;
        self
    }

    pub fn in_max_values(&self) -> usize {
        self.in_max_values
    }
}

impl Default for SqliteDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn false_literal(&self) -> &str {
        "0"
    }

    fn render_in(&self, op: &InOp, cx: &mut RenderContext<'_>) -> SqlResult<String> {
        let values = op.values();
        if values.is_empty() {
            return Ok(self.false_literal().to_string());
        }

        let field = cx.render_field(op.field())?;
        if values.len() > self.in_max_values {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "sqlfrag.sql",
                count = values.len(),
                limit = self.in_max_values,
                "inlining IN list"
            );
            return Ok(format!("{field} IN ({})", sqlite_value_list(values)?));
        }

        let marks: Vec<String> = values.iter().map(|v| cx.compile(v.clone())).collect();
        Ok(format!("{field} IN ({})", marks.join(", ")))
    }
}

/// Escape a value as an inline SQLite literal.
///
/// Only text, integers and finite floats are accepted; anything else is an
/// [`SqlError::InvalidType`].
pub fn sqlite_escape(value: &Value) -> SqlResult<String> {
    match value {
        Value::Text(s) => Ok(format!("'{}'", s.replace('\'', "''"))),
        Value::Int(n) => Ok(n.to_string()),
        Value::Float(f) if f.is_finite() => Ok(format!("{f:?}")),
        other => Err(SqlError::invalid_type(other.type_name())),
    }
}

/// Comma-separated inline literals, without surrounding parentheses.
pub fn sqlite_value_list(values: &[Value]) -> SqlResult<String> {
    let escaped = values.iter().map(sqlite_escape).collect::<SqlResult<Vec<_>>>()?;
    Ok(escaped.join(","))
}
