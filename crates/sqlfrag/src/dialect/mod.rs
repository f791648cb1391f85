//! SQL dialect support.
//!
//! Most of a fragment renders the same everywhere. The pieces that do not
//! (membership tests, pattern matches, the FALSE literal) are stored as
//! [`DialectOp`]s and resolved against the active [`Dialect`] at render time.

mod postgres;
mod sqlite;

pub use postgres::PostgresDialect;
pub use sqlite::{SqliteDialect, sqlite_escape, sqlite_value_list};

use crate::error::{SqlError, SqlResult};
use crate::expr::FieldRef;
use crate::fragment::Sql;
use crate::params::PositionalParams;
use crate::render::{RenderContext, render};
use crate::value::Value;
use std::any::Any;
use std::fmt;

/// A fragment piece whose text depends on the dialect.
///
/// The renderer first offers the operation to [`Dialect::render_op`] under its
/// [`method`](DialectOp::method) tag and falls back to [`DialectOp::to_sql`],
/// so new kinds of operation need no change to the renderer.
pub trait DialectOp: Any + Send + Sync {
    /// Stable tag naming the dialect callback this operation renders through.
    fn method(&self) -> &'static str;

    /// Rendering used when the dialect has no override for [`method`](DialectOp::method).
    fn to_sql(&self, cx: &mut RenderContext<'_>) -> SqlResult<String>;
}

/// Rendering policy for a SQL engine.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Literal rendered for an always-false predicate.
    fn false_literal(&self) -> &str {
        "FALSE"
    }

    /// Escape character for LIKE patterns.
    fn like_escape(&self) -> char {
        '\\'
    }

    /// Characters with special meaning in LIKE patterns.
    fn like_chars(&self) -> &str {
        "%_"
    }

    /// Override for the operation tagged `method`.
    ///
    /// `None` leaves the operation to its own [`DialectOp::to_sql`]. Payloads
    /// of custom operations are reachable by upcasting `op` to `&dyn Any`.
    fn render_op(
        &self,
        _method: &'static str,
        _op: &dyn DialectOp,
        _cx: &mut RenderContext<'_>,
    ) -> Option<SqlResult<String>> {
        None
    }

    /// `field IN ?` with the whole collection bound as one parameter, or the
    /// FALSE literal for an empty collection.
    fn render_in(&self, op: &InOp, cx: &mut RenderContext<'_>) -> SqlResult<String> {
        if op.values().is_empty() {
            return Ok(self.false_literal().to_string());
        }
        let field = cx.render_field(op.field())?;
        let placeholder = cx.compile(Value::List(op.values().to_vec()));
        Ok(format!("{field} IN {placeholder}"))
    }

    /// `field LIKE ?` with the value escaped and substituted into the pattern.
    fn render_like(&self, op: &LikeOp, cx: &mut RenderContext<'_>) -> SqlResult<String> {
        let field = cx.render_field(op.field())?;
        let Value::Text(value) = op.value() else {
            return Err(SqlError::invalid_type(op.value().type_name()));
        };
        let escaped = like_escape(value, self.like_escape(), self.like_chars());
        let pattern = fill_pattern(op.template(), &escaped);
        let placeholder = cx.compile(Value::Text(pattern));
        Ok(format!("{field} {} {placeholder}", op.op()))
    }

    /// Render `sql` with `?` placeholders under this dialect.
    fn render_sql(&self, sql: &Sql) -> SqlResult<(String, Vec<Value>)>
    where
        Self: Sized,
    {
        let (text, params) = render(sql, PositionalParams::qmark(), self)?;
        Ok((text, params.into_values()))
    }
}

/// Dialect with portable defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

/// Membership test: `field IN (...)`.
#[derive(Debug, Clone)]
pub struct InOp {
    field: FieldRef,
    values: Vec<Value>,
}

impl InOp {
    pub fn new(field: impl Into<FieldRef>, values: Vec<Value>) -> Self {
        Self {
            field: field.into(),
            values,
        }
    }

    pub fn field(&self) -> &FieldRef {
        &self.field
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl DialectOp for InOp {
    fn method(&self) -> &'static str {
        "IN"
    }

    fn to_sql(&self, cx: &mut RenderContext<'_>) -> SqlResult<String> {
        cx.dialect().render_in(self, cx)
    }
}

/// Pattern match: `field LIKE pattern` / `field ILIKE pattern`.
///
/// `template` holds a `{}` placeholder that receives the escaped value, for
/// example `{}%` (starts with), `%{}` (ends with) or `%{}%` (contains).
#[derive(Debug, Clone)]
pub struct LikeOp {
    field: FieldRef,
    template: String,
    op: String,
    value: Value,
}

impl LikeOp {
    pub fn new(
        field: impl Into<FieldRef>,
        template: impl Into<String>,
        value: Value,
        op: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            template: template.into(),
            op: op.into(),
            value,
        }
    }

    pub fn field(&self) -> &FieldRef {
        &self.field
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Operator keyword, `LIKE` or `ILIKE`.
    pub fn op(&self) -> &str {
        &self.op
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl DialectOp for LikeOp {
    fn method(&self) -> &'static str {
        "LIKE"
    }

    fn to_sql(&self, cx: &mut RenderContext<'_>) -> SqlResult<String> {
        cx.dialect().render_like(self, cx)
    }
}

impl fmt::Debug for dyn DialectOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DialectOp").field(&self.method()).finish()
    }
}

/// Substitute `value` for the first `{}` in `template`, unescaping `{{` and `}}`.
fn fill_pattern(template: &str, value: &str) -> String {
    let mut out = String::with_capacity(template.len() + value.len());
    let mut filled = false;
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) | ('}', Some('}')) => {
                chars.next();
                out.push(c);
            }
            ('{', Some('}')) if !filled => {
                chars.next();
                out.push_str(value);
                filled = true;
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape LIKE special characters in `value`.
///
/// The escape character itself is doubled first, then each of `chars` is
/// prefixed with it.
///
/// ```
/// assert_eq!(sqlfrag::like_escape("my_tag", '\\', "%_"), r"my\_tag");
/// assert_eq!(sqlfrag::like_escape(r"50%\", '\\', "%_"), r"50\%\\");
/// ```
pub fn like_escape(value: &str, escape: char, chars: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == escape || chars.contains(c) {
            out.push(escape);
        }
        out.push(c);
    }
    out
}
