use super::{Dialect, InOp};
use crate::error::SqlResult;
use crate::render::RenderContext;
use crate::value::Value;

/// PostgreSQL rendering: `IN` becomes `= ANY($n)` with the whole collection
/// bound as one array parameter, so the statement text does not change with
/// the number of elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn render_in(&self, op: &InOp, cx: &mut RenderContext<'_>) -> SqlResult<String> {
        if op.values().is_empty() {
            return Ok(self.false_literal().to_string());
        }
        let field = cx.render_field(op.field())?;
        let placeholder = cx.compile(Value::List(op.values().to_vec()));
        Ok(format!("{field} = ANY({placeholder})"))
    }
}
