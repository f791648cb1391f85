//! `tracing` output for rendered statements.
//!
//! Enable via the crate feature: `sqlfrag = { features = ["tracing"] }`, then
//! turn it on per renderer with [`RenderConfig::with_sql_logging`](crate::RenderConfig::with_sql_logging).

use crate::params::ParamStyle;
use tracing::Level;

/// Emits one event per rendered statement under the `sqlfrag.sql` target.
#[derive(Debug, Clone)]
pub struct TracingSqlLog {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes, on a char boundary). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingSqlLog {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl TracingSqlLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level of the per-statement event; `DEBUG` by default.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Cut the logged statement text after `len` bytes and mark it with `...`.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Log rendered statements in full, however long.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn display_sql<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_on_char_boundary(sql, max)).into(),
            _ => sql.into(),
        }
    }

    /// Record one rendered statement. Parameter values are never logged, only their count.
    pub fn emit(&self, sql: &str, param_count: usize, param_style: ParamStyle, dialect: &str) {
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = self.display_sql(sql);
        emit_at_level!(
            self.level,
            target: "sqlfrag.sql",
            param_count,
            param_style = %param_style,
            dialect,
            sql = %sql,
        );
    }
}

fn truncate_on_char_boundary(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
