//! Convenient imports for typical `sqlfrag` usage.
//!
//! ```
//! use sqlfrag::prelude::*;
//!
//! let q = sql(t!("SELECT * FROM t ", {where_eq(Fields::new().field("id", 1))}));
//! assert_eq!(q.split().unwrap().0, "SELECT * FROM t WHERE id = ?");
//! ```

pub use crate::{
    Arg, Fields, Sql, SqlError, SqlResult, Template, Undefined, Value, and, cond, expr, not_none,
    or, sql, t, text, truthy, where_clause, where_eq,
};

pub use crate::{Dialect, GenericDialect, PostgresDialect, SqliteDialect};
pub use crate::{ParamStyle, RenderConfig, Renderer};
