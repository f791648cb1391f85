//! # sqlfrag
//!
//! Composable SQL fragments with out-of-band parameter binding.
//!
//! ## Features
//!
//! - **Values never touch the SQL text**: every interpolated value becomes a placeholder
//! - **Optional filters by construction**: [`Undefined`] arguments drop their clause, and
//!   empty fragments vanish from `AND`/`OR`/`WHERE`
//! - **Pluggable placeholders**: `?`, `:1`, `$1`, `%s`, `:p0`, `%(p0)s`
//! - **Dialects**: engine-specific `IN` and `LIKE` rendering (generic, PostgreSQL, SQLite)
//! - **Cheap sharing**: fragments are immutable, `Send + Sync` and clone in O(1)
//!
//! ## Example
//!
//! ```
//! use sqlfrag::{and, expr, not_none, sql, t, where_clause, Fields, Value};
//!
//! let name: Option<&str> = Some("alice");
//! let min_age: Option<i64> = None;
//!
//! let filter = where_clause(
//!     [
//!         expr("age").ge(not_none(min_age)),
//!         expr("name").like("{}%", not_none(name)),
//!     ],
//!     Fields::new().field("deleted_at", Value::Null),
//! );
//! let q = sql(t!("SELECT * FROM users ", {filter}));
//!
//! let (text, params) = q.split().unwrap();
//! assert_eq!(text, "SELECT * FROM users WHERE name LIKE ? AND deleted_at IS NULL");
//! assert_eq!(params, vec![Value::from("alice%")]);
//! ```

pub mod builder;
pub mod config;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod fragment;
pub mod params;
pub mod part;
pub mod prelude;
pub mod render;
pub mod value;

#[cfg(feature = "tracing")]
pub mod logging;

pub use builder::{
    AnySql, Fields, and, assign, ilike, in_crange, in_range, is_in, join, like, like_with_op, not,
    or, set, sql, text, values, values_row, where_clause, where_eq,
};
pub use config::{DialectConfig, RenderConfig};
pub use dialect::{
    Dialect, DialectOp, GenericDialect, InOp, LikeOp, PostgresDialect, SqliteDialect, like_escape,
    sqlite_escape, sqlite_value_list,
};
pub use error::{SqlError, SqlResult};
pub use expr::{Expr, FieldRef, expr};
pub use fragment::{Parts, Sql};
pub use params::{NamedParams, ParamSink, ParamStyle, Params, PositionalParams};
pub use part::{Interpolation, Part, Template};
pub use render::{Render, RenderContext, Rendered, Renderer, render, render_as, render_qmark};
pub use value::{Arg, Undefined, Value, cond, not_none, truthy};

#[cfg(feature = "tracing")]
pub use logging::TracingSqlLog;
