//! Rendering: flatten a fragment tree into SQL text plus bound parameters.
//!
//! The walk is depth-first and left-to-right. Literal text is copied, nested
//! fragments and templates are rendered inline, dialect operations are handed
//! to the active [`Dialect`], and every other value is compiled through the
//! [`ParamSink`]. Fragments are only read, so the same fragment can be
//! rendered any number of times with fresh sinks.

use crate::config::RenderConfig;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::expr::FieldRef;
use crate::fragment::Sql;
use crate::params::{ParamSink, ParamStyle, Params, PositionalParams};
use crate::part::{Interpolation, Part, Template};
use crate::value::Value;
use std::sync::Arc;

/// Something with a parts sequence the renderer can walk.
pub trait Render {
    fn render_into(&self, cx: &mut RenderContext<'_>, out: &mut String) -> SqlResult<()>;
}

impl Render for Sql {
    fn render_into(&self, cx: &mut RenderContext<'_>, out: &mut String) -> SqlResult<()> {
        cx.walk(self.parts(), out)
    }
}

/// Renders the template as-is; unlike [`sql`](crate::sql), an undefined
/// interpolation is an error here rather than a cancellation.
impl Render for Template {
    fn render_into(&self, cx: &mut RenderContext<'_>, out: &mut String) -> SqlResult<()> {
        cx.walk(self.parts().iter(), out)
    }
}

/// Sink and dialect for one render call.
///
/// Dialect callbacks receive the context so they can compile values and
/// render nested field expressions into the same sink.
pub struct RenderContext<'a> {
    sink: &'a mut dyn ParamSink,
    dialect: &'a dyn Dialect,
}

impl<'a> RenderContext<'a> {
    pub fn new(sink: &'a mut dyn ParamSink, dialect: &'a dyn Dialect) -> Self {
        Self { sink, dialect }
    }

    /// The active dialect.
    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Bind `value` and return its placeholder.
    pub fn compile(&mut self, value: Value) -> String {
        self.sink.compile(value)
    }

    /// Render a nested fragment to a string, binding its values into this
    /// context's sink.
    pub fn render_nested(&mut self, fragment: &dyn Render) -> SqlResult<String> {
        let mut out = String::new();
        fragment.render_into(self, &mut out)?;
        Ok(out)
    }

    /// Left-hand side text for a field reference.
    pub fn render_field(&mut self, field: &FieldRef) -> SqlResult<String> {
        match field {
            FieldRef::Name(name) => Ok(name.clone()),
            FieldRef::Expr(expr) => Ok(expr.as_str().to_string()),
            FieldRef::Sql(sql) => self.render_nested(sql),
        }
    }

    fn walk<'p>(&mut self, parts: impl Iterator<Item = &'p Part>, out: &mut String) -> SqlResult<()> {
        for part in parts {
            match part {
                Part::Text(text) => out.push_str(text),
                Part::Interpolation(Interpolation::Sql(sql)) => self.walk(sql.parts(), out)?,
                Part::Interpolation(Interpolation::Template(t)) => self.walk(t.parts().iter(), out)?,
                Part::Interpolation(Interpolation::Op(op)) => {
                    let dialect = self.dialect;
                    let rendered = match dialect.render_op(op.method(), &**op, self) {
                        Some(rendered) => rendered?,
                        None => op.to_sql(self)?,
                    };
                    out.push_str(&rendered);
                }
                Part::Interpolation(Interpolation::Value(value)) => {
                    let placeholder = self.sink.compile(value.clone());
                    out.push_str(&placeholder);
                }
                Part::Interpolation(Interpolation::Undefined) => return Err(SqlError::UndefinedValue),
            }
        }
        Ok(())
    }
}

/// Render `fragment` into `sink` using `dialect`, returning the SQL text and
/// the filled sink.
///
/// ```
/// use sqlfrag::{and, render, text, t, GenericDialect, PositionalParams, Value};
///
/// let q = and([text("active"), t!("age > ", {18}).into()]);
/// let (sql, params) = render(&q, PositionalParams::dollar(), &GenericDialect).unwrap();
/// assert_eq!(sql, "(active AND age > $1)");
/// assert_eq!(params.values(), &[Value::Int(18)]);
/// ```
pub fn render<R, S>(fragment: &R, mut sink: S, dialect: &dyn Dialect) -> SqlResult<(String, S)>
where
    R: Render + ?Sized,
    S: ParamSink,
{
    let mut out = String::new();
    {
        let mut cx = RenderContext::new(&mut sink, dialect);
        fragment.render_into(&mut cx, &mut out)?;
    }
    Ok((out, sink))
}

/// Render with a `?` sink and the given dialect.
pub fn render_qmark<R>(fragment: &R, dialect: &dyn Dialect) -> SqlResult<(String, Vec<Value>)>
where
    R: Render + ?Sized,
{
    let (sql, params) = render(fragment, PositionalParams::qmark(), dialect)?;
    Ok((sql, params.into_values()))
}

/// Render with a sink picked at runtime.
pub fn render_as<R>(fragment: &R, style: ParamStyle, dialect: &dyn Dialect) -> SqlResult<(String, Params)>
where
    R: Render + ?Sized,
{
    render(fragment, Params::new(style), dialect)
}

/// Rendered SQL text with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub params: Params,
}

impl Rendered {
    pub fn into_parts(self) -> (String, Params) {
        (self.sql, self.params)
    }
}

/// A configured renderer: parameter style, dialect and SQL logging.
///
/// ```
/// use sqlfrag::{where_eq, Fields, ParamStyle, RenderConfig, Renderer};
///
/// let renderer = Renderer::new(RenderConfig::new().with_param_style(ParamStyle::Numeric)).unwrap();
/// let out = renderer.render(&where_eq(Fields::new().field("id", 7))).unwrap();
/// assert_eq!(out.sql, "WHERE id = :1");
/// ```
#[derive(Clone)]
pub struct Renderer {
    config: RenderConfig,
    dialect: Arc<dyn Dialect>,
    #[cfg(feature = "tracing")]
    log: Option<crate::logging::TracingSqlLog>,
}

impl Renderer {
    /// Validate `config` and build its dialect.
    pub fn new(config: RenderConfig) -> SqlResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: RenderConfig) -> Self {
        let dialect = config.dialect.build();
        #[cfg(feature = "tracing")]
        let log = config.log_sql.then(|| {
            let log = crate::logging::TracingSqlLog::new();
            match config.max_logged_sql_length {
                Some(len) => log.max_sql_length(len),
                None => log.no_truncate(),
            }
        });
        Self {
            config,
            dialect,
            #[cfg(feature = "tracing")]
            log,
        }
    }

    /// Use a custom dialect instead of the one named in the config.
    pub fn with_dialect(mut self, dialect: Arc<dyn Dialect>) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn dialect(&self) -> &dyn Dialect {
        &*self.dialect
    }

    pub fn render<R: Render + ?Sized>(&self, fragment: &R) -> SqlResult<Rendered> {
        let (sql, params) = render_as(fragment, self.config.param_style, &*self.dialect)?;
        #[cfg(feature = "tracing")]
        if let Some(log) = &self.log {
            log.emit(&sql, params.len(), params.style(), self.dialect.name());
        }
        Ok(Rendered { sql, params })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_valid(RenderConfig::default())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("dialect", &self.dialect.name())
            .finish()
    }
}

#[cfg(test)]
mod tests;
