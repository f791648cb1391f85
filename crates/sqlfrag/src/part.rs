//! Parts sequences: literal text interleaved with interpolated payloads.
//!
//! A [`Template`] is the already-segmented input produced by whatever
//! front end captured the query text (a macro, a parser, hand-written code).
//! The core only iterates it; it never re-parses text.

use crate::dialect::DialectOp;
use crate::fragment::Sql;
use crate::value::{Arg, Undefined, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// One piece of a parts sequence.
#[derive(Debug, Clone)]
pub enum Part {
    /// Literal SQL text, emitted verbatim.
    Text(Cow<'static, str>),
    /// An embedded payload, resolved at render time.
    Interpolation(Interpolation),
}

impl Part {
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Part::Text(text.into())
    }

    pub fn interpolation(value: impl Into<Interpolation>) -> Self {
        Part::Interpolation(value.into())
    }
}

/// The payload of an interpolated part.
///
/// The renderer matches on this exhaustively:
/// - `Sql` / `Template` render inline, recursively
/// - `Op` is handed to the active dialect
/// - `Value` is compiled through the parameter sink
/// - `Undefined` is an error if it survives until rendering
#[derive(Clone)]
pub enum Interpolation {
    Sql(Sql),
    Template(Template),
    Op(Arc<dyn DialectOp>),
    Value(Value),
    Undefined,
}

impl Interpolation {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Interpolation::Undefined)
    }
}

impl fmt::Debug for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpolation::Sql(sql) => f.debug_tuple("Sql").field(sql).finish(),
            Interpolation::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Interpolation::Op(op) => f.debug_tuple("Op").field(&op.method()).finish(),
            Interpolation::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Interpolation::Undefined => f.write_str("Undefined"),
        }
    }
}

impl From<Sql> for Interpolation {
    fn from(sql: Sql) -> Self {
        Interpolation::Sql(sql)
    }
}

impl From<&Sql> for Interpolation {
    fn from(sql: &Sql) -> Self {
        Interpolation::Sql(sql.clone())
    }
}

impl From<Template> for Interpolation {
    fn from(template: Template) -> Self {
        Interpolation::Template(template)
    }
}

impl From<Value> for Interpolation {
    fn from(value: Value) -> Self {
        Interpolation::Value(value)
    }
}

impl From<Undefined> for Interpolation {
    fn from(_: Undefined) -> Self {
        Interpolation::Undefined
    }
}

impl From<Arg> for Interpolation {
    fn from(arg: Arg) -> Self {
        match arg {
            Arg::Undefined => Interpolation::Undefined,
            Arg::Value(v) => Interpolation::Value(v),
        }
    }
}

/// An ordered, already-segmented parts sequence.
///
/// ```
/// use sqlfrag::{sql, text, Template, Value};
///
/// let t = Template::new()
///     .text("SELECT * FROM ")
///     .sql(text("users"))
///     .text(" WHERE id = ")
///     .value(10);
/// let (s, params) = sql(t).split().unwrap();
/// assert_eq!(s, "SELECT * FROM users WHERE id = ?");
/// assert_eq!(params, vec![Value::from(10)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Template {
    parts: Vec<Part>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text.
    pub fn text(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.parts.push(Part::text(text));
        self
    }

    /// Append an interpolated value (or any other payload).
    pub fn value(mut self, value: impl Into<Interpolation>) -> Self {
        self.parts.push(Part::interpolation(value));
        self
    }

    /// Append a builder argument; an undefined argument cancels the template
    /// once it goes through [`sql`](crate::sql).
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.parts.push(Part::Interpolation(arg.into().into()));
        self
    }

    /// Append a nested fragment.
    pub fn sql(mut self, sql: impl Into<Sql>) -> Self {
        self.parts.push(Part::Interpolation(Interpolation::Sql(sql.into())));
        self
    }

    pub fn push(&mut self, part: Part) -> &mut Self {
        self.parts.push(part);
        self
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }
}

impl FromIterator<Part> for Template {
    fn from_iter<I: IntoIterator<Item = Part>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Template {
    type Item = &'a Part;
    type IntoIter = std::slice::Iter<'a, Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

/// Build a [`Template`] from literal strings and `{expr}` interpolations.
///
/// ```
/// use sqlfrag::{sql, t, text, Value};
///
/// let id = 42;
/// let table = text("users");
/// let q = sql(t!("SELECT * FROM ", {table}, " WHERE id = ", {id}));
/// let (s, params) = q.split().unwrap();
/// assert_eq!(s, "SELECT * FROM users WHERE id = ?");
/// assert_eq!(params, vec![Value::from(42)]);
/// ```
///
/// Bare expressions are rejected, so a plain string can never slip into
/// the SQL text unmarked:
///
/// ```compile_fail
/// let name = String::from("x");
/// let _ = sqlfrag::t!("SELECT ", name);
/// ```
#[macro_export]
macro_rules! t {
    () => {
        $crate::Template::new()
    };
    ($($item:tt),+ $(,)?) => {{
        let mut template = $crate::Template::new();
        $( $crate::__t_part!(template, $item); )+
        template
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __t_part {
    ($template:ident, { $value:expr }) => {
        $template.push($crate::Part::Interpolation($crate::Interpolation::from($value)));
    };
    ($template:ident, $text:literal) => {
        $template.push($crate::Part::text($text));
    };
}
