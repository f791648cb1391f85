//! Fragment builders.
//!
//! Every builder prunes instead of failing: empty operands are dropped from
//! joins, [`Undefined`](crate::Undefined) arguments drop their clause, and a
//! builder with nothing left to say returns the empty fragment.

use crate::dialect::{InOp, LikeOp};
use crate::error::{SqlError, SqlResult};
use crate::expr::FieldRef;
use crate::fragment::Sql;
use crate::part::{Interpolation, Part, Template};
use crate::value::{Arg, Value};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::sync::Arc;

/// Either a fragment or a raw template; the input of [`sql`].
#[derive(Debug, Clone)]
pub enum AnySql {
    Sql(Sql),
    Template(Template),
}

impl From<Sql> for AnySql {
    fn from(sql: Sql) -> Self {
        AnySql::Sql(sql)
    }
}

impl From<&Sql> for AnySql {
    fn from(sql: &Sql) -> Self {
        AnySql::Sql(sql.clone())
    }
}

impl From<Template> for AnySql {
    fn from(template: Template) -> Self {
        AnySql::Template(template)
    }
}

impl From<&Template> for AnySql {
    fn from(template: &Template) -> Self {
        AnySql::Template(template.clone())
    }
}

/// A literal fragment. Never binds a parameter.
///
/// The text is trusted SQL; it is emitted verbatim.
pub fn text(text: impl Into<Cow<'static, str>>) -> Sql {
    Sql::new([Part::text(text)])
}

/// Turn a template into a fragment.
///
/// A fragment passes through unchanged. A template that interpolates
/// [`Undefined`](crate::Undefined) at its top level becomes the empty
/// fragment as a whole, so an optional filter can be written as one template:
///
/// ```
/// use sqlfrag::{not_none, sql, t};
///
/// let name: Option<&str> = None;
/// assert!(sql(t!("name = ", {not_none(name)})).is_empty());
/// ```
///
/// Nested fragments are not inspected.
pub fn sql(template: impl Into<AnySql>) -> Sql {
    match template.into() {
        AnySql::Sql(sql) => sql,
        AnySql::Template(template) => {
            let cancelled = template
                .parts()
                .iter()
                .any(|part| matches!(part, Part::Interpolation(Interpolation::Undefined)));
            if cancelled {
                Sql::empty()
            } else {
                Sql::new(template.into_parts())
            }
        }
    }
}

/// Join the non-empty `fragments` with `sep`.
///
/// No operands gives the empty fragment. A single operand is emitted after
/// `prefix` without `wrap`; two or more are wrapped.
pub fn join<I>(
    sep: impl Into<Cow<'static, str>>,
    fragments: I,
    wrap: Option<(&'static str, &'static str)>,
    prefix: impl Into<Cow<'static, str>>,
) -> Sql
where
    I: IntoIterator,
    I::Item: Into<Sql>,
{
    let children: Vec<Sql> = fragments
        .into_iter()
        .map(Into::<Sql>::into)
        .filter(|f| !f.is_empty())
        .collect();
    match children.len() {
        0 => Sql::empty(),
        1 => Sql::compound(prefix, sep, children, None),
        _ => Sql::compound(prefix, sep, children, wrap),
    }
}

/// `(a AND b AND ...)` over the non-empty operands.
///
/// ```
/// use sqlfrag::{and, text, Sql};
///
/// assert!(and([Sql::empty(), Sql::empty()]).is_empty());
/// assert_eq!(and([text("a"), Sql::empty()]).split().unwrap().0, "a");
/// assert_eq!(and([text("a"), text("b")]).split().unwrap().0, "(a AND b)");
/// ```
pub fn and<I>(fragments: I) -> Sql
where
    I: IntoIterator,
    I::Item: Into<Sql>,
{
    join(" AND ", fragments, Some(("(", ")")), "")
}

/// `(a OR b OR ...)` over the non-empty operands.
pub fn or<I>(fragments: I) -> Sql
where
    I: IntoIterator,
    I::Item: Into<Sql>,
{
    join(" OR ", fragments, Some(("(", ")")), "")
}

/// `NOT fragment`; empty stays empty.
pub fn not(fragment: impl Into<Sql>) -> Sql {
    fragment.into().not()
}

/// Ordered `field = value` pairs for [`where_eq`], [`assign`], [`set`] and
/// [`values`].
///
/// Setting a field twice replaces its value but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    entries: IndexMap<String, Arg>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Arg>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arg)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Defined pairs only.
    fn defined(self) -> impl Iterator<Item = (String, Value)> {
        self.entries
            .into_iter()
            .filter_map(|(name, arg)| arg.into_value().map(|v| (name, v)))
    }
}

impl<K: Into<String>, V: Into<Arg>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

fn eq_clause(name: String, value: Value) -> Sql {
    if value.is_null() {
        return text(format!("{name} IS NULL"));
    }
    Sql::new([Part::text(format!("{name} = ")), Part::interpolation(value)])
}

/// `WHERE c1 AND c2 AND f1 = ? AND f2 IS NULL ...`
///
/// Conditions are taken as fragments (templates go through [`sql`]); each
/// defined field becomes an equality, or `IS NULL` for a null value. The
/// predicate list is never parenthesized, and an empty list gives the empty
/// fragment.
///
/// ```
/// use sqlfrag::{where_clause, text, Fields, Undefined, Value};
///
/// let q = where_clause(
///     [text("enabled")],
///     Fields::new().field("some", Undefined).field("owner", Value::Null),
/// );
/// assert_eq!(q.split().unwrap().0, "WHERE enabled AND owner IS NULL");
/// ```
pub fn where_clause<I>(conditions: I, fields: Fields) -> Sql
where
    I: IntoIterator,
    I::Item: Into<Sql>,
{
    let conds = conditions.into_iter().map(Into::<Sql>::into);
    let eqs = fields.defined().map(|(name, value)| eq_clause(name, value));
    join(" AND ", conds.chain(eqs), None, "WHERE ")
}

/// [`where_clause`] with field equalities only.
pub fn where_eq(fields: Fields) -> Sql {
    where_clause(std::iter::empty::<Sql>(), fields)
}

/// `(c1, c2) VALUES (?, ?), (?, ?)`.
///
/// Columns come from the first row, in insertion order. Later rows are read
/// by those names; a column missing from a later row renders as an
/// undefined value and fails at render time. No rows is an error.
pub fn values<I>(rows: I) -> SqlResult<Sql>
where
    I: IntoIterator<Item = Fields>,
{
    let rows: Vec<Fields> = rows.into_iter().collect();
    let Some(first) = rows.first() else {
        return Err(SqlError::validation("VALUES requires at least one row"));
    };
    let names: Vec<String> = first.names().map(str::to_string).collect();
    Ok(Sql::new(values_parts(&names, &rows)))
}

fn values_parts(names: &[String], rows: &[Fields]) -> Vec<Part> {
    let mut parts = vec![Part::text(format!("({}) VALUES ", names.join(", ")))];
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            parts.push(Part::text(", "));
        }
        parts.push(Part::text("("));
        for (j, name) in names.iter().enumerate() {
            if j > 0 {
                parts.push(Part::text(", "));
            }
            let arg = row.get(name).cloned().unwrap_or(Arg::Undefined);
            parts.push(Part::interpolation(arg));
        }
        parts.push(Part::text(")"));
    }
    parts
}

/// Single-row [`values`]. An empty row gives the empty fragment.
///
/// ```
/// use sqlfrag::{values_row, Fields, Value};
///
/// let q = values_row(Fields::new().field("boo", 10).field("foo", Value::Null));
/// let (sql, params) = q.split().unwrap();
/// assert_eq!(sql, "(boo, foo) VALUES (?, ?)");
/// assert_eq!(params, vec![Value::Int(10), Value::Null]);
/// ```
pub fn values_row(row: Fields) -> Sql {
    if row.is_empty() {
        return Sql::empty();
    }
    let names: Vec<String> = row.names().map(str::to_string).collect();
    Sql::new(values_parts(&names, std::slice::from_ref(&row)))
}

/// `f1 = ?, f2 = ?` over the defined fields.
pub fn assign(fields: Fields) -> Sql {
    let pairs = fields
        .defined()
        .map(|(name, value)| Sql::new([Part::text(format!("{name} = ")), Part::interpolation(value)]));
    join(", ", pairs, None, "")
}

/// `SET f1 = ?, f2 = ?`.
///
/// The `SET ` keyword is kept even when every field is undefined.
pub fn set(fields: Fields) -> Sql {
    Sql::new([Part::text("SET "), Part::interpolation(assign(fields))])
}

fn range(field: FieldRef, lop: &'static str, left: Arg, rop: &'static str, right: Arg) -> Sql {
    let bound = |op: &'static str, arg: Arg| match arg.into_value() {
        Some(value) if !value.is_null() => {
            Sql::new([field.to_part(), Part::text(op), Part::interpolation(value)])
        }
        _ => Sql::empty(),
    };
    and([bound(lop, left), bound(rop, right)])
}

/// Half-open range: `field >= left AND field < right`.
///
/// A null or undefined bound leaves that side open.
///
/// ```
/// use sqlfrag::{in_range, Value};
///
/// let (sql, params) = in_range("col", 10, 20).split().unwrap();
/// assert_eq!(sql, "(col >= ? AND col < ?)");
/// assert_eq!(params, vec![Value::Int(10), Value::Int(20)]);
///
/// assert_eq!(in_range("col", 10, Value::Null).split().unwrap().0, "col >= ?");
/// ```
pub fn in_range(field: impl Into<FieldRef>, left: impl Into<Arg>, right: impl Into<Arg>) -> Sql {
    range(field.into(), " >= ", left.into(), " < ", right.into())
}

/// Closed range: `field >= left AND field <= right`.
pub fn in_crange(field: impl Into<FieldRef>, left: impl Into<Arg>, right: impl Into<Arg>) -> Sql {
    range(field.into(), " >= ", left.into(), " <= ", right.into())
}

/// Membership test, rendered by the active dialect.
///
/// A list value is the collection; null is an empty collection and any
/// other value a single element. Undefined gives the empty fragment.
pub fn is_in(field: impl Into<FieldRef>, values: impl Into<Arg>) -> Sql {
    let Some(value) = values.into().into_value() else {
        return Sql::empty();
    };
    let items = match value {
        Value::List(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };
    op_fragment(InOp::new(field, items))
}

/// `field LIKE pattern`, with `value` escaped and substituted for `{}` in
/// `template`.
///
/// Braces follow format-string escaping: `{{` and `}}` stand for literal
/// braces, and only the first `{}` receives the value.
///
/// ```
/// use sqlfrag::{like, Value};
///
/// let (sql, params) = like("tag", "{}%", "my_tag").split().unwrap();
/// assert_eq!(sql, "tag LIKE ?");
/// assert_eq!(params, vec![Value::from(r"my\_tag%")]);
/// ```
pub fn like(field: impl Into<FieldRef>, template: &str, value: impl Into<Arg>) -> Sql {
    like_with_op(field, template, value, "LIKE")
}

/// Case-insensitive [`like`].
pub fn ilike(field: impl Into<FieldRef>, template: &str, value: impl Into<Arg>) -> Sql {
    like_with_op(field, template, value, "ILIKE")
}

/// [`like`] with an explicit operator keyword.
pub fn like_with_op(
    field: impl Into<FieldRef>,
    template: &str,
    value: impl Into<Arg>,
    op: &str,
) -> Sql {
    match value.into().into_value() {
        Some(value) => op_fragment(LikeOp::new(field, template, value, op)),
        None => Sql::empty(),
    }
}

fn op_fragment(op: impl crate::dialect::DialectOp + 'static) -> Sql {
    Sql::new([Part::Interpolation(Interpolation::Op(Arc::new(op)))])
}
