//! Column expressions and field references.

use crate::builder;
use crate::fragment::Sql;
use crate::part::{Part, Template};
use crate::value::{Arg, Value};

/// A column or dotted path used as the left-hand side of a predicate.
///
/// ```
/// use sqlfrag::{expr, Value};
///
/// let users = expr("users");
/// let (sql, params) = users.field("age").ge(18).split().unwrap();
/// assert_eq!(sql, "users.age >= ?");
/// assert_eq!(params, vec![Value::from(18)]);
///
/// assert_eq!(expr("deleted_at").eq(None::<i64>).split().unwrap().0, "deleted_at IS NULL");
/// ```
#[derive(Debug, Clone)]
pub struct Expr {
    name: String,
}

/// Shorthand for [`Expr::new`].
pub fn expr(name: impl Into<String>) -> Expr {
    Expr::new(name)
}

impl Expr {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// `self.name`
    pub fn field(&self, name: &str) -> Expr {
        if self.name.is_empty() {
            return Expr::new(name);
        }
        Expr::new(format!("{}.{name}", self.name))
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn lt(&self, value: impl Into<Arg>) -> Sql {
        self.op2("<", value.into())
    }

    pub fn le(&self, value: impl Into<Arg>) -> Sql {
        self.op2("<=", value.into())
    }

    pub fn gt(&self, value: impl Into<Arg>) -> Sql {
        self.op2(">", value.into())
    }

    pub fn ge(&self, value: impl Into<Arg>) -> Sql {
        self.op2(">=", value.into())
    }

    /// `name = ?`, or `name IS NULL` for a null value.
    pub fn eq(&self, value: impl Into<Arg>) -> Sql {
        match value.into() {
            Arg::Value(Value::Null) => self.is_null(),
            arg => self.op2("=", arg),
        }
    }

    /// `name != ?`, or `name IS NOT NULL` for a null value.
    pub fn ne(&self, value: impl Into<Arg>) -> Sql {
        match value.into() {
            Arg::Value(Value::Null) => self.is_not_null(),
            arg => self.op2("!=", arg),
        }
    }

    pub fn is_null(&self) -> Sql {
        builder::text(format!("{} IS NULL", self.name))
    }

    pub fn is_not_null(&self) -> Sql {
        builder::text(format!("{} IS NOT NULL", self.name))
    }

    /// `NOT name`, for boolean columns.
    pub fn not(&self) -> Sql {
        builder::text(format!("NOT {}", self.name))
    }

    pub fn is_in(&self, values: impl Into<Arg>) -> Sql {
        builder::is_in(self, values)
    }

    pub fn like(&self, template: &str, value: impl Into<Arg>) -> Sql {
        builder::like(self, template, value)
    }

    pub fn ilike(&self, template: &str, value: impl Into<Arg>) -> Sql {
        builder::ilike(self, template, value)
    }

    fn op2(&self, op: &str, value: Arg) -> Sql {
        match value {
            Arg::Undefined => Sql::empty(),
            Arg::Value(v) => Sql::new([
                Part::text(format!("{} {op} ", self.name)),
                Part::interpolation(v),
            ]),
        }
    }
}

/// Left-hand side of a predicate: a trusted column name, an [`Expr`], or a
/// fragment rendered in place.
///
/// Names are emitted verbatim and never escaped; do not build them from
/// untrusted input.
#[derive(Debug, Clone)]
pub enum FieldRef {
    Name(String),
    Expr(Expr),
    Sql(Sql),
}

impl FieldRef {
    /// The field as a part: names become literal text, fragments are
    /// interpolated.
    pub fn to_part(&self) -> Part {
        match self {
            FieldRef::Name(name) => Part::text(name.clone()),
            FieldRef::Expr(expr) => Part::text(expr.as_str().to_string()),
            FieldRef::Sql(sql) => Part::interpolation(sql),
        }
    }
}

impl From<&str> for FieldRef {
    fn from(name: &str) -> Self {
        FieldRef::Name(name.to_string())
    }
}

impl From<String> for FieldRef {
    fn from(name: String) -> Self {
        FieldRef::Name(name)
    }
}

impl From<Expr> for FieldRef {
    fn from(expr: Expr) -> Self {
        FieldRef::Expr(expr)
    }
}

impl From<&Expr> for FieldRef {
    fn from(expr: &Expr) -> Self {
        FieldRef::Expr(expr.clone())
    }
}

impl From<Sql> for FieldRef {
    fn from(sql: Sql) -> Self {
        FieldRef::Sql(sql)
    }
}

impl From<&Sql> for FieldRef {
    fn from(sql: &Sql) -> Self {
        FieldRef::Sql(sql.clone())
    }
}

impl From<Template> for FieldRef {
    fn from(template: Template) -> Self {
        FieldRef::Sql(builder::sql(template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Undefined, not_none};

    #[test]
    fn dotted_paths() {
        let e = Expr::new("t").field("a").field("b");
        assert_eq!(e.as_str(), "t.a.b");
        assert_eq!(Expr::new("").field("x").as_str(), "x");
    }

    #[test]
    fn comparisons_bind_one_value() {
        let e = expr("field");
        let cases = [
            (e.lt(10), "field < ?"),
            (e.le(10), "field <= ?"),
            (e.gt(10), "field > ?"),
            (e.ge(10), "field >= ?"),
            (e.eq(10), "field = ?"),
            (e.ne(10), "field != ?"),
        ];
        for (sql, expected) in cases {
            let (s, params) = sql.split().unwrap();
            assert_eq!(s, expected);
            assert_eq!(params, vec![Value::Int(10)]);
        }
    }

    #[test]
    fn null_comparisons_use_is_null() {
        let e = expr("field");
        assert_eq!(e.eq(Value::Null).split().unwrap(), ("field IS NULL".into(), vec![]));
        assert_eq!(
            e.ne(None::<i32>).split().unwrap(),
            ("field IS NOT NULL".into(), vec![])
        );
    }

    #[test]
    fn undefined_comparisons_are_empty() {
        let e = expr("field");
        assert!(e.lt(Undefined).is_empty());
        assert!(e.eq(not_none(None::<i32>)).is_empty());
        assert!(e.ne(Undefined).is_empty());
    }

    #[test]
    fn negation() {
        assert_eq!(expr("enabled").not().split().unwrap().0, "NOT enabled");
    }

    #[test]
    fn field_ref_parts() {
        assert!(matches!(FieldRef::from("a").to_part(), Part::Text(s) if s == "a"));
        assert!(matches!(FieldRef::from(expr("b")).to_part(), Part::Text(s) if s == "b"));
        assert!(matches!(
            FieldRef::from(builder::text("c")).to_part(),
            Part::Interpolation(_)
        ));
    }
}
