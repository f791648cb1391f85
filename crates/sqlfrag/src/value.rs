//! Bound values and the undefined marker.
//!
//! [`Value`] is what ends up in a parameter sink. [`Arg`] is what builder
//! functions accept: either a value or the [`Undefined`] marker, which means
//! "no input, omit this clause". `Undefined` is a separate type
//! from [`Value::Null`]: `Null` binds SQL `NULL` (or renders `IS NULL`),
//! `Undefined` never reaches the SQL text.

use crate::part::Interpolation;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;

/// A SQL parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    Uuid(uuid::Uuid),
    Timestamp(DateTime<Utc>),
    /// A collection bound as a single parameter (driver-side array binding).
    List(Vec<Value>),
}

impl Value {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Json(_) => "json",
            Value::Uuid(_) => "uuid",
            Value::Timestamp(_) => "timestamp",
            Value::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness as used by [`truthy`]: null, `false`, zero and empty
    /// text/bytes/lists are falsy. JSON values follow the same rule, with
    /// empty objects falsy as well.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::Json(j) => json_truthy(j),
            Value::Uuid(_) | Value::Timestamp(_) => true,
            Value::List(items) => !items.is_empty(),
        }
    }

    /// Create a binary value.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(data.into())
    }

    /// View this value as a collection: a list yields its items, null yields
    /// nothing and any other value is a one-element collection.
    pub fn as_items(&self) -> &[Value] {
        match self {
            Value::List(items) => items,
            Value::Null => &[],
            other => std::slice::from_ref(other),
        }
    }
}

/// Marker for "no value supplied".
///
/// Builder functions drop clauses whose argument is `Undefined`, and
/// [`sql`](crate::sql) cancels a whole template that interpolates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Undefined;

/// A builder argument: a value, or the undefined marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Undefined,
    Value(Value),
}

impl Arg {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Arg::Undefined)
    }

    /// The bound value, or `None` when undefined.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Arg::Undefined => None,
            Arg::Value(v) => Some(v),
        }
    }
}

impl From<Undefined> for Arg {
    fn from(_: Undefined) -> Self {
        Arg::Undefined
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => |$v:ident| $conv:expr;)*) => {
        $(
            impl From<$ty> for Value {
                fn from($v: $ty) -> Self {
                    $conv
                }
            }

            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Value(Value::from(v))
                }
            }

            impl From<$ty> for Interpolation {
                fn from(v: $ty) -> Self {
                    Interpolation::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => |v| Value::Bool(v);
    i8 => |v| Value::Int(i64::from(v));
    i16 => |v| Value::Int(i64::from(v));
    i32 => |v| Value::Int(i64::from(v));
    i64 => |v| Value::Int(v);
    u8 => |v| Value::Int(i64::from(v));
    u16 => |v| Value::Int(i64::from(v));
    u32 => |v| Value::Int(i64::from(v));
    f32 => |v| Value::Float(f64::from(v));
    f64 => |v| Value::Float(v);
    String => |v| Value::Text(v);
    &str => |v| Value::Text(v.to_string());
    &String => |v| Value::Text(v.clone());
    Cow<'_, str> => |v| Value::Text(v.into_owned());
    &[u8] => |v| Value::Bytes(v.to_vec());
    serde_json::Value => |v| Value::Json(v);
    uuid::Uuid => |v| Value::Uuid(v);
    DateTime<Utc> => |v| Value::Timestamp(v);
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        Arg::Value(Value::from(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Arg {
    fn from(v: Vec<T>) -> Self {
        Arg::Value(Value::from(v))
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Arg {
    fn from(v: [T; N]) -> Self {
        Arg::Value(Value::from(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Interpolation {
    fn from(v: Option<T>) -> Self {
        Interpolation::Value(Value::from(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Interpolation {
    fn from(v: Vec<T>) -> Self {
        Interpolation::Value(Value::from(v))
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Interpolation {
    fn from(v: [T; N]) -> Self {
        Interpolation::Value(Value::from(v))
    }
}

/// `None` becomes [`Undefined`], so the clause using it is omitted.
///
/// ```
/// use sqlfrag::{not_none, where_eq, Fields};
///
/// let status: Option<&str> = None;
/// let q = where_eq(Fields::new().field("status", not_none(status)));
/// assert!(q.is_empty());
/// ```
pub fn not_none<T: Into<Value>>(value: Option<T>) -> Arg {
    match value {
        Some(v) => Arg::Value(v.into()),
        None => Arg::Undefined,
    }
}

fn json_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value as Json;
    match value {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Json::String(s) => !s.is_empty(),
        Json::Array(items) => !items.is_empty(),
        Json::Object(map) => !map.is_empty(),
    }
}

/// Falsy values (see [`Value::is_truthy`]) become [`Undefined`].
pub fn truthy(value: impl Into<Value>) -> Arg {
    let value = value.into();
    if value.is_truthy() {
        Arg::Value(value)
    } else {
        Arg::Undefined
    }
}

/// `value` when `flag` holds, [`Undefined`] otherwise.
pub fn cond(flag: bool, value: impl Into<Value>) -> Arg {
    if flag {
        Arg::Value(value.into())
    } else {
        Arg::Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(5)), Value::Int(5));
        assert_eq!(Arg::from(None::<&str>), Arg::Value(Value::Null));
    }

    #[test]
    fn collections_become_lists() {
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(Value::from(["a"]), Value::List(vec![Value::Text("a".into())]));
    }

    #[test]
    fn not_none_distinguishes_undefined_from_null() {
        assert!(not_none(None::<i32>).is_undefined());
        assert_eq!(not_none(Some(1)), Arg::Value(Value::Int(1)));
        assert_eq!(Arg::from(Value::Null), Arg::Value(Value::Null));
    }

    #[test]
    fn truthy_drops_falsy_values() {
        assert!(truthy(0).is_undefined());
        assert!(truthy("").is_undefined());
        assert!(truthy(None::<i32>).is_undefined());
        assert!(truthy(Vec::<i32>::new()).is_undefined());
        assert_eq!(truthy(1), Arg::Value(Value::Int(1)));
        assert!(truthy(serde_json::json!([])).is_undefined());
        assert!(truthy(serde_json::json!("")).is_undefined());
        assert!(truthy(serde_json::json!(0)).is_undefined());
        assert!(truthy(serde_json::json!({})).is_undefined());
        assert!(!truthy(serde_json::json!({"a": 0})).is_undefined());
    }

    #[test]
    fn cond_gates_on_flag() {
        assert!(cond(false, 10).is_undefined());
        assert_eq!(cond(true, 10), Arg::Value(Value::Int(10)));
    }

    #[test]
    fn as_items_views_collections() {
        assert_eq!(Value::Null.as_items(), &[] as &[Value]);
        assert_eq!(Value::Int(3).as_items(), &[Value::Int(3)]);
        assert_eq!(Value::from(vec![1, 2]).as_items().len(), 2);
    }

    #[test]
    fn serializes_untagged() {
        let v = Value::from(vec![Value::Int(1), Value::Null, Value::from("x")]);
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"[1,null,"x"]"#);
    }
}
