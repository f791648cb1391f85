//! Parameter sinks.
//!
//! A sink turns each bound value into placeholder text and records the value
//! so the caller can hand both to a driver. One sink serves one render call.

use crate::error::SqlError;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Accumulates bound values and produces their placeholders.
pub trait ParamSink {
    /// Record `value` and return the placeholder text for it.
    fn compile(&mut self, value: Value) -> String;
}

impl<S: ParamSink + ?Sized> ParamSink for &mut S {
    fn compile(&mut self, value: Value) -> String {
        (**self).compile(value)
    }
}

/// Placeholder style, named after the DB-API `paramstyle` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamStyle {
    /// `?`
    #[default]
    Qmark,
    /// `:1, :2, ...`
    Numeric,
    /// `$1, $2, ...`
    Dollar,
    /// `%s`
    Format,
    /// `:p0, :p1, ...`
    Named,
    /// `%(p0)s, %(p1)s, ...`
    PyFormat,
}

impl ParamStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamStyle::Qmark => "qmark",
            ParamStyle::Numeric => "numeric",
            ParamStyle::Dollar => "dollar",
            ParamStyle::Format => "format",
            ParamStyle::Named => "named",
            ParamStyle::PyFormat => "pyformat",
        }
    }

    /// Whether values are stored under synthesized keys.
    pub fn is_named(&self) -> bool {
        matches!(self, ParamStyle::Named | ParamStyle::PyFormat)
    }
}

impl fmt::Display for ParamStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamStyle {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qmark" => Ok(ParamStyle::Qmark),
            "numeric" => Ok(ParamStyle::Numeric),
            "dollar" => Ok(ParamStyle::Dollar),
            "format" => Ok(ParamStyle::Format),
            "named" => Ok(ParamStyle::Named),
            "pyformat" => Ok(ParamStyle::PyFormat),
            other => Err(SqlError::InvalidParamStyle(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PositionalStyle {
    Qmark,
    Numeric,
    Dollar,
    Format,
}

/// Append-only sink; placeholders depend only on position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalParams {
    style: PositionalStyle,
    values: Vec<Value>,
}

impl PositionalParams {
    fn with_style(style: PositionalStyle) -> Self {
        Self {
            style,
            values: Vec::new(),
        }
    }

    /// `?` placeholders.
    pub fn qmark() -> Self {
        Self::with_style(PositionalStyle::Qmark)
    }

    /// `:1, :2, ...` placeholders.
    pub fn numeric() -> Self {
        Self::with_style(PositionalStyle::Numeric)
    }

    /// `$1, $2, ...` placeholders.
    pub fn dollar() -> Self {
        Self::with_style(PositionalStyle::Dollar)
    }

    /// `%s` placeholders.
    pub fn format() -> Self {
        Self::with_style(PositionalStyle::Format)
    }

    pub fn style(&self) -> ParamStyle {
        match self.style {
            PositionalStyle::Qmark => ParamStyle::Qmark,
            PositionalStyle::Numeric => ParamStyle::Numeric,
            PositionalStyle::Dollar => ParamStyle::Dollar,
            PositionalStyle::Format => ParamStyle::Format,
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for PositionalParams {
    fn default() -> Self {
        Self::qmark()
    }
}

impl ParamSink for PositionalParams {
    fn compile(&mut self, value: Value) -> String {
        self.values.push(value);
        match self.style {
            PositionalStyle::Qmark => "?".to_string(),
            PositionalStyle::Numeric => format!(":{}", self.values.len()),
            PositionalStyle::Dollar => format!("${}", self.values.len()),
            PositionalStyle::Format => "%s".to_string(),
        }
    }
}

impl Serialize for PositionalParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamedStyle {
    Named,
    PyFormat,
}

/// Keyed sink; values are stored under `p0, p1, ...` in compile order.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParams {
    style: NamedStyle,
    values: IndexMap<String, Value>,
    next: usize,
}

impl NamedParams {
    fn with_style(style: NamedStyle) -> Self {
        Self {
            style,
            values: IndexMap::new(),
            next: 0,
        }
    }

    /// `:p0` placeholders.
    pub fn named() -> Self {
        Self::with_style(NamedStyle::Named)
    }

    /// `%(p0)s` placeholders.
    pub fn pyformat() -> Self {
        Self::with_style(NamedStyle::PyFormat)
    }

    pub fn style(&self) -> ParamStyle {
        match self.style {
            NamedStyle::Named => ParamStyle::Named,
            NamedStyle::PyFormat => ParamStyle::PyFormat,
        }
    }

    /// Store `value` under a fresh key and return the key.
    pub fn add(&mut self, value: Value) -> String {
        let name = format!("p{}", self.next);
        self.next += 1;
        self.values.insert(name.clone(), value);
        name
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_map(self) -> IndexMap<String, Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ParamSink for NamedParams {
    fn compile(&mut self, value: Value) -> String {
        let name = self.add(value);
        match self.style {
            NamedStyle::Named => format!(":{name}"),
            NamedStyle::PyFormat => format!("%({name})s"),
        }
    }
}

impl Serialize for NamedParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

/// A sink chosen at runtime from a [`ParamStyle`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Params {
    Positional(PositionalParams),
    Named(NamedParams),
}

impl Params {
    pub fn new(style: ParamStyle) -> Self {
        match style {
            ParamStyle::Qmark => Params::Positional(PositionalParams::qmark()),
            ParamStyle::Numeric => Params::Positional(PositionalParams::numeric()),
            ParamStyle::Dollar => Params::Positional(PositionalParams::dollar()),
            ParamStyle::Format => Params::Positional(PositionalParams::format()),
            ParamStyle::Named => Params::Named(NamedParams::named()),
            ParamStyle::PyFormat => Params::Named(NamedParams::pyformat()),
        }
    }

    pub fn style(&self) -> ParamStyle {
        match self {
            Params::Positional(p) => p.style(),
            Params::Named(p) => p.style(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Params::Positional(p) => p.len(),
            Params::Named(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_positional(&self) -> Option<&PositionalParams> {
        match self {
            Params::Positional(p) => Some(p),
            Params::Named(_) => None,
        }
    }

    pub fn as_named(&self) -> Option<&NamedParams> {
        match self {
            Params::Named(p) => Some(p),
            Params::Positional(_) => None,
        }
    }

    /// Bound values in compile order, whatever the storage shape.
    pub fn values(&self) -> Vec<&Value> {
        match self {
            Params::Positional(p) => p.values().iter().collect(),
            Params::Named(p) => p.iter().map(|(_, v)| v).collect(),
        }
    }
}

impl ParamSink for Params {
    fn compile(&mut self, value: Value) -> String {
        match self {
            Params::Positional(p) => p.compile(value),
            Params::Named(p) => p.compile(value),
        }
    }
}
