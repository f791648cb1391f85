//! The [`Sql`] fragment type.
//!
//! A fragment is an immutable, cheaply clonable tree node. It is either a
//! leaf holding its parts directly, or a compound that joins child fragments
//! with a separator, an optional prefix and an optional wrap pair. Compound
//! parts are generated on iteration, so building one costs nothing beyond
//! storing its children.

use crate::dialect::{Dialect, GenericDialect};
use crate::error::SqlResult;
use crate::params::{ParamSink, PositionalParams};
use crate::part::{Interpolation, Part, Template};
use crate::render::render;
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A composable SQL fragment.
///
/// An empty fragment (no parts) is "falsy": it renders to `""`, binds no
/// parameters and is dropped by [`and`](crate::and), [`or`](crate::or),
/// [`where_clause`](crate::where_clause) and friends.
#[derive(Clone, Default)]
pub struct Sql {
    node: Arc<Node>,
}

#[derive(Debug)]
enum Node {
    Leaf(Vec<Part>),
    Compound(Compound),
}

impl Default for Node {
    fn default() -> Self {
        Node::Leaf(Vec::new())
    }
}

#[derive(Debug)]
struct Compound {
    prefix: Option<Part>,
    sep: Part,
    wrap: Option<(Part, Part)>,
    children: Vec<Part>,
}

impl Sql {
    /// Create a leaf fragment from parts.
    pub fn new(parts: impl IntoIterator<Item = Part>) -> Self {
        Self {
            node: Arc::new(Node::Leaf(parts.into_iter().collect())),
        }
    }

    /// The empty fragment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Join `children` with `sep`, after `prefix` and inside `wrap`.
    ///
    /// The result is never empty, even with no children; callers that need
    /// the pruning rules go through [`join`](crate::builder::join).
    pub(crate) fn compound(
        prefix: impl Into<Cow<'static, str>>,
        sep: impl Into<Cow<'static, str>>,
        children: Vec<Sql>,
        wrap: Option<(&'static str, &'static str)>,
    ) -> Self {
        let prefix = prefix.into();
        let compound = Compound {
            prefix: (!prefix.is_empty()).then(|| Part::Text(prefix)),
            sep: Part::text(sep),
            wrap: wrap.map(|(open, close)| (Part::text(open), Part::text(close))),
            children: children
                .into_iter()
                .map(|child| Part::Interpolation(Interpolation::Sql(child)))
                .collect(),
        };
        Self {
            node: Arc::new(Node::Compound(compound)),
        }
    }

    /// True for a leaf with no parts. Compounds are never empty.
    pub fn is_empty(&self) -> bool {
        match &*self.node {
            Node::Leaf(parts) => parts.is_empty(),
            Node::Compound(_) => false,
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(&*self.node, Node::Compound(_))
    }

    /// Iterate the parts sequence. Can be called any number of times.
    pub fn parts(&self) -> Parts<'_> {
        let inner = match &*self.node {
            Node::Leaf(parts) => PartsInner::Leaf(parts.iter()),
            Node::Compound(compound) => PartsInner::Compound(CompoundParts {
                compound,
                stage: Stage::Prefix,
                next_child: 0,
                sep_emitted: false,
            }),
        };
        Parts { inner }
    }

    /// `(self AND other)`, with the pruning rules of [`and`](crate::and).
    pub fn and(&self, other: impl Into<Sql>) -> Sql {
        crate::builder::and([self.clone(), other.into()])
    }

    /// `(self OR other)`, with the pruning rules of [`or`](crate::or).
    pub fn or(&self, other: impl Into<Sql>) -> Sql {
        crate::builder::or([self.clone(), other.into()])
    }

    /// `NOT self`; negating an empty fragment yields an empty fragment.
    pub fn not(&self) -> Sql {
        if self.is_empty() {
            return Sql::empty();
        }
        Sql::new([Part::text("NOT "), Part::Interpolation(Interpolation::Sql(self.clone()))])
    }

    /// Render with `?` placeholders and the generic dialect.
    pub fn split(&self) -> SqlResult<(String, Vec<Value>)> {
        let (sql, params) = render(self, PositionalParams::qmark(), &GenericDialect)?;
        Ok((sql, params.into_values()))
    }

    /// Render into `sink` with `dialect`.
    pub fn render_with<S: ParamSink>(&self, sink: S, dialect: &dyn Dialect) -> SqlResult<(String, S)> {
        render(self, sink, dialect)
    }

    /// True if both handles point at the same fragment node.
    pub fn ptr_eq(&self, other: &Sql) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl fmt::Debug for Sql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.node {
            Node::Leaf(parts) => f.debug_tuple("Sql").field(parts).finish(),
            Node::Compound(c) => f
                .debug_struct("Compound")
                .field("prefix", &c.prefix)
                .field("sep", &c.sep)
                .field("wrap", &c.wrap)
                .field("children", &c.children)
                .finish(),
        }
    }
}

impl From<&Sql> for Sql {
    fn from(sql: &Sql) -> Self {
        sql.clone()
    }
}

/// Goes through [`sql`](crate::sql): a template interpolating
/// [`Undefined`](crate::Undefined) at the top level becomes empty.
impl From<Template> for Sql {
    fn from(template: Template) -> Self {
        crate::builder::sql(template)
    }
}

impl From<&Template> for Sql {
    fn from(template: &Template) -> Self {
        crate::builder::sql(template.clone())
    }
}

impl std::ops::BitAnd for Sql {
    type Output = Sql;

    fn bitand(self, rhs: Sql) -> Sql {
        crate::builder::and([self, rhs])
    }
}

impl std::ops::BitOr for Sql {
    type Output = Sql;

    fn bitor(self, rhs: Sql) -> Sql {
        crate::builder::or([self, rhs])
    }
}

impl std::ops::Not for Sql {
    type Output = Sql;

    fn not(self) -> Sql {
        Sql::not(&self)
    }
}

/// Iterator over a fragment's parts. See [`Sql::parts`].
pub struct Parts<'a> {
    inner: PartsInner<'a>,
}

enum PartsInner<'a> {
    Leaf(std::slice::Iter<'a, Part>),
    Compound(CompoundParts<'a>),
}

impl<'a> Iterator for Parts<'a> {
    type Item = &'a Part;

    fn next(&mut self) -> Option<&'a Part> {
        match &mut self.inner {
            PartsInner::Leaf(iter) => iter.next(),
            PartsInner::Compound(iter) => iter.next(),
        }
    }
}

#[derive(Clone, Copy)]
enum Stage {
    Prefix,
    Open,
    Children,
    Close,
    Done,
}

struct CompoundParts<'a> {
    compound: &'a Compound,
    stage: Stage,
    next_child: usize,
    sep_emitted: bool,
}

impl<'a> CompoundParts<'a> {
    fn next(&mut self) -> Option<&'a Part> {
        let c = self.compound;
        loop {
            match self.stage {
                Stage::Prefix => {
                    self.stage = Stage::Open;
                    if let Some(prefix) = &c.prefix {
                        return Some(prefix);
                    }
                }
                Stage::Open => {
                    self.stage = Stage::Children;
                    if let Some((open, _)) = &c.wrap {
                        return Some(open);
                    }
                }
                Stage::Children => {
                    let Some(child) = c.children.get(self.next_child) else {
                        self.stage = Stage::Close;
                        continue;
                    };
                    if self.next_child > 0 && !self.sep_emitted {
                        self.sep_emitted = true;
                        return Some(&c.sep);
                    }
                    self.sep_emitted = false;
                    self.next_child += 1;
                    return Some(child);
                }
                Stage::Close => {
                    self.stage = Stage::Done;
                    if let Some((_, close)) = &c.wrap {
                        return Some(close);
                    }
                }
                Stage::Done => return None,
            }
        }
    }
}
