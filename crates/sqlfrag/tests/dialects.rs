use sqlfrag::{
    Dialect, DialectOp, GenericDialect, InOp, Interpolation, Part, PositionalParams, PostgresDialect,
    RenderContext, Sql, SqlError, SqlResult, SqliteDialect, Value, and, expr, ilike, is_in, like,
    render, sqlite_escape, sqlite_value_list,
};
use std::any::Any;
use std::sync::Arc;

#[test]
fn membership_per_dialect() {
    let q = is_in("id", vec![1, 2]);

    let (text, params) = GenericDialect.render_sql(&q).unwrap();
    assert_eq!(text, "id IN ?");
    assert_eq!(params, vec![Value::from(vec![1, 2])]);

    let (text, params) = PostgresDialect.render_sql(&q).unwrap();
    assert_eq!(text, "id = ANY(?)");
    assert_eq!(params, vec![Value::from(vec![1, 2])]);

    let (text, params) = SqliteDialect::new().render_sql(&q).unwrap();
    assert_eq!(text, "id IN (?, ?)");
    assert_eq!(params, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn empty_membership_is_false_literal() {
    let q = is_in("id", Vec::<i32>::new());
    assert_eq!(GenericDialect.render_sql(&q).unwrap().0, "FALSE");
    assert_eq!(PostgresDialect.render_sql(&q).unwrap().0, "FALSE");
    assert_eq!(SqliteDialect::new().render_sql(&q).unwrap().0, "0");
}

#[test]
fn sqlite_inlines_long_lists() {
    let dialect = SqliteDialect::new().with_in_max_values(3);
    let q = expr("val").is_in(vec![Value::from(1), Value::from("boo"), Value::from("bar"), Value::from("foo")]);
    assert_eq!(
        dialect.render_sql(&q).unwrap(),
        ("val IN (1,'boo','bar','foo')".into(), vec![])
    );

    let q = expr("val").is_in(vec![Value::Bool(true), Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert_eq!(dialect.render_sql(&q).unwrap_err(), SqlError::invalid_type("bool"));
}

#[test]
fn sqlite_default_limit_is_ten() {
    let ten: Vec<i64> = (0..10).collect();
    let eleven: Vec<i64> = (0..11).collect();
    let (_, params) = SqliteDialect::new().render_sql(&is_in("n", ten)).unwrap();
    assert_eq!(params.len(), 10);
    let (text, params) = SqliteDialect::new().render_sql(&is_in("n", eleven)).unwrap();
    assert_eq!(text, "n IN (0,1,2,3,4,5,6,7,8,9,10)");
    assert!(params.is_empty());
}

#[test]
fn sqlite_escaping() {
    assert_eq!(sqlite_escape(&Value::from("O'Brien")).unwrap(), "'O''Brien'");
    assert_eq!(
        sqlite_value_list(&[Value::Int(1), Value::Float(0.5), Value::from("a")]).unwrap(),
        "1,0.5,'a'"
    );
    assert!(sqlite_escape(&Value::Null).is_err());
}

#[test]
fn like_patterns() {
    let (text, params) = GenericDialect.render_sql(&like("field", "{}%", "my_tag")).unwrap();
    assert_eq!(text, "field LIKE ?");
    assert_eq!(params, vec![Value::from(r"my\_tag%")]);

    let (text, params) = SqliteDialect::new().render_sql(&ilike("f", "%{}", r"a\b")).unwrap();
    assert_eq!(text, "f ILIKE ?");
    assert_eq!(params, vec![Value::from(r"%a\\b")]);
}

struct MysqlLike;

impl Dialect for MysqlLike {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn false_literal(&self) -> &str {
        "0=1"
    }

    fn like_escape(&self) -> char {
        '|'
    }
}

#[test]
fn custom_dialect_via_trait_defaults() {
    let q = and([is_in("a", Vec::<i32>::new()), like("b", "{}%", "x|y_")]);
    let (text, params) = MysqlLike.render_sql(&q).unwrap();
    assert_eq!(text, "(0=1 AND b LIKE ?)");
    assert_eq!(params, vec![Value::from("x||y|_%")]);
}

/// `json_contains(field, value)` unless the dialect claims the tag.
struct JsonContains {
    field: String,
    value: Value,
}

impl DialectOp for JsonContains {
    fn method(&self) -> &'static str {
        "JSON_CONTAINS"
    }

    fn to_sql(&self, cx: &mut RenderContext<'_>) -> SqlResult<String> {
        let placeholder = cx.compile(self.value.clone());
        Ok(format!("json_contains({}, {placeholder})", self.field))
    }
}

/// PostgreSQL with `@>` for JSON containment.
struct JsonbDialect;

impl Dialect for JsonbDialect {
    fn name(&self) -> &'static str {
        "jsonb"
    }

    fn render_in(&self, op: &InOp, cx: &mut RenderContext<'_>) -> SqlResult<String> {
        PostgresDialect.render_in(op, cx)
    }

    fn render_op(
        &self,
        method: &'static str,
        op: &dyn DialectOp,
        cx: &mut RenderContext<'_>,
    ) -> Option<SqlResult<String>> {
        match method {
            "JSON_CONTAINS" => {
                let op = (op as &dyn Any).downcast_ref::<JsonContains>()?;
                let placeholder = cx.compile(op.value.clone());
                Some(Ok(format!("{} @> {placeholder}", op.field)))
            }
            _ => None,
        }
    }
}

#[test]
fn new_operation_kinds_plug_into_the_renderer() {
    let op = JsonContains {
        field: "doc".into(),
        value: Value::Json(serde_json::json!({"a": 1})),
    };
    let q = and([
        expr("id").eq(1),
        Sql::new([Part::Interpolation(Interpolation::Op(Arc::new(op)))]),
    ]);

    let (text, params) = render(&q, PositionalParams::dollar(), &JsonbDialect).unwrap();
    assert_eq!(text, "(id = $1 AND doc @> $2)");
    assert_eq!(params.len(), 2);

    let (text, _) = JsonbDialect.render_sql(&and([is_in("id", vec![1]), q.clone()])).unwrap();
    assert_eq!(text, "(id = ANY(?) AND (id = ? AND doc @> ?))");

    let (text, _) = GenericDialect.render_sql(&q).unwrap();
    assert_eq!(text, "(id = ? AND json_contains(doc, ?))");
}
