use super::*;
use crate::builder::{and, is_in, like, sql, text, where_clause, where_eq, Fields};
use crate::dialect::{GenericDialect, PostgresDialect, SqliteDialect};
use crate::expr::expr;
use crate::params::NamedParams;
use crate::t;
use crate::value::Undefined;

fn sample() -> Sql {
    let filter = where_clause([expr("a").gt(1)], Fields::new().field("b", "x"));
    sql(t!("SELECT * FROM t ", {filter}, " LIMIT ", {10}))
}

#[test]
fn renders_depth_first_left_to_right() {
    let (text, params) = render_qmark(&sample(), &GenericDialect).unwrap();
    assert_eq!(text, "SELECT * FROM t WHERE a > ? AND b = ? LIMIT ?");
    assert_eq!(params, vec![Value::Int(1), Value::from("x"), Value::Int(10)]);
}

#[test]
fn rendering_is_repeatable() {
    let q = sample();
    let first = render(&q, PositionalParams::dollar(), &GenericDialect).unwrap();
    let second = render(&q, PositionalParams::dollar(), &GenericDialect).unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_style_shares_the_skeleton() {
    let q = and([expr("a").eq(1), expr("b").eq(2)]);
    let cases = [
        (ParamStyle::Qmark, "(a = ? AND b = ?)"),
        (ParamStyle::Numeric, "(a = :1 AND b = :2)"),
        (ParamStyle::Dollar, "(a = $1 AND b = $2)"),
        (ParamStyle::Format, "(a = %s AND b = %s)"),
        (ParamStyle::Named, "(a = :p0 AND b = :p1)"),
        (ParamStyle::PyFormat, "(a = %(p0)s AND b = %(p1)s)"),
    ];
    for (style, expected) in cases {
        let (text, params) = render_as(&q, style, &GenericDialect).unwrap();
        assert_eq!(text, expected, "{style}");
        assert_eq!(params.values(), vec![&Value::Int(1), &Value::Int(2)]);
    }
}

#[test]
fn named_sink_keys_follow_compile_order() {
    let (_, params) = render(&sample(), NamedParams::named(), &GenericDialect).unwrap();
    let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["p0", "p1", "p2"]);
    assert_eq!(params.get("p2"), Some(&Value::Int(10)));
}

#[test]
fn empty_fragment_renders_nothing() {
    let (text, params) = render_qmark(&Sql::empty(), &GenericDialect).unwrap();
    assert_eq!(text, "");
    assert!(params.is_empty());
}

#[test]
fn text_only_binds_nothing() {
    let (_, params) = render_qmark(&text("SELECT 1"), &GenericDialect).unwrap();
    assert!(params.is_empty());
}

#[test]
fn raw_template_renders_without_cancellation() {
    let template = t!("a = ", {1});
    let (text, params) = render_qmark(&template, &GenericDialect).unwrap();
    assert_eq!(text, "a = ?");
    assert_eq!(params, vec![Value::Int(1)]);

    let err = render_qmark(&t!("a = ", {Undefined}), &GenericDialect).unwrap_err();
    assert!(err.is_undefined_value());
}

#[test]
fn nested_templates_render_inline() {
    let inner = t!("x = ", {5});
    let q = sql(Template::new().text("WHERE ").value(inner));
    assert_eq!(q.split().unwrap(), ("WHERE x = ?".into(), vec![Value::Int(5)]));
}

#[test]
fn dialect_ops_share_the_sink() {
    let q = and([expr("a").eq(1), is_in("b", vec![2, 3]), like("c", "{}%", "d")]);
    let (text, params) = render(&q, PositionalParams::numeric(), &SqliteDialect::new()).unwrap();
    assert_eq!(text, "(a = :1 AND b IN (:2, :3) AND c LIKE :4)");
    assert_eq!(
        params.into_values(),
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::from("d%")]
    );
}

#[test]
fn fragment_field_renders_into_the_same_sink() {
    let field = sql(t!("lower(", {"X"}, ")"));
    let q = is_in(field, vec!["a", "b"]);
    let (text, params) = render(&q, PositionalParams::dollar(), &PostgresDialect).unwrap();
    assert_eq!(text, "lower($1) = ANY($2)");
    assert_eq!(params.len(), 2);
}

#[test]
fn errors_propagate_out_of_nested_fragments() {
    let q = and([text("ok"), like("tag", "{}", 5)]);
    let err = render_qmark(&q, &GenericDialect).unwrap_err();
    assert_eq!(err, SqlError::invalid_type("int"));
}

#[test]
fn renderer_uses_configured_style_and_dialect() {
    let config = RenderConfig::new()
        .with_param_style(ParamStyle::Dollar)
        .with_dialect(crate::config::DialectConfig::Postgres);
    let renderer = Renderer::new(config).unwrap();
    assert_eq!(renderer.dialect().name(), "postgres");

    let out = renderer
        .render(&where_eq(Fields::new().field("id", vec![1, 2])))
        .unwrap();
    assert_eq!(out.sql, "WHERE id = $1");
    assert_eq!(out.params.style(), ParamStyle::Dollar);

    let out = renderer.render(&is_in("id", vec![1, 2])).unwrap();
    assert_eq!(out.into_parts().0, "id = ANY($1)");
}

#[test]
fn renderer_rejects_invalid_config() {
    let config = RenderConfig::new()
        .with_dialect(crate::config::DialectConfig::Sqlite { in_max_values: 0 });
    assert!(Renderer::new(config).is_err());
}

#[test]
fn renderer_dialect_override() {
    let renderer = Renderer::default().with_dialect(Arc::new(SqliteDialect::new()));
    let out = renderer.render(&is_in("id", Vec::<i32>::new())).unwrap();
    assert_eq!(out.sql, "0");
    assert!(format!("{renderer:?}").contains("sqlite"));
}

#[cfg(feature = "tracing")]
#[test]
fn renderer_logging_does_not_change_output() {
    let renderer = Renderer::new(
        RenderConfig::new()
            .with_sql_logging(true)
            .with_max_logged_sql_length(Some(4)),
    )
    .unwrap();
    let out = renderer.render(&sample()).unwrap();
    assert_eq!(out.sql, "SELECT * FROM t WHERE a > ? AND b = ? LIMIT ?");
}
