//! Example: one fragment, three dialects, six placeholder styles.
//!
//! Run with:
//!   cargo run --example dialects -p sqlfrag
//!   cargo run --example dialects -p sqlfrag --features tracing

use sqlfrag::{
    DialectConfig, ParamStyle, RenderConfig, Renderer, SqlResult, and, expr, like, sql, t,
};

fn main() -> SqlResult<()> {
    let ids: Vec<i64> = (1..=12).collect();
    let q = sql(t!(
        "SELECT * FROM items WHERE ",
        {and([expr("id").is_in(ids), like("title", "{}%", "50%_off")])}
    ));

    for dialect in ["generic", "postgres", "sqlite"] {
        let config = RenderConfig::new()
            .with_dialect(dialect.parse::<DialectConfig>()?)
            .with_sql_logging(true);
        let out = Renderer::new(config)?.render(&q)?;
        println!("[{dialect}] {}\n  params: {}", out.sql, out.params.len());
    }

    let small = expr("id").is_in(vec![1, 2]);
    for style in ["qmark", "numeric", "dollar", "format", "named", "pyformat"] {
        let style: ParamStyle = style.parse()?;
        let config = RenderConfig::new()
            .with_param_style(style)
            .with_dialect(DialectConfig::sqlite());
        let out = Renderer::new(config)?.render(&small)?;
        let params = serde_json::to_string(&out.params).unwrap_or_default();
        println!("[{style}] {}  {params}", out.sql);
    }

    Ok(())
}
