//! Example: a search endpoint whose filters are all optional.
//!
//! Run with:
//!   cargo run --example dynamic_filters -p sqlfrag

use sqlfrag::{
    Fields, ParamStyle, RenderConfig, Renderer, SqlResult, cond, expr, in_range, not_none, or,
    set, sql, t, truthy, where_clause, where_eq,
};

#[derive(Debug, Default)]
struct Filters {
    status: Option<String>,
    search: Option<String>,
    roles_any_of: Vec<String>,
    created_from: Option<String>,
    created_to: Option<String>,
    include_deleted: bool,
    limit: Option<i64>,
}

fn list_users(filters: &Filters) -> sqlfrag::Sql {
    let search = filters.search.as_deref();
    let filter = where_clause(
        [
            or([
                expr("name").ilike("%{}%", not_none(search)),
                expr("email").ilike("%{}%", not_none(search)),
            ]),
            expr("role").is_in(truthy(filters.roles_any_of.clone())),
            in_range("created_at", filters.created_from.clone(), filters.created_to.clone()),
            expr("deleted_at").eq(cond(!filters.include_deleted, None::<String>)),
        ],
        Fields::new().field("status", not_none(filters.status.clone())),
    );
    let limit = sql(t!(" LIMIT ", {not_none(filters.limit)}));

    sql(t!("SELECT id, name, status FROM users ", {filter}, " ORDER BY id", {limit}))
}

fn main() -> SqlResult<()> {
    let renderer = Renderer::new(RenderConfig::new().with_param_style(ParamStyle::Dollar))?;

    let all = list_users(&Filters::default());
    let out = renderer.render(&all)?;
    println!("{}\n  params: {:?}\n", out.sql, out.params.values());

    let narrowed = list_users(&Filters {
        status: Some("active".into()),
        search: Some("ann_".into()),
        roles_any_of: vec!["admin".into(), "owner".into()],
        created_from: Some("2024-01-01".into()),
        include_deleted: true,
        limit: Some(20),
        ..Filters::default()
    });
    let out = renderer.render(&narrowed)?;
    println!("{}\n  params: {:?}\n", out.sql, out.params.values());

    let update = sql(t!(
        "UPDATE users ",
        {set(Fields::new().field("status", "disabled").field("note", not_none(None::<String>)))},
        " ",
        {where_eq(Fields::new().field("id", 42))}
    ));
    let out = renderer.render(&update)?;
    println!("{}\n  params: {:?}", out.sql, out.params.values());

    Ok(())
}
