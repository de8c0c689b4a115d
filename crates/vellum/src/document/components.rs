//! Writing, copying and reading component rows owned through join tables.
//!
//! Component trees are walked with explicit queues: one entry per owner row
//! whose components still need handling.

use super::input::ComponentInput;
use crate::{Db, Result};

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use vellum_core::{
    err,
    schema::app::{columns, ContentType},
    stmt::{Expr, Insert, OrderBy, Row, Select},
};

/// Inserts `row` and returns it as stored.
pub(super) async fn insert_row(db: &Db, table: &str, row: Row) -> Result<Row> {
    let mut rows = db.exec(Insert::new(table, row)).await?.into_values()?;

    match rows.pop() {
        Some(row) => Ok(row),
        None => Err(err!("insert returned no row; table={table}")),
    }
}

/// Inserts `components` under the owner row `owner_id`, nested components
/// included.
pub(super) async fn insert_components(
    db: &Db,
    join_table: String,
    owner_id: i64,
    components: Vec<ComponentInput>,
) -> Result<()> {
    let registry = db.registry();
    let mut queue = VecDeque::from([(join_table, owner_id, components)]);

    while let Some((join_table, owner_id, components)) = queue.pop_front() {
        for ComponentInput {
            field,
            component,
            order,
            input,
        } in components
        {
            let target = registry.component(&component)?;

            let row = insert_row(db, &target.table, input.scalars).await?;
            let cmp_id = row.get_i64(columns::ID)?;

            let link = Row::new()
                .with(columns::ENTITY_ID, owner_id)
                .with(columns::CMP_ID, cmp_id)
                .with(columns::COMPONENT_TYPE, component)
                .with(columns::FIELD, field)
                .with(columns::ORDER, order);
            insert_row(db, &join_table, link).await?;

            if !input.components.is_empty() {
                queue.push_back((target.join_table(), cmp_id, input.components));
            }
        }
    }

    Ok(())
}

/// Copies a version row and its whole component tree. The copy gets new ids
/// everywhere, so it shares no component rows with the source.
pub(super) async fn copy_version(
    db: &Db,
    content_type: &ContentType,
    source: &Row,
    published_at: Option<DateTime<Utc>>,
) -> Result<Row> {
    let source_id = source.get_i64(columns::ID)?;

    let mut row = source.clone();
    row.remove(columns::ID);
    row.insert(columns::PUBLISHED_AT, published_at);
    row.insert(columns::UPDATED_AT, Utc::now());

    let copy = insert_row(db, &content_type.table, row).await?;

    if content_type.has_components() {
        copy_components(
            db,
            content_type.join_table(),
            source_id,
            copy.get_i64(columns::ID)?,
        )
        .await?;
    }

    Ok(copy)
}

async fn copy_components(db: &Db, join_table: String, source_id: i64, target_id: i64) -> Result<()> {
    let registry = db.registry();
    let mut queue = VecDeque::from([(join_table, source_id, target_id)]);

    while let Some((join_table, source_id, target_id)) = queue.pop_front() {
        let links = db
            .query(
                Select::new(&join_table, Expr::eq(columns::ENTITY_ID, source_id))
                    .order_by(OrderBy::asc(columns::ID)),
            )
            .await?;

        for mut link in links {
            let component = registry.component(&link.get_string(columns::COMPONENT_TYPE)?)?;
            let cmp_id = link.get_i64(columns::CMP_ID)?;

            let Some(mut row) = db
                .query(Select::new(&component.table, Expr::eq(columns::ID, cmp_id)).limit(1))
                .await?
                .pop()
            else {
                return Err(err!(
                    "dangling component reference; table={}; id={cmp_id}",
                    component.table
                ));
            };

            row.remove(columns::ID);
            let copy_id = insert_row(db, &component.table, row).await?.get_i64(columns::ID)?;

            link.remove(columns::ID);
            link.insert(columns::ENTITY_ID, target_id);
            link.insert(columns::CMP_ID, copy_id);
            insert_row(db, &join_table, link).await?;

            if component.has_components() {
                queue.push_back((component.join_table(), cmp_id, copy_id));
            }
        }
    }

    Ok(())
}

/// Join rows of the given version ids, in insertion order.
pub(super) async fn join_rows(db: &Db, content_type: &ContentType, ids: &[i64]) -> Result<Vec<Row>> {
    if !content_type.has_components() || ids.is_empty() {
        return Ok(vec![]);
    }

    db.query(
        Select::new(
            content_type.join_table(),
            Expr::in_list(columns::ENTITY_ID, ids.iter().copied()),
        )
        .order_by(OrderBy::asc(columns::ID)),
    )
    .await
}
