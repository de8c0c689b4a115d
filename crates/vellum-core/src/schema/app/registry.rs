use super::{columns, Attribute, Builder, Component, ContentType};
use crate::{
    schema::db::{self, Column, ColumnArg, ColumnType, ForeignKey, Index, IndexKind},
    Error, Result,
};

use indexmap::IndexMap;

/// Every content type and component known to the application.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub(super) content_types: IndexMap<String, ContentType>,
    pub(super) components: IndexMap<String, Component>,
}

impl Registry {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn content_type(&self, uid: &str) -> Result<&ContentType> {
        self.content_types
            .get(uid)
            .ok_or_else(|| Error::invalid_schema(format!("unknown content type `{uid}`")))
    }

    pub fn component(&self, uid: &str) -> Result<&Component> {
        self.components
            .get(uid)
            .ok_or_else(|| Error::invalid_schema(format!("unknown component `{uid}`")))
    }

    pub fn content_types(&self) -> impl ExactSizeIterator<Item = &ContentType> {
        self.content_types.values()
    }

    pub fn components(&self) -> impl ExactSizeIterator<Item = &Component> {
        self.components.values()
    }

    /// Tables required to store every registered content type and component,
    /// including join tables.
    pub fn db_schema(&self) -> db::Schema {
        let mut tables = vec![];

        for content_type in self.content_types() {
            let mut table = db::Table::new(&content_type.table);
            table.columns.push(id_column());
            table.columns.push(
                Column::new(columns::DOCUMENT_ID, ColumnType::String)
                    .arg(ColumnArg::Int(255))
                    .not_null(),
            );
            table.columns.push(
                Column::new(columns::LOCALE, ColumnType::String).arg(ColumnArg::Int(255)),
            );
            for name in [columns::PUBLISHED_AT, columns::CREATED_AT, columns::UPDATED_AT] {
                table.columns.push(
                    Column::new(name, ColumnType::Datetime)
                        .arg(ColumnArg::temporal(Some(false), 6)),
                );
            }
            push_scalar_columns(&mut table, &content_type.attributes);

            table.indexes.push(primary_key(&content_type.table));
            table.indexes.push(Index::new(
                format!("{}_documents_idx", content_type.table),
                [columns::DOCUMENT_ID, columns::LOCALE, columns::PUBLISHED_AT],
                IndexKind::Secondary,
            ));
            tables.push(table);

            if content_type.has_components() {
                tables.push(join_table(&content_type.table));
            }
        }

        for component in self.components() {
            let mut table = db::Table::new(&component.table);
            table.columns.push(id_column());
            push_scalar_columns(&mut table, &component.attributes);
            table.indexes.push(primary_key(&component.table));
            tables.push(table);

            if component.has_components() {
                tables.push(join_table(&component.table));
            }
        }

        db::Schema { tables }
    }
}

fn id_column() -> Column {
    Column::new(columns::ID, ColumnType::Integer).not_null()
}

fn primary_key(table: &str) -> Index {
    Index::new(format!("{table}_pkey"), [columns::ID], IndexKind::Primary)
}

fn push_scalar_columns(table: &mut db::Table, attributes: &IndexMap<String, Attribute>) {
    for scalar in attributes.values().filter_map(Attribute::as_scalar) {
        let (ty, args) = scalar.ty.column_type();
        let mut column = Column::new(&scalar.column, ty);
        column.args = args;
        table.columns.push(column);
    }
}

fn join_table(owner: &str) -> db::Table {
    let name = super::join_table_name(owner);
    let mut table = db::Table::new(&name);

    table.columns.push(id_column());
    table
        .columns
        .push(Column::new(columns::ENTITY_ID, ColumnType::Integer).not_null());
    table
        .columns
        .push(Column::new(columns::CMP_ID, ColumnType::Integer).not_null());
    for name in [columns::COMPONENT_TYPE, columns::FIELD] {
        table.columns.push(
            Column::new(name, ColumnType::String)
                .arg(ColumnArg::Int(255))
                .not_null(),
        );
    }
    table
        .columns
        .push(Column::new(columns::ORDER, ColumnType::Integer).not_null());

    table.indexes.push(primary_key(&name));
    table.indexes.push(Index::new(
        format!("{name}_entity_idx"),
        [columns::ENTITY_ID],
        IndexKind::Secondary,
    ));
    table.indexes.push(Index::new(
        format!("{name}_component_idx"),
        [columns::CMP_ID, columns::COMPONENT_TYPE],
        IndexKind::Secondary,
    ));
    table.foreign_keys.push(ForeignKey {
        name: format!("{name}_entity_fk"),
        columns: vec![columns::ENTITY_ID.to_string()],
        referenced_table: owner.to_string(),
        referenced_columns: vec![columns::ID.to_string()],
        on_update: db::ReferentialAction::NoAction,
        on_delete: db::ReferentialAction::Cascade,
    });

    table
}
