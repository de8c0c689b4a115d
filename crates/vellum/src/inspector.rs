//! Reads a live database catalog into the portable [`Schema`] description.

mod index_def;
pub use index_def::{IndexDefinitionParser, ParenthesizedColumns};

mod semantic;
pub use semantic::semantic_type;

use crate::Result;

use futures::future::try_join_all;
use std::sync::Arc;
use vellum_core::{
    driver::{Catalog, RawColumn},
    schema::db::{Column, ForeignKey, Index, IndexKind, ReferentialAction, Schema, Table},
    err, Error,
};

/// Tables installed by spatial extensions. They live in the user schema but
/// are never content.
const RESERVED_TABLES: &[&str] = &[
    "geometry_columns",
    "geography_columns",
    "spatial_ref_sys",
    "raster_columns",
    "raster_overviews",
];

#[derive(Debug, Clone)]
pub struct SchemaInspector {
    catalog: Arc<dyn Catalog>,
    index_parser: Arc<dyn IndexDefinitionParser>,
}

impl SchemaInspector {
    pub fn new(catalog: impl Catalog + 'static) -> SchemaInspector {
        SchemaInspector::from_catalog(Box::new(catalog))
    }

    pub fn from_catalog(catalog: Box<dyn Catalog>) -> SchemaInspector {
        SchemaInspector {
            catalog: Arc::from(catalog),
            index_parser: Arc::new(ParenthesizedColumns),
        }
    }

    /// Replaces the heuristic used to pull column names out of index
    /// definitions.
    pub fn with_index_parser(mut self, parser: impl IndexDefinitionParser + 'static) -> SchemaInspector {
        self.index_parser = Arc::new(parser);
        self
    }

    /// Table names of the schema, ordered, without reserved tables.
    #[tracing::instrument(skip(self))]
    pub async fn tables(&self) -> Result<Vec<String>> {
        let tables = self.catalog.tables().await?;

        Ok(tables
            .into_iter()
            .filter(|name| !RESERVED_TABLES.contains(&name.as_str()))
            .collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn columns(&self, table: &str) -> Result<Vec<Column>> {
        let raw = self.catalog.columns(table).await?;
        Ok(raw.into_iter().map(column).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn indexes(&self, table: &str) -> Result<Vec<Index>> {
        let raw = self.catalog.indexes(table).await?;
        let mut indexes = Vec::with_capacity(raw.len());
        let mut has_primary = false;

        for raw in raw {
            let mut kind = IndexKind::from_flags(raw.is_unique, raw.is_primary);

            if kind == IndexKind::Primary {
                if has_primary {
                    tracing::debug!(index = %raw.name, "demoting extra primary index to unique");
                    kind = IndexKind::Unique;
                }
                has_primary = true;
            }

            indexes.push(Index {
                columns: self.index_parser.columns(&raw.definition),
                name: raw.name,
                kind,
            });
        }

        Ok(indexes)
    }

    #[tracing::instrument(skip(self))]
    pub async fn foreign_keys(&self, table: &str) -> Result<Vec<ForeignKey>> {
        let names = self.catalog.foreign_key_names(table).await?;

        try_join_all(
            names
                .into_iter()
                .map(|name| self.foreign_key(table, name)),
        )
        .await
    }

    async fn foreign_key(&self, table: &str, name: String) -> Result<ForeignKey> {
        let columns = self.catalog.foreign_key_columns(table, &name).await?;
        let references = self.catalog.foreign_key_references(&name).await?;

        let Some(first) = references.first() else {
            return Err(Error::connection(err!(
                "foreign key `{name}` on `{table}` has no referenced columns"
            )));
        };

        let referenced_table = first.referenced_table.clone();
        let on_update: ReferentialAction = first.on_update.parse()?;
        let on_delete: ReferentialAction = first.on_delete.parse()?;

        Ok(ForeignKey {
            name,
            columns,
            referenced_table,
            referenced_columns: references
                .into_iter()
                .map(|reference| reference.referenced_column)
                .collect(),
            on_update,
            on_delete,
        })
    }

    /// Full description of one table.
    pub async fn table(&self, name: &str) -> Result<Table> {
        let (columns, indexes, foreign_keys) = futures::try_join!(
            self.columns(name),
            self.indexes(name),
            self.foreign_keys(name),
        )?;

        Ok(Table {
            name: name.to_string(),
            columns,
            indexes,
            foreign_keys,
        })
    }

    /// Full description of every table in the schema.
    #[tracing::instrument(skip(self))]
    pub async fn schema(&self) -> Result<Schema> {
        let names = self.tables().await?;
        let tables = try_join_all(names.iter().map(|name| self.table(name))).await?;

        tracing::debug!(tables = tables.len(), "inspected schema");
        Ok(Schema { tables })
    }
}

fn column(raw: RawColumn) -> Column {
    let (ty, args) = semantic_type(&raw.data_type, raw.max_length);

    Column {
        name: raw.name,
        ty,
        args,
        default_to: raw.default.filter(|default| !default.contains("nextval(")),
        not_nullable: !raw.is_nullable,
        unsigned: false,
    }
}
