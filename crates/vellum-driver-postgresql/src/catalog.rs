use tokio_postgres::{types::ToSql, Client, Row};
use vellum_core::{
    driver::{Catalog, RawColumn, RawIndex, RawReference},
    Error, Result,
};

const TABLES: &str = "\
SELECT table_name::text
FROM information_schema.tables
WHERE table_schema = $1::text
  AND table_type = 'BASE TABLE'
ORDER BY table_name";

const COLUMNS: &str = "\
SELECT data_type::text,
       column_name::text,
       character_maximum_length::int4,
       column_default::text,
       is_nullable::text
FROM information_schema.columns
WHERE table_schema = $1::text
  AND table_name = $2::text
ORDER BY ordinal_position";

const INDEXES: &str = "\
SELECT ix.relname::text AS index_name,
       pg_get_indexdef(i.indexrelid) AS index_definition,
       i.indisunique AS is_unique,
       i.indisprimary AS is_primary
FROM pg_index i
JOIN pg_class ix ON ix.oid = i.indexrelid
JOIN pg_class t ON t.oid = i.indrelid
JOIN pg_namespace n ON n.oid = t.relnamespace
WHERE n.nspname = $1::text
  AND t.relname = $2::text
ORDER BY ix.relname";

const FOREIGN_KEY_NAMES: &str = "\
SELECT constraint_name::text
FROM information_schema.table_constraints
WHERE constraint_type = 'FOREIGN KEY'
  AND table_schema = $1::text
  AND table_name = $2::text
ORDER BY constraint_name";

const FOREIGN_KEY_COLUMNS: &str = "\
SELECT column_name::text
FROM information_schema.key_column_usage
WHERE constraint_schema = $1::text
  AND table_name = $2::text
  AND constraint_name = $3::text
ORDER BY ordinal_position";

// Referenced columns are paired with the referencing columns through
// `position_in_unique_constraint`, so they come back in foreign key order
// rather than in the order of the referenced unique constraint.
const FOREIGN_KEY_REFERENCES: &str = "\
SELECT ref.table_name::text,
       ref.column_name::text,
       rc.update_rule::text,
       rc.delete_rule::text
FROM information_schema.referential_constraints rc
JOIN information_schema.key_column_usage fk
  ON fk.constraint_catalog = rc.constraint_catalog
 AND fk.constraint_schema = rc.constraint_schema
 AND fk.constraint_name = rc.constraint_name
JOIN information_schema.key_column_usage ref
  ON ref.constraint_catalog = rc.unique_constraint_catalog
 AND ref.constraint_schema = rc.unique_constraint_schema
 AND ref.constraint_name = rc.unique_constraint_name
 AND ref.ordinal_position = fk.position_in_unique_constraint
WHERE rc.constraint_schema = $1::text
  AND rc.constraint_name = $2::text
ORDER BY fk.ordinal_position";

/// `information_schema` / `pg_catalog` reader for one database schema.
///
/// Lookups borrow the client immutably, so tokio-postgres pipelines
/// concurrent calls over the single connection.
#[derive(Debug)]
pub struct PgCatalog {
    client: Client,
    schema: String,
}

impl PgCatalog {
    pub fn new(client: Client, schema: impl Into<String>) -> PgCatalog {
        PgCatalog {
            client,
            schema: schema.into(),
        }
    }

    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<Row>> {
        tracing::trace!(sql, "catalog query");

        // Any failure to read the catalog is reported as a connection error.
        self.client.query(sql, params).await.map_err(Error::connection)
    }
}

fn get<'a, T>(row: &'a Row, index: usize) -> Result<T>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(index).map_err(Error::connection)
}

#[vellum_core::async_trait]
impl Catalog for PgCatalog {
    async fn tables(&self) -> Result<Vec<String>> {
        self.query(TABLES, &[&self.schema])
            .await?
            .iter()
            .map(|row| get(row, 0))
            .collect()
    }

    async fn columns(&self, table: &str) -> Result<Vec<RawColumn>> {
        self.query(COLUMNS, &[&self.schema, &table])
            .await?
            .iter()
            .map(|row| {
                Ok(RawColumn {
                    data_type: get(row, 0)?,
                    name: get(row, 1)?,
                    max_length: get(row, 2)?,
                    default: get(row, 3)?,
                    is_nullable: get::<String>(row, 4)? != "NO",
                })
            })
            .collect()
    }

    async fn indexes(&self, table: &str) -> Result<Vec<RawIndex>> {
        self.query(INDEXES, &[&self.schema, &table])
            .await?
            .iter()
            .map(|row| {
                Ok(RawIndex {
                    name: get(row, 0)?,
                    definition: get(row, 1)?,
                    is_unique: get(row, 2)?,
                    is_primary: get(row, 3)?,
                })
            })
            .collect()
    }

    async fn foreign_key_names(&self, table: &str) -> Result<Vec<String>> {
        self.query(FOREIGN_KEY_NAMES, &[&self.schema, &table])
            .await?
            .iter()
            .map(|row| get(row, 0))
            .collect()
    }

    async fn foreign_key_columns(&self, table: &str, constraint: &str) -> Result<Vec<String>> {
        self.query(FOREIGN_KEY_COLUMNS, &[&self.schema, &table, &constraint])
            .await?
            .iter()
            .map(|row| get(row, 0))
            .collect()
    }

    async fn foreign_key_references(&self, constraint: &str) -> Result<Vec<RawReference>> {
        self.query(FOREIGN_KEY_REFERENCES, &[&self.schema, &constraint])
            .await?
            .iter()
            .map(|row| {
                Ok(RawReference {
                    referenced_table: get(row, 0)?,
                    referenced_column: get(row, 1)?,
                    on_update: get(row, 2)?,
                    on_delete: get(row, 3)?,
                })
            })
            .collect()
    }
}
