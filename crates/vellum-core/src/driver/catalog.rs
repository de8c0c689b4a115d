use crate::{async_trait, Result};

use std::fmt::Debug;

/// Raw rows from a database's system catalog.
///
/// Implementations only fetch; interpreting native types, index definitions
/// and referential rules is the schema inspector's job. Methods take `&self`
/// so independent lookups can run concurrently.
#[async_trait]
pub trait Catalog: Debug + Send + Sync {
    /// Base table names of the schema, ordered by name.
    async fn tables(&self) -> Result<Vec<String>>;

    /// Columns of `table` in ordinal order.
    async fn columns(&self, table: &str) -> Result<Vec<RawColumn>>;

    async fn indexes(&self, table: &str) -> Result<Vec<RawIndex>>;

    /// Names of the foreign key constraints declared on `table`.
    async fn foreign_key_names(&self, table: &str) -> Result<Vec<String>>;

    /// Owning columns of a foreign key constraint, in constraint order.
    async fn foreign_key_columns(&self, table: &str, constraint: &str) -> Result<Vec<String>>;

    /// Referenced side of a foreign key constraint, one row per column in
    /// constraint order.
    async fn foreign_key_references(&self, constraint: &str) -> Result<Vec<RawReference>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,

    /// Native type as reported by the catalog, e.g. `character varying`
    pub data_type: String,

    pub is_nullable: bool,

    pub default: Option<String>,

    pub max_length: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIndex {
    pub name: String,

    /// Full `CREATE INDEX` statement
    pub definition: String,

    pub is_unique: bool,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReference {
    pub referenced_table: String,
    pub referenced_column: String,

    /// e.g. `CASCADE`, `NO ACTION`
    pub on_update: String,
    pub on_delete: String,
}
