/// Name of the join table linking rows of `owner_table` to component rows.
pub fn join_table_name(owner_table: &str) -> String {
    format!("{owner_table}_cmps")
}

/// Column names shared by every document table and join table.
pub mod columns {
    pub const ID: &str = "id";
    pub const DOCUMENT_ID: &str = "document_id";
    pub const LOCALE: &str = "locale";
    pub const PUBLISHED_AT: &str = "published_at";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";

    /// Columns every content-type table carries besides its attributes.
    pub const SYSTEM: &[&str] = &[ID, DOCUMENT_ID, LOCALE, PUBLISHED_AT, CREATED_AT, UPDATED_AT];

    pub const ENTITY_ID: &str = "entity_id";
    pub const CMP_ID: &str = "cmp_id";
    pub const COMPONENT_TYPE: &str = "component_type";
    pub const FIELD: &str = "field";
    pub const ORDER: &str = "order";
}
