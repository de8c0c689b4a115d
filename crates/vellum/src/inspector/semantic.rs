use vellum_core::schema::db::{ColumnArg, ColumnType};

/// Maps a native PostgreSQL type onto the semantic vocabulary.
///
/// Only the root of the native type is considered: lower-cased, and cut at
/// the first whitespace, parenthesis or comma, so `character varying(255)`
/// and `timestamp(3) with time zone` resolve through `character` and
/// `timestamp`. Types without an entry are kept as
/// [`ColumnType::SpecificType`] carrying the raw native string.
pub fn semantic_type(native: &str, max_length: Option<i32>) -> (ColumnType, Vec<ColumnArg>) {
    let root = root_type(native);

    match root.as_str() {
        "integer" => (ColumnType::Integer, vec![]),
        "text" => (ColumnType::Text, vec![ColumnArg::Str("longtext".into())]),
        "boolean" => (ColumnType::Boolean, vec![]),
        "character" => (
            ColumnType::String,
            vec![max_length.map_or(ColumnArg::Null, |len| ColumnArg::Int(len.into()))],
        ),
        "timestamp" => (ColumnType::Datetime, vec![ColumnArg::temporal(Some(false), 6)]),
        "date" => (ColumnType::Date, vec![]),
        "time" => (ColumnType::Time, vec![ColumnArg::temporal(None, 3)]),
        "numeric" => (
            ColumnType::Decimal,
            vec![ColumnArg::Int(10), ColumnArg::Int(2)],
        ),
        "real" | "double" => (ColumnType::Double, vec![]),
        "bigint" => (ColumnType::BigInteger, vec![]),
        "json" | "jsonb" => (ColumnType::Json, vec![]),
        _ => (
            ColumnType::SpecificType,
            vec![ColumnArg::Str(native.to_string())],
        ),
    }
}

fn root_type(native: &str) -> String {
    native
        .trim()
        .split(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == ',')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}
