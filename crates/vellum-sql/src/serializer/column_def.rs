use super::{ty::NativeType, Formatter, Ident, Params, ToSql};

use vellum_core::schema::db::Column;

/// A column definition inside `CREATE TABLE`.
pub(super) struct ColumnDef<'a> {
    pub(super) column: &'a Column,

    /// Values come from an identity sequence when omitted on insert
    pub(super) identity: bool,
}

impl ToSql for ColumnDef<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let column = self.column;

        fmt!(f, Ident(&column.name) " " NativeType(column));

        if self.identity {
            fmt!(f, " GENERATED BY DEFAULT AS IDENTITY");
        }

        if let Some(default) = &column.default_to {
            fmt!(f, " DEFAULT " default);
        }

        if column.not_nullable {
            fmt!(f, " NOT NULL");
        }
    }
}
