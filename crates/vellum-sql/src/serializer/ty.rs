use super::{Formatter, Params, ToSql};

use vellum_core::schema::db::{Column, ColumnArg, ColumnType};

/// Native PostgreSQL type of a column, from its semantic type and arguments.
pub(super) struct NativeType<'a>(pub(super) &'a Column);

impl ToSql for NativeType<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let column = self.0;
        let arg = |i: usize| column.args.get(i);

        let native = match column.ty {
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::BigInteger => "BIGINT".to_string(),
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::String => match arg(0).and_then(ColumnArg::as_int) {
                Some(len) => format!("VARCHAR({len})"),
                None => "VARCHAR".to_string(),
            },
            ColumnType::Boolean => "BOOLEAN".to_string(),
            ColumnType::Datetime => {
                let temporal = arg(0).and_then(ColumnArg::as_temporal);
                let precision = temporal.map(|t| t.precision).unwrap_or(6);
                let tz = temporal.and_then(|t| t.use_tz).unwrap_or(false);
                if tz {
                    format!("TIMESTAMPTZ({precision})")
                } else {
                    format!("TIMESTAMP({precision})")
                }
            }
            ColumnType::Date => "DATE".to_string(),
            ColumnType::Time => {
                let precision = arg(0)
                    .and_then(ColumnArg::as_temporal)
                    .map(|t| t.precision)
                    .unwrap_or(3);
                format!("TIME({precision})")
            }
            ColumnType::Decimal => {
                let precision = arg(0).and_then(ColumnArg::as_int).unwrap_or(10);
                let scale = arg(1).and_then(ColumnArg::as_int).unwrap_or(2);
                format!("NUMERIC({precision}, {scale})")
            }
            ColumnType::Double => "DOUBLE PRECISION".to_string(),
            ColumnType::Json => "JSONB".to_string(),
            ColumnType::SpecificType => arg(0)
                .and_then(ColumnArg::as_str)
                .unwrap_or("TEXT")
                .to_string(),
        };

        f.dst.push_str(&native);
    }
}
