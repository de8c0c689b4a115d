use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tokio_postgres::{
    types::{private::BytesMut, to_sql_checked, IsNull, ToSql, Type},
    Row,
};
use vellum_core::{
    err,
    stmt::{self, Value as CoreValue},
    Result,
};

#[derive(Debug)]
pub(crate) struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

type BoxError = Box<dyn std::error::Error + Sync + Send>;

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            stmt::Value::Null => Ok(IsNull::Yes),
            stmt::Value::Bool(value) => value.to_sql(ty, out),
            stmt::Value::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                Type::FLOAT8 => (*value as f64).to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            stmt::Value::String(value) => value.to_sql(ty, out),
            stmt::Value::Json(value) => value.to_sql(ty, out),
            stmt::Value::Timestamp(value) => match *ty {
                Type::TIMESTAMP => value.naive_utc().to_sql(ty, out),
                Type::DATE => value.date_naive().to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
        }
    }

    fn accepts(_: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// Converts a PostgreSQL row to a [`stmt::Row`], keyed by column name.
pub(crate) fn decode_row(row: &Row) -> Result<stmt::Row> {
    let mut ret = stmt::Row::new();

    for (index, column) in row.columns().iter().enumerate() {
        let value = decode_value(row, index, column.type_())?;
        ret.insert(column.name(), value);
    }

    Ok(ret)
}

fn decode_value(row: &Row, index: usize, ty: &Type) -> Result<CoreValue> {
    fn get<'a, T>(row: &'a Row, index: usize) -> Result<Option<T>>
    where
        T: tokio_postgres::types::FromSql<'a>,
    {
        row.try_get::<usize, Option<T>>(index)
            .map_err(|e| err!("failed to decode column; index={index}; {e}"))
    }

    let value = match *ty {
        Type::BOOL => get::<bool>(row, index)?.map(CoreValue::Bool),
        Type::INT2 => get::<i16>(row, index)?.map(|v| CoreValue::I64(v.into())),
        Type::INT4 => get::<i32>(row, index)?.map(|v| CoreValue::I64(v.into())),
        Type::INT8 => get::<i64>(row, index)?.map(CoreValue::I64),
        Type::FLOAT4 => get::<f32>(row, index)?.map(|v| CoreValue::F64(v.into())),
        Type::FLOAT8 => get::<f64>(row, index)?.map(CoreValue::F64),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            get::<String>(row, index)?.map(CoreValue::String)
        }
        Type::JSON | Type::JSONB => get::<serde_json::Value>(row, index)?.map(CoreValue::Json),
        Type::TIMESTAMPTZ => get::<DateTime<Utc>>(row, index)?.map(CoreValue::Timestamp),
        Type::TIMESTAMP => {
            get::<NaiveDateTime>(row, index)?.map(|v| CoreValue::Timestamp(v.and_utc()))
        }
        Type::DATE => get::<NaiveDate>(row, index)?
            .and_then(|v| v.and_hms_opt(0, 0, 0))
            .map(|v| CoreValue::Timestamp(v.and_utc())),
        _ => {
            return Err(err!(
                "unsupported PostgreSQL column type; index={index}; type={ty}"
            ))
        }
    };

    Ok(value.unwrap_or(CoreValue::Null))
}
