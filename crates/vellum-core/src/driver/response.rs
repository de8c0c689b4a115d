use crate::{err, stmt::Row, Result};

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by the operation
    Values(Vec<Row>),
}

impl Response {
    pub fn count(count: u64) -> Response {
        Response {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Row>) -> Response {
        Response {
            rows: Rows::Values(rows),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        self.rows.into_count()
    }

    pub fn into_values(self) -> Result<Vec<Row>> {
        self.rows.into_values()
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Rows::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Rows::Values(_))
    }

    /// Number of affected rows. Returned rows count as affected.
    pub fn into_count(self) -> Result<u64> {
        match self {
            Rows::Count(count) => Ok(count),
            Rows::Values(values) => Ok(values.len() as u64),
        }
    }

    pub fn into_values(self) -> Result<Vec<Row>> {
        match self {
            Rows::Values(values) => Ok(values),
            Rows::Count(count) => Err(err!(
                "expected rows from driver, got a count; count={count}"
            )),
        }
    }
}
