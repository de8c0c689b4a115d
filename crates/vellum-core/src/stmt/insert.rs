use super::{Row, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Table to insert into
    pub table: String,

    /// Column values of the new row. Columns left out take their default;
    /// an omitted `id` is assigned by the store.
    pub row: Row,

    /// When `true`, the inserted row is returned.
    pub returning: bool,
}

impl Insert {
    pub fn new(table: impl Into<String>, row: Row) -> Insert {
        Insert {
            table: table.into(),
            row,
            returning: true,
        }
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}
