use super::{Filter, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Table to delete from
    pub table: String,

    /// WHERE
    pub filter: Filter,

    /// When `true`, the deleted rows are returned.
    pub returning: bool,
}

impl Delete {
    pub fn new(table: impl Into<String>, filter: impl Into<Filter>) -> Delete {
        Delete {
            table: table.into(),
            filter: filter.into(),
            returning: false,
        }
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
