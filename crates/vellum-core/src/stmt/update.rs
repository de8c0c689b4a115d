use super::{Filter, Row, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Table to update
    pub table: String,

    /// SET column = value
    pub assignments: Row,

    /// WHERE
    pub filter: Filter,

    /// When `true`, the updated rows are returned.
    pub returning: bool,
}

impl Update {
    pub fn new(table: impl Into<String>, assignments: Row, filter: impl Into<Filter>) -> Update {
        Update {
            table: table.into(),
            assignments,
            filter: filter.into(),
            returning: false,
        }
    }

    pub fn returning(mut self) -> Update {
        self.returning = true;
        self
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
