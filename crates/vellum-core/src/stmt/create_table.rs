use super::Statement;
use crate::schema::db::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Table definition, including its indexes and foreign keys
    pub table: Table,

    /// Column populated from an identity sequence when omitted on insert
    pub identity: Option<String>,

    pub if_not_exists: bool,
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Statement::CreateTable(value)
    }
}
