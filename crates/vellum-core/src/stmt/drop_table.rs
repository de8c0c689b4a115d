use super::Statement;

#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    pub table: String,

    pub if_exists: bool,
}

impl DropTable {
    pub fn if_exists(table: impl Into<String>) -> DropTable {
        DropTable {
            table: table.into(),
            if_exists: true,
        }
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Statement::DropTable(value)
    }
}
