mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod drop_table;
pub use drop_table::DropTable;

mod eval;

mod expr;
pub use expr::Expr;

mod filter;
pub use filter::Filter;

mod insert;
pub use insert::Insert;

mod order_by;
pub use order_by::{Direction, OrderBy};

mod row;
pub use row::Row;

mod select;
pub use select::Select;

mod update;
pub use update::Update;

mod value;
pub use value::Value;

/// A statement the storage layer executes against one named table.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    CreateTable(CreateTable),
    DropTable(DropTable),
}

impl Statement {
    /// Name of the table the statement targets.
    pub fn table(&self) -> &str {
        match self {
            Statement::Select(stmt) => &stmt.table,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
            Statement::Delete(stmt) => &stmt.table,
            Statement::CreateTable(stmt) => &stmt.table.name,
            Statement::DropTable(stmt) => &stmt.table,
        }
    }

    /// Returns `true` if executing the statement yields rows rather than a
    /// count of affected rows.
    pub fn returns_rows(&self) -> bool {
        match self {
            Statement::Select(_) => true,
            Statement::Insert(stmt) => stmt.returning,
            Statement::Update(stmt) => stmt.returning,
            Statement::Delete(stmt) => stmt.returning,
            Statement::CreateTable(_) | Statement::DropTable(_) => false,
        }
    }
}
