use super::IsolationLevel;
use crate::stmt::{self, Statement};

#[derive(Debug, Clone)]
pub enum Operation {
    /// Execute a statement
    Statement(Statement),

    /// Execute a transaction lifecycle op
    Transaction(TransactionOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOp {
    /// Start a transaction, or a savepoint when one is already open.
    /// The isolation level only applies to the outermost transaction.
    Start { isolation: Option<IsolationLevel> },

    /// Commit a transaction
    Commit,

    /// Rollback a transaction
    Rollback,
}

impl TransactionOp {
    pub fn start() -> TransactionOp {
        TransactionOp::Start { isolation: None }
    }
}

impl From<Statement> for Operation {
    fn from(value: Statement) -> Operation {
        Operation::Statement(value)
    }
}

macro_rules! impl_from_stmt {
    ( $( $ty:ident ),* ) => {
        $(
            impl From<stmt::$ty> for Operation {
                fn from(value: stmt::$ty) -> Operation {
                    Operation::Statement(value.into())
                }
            }
        )*
    };
}

impl_from_stmt!(Select, Insert, Update, Delete, CreateTable, DropTable);

impl From<TransactionOp> for Operation {
    fn from(value: TransactionOp) -> Operation {
        Operation::Transaction(value)
    }
}
