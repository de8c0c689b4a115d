use super::TransactionOp;

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl IsolationLevel {
    /// Returns the ANSI SQL name.
    pub fn sql_name(&self) -> &'static str {
        match self {
            IsolationLevel::ReadUncommitted => "READ UNCOMMITTED",
            IsolationLevel::ReadCommitted => "READ COMMITTED",
            IsolationLevel::RepeatableRead => "REPEATABLE READ",
            IsolationLevel::Serializable => "SERIALIZABLE",
        }
    }
}

/// Manages transaction nesting depth and generates the SQL for
/// `BEGIN`/`SAVEPOINT`, `COMMIT`/`RELEASE SAVEPOINT`, and
/// `ROLLBACK`/`ROLLBACK TO SAVEPOINT` based on the current nesting level.
#[derive(Debug, Default)]
pub struct TransactionManager {
    depth: u32,
}

impl TransactionManager {
    pub fn new() -> TransactionManager {
        TransactionManager::default()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// SQL for a transaction lifecycle op. Updates the nesting depth.
    pub fn sql(&mut self, op: TransactionOp) -> Cow<'static, str> {
        match op {
            TransactionOp::Start { isolation } => self.start(isolation),
            TransactionOp::Commit => self.commit(),
            TransactionOp::Rollback => self.rollback(),
        }
    }

    /// Returns the SQL to begin a transaction or create a savepoint, and
    /// increments the nesting depth.
    pub fn start(&mut self, isolation: Option<IsolationLevel>) -> Cow<'static, str> {
        let sql = match (self.depth, isolation) {
            (0, None) => Cow::Borrowed("BEGIN"),
            (0, Some(level)) => Cow::Owned(format!("BEGIN ISOLATION LEVEL {}", level.sql_name())),
            (depth, _) => Cow::Owned(format!("SAVEPOINT sp_{depth}")),
        };
        self.depth += 1;
        sql
    }

    /// Returns the SQL to commit the current transaction or release a
    /// savepoint, and decrements the nesting depth.
    pub fn commit(&mut self) -> Cow<'static, str> {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            Cow::Borrowed("COMMIT")
        } else {
            Cow::Owned(format!("RELEASE SAVEPOINT sp_{}", self.depth))
        }
    }

    /// Returns the SQL to roll back the current transaction or savepoint, and
    /// decrements the nesting depth.
    ///
    /// The savepoint is left in place; the outer `COMMIT` or `ROLLBACK`
    /// cleans it up.
    pub fn rollback(&mut self) -> Cow<'static, str> {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            Cow::Borrowed("ROLLBACK")
        } else {
            Cow::Owned(format!("ROLLBACK TO SAVEPOINT sp_{}", self.depth))
        }
    }
}
