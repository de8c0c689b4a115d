use crate::{Faults, Store};

use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;
use vellum_core::{
    bail,
    driver::{self, Operation, Response, TransactionOp},
    stmt::Statement,
    Result,
};

#[derive(Debug)]
pub struct Connection {
    store: Arc<tokio::sync::Mutex<Store>>,
    faults: Arc<Mutex<Faults>>,

    /// Open transaction, if any
    transaction: Option<Transaction>,
}

#[derive(Debug)]
struct Transaction {
    /// Held until the outermost transaction completes
    guard: OwnedMutexGuard<Store>,

    /// Store state at the start of each nesting level
    snapshots: Vec<Store>,
}

impl Connection {
    pub(crate) fn new(store: Arc<tokio::sync::Mutex<Store>>, faults: Arc<Mutex<Faults>>) -> Connection {
        Connection {
            store,
            faults,
            transaction: None,
        }
    }

    async fn exec_transaction(&mut self, op: TransactionOp) -> Result<Response> {
        match op {
            TransactionOp::Start { .. } => match &mut self.transaction {
                Some(transaction) => {
                    let snapshot = transaction.guard.clone();
                    transaction.snapshots.push(snapshot);
                }
                None => {
                    let guard = self.store.clone().lock_owned().await;
                    let snapshot = guard.clone();
                    self.transaction = Some(Transaction {
                        guard,
                        snapshots: vec![snapshot],
                    });
                }
            },
            TransactionOp::Commit => {
                let Some(transaction) = &mut self.transaction else {
                    bail!("commit without an open transaction");
                };
                transaction.snapshots.pop();
                if transaction.snapshots.is_empty() {
                    self.transaction = None;
                }
            }
            TransactionOp::Rollback => {
                let Some(transaction) = &mut self.transaction else {
                    bail!("rollback without an open transaction");
                };
                if let Some(snapshot) = transaction.snapshots.pop() {
                    *transaction.guard = snapshot;
                }
                if transaction.snapshots.is_empty() {
                    self.transaction = None;
                }
            }
        }

        tracing::trace!(
            ?op,
            depth = self.transaction.as_ref().map(|t| t.snapshots.len()).unwrap_or(0),
            "transaction"
        );

        Ok(Response::count(0))
    }

    async fn exec_statement(&mut self, stmt: Statement) -> Result<Response> {
        tracing::trace!(table = stmt.table(), ?stmt, "executing statement");

        let fault = self
            .faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .check(&stmt);
        if let Some(err) = fault {
            return Err(err);
        }

        match &mut self.transaction {
            Some(transaction) => transaction.guard.exec(stmt),
            None => self.store.lock().await.exec(stmt),
        }
    }
}

/// A connection dropped with a transaction still open rolls the store back
/// to the start of the outermost transaction before releasing it.
impl Drop for Connection {
    fn drop(&mut self) {
        if let Some(Transaction { mut guard, snapshots }) = self.transaction.take() {
            tracing::debug!(depth = snapshots.len(), "connection dropped mid-transaction");
            if let Some(snapshot) = snapshots.into_iter().next() {
                *guard = snapshot;
            }
        }
    }
}

#[vellum_core::async_trait]
impl driver::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::Transaction(op) => self.exec_transaction(op).await,
            Operation::Statement(stmt) => self.exec_statement(stmt).await,
        }
    }
}
