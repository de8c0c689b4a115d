use std::{ops::Deref, sync::Arc, time::Duration};

use tokio::{sync::Mutex, time::timeout};
use vellum_core::driver::{IsolationLevel, TransactionOp};

use crate::{db::ConnectionType, Db};

pub enum Transaction<'a> {
    Root(Db),
    Nested(&'a Db),
}

impl Transaction<'_> {
    async fn exec(&self, op: TransactionOp) -> crate::Result<()> {
        match &self.connection {
            ConnectionType::Pool => unreachable!("transaction without a dedicated connection"),
            ConnectionType::Transaction(mutex) => {
                let mut connection = mutex.lock().await;
                // Only the root owns the connection's transaction state. A
                // failed commit or rollback leaves it open so the connection
                // is closed rather than returned to the pool.
                if let Transaction::Root(_) = self {
                    connection.set_in_transaction(true);
                }
                connection.exec(op.into()).await?;
                if let (Transaction::Root(_), TransactionOp::Commit | TransactionOp::Rollback) =
                    (self, op)
                {
                    connection.set_in_transaction(false);
                }
            }
        }
        Ok(())
    }

    async fn start(&self, isolation: Option<IsolationLevel>) -> crate::Result<()> {
        self.exec(TransactionOp::Start { isolation }).await
    }

    async fn commit(&self) -> crate::Result<()> {
        tracing::trace!(nested = matches!(self, Transaction::Nested(_)), "commit");
        self.exec(TransactionOp::Commit).await
    }

    async fn rollback(&self) -> crate::Result<()> {
        tracing::debug!(nested = matches!(self, Transaction::Nested(_)), "rollback");
        self.exec(TransactionOp::Rollback).await
    }
}

impl Deref for Transaction<'_> {
    type Target = Db;

    fn deref(&self) -> &Self::Target {
        match self {
            Transaction::Root(db) => db,
            Transaction::Nested(db) => db,
        }
    }
}

impl Db {
    pub(crate) async fn begin(
        &self,
        isolation: Option<IsolationLevel>,
    ) -> crate::Result<Transaction<'_>> {
        let tx = match &self.connection {
            ConnectionType::Pool => {
                let connection = self.shared.pool.get().await?;
                Transaction::Root(Db {
                    shared: self.shared.clone(),
                    connection: ConnectionType::Transaction(Arc::new(Mutex::new(connection))),
                })
            }
            ConnectionType::Transaction(_) => Transaction::Nested(self),
        };

        tx.start(isolation).await?;
        Ok(tx)
    }

    /// Runs `f` in a transaction, committing on `Ok` and rolling back on
    /// `Err`. Nested calls use savepoints. Times out after the configured
    /// transaction timeout.
    pub async fn transaction<O>(
        &self,
        f: impl AsyncFnOnce(&Db) -> crate::Result<O>,
    ) -> crate::Result<O> {
        self.transaction_with_timeout(self.shared.config.transaction_timeout, f)
            .await
    }

    pub async fn transaction_with_timeout<O>(
        &self,
        duration: Duration,
        f: impl AsyncFnOnce(&Db) -> crate::Result<O>,
    ) -> crate::Result<O> {
        let tx = self.begin(self.shared.config.isolation).await?;

        let Ok(res) = timeout(duration, f(&tx)).await else {
            tx.rollback().await?;
            return Err(crate::Error::transaction_timed_out(duration));
        };

        match res {
            Ok(res) => {
                tx.commit().await?;
                Ok(res)
            }
            Err(err) => {
                tx.rollback().await?;
                Err(err)
            }
        }
    }
}
