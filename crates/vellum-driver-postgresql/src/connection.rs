use crate::value::{self, Value};

use tokio_postgres::{types::ToSql, Client};
use vellum_core::{
    driver::{self, Operation, Response, TransactionManager, TransactionOp},
    stmt::Statement,
    Error, Result,
};
use vellum_sql as sql;

#[derive(Debug)]
pub struct Connection {
    client: Client,
    transaction_manager: TransactionManager,
}

impl Connection {
    pub fn new(client: Client) -> Connection {
        Connection {
            client,
            transaction_manager: TransactionManager::new(),
        }
    }

    async fn exec_transaction(&mut self, op: TransactionOp) -> Result<Response> {
        let sql = self.transaction_manager.sql(op);
        tracing::debug!(%sql, depth = self.transaction_manager.depth(), "transaction");

        self.client.batch_execute(&sql).await.map_err(map_err)?;
        Ok(Response::count(0))
    }

    async fn exec_statement(&mut self, stmt: Statement) -> Result<Response> {
        let mut params = Vec::new();
        let sql = sql::Serializer::postgresql().serialize(&stmt, &mut params);

        tracing::debug!(%sql, params = params.len(), "executing statement");

        if matches!(stmt, Statement::CreateTable(_) | Statement::DropTable(_)) {
            debug_assert!(params.is_empty(), "DDL shouldn't involve any parameters");
            self.client.batch_execute(&sql).await.map_err(map_err)?;
            return Ok(Response::count(0));
        }

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();
        let args = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();

        if !stmt.returns_rows() {
            let count = self.client.execute(&sql, &args).await.map_err(map_err)?;
            return Ok(Response::count(count));
        }

        let rows = self.client.query(&sql, &args).await.map_err(map_err)?;
        let rows = rows
            .iter()
            .map(value::decode_row)
            .collect::<Result<Vec<_>>>()?;

        Ok(Response::values(rows))
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

/// Errors reported by the server fail the operation; anything else means the
/// connection itself is unusable.
fn map_err(err: tokio_postgres::Error) -> Error {
    if err.as_db_error().is_some() {
        Error::driver_operation_failed(err)
    } else {
        Error::connection(err)
    }
}
