use std::{cmp::Ordering, collections::BTreeMap};
use vellum_core::{
    bail,
    driver::Response,
    schema::db,
    stmt::{self, Direction, Row, Statement, Value},
    Result,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct Store {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone)]
struct Table {
    /// Column names, in definition order
    columns: Vec<String>,

    /// Column assigned from `next_id` when omitted on insert
    identity: Option<String>,

    next_id: i64,

    /// Rows in insertion order
    rows: Vec<Row>,
}

impl Store {
    pub(crate) fn exec(&mut self, stmt: Statement) -> Result<Response> {
        match stmt {
            Statement::CreateTable(stmt) => self.create_table(stmt),
            Statement::DropTable(stmt) => self.drop_table(stmt),
            Statement::Insert(stmt) => self.table_mut(&stmt.table)?.insert(stmt),
            Statement::Select(stmt) => Ok(self.table(&stmt.table)?.select(&stmt)),
            Statement::Update(stmt) => self.table_mut(&stmt.table)?.update(stmt),
            Statement::Delete(stmt) => Ok(self.table_mut(&stmt.table)?.delete(&stmt)),
        }
    }

    pub(crate) fn row_counts(&self) -> BTreeMap<String, usize> {
        self.tables
            .iter()
            .map(|(name, table)| (name.clone(), table.rows.len()))
            .collect()
    }

    fn create_table(&mut self, stmt: stmt::CreateTable) -> Result<Response> {
        let db::Table { name, columns, .. } = stmt.table;

        if self.tables.contains_key(&name) {
            if stmt.if_not_exists {
                return Ok(Response::count(0));
            }
            bail!("table already exists; table={name}");
        }

        if let Some(identity) = &stmt.identity {
            if !columns.iter().any(|column| &column.name == identity) {
                bail!("identity column is not part of the table; table={name}; column={identity}");
            }
        }

        let table = Table {
            columns: columns.into_iter().map(|column| column.name).collect(),
            identity: stmt.identity,
            next_id: 1,
            rows: vec![],
        };

        self.tables.insert(name, table);
        Ok(Response::count(0))
    }

    fn drop_table(&mut self, stmt: stmt::DropTable) -> Result<Response> {
        if self.tables.remove(&stmt.table).is_none() && !stmt.if_exists {
            bail!("table does not exist; table={}", stmt.table);
        }
        Ok(Response::count(0))
    }

    fn table(&self, name: &str) -> Result<&Table> {
        match self.tables.get(name) {
            Some(table) => Ok(table),
            None => bail!("table does not exist; table={name}"),
        }
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        match self.tables.get_mut(name) {
            Some(table) => Ok(table),
            None => bail!("table does not exist; table={name}"),
        }
    }
}

impl Table {
    fn insert(&mut self, stmt: stmt::Insert) -> Result<Response> {
        self.check_columns(&stmt.table, &stmt.row)?;

        let mut row = Row::new();
        for column in &self.columns {
            let value = stmt.row.get(column).clone();

            let value = match &self.identity {
                Some(identity) if identity == column => match value {
                    Value::Null => {
                        let id = self.next_id;
                        self.next_id += 1;
                        Value::I64(id)
                    }
                    value => {
                        self.next_id = self.next_id.max(value.to_i64()? + 1);
                        value
                    }
                },
                _ => value,
            };

            row.insert(column.clone(), value);
        }

        self.rows.push(row.clone());

        if stmt.returning {
            Ok(Response::values(vec![row]))
        } else {
            Ok(Response::count(1))
        }
    }

    fn select(&self, stmt: &stmt::Select) -> Response {
        let mut rows: Vec<_> = self
            .rows
            .iter()
            .filter(|row| stmt.filter.eval(row))
            .cloned()
            .collect();

        if !stmt.order_by.is_empty() {
            rows.sort_by(|a, b| {
                stmt.order_by
                    .iter()
                    .map(|order_by| {
                        let ordering = cmp_values(a.get(&order_by.column), b.get(&order_by.column));
                        match order_by.direction {
                            Direction::Asc => ordering,
                            Direction::Desc => ordering.reverse(),
                        }
                    })
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }

        if let Some(limit) = stmt.limit {
            rows.truncate(limit as usize);
        }

        Response::values(rows)
    }

    fn update(&mut self, stmt: stmt::Update) -> Result<Response> {
        self.check_columns(&stmt.table, &stmt.assignments)?;

        let mut updated = vec![];
        for row in self.rows.iter_mut().filter(|row| stmt.filter.eval(row)) {
            for (column, value) in stmt.assignments.iter() {
                row.insert(column, value.clone());
            }
            updated.push(row.clone());
        }

        if stmt.returning {
            Ok(Response::values(updated))
        } else {
            Ok(Response::count(updated.len() as u64))
        }
    }

    fn delete(&mut self, stmt: &stmt::Delete) -> Response {
        let (deleted, kept) = std::mem::take(&mut self.rows)
            .into_iter()
            .partition(|row| stmt.filter.eval(row));
        self.rows = kept;

        if stmt.returning {
            Response::values(deleted)
        } else {
            Response::count(deleted.len() as u64)
        }
    }

    fn check_columns(&self, table: &str, row: &Row) -> Result<()> {
        for column in row.columns() {
            if !self.columns.iter().any(|c| c == column) {
                bail!("unknown column; table={table}; column={column}");
            }
        }
        Ok(())
    }
}

/// Orders values of the same kind; null sorts first.
fn cmp_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::I64(a), Value::I64(b)) => a.cmp(b),
        (Value::F64(a), Value::F64(b)) => a.total_cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}
