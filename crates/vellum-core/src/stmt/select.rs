use super::{Expr, Filter, OrderBy, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Table to read from
    pub table: String,

    /// WHERE
    pub filter: Filter,

    /// ORDER BY, applied in sequence
    pub order_by: Vec<OrderBy>,

    /// LIMIT
    pub limit: Option<u64>,
}

impl Select {
    pub fn new(table: impl Into<String>, filter: impl Into<Filter>) -> Select {
        Select {
            table: table.into(),
            filter: filter.into(),
            order_by: vec![],
            limit: None,
        }
    }

    pub fn all(table: impl Into<String>) -> Select {
        Select::new(table, Filter::all())
    }

    pub fn and(mut self, expr: Expr) -> Select {
        self.filter = self.filter.and(expr);
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Select {
        self.order_by.push(order_by);
        self
    }

    pub fn limit(mut self, limit: u64) -> Select {
        self.limit = Some(limit);
        self
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}
