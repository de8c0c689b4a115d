use super::{Expr, Filter, Row};

impl Filter {
    /// Evaluates the filter against an in-memory row.
    pub fn eval(&self, row: &Row) -> bool {
        match &self.expr {
            Some(expr) => expr.eval(row),
            None => true,
        }
    }
}

impl Expr {
    /// Evaluates the expression against an in-memory row, with SQL semantics
    /// for null: `NULL = x` never matches.
    pub fn eval(&self, row: &Row) -> bool {
        match self {
            Expr::And(exprs) => exprs.iter().all(|expr| expr.eval(row)),
            Expr::Eq(column, value) => {
                let actual = row.get(column);
                !actual.is_null() && !value.is_null() && actual == value
            }
            Expr::InList(column, values) => {
                let actual = row.get(column);
                !actual.is_null() && values.iter().any(|value| value == actual)
            }
            Expr::IsNull(column) => row.get(column).is_null(),
            Expr::IsNotNull(column) => !row.get(column).is_null(),
        }
    }
}
