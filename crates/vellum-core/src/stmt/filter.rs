use super::Expr;

/// WHERE clause of a statement. An empty filter matches every row.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Filter {
    pub expr: Option<Expr>,
}

impl Filter {
    pub fn new(expr: impl Into<Expr>) -> Filter {
        Filter {
            expr: Some(expr.into()),
        }
    }

    /// A filter matching every row.
    pub fn all() -> Filter {
        Filter::default()
    }

    pub fn is_all(&self) -> bool {
        self.expr.is_none()
    }

    /// Narrows the filter with an additional condition.
    pub fn and(self, expr: Expr) -> Filter {
        match self.expr {
            Some(lhs) => Filter::new(lhs.and(expr)),
            None => Filter::new(expr),
        }
    }
}

impl From<Expr> for Filter {
    fn from(expr: Expr) -> Self {
        Filter::new(expr)
    }
}
