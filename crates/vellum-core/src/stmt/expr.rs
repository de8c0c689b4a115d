use super::Value;

/// A boolean condition over the columns of a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// All sub-expressions hold
    And(Vec<Expr>),

    /// `column = value`
    Eq(String, Value),

    /// `column IN (values...)`; an empty list never matches
    InList(String, Vec<Value>),

    /// `column IS NULL`
    IsNull(String),

    /// `column IS NOT NULL`
    IsNotNull(String),
}

impl Expr {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::Eq(column.into(), value.into())
    }

    pub fn in_list<T: Into<Value>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Expr {
        Expr::InList(column.into(), values.into_iter().map(Into::into).collect())
    }

    pub fn is_null(column: impl Into<String>) -> Expr {
        Expr::IsNull(column.into())
    }

    pub fn is_not_null(column: impl Into<String>) -> Expr {
        Expr::IsNotNull(column.into())
    }

    /// Conjunction, flattening nested `And`s.
    pub fn and(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::And(mut lhs), Expr::And(rhs)) => {
                lhs.extend(rhs);
                Expr::And(lhs)
            }
            (Expr::And(mut lhs), rhs) => {
                lhs.push(rhs);
                Expr::And(lhs)
            }
            (lhs, Expr::And(mut rhs)) => {
                rhs.insert(0, lhs);
                Expr::And(rhs)
            }
            (lhs, rhs) => Expr::And(vec![lhs, rhs]),
        }
    }
}
