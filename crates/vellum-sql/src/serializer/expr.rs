use super::{Comma, Delimited, Formatter, Ident, Params, ToSql};

use vellum_core::stmt::{self, Expr};

impl ToSql for &stmt::Filter {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(expr) = &self.expr {
            fmt!(f, " WHERE " expr);
        }
    }
}

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Expr::And(exprs) if exprs.is_empty() => fmt!(f, "TRUE"),
            Expr::And(exprs) => {
                let grouped = exprs.len() > 1;
                let operands = exprs.iter().map(|expr| Conjunct { expr, grouped });
                fmt!(f, Delimited::new(operands, " AND "));
            }
            Expr::Eq(column, value) => fmt!(f, Ident(column) " = " value),
            Expr::InList(_, values) if values.is_empty() => fmt!(f, "FALSE"),
            Expr::InList(column, values) => {
                fmt!(f, Ident(column) " IN (" Comma(values) ")")
            }
            Expr::IsNull(column) => fmt!(f, Ident(column) " IS NULL"),
            Expr::IsNotNull(column) => fmt!(f, Ident(column) " IS NOT NULL"),
        }
    }
}

/// One operand of a conjunction. Nested conjunctions are parenthesized
/// when they share the conjunction with other operands.
struct Conjunct<'a> {
    expr: &'a Expr,
    grouped: bool,
}

impl ToSql for Conjunct<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let expr = self.expr;
        if self.grouped && matches!(expr, Expr::And(_)) {
            fmt!(f, "(" expr ")");
        } else {
            fmt!(f, expr);
        }
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let direction = match self.direction {
            stmt::Direction::Asc => " ASC",
            stmt::Direction::Desc => " DESC",
        };
        fmt!(f, Ident(&self.column) direction);
    }
}
