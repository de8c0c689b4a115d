use super::{Formatter, ToSql};

use vellum_core::stmt;

pub trait Params {
    fn push(&mut self, param: &stmt::Value) -> Placeholder;
}

/// One-based position of a bound parameter, rendered as `$n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<stmt::Value> {
    fn push(&mut self, value: &stmt::Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('$');
        f.dst.push_str(&self.0.to_string());
    }
}

impl ToSql for &stmt::Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        fmt!(f, placeholder);
    }
}
