#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod column_def;
mod expr;
mod statement;
mod ty;

use vellum_core::stmt::Statement;

/// Serialize a statement to a PostgreSQL SQL string
#[derive(Debug, Default)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn postgresql() -> Serializer {
        Serializer { _priv: () }
    }

    /// Serializes `stmt`, pushing bound values onto `params`.
    ///
    /// `CREATE TABLE` expands to one statement per index; every statement in
    /// the output is terminated by `;`.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }
}
