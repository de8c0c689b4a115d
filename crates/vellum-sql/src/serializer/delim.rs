use super::{Formatter, Params, ToSql};

/// Fragments joined by a separator.
pub(super) struct Delimited<L> {
    items: L,
    separator: &'static str,
}

impl<L> Delimited<L> {
    pub(super) fn new(items: L, separator: &'static str) -> Delimited<L> {
        Delimited { items, separator }
    }
}

impl<L> ToSql for Delimited<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let mut s = "";
        for item in self.items {
            fmt!(f, s item);
            s = self.separator;
        }
    }
}

/// `a, b, c`
pub(super) struct Comma<L>(pub(super) L);

impl<L> ToSql for Comma<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        Delimited::new(self.0, ", ").to_sql(f);
    }
}
