use super::{column_def::ColumnDef, Comma, Formatter, Ident, Params, ToSql};

use vellum_core::{
    schema::db::{ForeignKey, Index, IndexKind},
    stmt::{self, Statement},
};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let filter = &self.filter;
        fmt!(f, "SELECT * FROM " Ident(&self.table) filter);

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(&self.order_by));
        }

        if let Some(limit) = self.limit {
            fmt!(f, " LIMIT " limit);
        }
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);

        if self.row.is_empty() {
            fmt!(f, "INSERT INTO " table " DEFAULT VALUES");
        } else {
            let columns = Comma(self.row.columns().map(Ident));
            let values = Comma(self.row.iter().map(|(_, value)| value));
            fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ")");
        }

        fmt!(f, Returning(self.returning));
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        debug_assert!(!self.assignments.is_empty(), "UPDATE without assignments");

        let assignments = Comma(self.assignments.iter().map(Assignment));
        let filter = &self.filter;
        fmt!(
            f,
            "UPDATE " Ident(&self.table) " SET " assignments filter Returning(self.returning)
        );
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let filter = &self.filter;
        fmt!(f, "DELETE FROM " Ident(&self.table) filter Returning(self.returning));
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = &self.table;
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };

        fmt!(f, "CREATE TABLE " if_not_exists Ident(&table.name) " (");

        let mut s = "\n    ";
        for column in &table.columns {
            let identity = self.identity.as_deref() == Some(column.name.as_str());
            fmt!(f, s ColumnDef { column, identity });
            s = ",\n    ";
        }

        if let Some(pk) = table.primary_key() {
            fmt!(f, s "CONSTRAINT " Ident(&pk.name) " PRIMARY KEY (" Comma(pk.columns.iter().map(Ident)) ")");
        }

        for fk in &table.foreign_keys {
            fmt!(f, s fk);
        }

        fmt!(f, "\n)");

        for index in table.indexes.iter().filter(|index| !index.is_primary()) {
            fmt!(f, ";\n" CreateIndex { table: &table.name, index, if_not_exists });
        }
    }
}

impl ToSql for &stmt::DropTable {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        fmt!(f, "DROP TABLE " if_exists Ident(&self.table));
    }
}

impl ToSql for &ForeignKey {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            "CONSTRAINT " Ident(&self.name)
            " FOREIGN KEY (" Comma(self.columns.iter().map(Ident)) ")"
            " REFERENCES " Ident(&self.referenced_table)
            " (" Comma(self.referenced_columns.iter().map(Ident)) ")"
            " ON UPDATE " self.on_update.sql_name()
            " ON DELETE " self.on_delete.sql_name()
        );
    }
}

struct CreateIndex<'a> {
    table: &'a str,
    index: &'a Index,
    if_not_exists: &'a str,
}

impl ToSql for CreateIndex<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let unique = match self.index.kind {
            IndexKind::Unique => "UNIQUE ",
            _ => "",
        };
        fmt!(
            f,
            "CREATE " unique "INDEX " self.if_not_exists Ident(&self.index.name)
            " ON " Ident(self.table) " (" Comma(self.index.columns.iter().map(Ident)) ")"
        );
    }
}

struct Assignment<'a>((&'a str, &'a stmt::Value));

impl ToSql for Assignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let (column, value) = self.0;
        fmt!(f, Ident(column) " = " value);
    }
}

struct Returning(bool);

impl ToSql for Returning {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if self.0 {
            fmt!(f, " RETURNING *");
        }
    }
}
