//! Schema inspection against a live PostgreSQL database, checked against the
//! schema the registry pushes.
#![cfg(feature = "postgresql")]

use tests::{db::postgresql::SetupPostgreSQL, prelude::*, Setup};
use vellum::{ReferentialAction, Schema, Table};

async fn client() -> tokio_postgres::Client {
    let (client, connection) =
        tokio_postgres::connect(&tests::db::postgresql::url(), tokio_postgres::NoTls)
            .await
            .unwrap();

    tokio::spawn(async move {
        if let Err(err) = connection.await {
            tracing::warn!(%err, "cleanup connection failed");
        }
    });

    client
}

fn sorted(mut schema: Schema) -> Vec<Table> {
    schema.tables.sort_by(|a, b| a.name.cmp(&b.name));
    for table in &mut schema.tables {
        table.indexes.sort_by(|a, b| a.name.cmp(&b.name));
        table.foreign_keys.sort_by(|a, b| a.name.cmp(&b.name));
    }
    schema.tables
}

#[tokio::test]
async fn inspected_schema_matches_pushed_schema() {
    let db = SetupPostgreSQL.setup().await;

    let inspected = db.schema_inspector().await.unwrap().schema().await.unwrap();
    let expected = db.registry().db_schema();

    assert_eq!(sorted(inspected), sorted(expected));
}

#[tokio::test]
async fn join_tables_cascade_from_their_owner() {
    let db = SetupPostgreSQL.setup().await;
    let inspector = db.schema_inspector().await.unwrap();

    let foreign_keys = inspector.foreign_keys("articles_cmps").await.unwrap();
    let [fk] = &foreign_keys[..] else {
        panic!("expected one foreign key; got={foreign_keys:#?}");
    };

    assert_eq!(fk.columns, ["entity_id"]);
    assert_eq!(fk.referenced_table, "articles");
    assert_eq!(fk.referenced_columns, ["id"]);
    assert_eq!(fk.on_delete, ReferentialAction::Cascade);

    let columns = inspector.columns("articles").await.unwrap();
    let id = assert_some!(columns.iter().find(|column| column.name == "id"));
    assert!(id.not_nullable);
    assert_none!(id.default_to);
}

#[tokio::test]
async fn spatial_tables_are_skipped() {
    let db = SetupPostgreSQL.setup().await;
    let client = client().await;

    client
        .batch_execute("CREATE TABLE IF NOT EXISTS spatial_ref_sys (srid INTEGER PRIMARY KEY)")
        .await
        .unwrap();

    let tables = db.schema_inspector().await.unwrap().tables().await;

    client
        .batch_execute("DROP TABLE IF EXISTS spatial_ref_sys")
        .await
        .unwrap();

    let tables = tables.unwrap();
    assert!(tables.iter().any(|table| table == "articles"));
    assert!(!tables.iter().any(|table| table == "spatial_ref_sys"));
}

#[tokio::test]
async fn inspecting_twice_gives_equal_schema() {
    let db = SetupPostgreSQL.setup().await;
    let inspector = db.schema_inspector().await.unwrap();

    let first = inspector.schema().await.unwrap();
    let second = inspector.schema().await.unwrap();
    assert_eq!(first, second);

    let articles = inspector.table("articles").await.unwrap();
    assert_eq!(articles, inspector.table("articles").await.unwrap());
    assert_some!(first.tables.iter().find(|table| **table == articles));
}

#[tokio::test]
async fn composite_foreign_key_pairs_referenced_columns() {
    let db = SetupPostgreSQL.setup().await;
    let client = client().await;

    client
        .batch_execute(
            "DROP TABLE IF EXISTS pair_child;
             DROP TABLE IF EXISTS pair_parent;
             CREATE TABLE pair_parent (x INTEGER, y INTEGER, UNIQUE (x, y));
             CREATE TABLE pair_child (
                 a INTEGER,
                 b INTEGER,
                 CONSTRAINT pair_child_fk FOREIGN KEY (a, b) REFERENCES pair_parent (y, x)
             );",
        )
        .await
        .unwrap();

    let foreign_keys = db
        .schema_inspector()
        .await
        .unwrap()
        .foreign_keys("pair_child")
        .await;

    client
        .batch_execute("DROP TABLE IF EXISTS pair_child; DROP TABLE IF EXISTS pair_parent;")
        .await
        .unwrap();

    let foreign_keys = foreign_keys.unwrap();
    let [fk] = &foreign_keys[..] else {
        panic!("expected one foreign key; got={foreign_keys:#?}");
    };

    assert_eq!(fk.name, "pair_child_fk");
    assert_eq!(fk.columns, ["a", "b"]);
    assert_eq!(fk.referenced_table, "pair_parent");
    assert_eq!(fk.referenced_columns, ["y", "x"]);
}
