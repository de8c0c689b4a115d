//! Failure injection against the memory driver: every document operation
//! must leave the stored rows untouched when any statement fails.
#![cfg(feature = "memory")]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use tests::prelude::*;
use tests::prelude::assert_eq;
use vellum::{
    driver::{Connection, Driver, Operation, Response},
    stmt::Statement,
    Db,
};
use vellum_driver_memory::{Fault, Memory};

async fn setup() -> (Db, Memory) {
    tests::init_tracing();

    let memory = Memory::new();
    let db = Db::builder()
        .registry(tests::registry())
        .build(memory.clone())
        .await
        .unwrap();
    db.push_schema().await.unwrap();

    (db, memory)
}

#[tokio::test]
async fn failed_delete_keeps_every_row() {
    let (db, memory) = setup().await;
    let articles = db.documents(ARTICLE).unwrap();

    let published = articles
        .create(CreateParams::new(article_data("Hello")).status(Status::Published))
        .await
        .unwrap();
    let before = memory.row_counts().await;

    memory.inject_fault(Fault::delete("articles_cmps"));

    assert_err!(
        articles
            .delete(&published.document_id, DeleteParams::default())
            .await
    );
    assert_eq!(memory.row_counts().await, before);
    assert_integrity(&db).await;

    memory.clear_faults();

    let result = articles
        .delete(&published.document_id, DeleteParams::default())
        .await
        .unwrap();
    assert_eq!(result.entries.len(), 2);
    assert!(memory.row_counts().await.values().all(|count| *count == 0));
}

#[tokio::test]
async fn failed_publish_keeps_every_row() {
    let (db, memory) = setup().await;
    let articles = db.documents(ARTICLE).unwrap();

    let draft = articles
        .create(CreateParams::new(article_data("Hello")))
        .await
        .unwrap();
    let before = memory.row_counts().await;

    memory.inject_fault(Fault::insert("components_shared_heroes_cmps").once());

    assert_err!(
        articles
            .publish(&draft.document_id, PublishParams::default())
            .await
    );
    assert_eq!(memory.row_counts().await, before);

    // The fault is used up
    articles
        .publish(&draft.document_id, PublishParams::default())
        .await
        .unwrap();
    assert_integrity(&db).await;
}

#[tokio::test]
async fn failed_update_keeps_draft() {
    let (db, memory) = setup().await;
    let articles = db.documents(ARTICLE).unwrap();

    let draft = articles
        .create(CreateParams::new(article_data("Hello")))
        .await
        .unwrap();
    let before = memory.row_counts().await;

    memory.inject_fault(Fault::insert("components_shared_links").after(1));

    let data = json!({
        "title": "Changed",
        "links": [
            { "url": "https://example.com/a" },
            { "url": "https://example.com/b" },
        ],
    });
    assert_err!(
        articles
            .update(&draft.document_id, UpdateParams::new(data))
            .await
    );

    let current = assert_some!(articles
        .find_one(&draft.document_id, FindParams::default())
        .await
        .unwrap());
    assert_eq!(current, draft);
    assert_eq!(memory.row_counts().await, before);
}

#[tokio::test]
async fn failed_unpublish_keeps_published_version() {
    let (db, memory) = setup().await;
    let articles = db.documents(ARTICLE).unwrap();

    let published = articles
        .create(CreateParams::new(article_data("Hello")).status(Status::Published))
        .await
        .unwrap();
    let before = memory.row_counts().await;

    memory.inject_fault(Fault::delete("articles").once());

    assert_err!(
        articles
            .unpublish(&published.document_id, PublishParams::default())
            .await
    );
    assert_eq!(memory.row_counts().await, before);
    assert_some!(articles
        .find_one(
            &published.document_id,
            FindParams::default().status(Status::Published)
        )
        .await
        .unwrap());
}

#[tokio::test]
async fn timed_out_transaction_rolls_back() {
    let (db, memory) = setup().await;
    let before = memory.row_counts().await;

    let err = assert_err!(
        db.transaction_with_timeout(Duration::from_millis(50), async |tx| {
            tx.documents(ARTICLE)?
                .create(CreateParams::new(article_data("Hello")))
                .await?;

            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
    );
    assert!(err.is_transaction_timed_out());

    assert_eq!(memory.row_counts().await, before);
}

#[tokio::test]
async fn failed_transaction_returns_its_error() {
    let (db, memory) = setup().await;
    let before = memory.row_counts().await;

    let err = assert_err!(
        db.transaction(async |tx| {
            tx.documents(ARTICLE)?
                .create(CreateParams::new(article_data("Hello")))
                .await?;

            Err::<(), _>(vellum::Error::validation("stop"))
        })
        .await
    );
    assert!(err.is_validation());

    assert_eq!(memory.row_counts().await, before);
}

/// Lets a fixed number of deletes through, then never completes another one.
#[derive(Debug, Clone)]
struct StallingDeletes {
    memory: Memory,
    allowed: Arc<AtomicUsize>,
}

#[derive(Debug)]
struct StallingConnection {
    inner: Box<dyn Connection>,
    allowed: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Driver for StallingDeletes {
    async fn connect(&self) -> vellum::Result<Box<dyn Connection>> {
        Ok(Box::new(StallingConnection {
            inner: self.memory.connect().await?,
            allowed: self.allowed.clone(),
        }))
    }
}

#[async_trait::async_trait]
impl Connection for StallingConnection {
    async fn exec(&mut self, op: Operation) -> vellum::Result<Response> {
        if let Operation::Statement(Statement::Delete(_)) = &op {
            match self.allowed.load(Ordering::SeqCst) {
                0 => std::future::pending::<()>().await,
                n => self.allowed.store(n - 1, Ordering::SeqCst),
            }
        }
        self.inner.exec(op).await
    }
}

#[tokio::test]
async fn cancelled_delete_keeps_every_row() {
    tests::init_tracing();

    let memory = Memory::new();
    let driver = StallingDeletes {
        memory: memory.clone(),
        allowed: Arc::new(AtomicUsize::new(usize::MAX)),
    };
    let db = Db::builder()
        .registry(tests::registry())
        .build(driver.clone())
        .await
        .unwrap();
    db.push_schema().await.unwrap();
    let articles = db.documents(ARTICLE).unwrap();

    let published = articles
        .create(CreateParams::new(article_data("Hello")).status(Status::Published))
        .await
        .unwrap();
    let before = memory.row_counts().await;

    // The first delete of the cascade runs, the second never returns.
    driver.allowed.store(1, Ordering::SeqCst);
    let delete = articles.delete(&published.document_id, DeleteParams::default());
    assert_err!(tokio::time::timeout(Duration::from_millis(100), delete).await);

    // Dropping the delete mid-transaction must release the store.
    let after = assert_ok!(
        tokio::time::timeout(Duration::from_secs(1), memory.row_counts()).await
    );
    assert_eq!(after, before);

    driver.allowed.store(usize::MAX, Ordering::SeqCst);

    let other = articles
        .create(CreateParams::new(article_data("Other")))
        .await
        .unwrap();
    assert_integrity(&db).await;

    let result = articles
        .delete(&published.document_id, DeleteParams::default())
        .await
        .unwrap();
    assert_eq!(result.entries.len(), 2);
    assert_some!(articles
        .find_one(&other.document_id, FindParams::default())
        .await
        .unwrap());
    assert_integrity(&db).await;
}

#[tokio::test]
async fn memory_driver_has_no_catalog() {
    tests::init_tracing();

    let db = Db::builder()
        .registry(tests::registry())
        .url("memory://")
        .connect()
        .await
        .unwrap();

    let err = assert_err!(db.schema_inspector().await);
    assert!(err.is_unsupported_feature());
}
