use tokio::sync::Mutex;
use vellum::db;

use crate::{Setup, TestDb};

/// Fixture tables have fixed names, so tests against one database take
/// turns.
static LOCK: Mutex<()> = Mutex::const_new(());

pub struct SetupPostgreSQL;

pub fn url() -> String {
    std::env::var("VELLUM_TEST_POSTGRES_URL")
        .unwrap_or_else(|_| "postgresql://localhost:5432/vellum_test".to_string())
}

#[async_trait::async_trait]
impl Setup for SetupPostgreSQL {
    async fn connect(&self, builder: db::Builder) -> vellum::Result<TestDb> {
        let lock = LOCK.lock().await;

        let db = builder.url(url()).connect().await?;
        db.reset_schema().await?;
        Ok(TestDb::new(db, Some(lock)))
    }
}
