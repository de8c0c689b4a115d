use vellum::db;
use vellum_driver_memory::Memory;

use crate::{Setup, TestDb};

pub struct SetupMemory;

#[async_trait::async_trait]
impl Setup for SetupMemory {
    async fn connect(&self, builder: db::Builder) -> vellum::Result<TestDb> {
        let db = builder.build(Memory::new()).await?;
        db.push_schema().await?;
        Ok(TestDb::new(db, None))
    }
}
