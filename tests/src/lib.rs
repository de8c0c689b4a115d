pub mod db;

mod fixtures;
pub use fixtures::{article_data, registry, ARTICLE, HOMEPAGE};

mod integrity;
pub use integrity::{assert_integrity, row_counts};

pub mod prelude;

use std::{ops::Deref, sync::Once};
use vellum::Db;

pub use std_util::*;

/// A database prepared for one test: every fixture table exists and is
/// empty.
pub struct TestDb {
    db: Db,

    /// Serializes tests sharing one physical database
    _lock: Option<tokio::sync::MutexGuard<'static, ()>>,
}

impl TestDb {
    pub fn new(db: Db, lock: Option<tokio::sync::MutexGuard<'static, ()>>) -> TestDb {
        TestDb { db, _lock: lock }
    }
}

impl Deref for TestDb {
    type Target = Db;

    fn deref(&self) -> &Db {
        &self.db
    }
}

#[async_trait::async_trait]
pub trait Setup: Send + Sync + 'static {
    async fn setup(&self) -> TestDb {
        init_tracing();

        let builder = Db::builder().registry(registry());
        self.connect(builder).await.unwrap()
    }

    async fn connect(&self, builder: vellum::db::Builder) -> vellum::Result<TestDb>;
}

/// Installs a `RUST_LOG` driven subscriber once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Runs each listed `async fn(TestDb)` against every enabled backend.
#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+ $(,)?
    ) => {
        #[cfg(feature = "memory")]
        mod memory {
            $(
                #[tokio::test]
                $( #[$attrs] )*
                async fn $f() {
                    let db = $crate::Setup::setup(&$crate::db::memory::SetupMemory).await;
                    super::$f(db).await;
                }
            )*
        }

        #[cfg(feature = "postgresql")]
        mod postgresql {
            $(
                #[tokio::test]
                $( #[$attrs] )*
                async fn $f() {
                    let db = $crate::Setup::setup(&$crate::db::postgresql::SetupPostgreSQL).await;
                    super::$f(db).await;
                }
            )*
        }
    };
}
