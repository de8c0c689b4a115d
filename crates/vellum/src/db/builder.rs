use super::{ConnectionType, Db, Pool, PoolConfig, Shared};
use crate::{db::Connect, Result};

use std::{sync::Arc, time::Duration};
use vellum_core::{driver::IsolationLevel, err, schema::app::Registry, Driver};

/// Runtime settings shared by every `Db` clone.
#[derive(Debug, Clone)]
pub struct Config {
    /// Locale used when an operation on a localized content type names none
    pub default_locale: String,

    /// Database schema inspected by `Db::schema_inspector`
    pub schema: String,

    pub transaction_timeout: Duration,

    /// Isolation level of root transactions. The server default when unset.
    pub isolation: Option<IsolationLevel>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            default_locale: "en".to_string(),
            schema: "public".to_string(),
            transaction_timeout: Duration::from_secs(5),
            isolation: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Builder {
    url: Option<String>,
    registry: Option<Registry>,
    pool: PoolConfig,
    config: Config,
}

impl Builder {
    /// Starts from `VELLUM_DATABASE_URL`, `VELLUM_DEFAULT_LOCALE` and
    /// `VELLUM_SCHEMA`. Unset variables keep their defaults.
    pub fn from_env() -> Builder {
        Builder::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Builder {
        let mut builder = Builder::default();

        if let Some(url) = var("VELLUM_DATABASE_URL") {
            builder.url = Some(url);
        }

        if let Some(locale) = var("VELLUM_DEFAULT_LOCALE") {
            builder.config.default_locale = locale;
        }

        if let Some(schema) = var("VELLUM_SCHEMA") {
            builder.config.schema = schema;
        }

        builder
    }

    pub fn url(mut self, url: impl Into<String>) -> Builder {
        self.url = Some(url.into());
        self
    }

    pub fn registry(mut self, registry: Registry) -> Builder {
        self.registry = Some(registry);
        self
    }

    pub fn default_locale(mut self, locale: impl Into<String>) -> Builder {
        self.config.default_locale = locale.into();
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Builder {
        self.config.schema = schema.into();
        self
    }

    pub fn pool(mut self, pool: PoolConfig) -> Builder {
        self.pool = pool;
        self
    }

    pub fn transaction_timeout(mut self, timeout: Duration) -> Builder {
        self.config.transaction_timeout = timeout;
        self
    }

    pub fn isolation_level(mut self, level: IsolationLevel) -> Builder {
        self.config.isolation = Some(level);
        self
    }

    /// Connects using the configured URL.
    pub async fn connect(self) -> Result<Db> {
        let Some(url) = &self.url else {
            return Err(err!("no database URL configured"));
        };

        let driver = Connect::new(url)?;
        self.build(driver).await
    }

    pub async fn build(self, driver: impl Driver) -> Result<Db> {
        let driver: Arc<dyn Driver> = Arc::new(driver);
        let pool = Pool::new(driver.clone(), &self.pool).await?;

        tracing::info!(
            driver = ?driver,
            default_locale = %self.config.default_locale,
            "database handle ready"
        );

        Ok(Db {
            shared: Arc::new(Shared {
                registry: self.registry.unwrap_or_default(),
                driver,
                pool,
                config: self.config,
            }),
            connection: ConnectionType::Pool,
        })
    }
}
