mod catalog;
pub use catalog::PgCatalog;

mod connection;
pub use connection::Connection;

mod value;

use tokio_postgres::{tls::MakeTlsConnect, Client, Config, Socket};
use url::Url;
use vellum_core::{driver, Error, Result};

#[derive(Debug, Clone)]
pub struct PostgreSQL {
    config: Config,
}

impl PostgreSQL {
    /// Builds a driver from a connection string. No connection is opened
    /// until the pool asks for one.
    pub fn new(url: &str) -> Result<PostgreSQL> {
        let url = Url::parse(url).map_err(anyhow::Error::from)?;
        Ok(PostgreSQL::with_config(config_from_url(&url)?))
    }

    pub fn with_config(config: Config) -> PostgreSQL {
        PostgreSQL { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn client(&self) -> Result<Client> {
        connect_with_config(&self.config, tokio_postgres::NoTls).await
    }
}

#[vellum_core::async_trait]
impl vellum_core::Driver for PostgreSQL {
    async fn connect(&self) -> Result<Box<dyn driver::Connection>> {
        Ok(Box::new(Connection::new(self.client().await?)))
    }

    async fn catalog(&self, schema: &str) -> Result<Box<dyn driver::Catalog>> {
        Ok(Box::new(PgCatalog::new(self.client().await?, schema)))
    }
}

/// Connects a client and drives its connection on a background task.
pub async fn connect_with_config<T>(config: &Config, tls: T) -> Result<Client>
where
    T: MakeTlsConnect<Socket> + 'static,
    T::Stream: Send + 'static,
{
    let (client, connection) = config.connect(tls).await.map_err(Error::connection)?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!(error = %e, "postgresql connection error");
        }
    });

    tracing::debug!(
        dbname = config.get_dbname().unwrap_or_default(),
        "connected to postgresql"
    );

    Ok(client)
}

fn config_from_url(url: &Url) -> Result<Config> {
    if !matches!(url.scheme(), "postgresql" | "postgres") {
        return Err(anyhow::anyhow!(
            "connection URL does not have a `postgresql` scheme; url={url}"
        )
        .into());
    }

    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("missing host in connection URL; url={url}"))?;

    let dbname = url.path().trim_start_matches('/');
    if dbname.is_empty() {
        return Err(anyhow::anyhow!(
            "no database specified - missing path in connection URL; url={url}"
        )
        .into());
    }

    let mut config = Config::new();
    config.host(host);
    config.dbname(dbname);

    if let Some(port) = url.port() {
        config.port(port);
    }

    if !url.username().is_empty() {
        config.user(url.username());
    }

    if let Some(password) = url.password() {
        config.password(password);
    }

    Ok(config)
}
