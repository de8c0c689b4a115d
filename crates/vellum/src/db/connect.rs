use crate::Result;

use url::Url;
use vellum_core::{
    async_trait,
    driver::{Catalog, Connection, Driver},
    err,
};

/// Driver selected from a connection URL's scheme.
#[derive(Debug)]
pub struct Connect {
    url: Url,
    driver: Box<dyn Driver>,
}

impl Connect {
    pub fn new(url: &str) -> Result<Connect> {
        let url = Url::parse(url).map_err(anyhow::Error::from)?;

        let driver = match url.scheme() {
            "postgresql" | "postgres" => connect_postgresql(&url)?,
            "memory" => connect_memory(&url)?,
            scheme => {
                return Err(err!(
                    "unsupported database; scheme={scheme}; url={url}"
                ))
            }
        };

        Ok(Connect { url, driver })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Driver for Connect {
    async fn connect(&self) -> Result<Box<dyn Connection>> {
        self.driver.connect().await
    }

    async fn catalog(&self, schema: &str) -> Result<Box<dyn Catalog>> {
        self.driver.catalog(schema).await
    }

    fn max_connections(&self) -> Option<usize> {
        self.driver.max_connections()
    }
}

#[cfg(feature = "postgresql")]
fn connect_postgresql(url: &Url) -> Result<Box<dyn Driver>> {
    let driver = vellum_driver_postgresql::PostgreSQL::new(url.as_str())?;
    Ok(Box::new(driver))
}

#[cfg(not(feature = "postgresql"))]
fn connect_postgresql(_url: &Url) -> Result<Box<dyn Driver>> {
    Err(err!("`postgresql` feature not enabled"))
}

#[cfg(feature = "memory")]
fn connect_memory(_url: &Url) -> Result<Box<dyn Driver>> {
    Ok(Box::new(vellum_driver_memory::Memory::new()))
}

#[cfg(not(feature = "memory"))]
fn connect_memory(_url: &Url) -> Result<Box<dyn Driver>> {
    Err(err!("`memory` feature not enabled"))
}
