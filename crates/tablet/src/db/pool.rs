//! Connection pooling for database connections.

use std::ops::{Deref, DerefMut};

pub use deadpool::managed::{Status, Timeouts};
use deadpool::managed::{Object, PoolError};
use tablet_core::{
    driver::{Connection, Driver},
    Error,
};

use crate::db::Connect;

/// Configuration for connection pool behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Connections opened eagerly when the pool is created
    pub min_size: usize,

    pub max_size: usize,

    pub timeouts: Timeouts,
}

impl PoolConfig {
    /// Creates a new pool configuration with default settings.
    pub fn new() -> Self {
        Self {
            min_size: 1,
            max_size: 10,
            timeouts: Default::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A connection pool that manages database connections.
#[derive(Debug)]
pub struct Pool {
    inner: deadpool::managed::Pool<Manager>,
}

impl Pool {
    /// Creates a new connection pool from the given driver and opens
    /// `min_size` connections.
    pub async fn new(driver: impl Driver, config: PoolConfig) -> crate::Result<Self> {
        let url = driver.url().into_owned();

        let mut max_size = config.max_size.max(1);
        if let Some(max_connections) = driver.max_connections() {
            max_size = max_size.min(max_connections);
        }
        let min_size = config.min_size.min(max_size);

        tracing::info!(%url, min_size, max_size, "creating database connection pool");

        let inner = deadpool::managed::Pool::builder(Manager {
            driver: Box::new(driver),
        })
        .max_size(max_size)
        .timeouts(config.timeouts)
        .runtime(deadpool::Runtime::Tokio1)
        .build()
        .map_err(Error::connection_pool)?;

        fill(&inner, min_size).await?;

        Ok(Self { inner })
    }

    /// Creates a new connection pool from a connection URL.
    pub async fn connect(url: &str, config: PoolConfig) -> crate::Result<Self> {
        Self::new(Connect::new(url)?, config).await
    }

    /// Retrieves a connection from the pool, waiting for one to free up if
    /// the pool is at capacity.
    pub async fn get(&self) -> crate::Result<PoolConnection> {
        let idle = self.inner.status().available;
        let inner = checkout(&self.inner).await?;

        Ok(PoolConnection {
            inner,
            pool: self.inner.clone(),
            idle,
        })
    }

    /// Current size and number of idle connections.
    pub fn status(&self) -> Status {
        self.inner.status()
    }

    /// Stop handing out connections. Idle connections are dropped.
    pub fn close(&self) {
        self.inner.close();
    }
}

async fn checkout(pool: &deadpool::managed::Pool<Manager>) -> crate::Result<Object<Manager>> {
    pool.get().await.map_err(|err| match err {
        // Driver errors pass through untouched
        PoolError::Backend(err) => err,
        err => Error::connection_pool(err),
    })
}

/// Make sure at least `count` connections sit idle in the pool. Every one of
/// them is held at once so that missing ones are opened rather than the same
/// idle connection being handed out repeatedly.
async fn fill(pool: &deadpool::managed::Pool<Manager>, count: usize) -> crate::Result<()> {
    let mut held = Vec::with_capacity(count);
    for _ in 0..count {
        held.push(checkout(pool).await?);
    }
    Ok(())
}

#[derive(Debug)]
struct Manager {
    driver: Box<dyn Driver>,
}

impl deadpool::managed::Manager for Manager {
    type Type = Box<dyn Connection>;
    type Error = crate::Error;

    async fn create(&self) -> Result<Self::Type, Self::Error> {
        self.driver.connect().await
    }

    async fn recycle(
        &self,
        _obj: &mut Self::Type,
        _metrics: &deadpool::managed::Metrics,
    ) -> deadpool::managed::RecycleResult<Self::Error> {
        Ok(())
    }
}

/// A connection retrieved from a pool.
///
/// When dropped, the connection is returned to the pool for reuse.
pub struct PoolConnection {
    inner: Object<Manager>,
    pool: deadpool::managed::Pool<Manager>,

    /// Idle connections in the pool when this one was checked out
    idle: usize,
}

impl PoolConnection {
    /// Close the connection instead of returning it to the pool, then open a
    /// replacement so the pool holds as many idle connections as it did
    /// before this one was checked out.
    pub async fn close(self) -> crate::Result<()> {
        let Self { inner, pool, idle } = self;

        let closed = Object::take(inner).close().await;
        fill(&pool, idle).await?;

        tracing::debug!(status = ?pool.status(), "closed pooled connection");
        closed
    }
}

impl Deref for PoolConnection {
    type Target = Box<dyn Connection>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PoolConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
