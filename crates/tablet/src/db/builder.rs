use super::{Config, Connect, Db, Pool, PoolConfig, Shared};
use crate::{DefaultPolicy, Model, Result};

use tablet_core::{driver::Driver, err, Error, Schema};

use std::sync::Arc;

/// A model type registered with the builder.
struct Registered {
    type_name: &'static str,
    schema: fn() -> Result<&'static Schema>,
}

#[derive(Default)]
pub struct Builder {
    models: Vec<Registered>,

    /// Connection settings, when connecting from a [`Config`]
    config: Option<Config>,

    pool: PoolConfig,

    policy: DefaultPolicy,
}

impl Builder {
    /// Register a model. Its schema is derived and checked when the
    /// database is built, and [`Db::push_schema`] creates its table.
    pub fn register<T: Model>(&mut self) -> &mut Self {
        self.models.push(Registered {
            type_name: std::any::type_name::<T>(),
            schema: T::schema,
        });
        self
    }

    /// Connection settings. The pool sizes apply to every connect method;
    /// the rest is used by [`Builder::connect_with_config`].
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.pool = config.pool();
        self.config = Some(config);
        self
    }

    pub fn pool(&mut self, pool: PoolConfig) -> &mut Self {
        self.pool = pool;
        self
    }

    pub fn default_policy(&mut self, policy: DefaultPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    /// Connect using the URL rendered from the [`Config`] given to
    /// [`Builder::config`].
    pub async fn connect_with_config(&mut self) -> Result<Db> {
        let Some(config) = &self.config else {
            return Err(Error::invalid_connection_url("no connection config given"));
        };
        let url = config.to_url()?;
        self.connect(&url).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let schemas = self
            .models
            .iter()
            .map(|model| {
                (model.schema)()
                    .map_err(|e| e.context(err!("invalid model `{}`", model.type_name)))
            })
            .collect::<Result<Vec<_>>>()?;

        let pool = Pool::new(driver, self.pool.clone()).await?;

        Ok(Db {
            shared: Arc::new(Shared {
                pool,
                policy: self.policy,
                schemas,
            }),
        })
    }
}
