use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use url::Url;

/// Connection settings, typically deserialized from an application config
/// file.
///
/// Only `db`, `user` and `password` are required; everything else falls back
/// to the MySQL defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::scheme")]
    pub scheme: String,

    #[serde(default = "defaults::host")]
    pub host: String,

    #[serde(default = "defaults::port")]
    pub port: u16,

    pub db: String,

    pub user: String,

    pub password: String,

    #[serde(default = "defaults::charset")]
    pub charset: String,

    /// Session autocommit mode for every pooled connection
    #[serde(default = "defaults::autocommit")]
    pub autocommit: bool,

    /// Connections opened when the pool is built
    #[serde(default = "defaults::min_size")]
    pub min_size: usize,

    #[serde(default = "defaults::max_size")]
    pub max_size: usize,
}

mod defaults {
    pub(super) fn scheme() -> String {
        "mysql".to_string()
    }

    pub(super) fn host() -> String {
        "localhost".to_string()
    }

    pub(super) fn port() -> u16 {
        3306
    }

    pub(super) fn charset() -> String {
        "utf8".to_string()
    }

    pub(super) fn autocommit() -> bool {
        true
    }

    pub(super) fn min_size() -> usize {
        1
    }

    pub(super) fn max_size() -> usize {
        10
    }
}

impl Config {
    pub fn new(db: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            scheme: defaults::scheme(),
            host: defaults::host(),
            port: defaults::port(),
            db: db.into(),
            user: user.into(),
            password: password.into(),
            charset: defaults::charset(),
            autocommit: defaults::autocommit(),
            min_size: defaults::min_size(),
            max_size: defaults::max_size(),
        }
    }

    /// Render the connection URL the drivers understand.
    ///
    /// For SQLite, `db` is the database path (or `:memory:`) and the
    /// server settings are ignored.
    pub fn to_url(&self) -> Result<String> {
        match &self.scheme[..] {
            "mysql" => {
                let mut url = Url::parse(&format!("mysql://{}:{}", self.host, self.port))
                    .map_err(|err| self.invalid(err))?;

                url.set_username(&self.user)
                    .map_err(|_| self.invalid("cannot set user"))?;
                url.set_password(Some(&self.password))
                    .map_err(|_| self.invalid("cannot set password"))?;
                url.set_path(&self.db);
                url.query_pairs_mut()
                    .append_pair("charset", &self.charset)
                    .append_pair("autocommit", if self.autocommit { "true" } else { "false" });

                Ok(url.into())
            }
            "sqlite" => {
                let url = format!("sqlite:{}", self.db);
                Url::parse(&url).map_err(|err| self.invalid(err))?;
                Ok(url)
            }
            scheme => Err(Error::invalid_connection_url(format!(
                "unsupported database; scheme={scheme}"
            ))),
        }
    }

    /// Parse a connection URL. Settings the URL does not carry keep their
    /// defaults.
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

        match parsed.scheme() {
            "mysql" => {
                let mut config = Config::new(
                    parsed.path().trim_start_matches('/'),
                    parsed.username(),
                    parsed.password().unwrap_or_default(),
                );

                if let Some(host) = parsed.host_str() {
                    config.host = host.to_string();
                }

                if let Some(port) = parsed.port() {
                    config.port = port;
                }

                for (key, value) in parsed.query_pairs() {
                    match &*key {
                        "charset" => config.charset = value.into_owned(),
                        "autocommit" => config.autocommit = value == "true" || value == "1",
                        _ => {}
                    }
                }

                Ok(config)
            }
            "sqlite" => {
                let mut config = Config::new(parsed.path(), "", "");
                config.scheme = "sqlite".to_string();
                Ok(config)
            }
            scheme => Err(Error::invalid_connection_url(format!(
                "unsupported database; scheme={scheme}; url={url}"
            ))),
        }
    }

    pub fn pool(&self) -> super::PoolConfig {
        super::PoolConfig {
            min_size: self.min_size,
            max_size: self.max_size,
            ..Default::default()
        }
    }

    fn invalid(&self, err: impl std::fmt::Display) -> Error {
        Error::invalid_connection_url(format!(
            "{err}; host={} port={} db={}",
            self.host, self.port, self.db
        ))
    }
}
