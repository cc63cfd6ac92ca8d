mod value;
pub(crate) use value::Value;

use mysql_async::{prelude::Queryable, Conn, Opts, OptsBuilder};
use std::borrow::Cow;
use tablet_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    stmt::Row,
    Error, Result,
};
use tablet_sql::Serializer;
use url::Url;

/// Connection settings that are not part of the MySQL URL syntax and are
/// applied with `SET` statements once a connection is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub charset: String,
    pub autocommit: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            charset: "utf8".to_string(),
            autocommit: true,
        }
    }
}

impl Session {
    fn init(&self) -> Vec<String> {
        vec![
            format!("SET NAMES {}", self.charset),
            format!("SET autocommit={}", self.autocommit as u8),
        ]
    }
}

#[derive(Debug)]
pub struct MySQL {
    url: Url,
    opts: Opts,
    session: Session,
}

impl MySQL {
    /// Create a driver from a `mysql://` URL.
    ///
    /// `charset` and `autocommit` query parameters are accepted on top of
    /// the ones `mysql_async` understands.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let mut url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "mysql" {
            return Err(Error::invalid_connection_url(format!(
                "connection url does not have a `mysql` scheme; url={url_str}"
            )));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(Error::invalid_connection_url(format!(
                "missing host in connection URL; url={url_str}"
            )));
        }

        if url.path().trim_start_matches('/').is_empty() {
            return Err(Error::invalid_connection_url(format!(
                "no database specified - missing path in connection URL; url={url_str}"
            )));
        }

        let mut session = Session::default();
        let mut rest = vec![];

        for (key, value) in url.query_pairs() {
            match &*key {
                "charset" => session.charset = value.into_owned(),
                "autocommit" => {
                    session.autocommit = match &*value {
                        "true" | "1" => true,
                        "false" | "0" => false,
                        _ => {
                            return Err(Error::invalid_connection_url(format!(
                                "invalid autocommit value `{value}`; url={url_str}"
                            )))
                        }
                    }
                }
                _ => rest.push((key.into_owned(), value.into_owned())),
            }
        }

        if rest.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(rest);
        }

        let opts = Opts::from_url(url.as_str())
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        Ok(Self { url, opts, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[async_trait]
impl Driver for MySQL {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.url.as_str())
    }

    async fn connect(&self) -> Result<Box<dyn tablet_core::driver::Connection>> {
        let opts = OptsBuilder::from_opts(self.opts.clone()).init(self.session.init());

        let conn = Conn::new(opts)
            .await
            .map_err(Error::driver_operation_failed)?;

        tracing::debug!(url = %self.url(), "opened mysql connection");
        Ok(Box::new(Connection::new(conn)))
    }
}

#[derive(Debug)]
pub struct Connection {
    conn: Conn,
}

impl Connection {
    pub fn new(conn: Conn) -> Self {
        Self { conn }
    }

    async fn query(
        &mut self,
        sql: &str,
        params: mysql_async::Params,
        limit: Option<usize>,
    ) -> Result<Vec<Row>> {
        let statement = self
            .conn
            .prep(sql)
            .await
            .map_err(Error::driver_operation_failed)?;

        let mut result = self
            .conn
            .exec_iter(&statement, params)
            .await
            .map_err(Error::driver_operation_failed)?;

        let mut ret: Vec<Row> = vec![];

        while limit.map_or(true, |limit| ret.len() < limit) {
            let Some(mut row) = result
                .next()
                .await
                .map_err(Error::driver_operation_failed)?
            else {
                break;
            };

            let columns = row.columns();
            let mut record = Row::with_capacity(columns.len());

            for (index, column) in columns.iter().enumerate() {
                let value: Option<mysql_async::Value> = row.take(index);
                record.insert(column.name_str(), Value::from_sql(value).into_inner());
            }

            ret.push(record);
        }

        // Discard whatever the row limit left unread
        result
            .drop_result()
            .await
            .map_err(Error::driver_operation_failed)?;

        Ok(ret)
    }

    async fn execute(&mut self, sql: &str, params: mysql_async::Params) -> Result<u64> {
        let statement = self
            .conn
            .prep(sql)
            .await
            .map_err(Error::driver_operation_failed)?;

        self.conn
            .exec_drop(&statement, params)
            .await
            .map_err(Error::driver_operation_failed)?;

        Ok(self.conn.affected_rows())
    }
}

impl From<Conn> for Connection {
    fn from(conn: Conn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl tablet_core::driver::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        let serializer = Serializer::mysql();

        match op {
            Operation::Query(op) => {
                let sql = serializer.serialize(&op.sql);
                let params = Value::params(op.params)?;
                let rows = self.query(&sql, params, op.limit).await?;
                Ok(Response::values(rows))
            }
            Operation::Execute(op) => {
                let sql = serializer.serialize(&op.sql);
                let params = Value::params(op.params)?;
                let count = self.execute(&sql, params).await?;
                Ok(Response::count(count))
            }
            Operation::Transaction(op) => {
                self.conn
                    .query_drop(serializer.serialize_transaction(op))
                    .await
                    .map_err(Error::driver_operation_failed)?;
                Ok(Response::count(0))
            }
        }
    }

    async fn close(self: Box<Self>) -> Result<()> {
        tracing::debug!("closing mysql connection");
        self.conn
            .disconnect()
            .await
            .map_err(Error::driver_operation_failed)
    }
}
