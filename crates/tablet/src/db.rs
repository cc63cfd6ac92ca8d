mod builder;
mod config;
mod connect;
mod pool;

pub use builder::Builder;
pub use config::Config;
pub use connect::*;
pub use pool::*;

use crate::{DefaultPolicy, FindAll, Model, Record, Result};

use tablet_core::{
    driver::{
        operation::{Execute, Query, Transaction},
        Connection,
    },
    stmt::{Row, Value},
    Schema,
};

use std::sync::Arc;

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    pub(crate) pool: Pool,
    pub(crate) policy: DefaultPolicy,

    /// Schemas of registered models
    pub(crate) schemas: Vec<&'static Schema>,
}

/// A database handle: a connection pool plus the settings the model
/// operations need. Clones share the pool.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Run a statement that returns rows.
    ///
    /// At most `row_limit` rows are fetched; `None` fetches all of them.
    pub async fn select(
        &self,
        sql: &str,
        args: Vec<Value>,
        row_limit: Option<usize>,
    ) -> Result<Vec<Row>> {
        log(sql, &args);

        let mut conn = self.shared.pool.get().await?;
        let res = conn
            .exec(Query::new(sql, args).limit(row_limit).into())
            .await
            .and_then(|response| response.rows.into_values());

        if let Err(err) = &res {
            tracing::error!(%err, "select failed");
        }

        res
    }

    /// Run a statement that modifies rows and return the affected row count.
    ///
    /// When `autocommit` is false the statement runs in an explicit
    /// transaction, and the connection is closed afterwards instead of being
    /// returned to the pool. The pool opens a replacement, so its idle count
    /// is the same as before the call.
    pub async fn execute(&self, sql: &str, args: Vec<Value>, autocommit: bool) -> Result<u64> {
        log(sql, &args);

        let mut conn = self.shared.pool.get().await?;

        let res = if autocommit {
            exec_count(&mut **conn, sql, args).await
        } else {
            let res = exec_in_transaction(&mut **conn, sql, args).await;

            if let Err(err) = conn.close().await {
                tracing::warn!(%err, "failed to close connection");
            }

            res
        };

        match &res {
            Ok(count) => tracing::info!("affected rows {count}"),
            Err(err) => tracing::error!(%err, "execute failed"),
        }

        res
    }

    /// Load the instance whose primary key is `pk`.
    pub async fn find<M: Model>(&self, pk: impl Into<Value>) -> Result<Option<M>> {
        let schema = M::schema()?;
        let sql = format!(
            "{} where `{}` = ?",
            schema.templates.select, schema.primary_key
        );

        let mut rows = self.select(&sql, vec![pk.into()], Some(1)).await?;

        match rows.pop() {
            Some(row) => Ok(Some(M::load(Record::from(row))?)),
            None => Ok(None),
        }
    }

    /// Load every instance matching `query`.
    pub async fn find_all<M: Model>(&self, query: FindAll) -> Result<Vec<M>> {
        let schema = M::schema()?;
        let (sql, args) = query.build(&schema.templates.select)?;

        self.select(&sql, args, None)
            .await?
            .into_iter()
            .map(|row| M::load(Record::from(row)))
            .collect()
    }

    /// Evaluate a single expression over the model's table, such as
    /// `count(id)`. `select_field` is used verbatim.
    pub async fn find_number<M: Model>(
        &self,
        select_field: &str,
        filter: Option<&str>,
        args: Vec<Value>,
    ) -> Result<Option<Value>> {
        let schema = M::schema()?;

        let mut sql = format!(
            "select {select_field} as __num__ from `{}`",
            schema.table_name
        );
        if let Some(filter) = filter {
            sql.push_str(" where ");
            sql.push_str(filter);
        }

        let mut rows = self.select(&sql, args, Some(1)).await?;
        Ok(rows.pop().and_then(|mut row| row.take("__num__")))
    }

    /// Insert `model`, writing any substituted defaults back onto it.
    pub async fn save<M: Model>(&self, model: &mut M) -> Result<()> {
        let schema = M::schema()?;
        let mut record = model.record();
        let args = self.resolve_defaults(schema, &mut record, schema.columns());

        *model = M::load(record)?;

        let rows = self.execute(&schema.templates.insert, args, true).await?;
        if rows != 1 {
            tracing::warn!(
                "failed insert into table {}, affected rows: {rows}",
                schema.table_name
            );
        }

        Ok(())
    }

    /// Update the row keyed by `model`'s primary key.
    pub async fn update<M: Model>(&self, model: &mut M) -> Result<()> {
        let schema = M::schema()?;
        let mut record = model.record();
        let args = self.resolve_defaults(schema, &mut record, schema.columns());

        *model = M::load(record)?;

        let rows = self.execute(&schema.templates.update, args, true).await?;
        if rows != 1 {
            tracing::warn!(
                "failed to update table {}, affected rows: {rows}",
                schema.table_name
            );
        }

        Ok(())
    }

    /// Delete the row keyed by `model`'s primary key.
    pub async fn remove<M: Model>(&self, model: &mut M) -> Result<()> {
        let schema = M::schema()?;
        let mut record = model.record();
        let args = self.resolve_defaults(
            schema,
            &mut record,
            std::iter::once(schema.primary_key.as_str()),
        );

        *model = M::load(record)?;

        let rows = self.execute(&schema.templates.delete, args, true).await?;
        if rows != 1 {
            tracing::warn!(
                "failed to delete a row from table {}, affected rows: {rows}",
                schema.table_name
            );
        }

        Ok(())
    }

    /// Creates the tables of all registered models that do not exist yet.
    pub async fn push_schema(&self) -> Result<()> {
        for schema in &self.shared.schemas {
            self.execute(&schema.templates.create_table, vec![], true)
                .await?;
        }

        Ok(())
    }

    /// Size and idle count of the connection pool.
    pub fn pool_status(&self) -> Status {
        self.shared.pool.status()
    }

    /// Schemas of the registered models, in registration order.
    pub fn schemas(&self) -> &[&'static Schema] {
        &self.shared.schemas
    }

    pub fn pool(&self) -> &Pool {
        &self.shared.pool
    }

    pub fn default_policy(&self) -> DefaultPolicy {
        self.shared.policy
    }

    /// Look up the value of each named field, substituting its declared
    /// default where the policy asks for one. Substituted values are written
    /// into `record`.
    fn resolve_defaults<'a>(
        &self,
        schema: &Schema,
        record: &mut Record,
        names: impl Iterator<Item = &'a str>,
    ) -> Vec<Value> {
        let policy = self.shared.policy;

        names
            .map(|name| {
                if policy.wants_default(record.get(name)) {
                    let value = schema.mapping[name].resolve_default();
                    tracing::info!("using default key: {name} value: {value}");
                    record.insert(name, value.clone());
                    value
                } else {
                    record.get(name).cloned().unwrap_or_default()
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("pool", &self.shared.pool)
            .field("policy", &self.shared.policy)
            .field("models", &self.shared.schemas.len())
            .finish()
    }
}

fn log(sql: &str, args: &[Value]) {
    tracing::info!(?args, "SQL: {sql}");
}

async fn exec_count(conn: &mut dyn Connection, sql: &str, args: Vec<Value>) -> Result<u64> {
    conn.exec(Execute::new(sql, args).into())
        .await?
        .rows
        .into_count()
}

async fn exec_in_transaction(
    conn: &mut dyn Connection,
    sql: &str,
    args: Vec<Value>,
) -> Result<u64> {
    conn.exec(Transaction::Start.into()).await?;
    let count = exec_count(conn, sql, args).await?;
    conn.exec(Transaction::Commit.into()).await?;
    Ok(count)
}
