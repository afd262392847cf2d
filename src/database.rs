//! Connection context
//!
//! A [`Database`] owns at most one live connection, its configuration
//! snapshot, and the query log. It is an explicit value — construct one,
//! connect it, pass it around — rather than process-wide state. Statements
//! serialize behind a mutex; there is no overlapping-query concurrency
//! within one context.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, ToSql};
use serde_json::Value;

use crate::config::{ConnectionConfig, ConnectionInfo, Driver};
use crate::error::{OrmError, OrmResult};
use crate::logger::{QueryLog, QueryLogEntry};
use crate::model::ModelDescriptor;
use crate::query::QueryBuilder;
use crate::value::{decode, Param, Row};

#[derive(Debug)]
struct ConnectionState {
    conn: Connection,
    info: ConnectionInfo,
    log: QueryLog,
}

/// Connection context: lifecycle, raw statement execution, query-builder
/// construction, and the diagnostics log
#[derive(Debug, Default)]
pub struct Database {
    state: Mutex<Option<ConnectionState>>,
}

/// Lock with poison recovery: a panic mid-statement must not wedge the
/// context for every later caller.
fn lock(mutex: &Mutex<Option<ConnectionState>>) -> MutexGuard<'_, Option<ConnectionState>> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("connection mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

impl Database {
    /// An empty context with no connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config and open the connection, replacing any existing
    /// one. The replaced connection's query log is dropped with it.
    pub fn connect(&self, config: ConnectionConfig) -> OrmResult<()> {
        config.validate()?;
        let conn = match config.driver {
            Driver::Sqlite => Connection::open(&config.database)
                .map_err(|e| OrmError::Connection(format!("sqlite open failed: {e}")))?,
            Driver::Mysql => {
                return Err(OrmError::Connection(
                    "driver `mysql` is not available in this build".to_string(),
                ))
            }
        };
        // Wait out short lock contention instead of failing with SQLITE_BUSY
        let _ = conn.pragma_update(None, "busy_timeout", "5000");

        tracing::debug!(driver = %config.driver, database = %config.database, "connected");
        let info = ConnectionInfo {
            driver: config.driver,
            database: config.database,
            debug: config.debug,
        };
        *lock(&self.state) = Some(ConnectionState {
            conn,
            log: QueryLog::new(config.debug),
            info,
        });
        Ok(())
    }

    /// Release the connection and clear the query log. A no-op when not
    /// connected.
    pub fn disconnect(&self) {
        *lock(&self.state) = None;
    }

    /// Snapshot of the live connection; `None` when disconnected. Pure
    /// read — never connects implicitly.
    pub fn connection(&self) -> Option<ConnectionInfo> {
        lock(&self.state).as_ref().map(|state| state.info.clone())
    }

    pub fn is_connected(&self) -> bool {
        lock(&self.state).is_some()
    }

    /// A fresh query builder for `table`, with the default `id` primary key
    /// and no declared relations.
    pub fn table(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder::new(self, ModelDescriptor::new(table))
    }

    /// A fresh query builder carrying the model's declared relations, for
    /// `join_to` / `join_through`.
    pub fn model(&self, descriptor: &ModelDescriptor) -> QueryBuilder<'_> {
        QueryBuilder::new(self, descriptor.clone())
    }

    /// Execute a raw statement with named parameters (`:name`); returns the
    /// affected-row count.
    pub fn execute(&self, sql: &str, params: &[(&str, Value)]) -> OrmResult<usize> {
        self.with_state(|state| {
            tracing::debug!(sql = %sql, "executing statement");
            let affected = {
                let mut stmt = state
                    .conn
                    .prepare(sql)
                    .map_err(|e| OrmError::execution(e, sql))?;
                let keys: Vec<String> = params.iter().map(|(k, _)| named_key(k)).collect();
                let bound: Vec<(&str, Param<'_>)> = keys
                    .iter()
                    .zip(params.iter())
                    .map(|(key, (_, value))| (key.as_str(), Param(value)))
                    .collect();
                let refs: Vec<(&str, &dyn ToSql)> = bound
                    .iter()
                    .map(|(key, value)| (*key, value as &dyn ToSql))
                    .collect();
                stmt.execute(refs.as_slice())
                    .map_err(|e| OrmError::execution(e, sql))?
            };
            state.log.record_named(sql, params);
            Ok(affected)
        })
    }

    /// Run a raw query with named parameters (`:name`); returns mapped rows.
    pub fn query(&self, sql: &str, params: &[(&str, Value)]) -> OrmResult<Vec<Row>> {
        self.with_state(|state| {
            tracing::debug!(sql = %sql, "executing query");
            let rows = {
                let mut stmt = state
                    .conn
                    .prepare(sql)
                    .map_err(|e| OrmError::execution(e, sql))?;
                let keys: Vec<String> = params.iter().map(|(k, _)| named_key(k)).collect();
                let bound: Vec<(&str, Param<'_>)> = keys
                    .iter()
                    .zip(params.iter())
                    .map(|(key, (_, value))| (key.as_str(), Param(value)))
                    .collect();
                let refs: Vec<(&str, &dyn ToSql)> = bound
                    .iter()
                    .map(|(key, value)| (*key, value as &dyn ToSql))
                    .collect();
                collect_rows(&mut stmt, refs.as_slice(), sql)?
            };
            state.log.record_named(sql, params);
            Ok(rows)
        })
    }

    /// Most recent display-rendered statement, while the debug flag is set.
    pub fn last_query(&self) -> Option<String> {
        lock(&self.state)
            .as_ref()
            .and_then(|state| state.log.last().map(|entry| entry.query.clone()))
    }

    /// Most recent log entry: statement text plus bound parameters.
    pub fn last_statement(&self) -> Option<QueryLogEntry> {
        lock(&self.state)
            .as_ref()
            .and_then(|state| state.log.last().cloned())
    }

    /// The full ordered query log for the current connection.
    pub fn query_log(&self) -> Vec<QueryLogEntry> {
        lock(&self.state)
            .as_ref()
            .map(|state| state.log.entries().to_vec())
            .unwrap_or_default()
    }

    pub(crate) fn run_query(&self, sql: &str, params: &[Value]) -> OrmResult<Vec<Row>> {
        self.with_state(|state| {
            tracing::debug!(sql = %sql, "executing query");
            let rows = {
                let mut stmt = state
                    .conn
                    .prepare(sql)
                    .map_err(|e| OrmError::execution(e, sql))?;
                collect_rows(
                    &mut stmt,
                    rusqlite::params_from_iter(params.iter().map(Param)),
                    sql,
                )?
            };
            state.log.record(sql, params);
            Ok(rows)
        })
    }

    pub(crate) fn run_execute(&self, sql: &str, params: &[Value]) -> OrmResult<usize> {
        self.with_state(|state| {
            tracing::debug!(sql = %sql, "executing statement");
            let affected = {
                let mut stmt = state
                    .conn
                    .prepare(sql)
                    .map_err(|e| OrmError::execution(e, sql))?;
                stmt.execute(rusqlite::params_from_iter(params.iter().map(Param)))
                    .map_err(|e| OrmError::execution(e, sql))?
            };
            state.log.record(sql, params);
            Ok(affected)
        })
    }

    /// Like `run_execute`, returning the rowid assigned by an INSERT.
    pub(crate) fn run_insert(&self, sql: &str, params: &[Value]) -> OrmResult<i64> {
        self.with_state(|state| {
            tracing::debug!(sql = %sql, "executing statement");
            {
                let mut stmt = state
                    .conn
                    .prepare(sql)
                    .map_err(|e| OrmError::execution(e, sql))?;
                stmt.execute(rusqlite::params_from_iter(params.iter().map(Param)))
                    .map_err(|e| OrmError::execution(e, sql))?;
            }
            state.log.record(sql, params);
            Ok(state.conn.last_insert_rowid())
        })
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ConnectionState) -> OrmResult<R>) -> OrmResult<R> {
        let mut guard = lock(&self.state);
        let state = guard
            .as_mut()
            .ok_or_else(|| OrmError::Connection("no active connection".to_string()))?;
        f(state)
    }
}

fn named_key(name: &str) -> String {
    if name.starts_with(':') {
        name.to_string()
    } else {
        format!(":{name}")
    }
}

fn collect_rows<P: rusqlite::Params>(
    stmt: &mut rusqlite::Statement<'_>,
    params: P,
    sql: &str,
) -> OrmResult<Vec<Row>> {
    let columns: Vec<String> = stmt.column_names().iter().map(|c| (*c).to_string()).collect();
    let mut rows = stmt.query(params).map_err(|e| OrmError::execution(e, sql))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(|e| OrmError::execution(e, sql))? {
        let mut mapped = Row::new();
        for (i, name) in columns.iter().enumerate() {
            let value = row.get_ref(i).map_err(|e| OrmError::execution(e, sql))?;
            mapped.insert(name.clone(), decode(value));
        }
        out.push(mapped);
    }
    Ok(out)
}
