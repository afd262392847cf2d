//! Connection configuration
//!
//! A [`ConnectionConfig`] is supplied once at connect time. Required keys are
//! driver-dependent: sqlite needs a database path (or `:memory:`), mysql
//! additionally needs host and user credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OrmError, OrmResult};

/// Supported database drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Sqlite,
    Mysql,
}

impl Driver {
    /// Resolve a driver from its configured name.
    pub fn from_name(name: &str) -> OrmResult<Self> {
        match name {
            "sqlite" => Ok(Driver::Sqlite),
            "mysql" => Ok(Driver::Mysql),
            other => Err(OrmError::Connection(format!(
                "unsupported driver `{other}`"
            ))),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Driver::Sqlite => write!(f, "sqlite"),
            Driver::Mysql => write!(f, "mysql"),
        }
    }
}

/// Connection settings for a [`Database`](crate::Database) context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub driver: Driver,
    /// Database path (sqlite) or name (mysql)
    pub database: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    /// Enables the query log while this connection is live
    #[serde(default)]
    pub debug: bool,
}

impl ConnectionConfig {
    /// Sqlite configuration for the given path, or `:memory:`.
    pub fn sqlite(database: impl Into<String>) -> Self {
        Self {
            driver: Driver::Sqlite,
            database: database.into(),
            host: None,
            user: None,
            password: None,
            port: None,
            debug: false,
        }
    }

    /// Mysql configuration; the password defaults to empty.
    pub fn mysql(
        database: impl Into<String>,
        host: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            driver: Driver::Mysql,
            database: database.into(),
            host: Some(host.into()),
            user: Some(user.into()),
            password: None,
            port: None,
            debug: false,
        }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Check the required keys for the configured driver.
    pub(crate) fn validate(&self) -> OrmResult<()> {
        if self.database.is_empty() {
            return Err(OrmError::Connection(format!(
                "driver `{}` requires a `database` setting",
                self.driver
            )));
        }
        if self.driver == Driver::Mysql {
            if self.host.as_deref().unwrap_or("").is_empty() {
                return Err(OrmError::Connection(
                    "driver `mysql` requires a `host` setting".to_string(),
                ));
            }
            if self.user.as_deref().unwrap_or("").is_empty() {
                return Err(OrmError::Connection(
                    "driver `mysql` requires a `user` setting".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Read-only snapshot of the live connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub driver: Driver,
    pub database: String,
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_driver_name_is_rejected() {
        let err = Driver::from_name("oracle").unwrap_err();
        assert!(matches!(err, OrmError::Connection(_)));
    }

    #[test]
    fn sqlite_requires_database() {
        let config = ConnectionConfig::sqlite("");
        assert!(config.validate().is_err());
        assert!(ConnectionConfig::sqlite(":memory:").validate().is_ok());
    }

    #[test]
    fn mysql_requires_host_and_user() {
        let mut config = ConnectionConfig::mysql("app", "localhost", "root");
        assert!(config.validate().is_ok());

        config.host = None;
        assert!(config.validate().is_err());

        config.host = Some("localhost".to_string());
        config.user = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserializes_from_plain_mapping() {
        let config: ConnectionConfig = serde_json::from_str(
            r#"{"driver": "sqlite", "database": ":memory:", "debug": true}"#,
        )
        .unwrap();
        assert_eq!(config.driver, Driver::Sqlite);
        assert!(config.debug);
        assert!(config.host.is_none());
    }
}
