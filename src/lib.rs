//! # vela-orm: lightweight database abstraction layer
//!
//! A fluent, criteria-accumulating query builder over a single synchronous
//! connection: SQL rendering with parameter binding, relation-based join
//! resolution from declared model descriptors, row-to-record mapping with
//! persistence, and an ordered query log for diagnostics.
//!
//! ```no_run
//! use vela_orm::{ConnectionConfig, Database};
//!
//! # fn main() -> vela_orm::OrmResult<()> {
//! let db = Database::new();
//! db.connect(ConnectionConfig::sqlite(":memory:").debug(true))?;
//!
//! let mut events = db.table("events");
//! events.criteria("country", "=", "Ireland")?;
//! for event in events.get()? {
//!     println!("{:?}", event.get_str("title"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logger;
pub mod model;
pub mod query;
pub mod record;
pub mod value;

pub use config::{ConnectionConfig, ConnectionInfo, Driver};
pub use database::Database;
pub use error::{OrmError, OrmResult};
pub use logger::QueryLogEntry;
pub use model::ModelDescriptor;
pub use query::{raw, Criterion, JoinKind, Operand, Operator, OrderDirection, QueryBuilder, RawExpr};
pub use record::Record;
pub use value::Row;
