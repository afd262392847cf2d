//! Fluent query builder: criteria accumulation, joins, rendering, and
//! terminal operations

pub mod builder;
pub mod criteria;
pub mod execution;
pub mod joins;
pub mod select;
pub mod sql;
pub mod types;

pub use builder::QueryBuilder;
pub use types::{raw, Criterion, JoinKind, JoinSpec, Operand, Operator, OrderDirection, RawExpr, SelectField};
