//! Terminal operations
//!
//! Each terminal renders the accumulated state, executes it over the bound
//! [`Database`](crate::Database) context, and maps rows into records. Zero
//! matching rows is a normal outcome (`None` / empty), never an error.

use serde_json::Value;

use crate::error::OrmResult;
use crate::record::Record;

use super::builder::QueryBuilder;
use super::types::Operand;

impl<'a> QueryBuilder<'a> {
    /// Run the SELECT and map every row.
    pub fn get(&self) -> OrmResult<Vec<Record<'a>>> {
        self.fetch(None)
    }

    /// Run the SELECT with a trailing LIMIT override; the builder state is
    /// untouched.
    pub fn get_limit(&self, limit: i64) -> OrmResult<Vec<Record<'a>>> {
        self.fetch(Some(limit))
    }

    /// Run the SELECT with LIMIT 1; `None` when nothing matches.
    pub fn first(&self) -> OrmResult<Option<Record<'a>>> {
        Ok(self.fetch(Some(1))?.pop())
    }

    /// Shorthand: primary-key equality plus `first`.
    pub fn find_one(&mut self, id: i64) -> OrmResult<Option<Record<'a>>> {
        let primary_key = self.descriptor.primary_key_name().to_string();
        self.criteria(&primary_key, "=", id)?;
        self.first()
    }

    /// Shorthand: field equality plus `first`.
    pub fn find_one_by(
        &mut self,
        field: &str,
        value: impl Into<Operand>,
    ) -> OrmResult<Option<Record<'a>>> {
        self.criteria(field, "=", value)?;
        self.first()
    }

    /// `SELECT COUNT(*)` over the same FROM/JOIN/WHERE context.
    pub fn count(&self) -> OrmResult<i64> {
        let (sql, params) = self.render_count();
        let rows = self.db.run_query(&sql, &params)?;
        Ok(rows
            .first()
            .and_then(|row| row.get("count"))
            .and_then(Value::as_i64)
            .unwrap_or(0))
    }

    /// A new identity-less record bound to this builder's table.
    pub fn create(&self) -> Record<'a> {
        Record::new(
            self.db,
            self.descriptor.table(),
            self.descriptor.primary_key_name(),
        )
    }

    /// DELETE every row matching the accumulated WHERE context; returns the
    /// affected-row count.
    pub fn delete_all(&self) -> OrmResult<usize> {
        let (sql, params) = self.render_delete();
        self.db.run_execute(&sql, &params)
    }

    fn fetch(&self, limit_override: Option<i64>) -> OrmResult<Vec<Record<'a>>> {
        let (sql, params) = self.render_select(limit_override);
        let rows = self.db.run_query(&sql, &params)?;
        Ok(rows
            .into_iter()
            .map(|row| {
                Record::from_row(
                    self.db,
                    self.descriptor.table(),
                    self.descriptor.primary_key_name(),
                    row,
                )
            })
            .collect())
    }
}
