//! Materialized records
//!
//! A [`Record`] is one row bound to its owning table and primary key. Fields
//! mutate in place; `save` persists as INSERT (no identity) or UPDATE of the
//! changed columns (existing identity) and re-syncs from the stored row
//! afterward.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::database::Database;
use crate::error::{OrmError, OrmResult};
use crate::query::sql::quote_identifier;
use crate::value::Row;

/// One table row with identity, field access, mutation, and persistence
#[derive(Debug)]
pub struct Record<'a> {
    db: &'a Database,
    table: String,
    primary_key: String,
    fields: Row,
    dirty: BTreeSet<String>,
    persisted: bool,
}

impl<'a> Record<'a> {
    /// A new identity-less record, ready for field assignment and `save`.
    pub(crate) fn new(db: &'a Database, table: &str, primary_key: &str) -> Self {
        Self {
            db,
            table: table.to_string(),
            primary_key: primary_key.to_string(),
            fields: Row::new(),
            dirty: BTreeSet::new(),
            persisted: false,
        }
    }

    pub(crate) fn from_row(db: &'a Database, table: &str, primary_key: &str, fields: Row) -> Self {
        let persisted = fields
            .get(primary_key)
            .is_some_and(|value| !value.is_null());
        Self {
            db,
            table: table.to_string(),
            primary_key: primary_key.to_string(),
            fields,
            dirty: BTreeSet::new(),
            persisted,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// The primary-key value, when the record has an identity.
    pub fn id(&self) -> Option<i64> {
        self.fields.get(&self.primary_key).and_then(Value::as_i64)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    /// All fields as an ordered column-to-value map.
    pub fn as_map(&self) -> &Row {
        &self.fields
    }

    /// Assign a field and mark it changed.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(field.to_string(), value.into());
        self.dirty.insert(field.to_string());
        self
    }

    /// Persist the record: INSERT when it has no identity, otherwise UPDATE
    /// of the changed columns by primary key. Fields and identity re-sync
    /// from the stored row. Saving a persisted record with no changes is a
    /// no-op.
    pub fn save(&mut self) -> OrmResult<()> {
        if self.persisted {
            if self.dirty.is_empty() {
                return Ok(());
            }
            let pk_value = self.require_identity()?;
            let assignments: Vec<String> = self
                .dirty
                .iter()
                .map(|column| format!("{} = ?", quote_identifier(column)))
                .collect();
            let sql = format!(
                "UPDATE {} SET {} WHERE {} = ?",
                quote_identifier(&self.table),
                assignments.join(", "),
                quote_identifier(&self.primary_key),
            );
            let mut params: Vec<Value> = self
                .dirty
                .iter()
                .map(|column| self.fields.get(column).cloned().unwrap_or(Value::Null))
                .collect();
            params.push(pk_value);
            self.db.run_execute(&sql, &params)?;
        } else if self.fields.is_empty() {
            let sql = format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(&self.table));
            let id = self.db.run_insert(&sql, &[])?;
            self.fields.insert(self.primary_key.clone(), Value::from(id));
        } else {
            let columns: Vec<String> = self.fields.keys().cloned().collect();
            let quoted: Vec<String> = columns
                .iter()
                .map(|column| quote_identifier(column))
                .collect();
            let placeholders = vec!["?"; columns.len()].join(", ");
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({placeholders})",
                quote_identifier(&self.table),
                quoted.join(", "),
            );
            let params: Vec<Value> = columns
                .iter()
                .map(|column| self.fields.get(column).cloned().unwrap_or(Value::Null))
                .collect();
            let id = self.db.run_insert(&sql, &params)?;
            if !self.fields.contains_key(&self.primary_key) {
                self.fields.insert(self.primary_key.clone(), Value::from(id));
            }
        }
        self.refresh()
    }

    /// Delete the stored row by primary key; `true` when a row was removed.
    pub fn delete(&self) -> OrmResult<bool> {
        let pk_value = self.require_identity()?;
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            quote_identifier(&self.table),
            quote_identifier(&self.primary_key),
        );
        let affected = self.db.run_execute(&sql, &[pk_value])?;
        Ok(affected > 0)
    }

    fn refresh(&mut self) -> OrmResult<()> {
        let pk_value = self.require_identity()?;
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ? LIMIT 1",
            quote_identifier(&self.table),
            quote_identifier(&self.primary_key),
        );
        let mut rows = self.db.run_query(&sql, &[pk_value])?;
        if !rows.is_empty() {
            self.fields = rows.remove(0);
            self.persisted = true;
        }
        self.dirty.clear();
        Ok(())
    }

    fn require_identity(&self) -> OrmResult<Value> {
        self.fields
            .get(&self.primary_key)
            .filter(|value| !value.is_null())
            .cloned()
            .ok_or_else(|| {
                OrmError::QueryBuild(format!(
                    "record on `{}` has no `{}` identity",
                    self.table, self.primary_key
                ))
            })
    }
}
