//! Model descriptors
//!
//! A [`ModelDescriptor`] is the single source of truth for relation-based
//! joins: a table name, its primary-key column, and a map from related-table
//! name to the key column that connects the two. Descriptors are plain data,
//! consumed by the join resolver — never inspected via reflection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-model declaration of table, primary key, and joinable relations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    table: String,
    primary_key: String,
    relations: BTreeMap<String, String>,
}

impl ModelDescriptor {
    /// A descriptor for `table` with the default `id` primary key and no
    /// declared relations.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key: "id".to_string(),
            relations: BTreeMap::new(),
        }
    }

    /// Override the primary-key column.
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Declare the key column connecting this model with `table`.
    pub fn relation(mut self, table: impl Into<String>, key_column: impl Into<String>) -> Self {
        self.relations.insert(table.into(), key_column.into());
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn primary_key_name(&self) -> &str {
        &self.primary_key
    }

    /// The declared key column for `table`, if any.
    pub fn relation_key(&self, table: &str) -> Option<&str> {
        self.relations.get(table).map(String::as_str)
    }
}
