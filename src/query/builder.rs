//! Query builder state and construction
//!
//! Each builder instance owns its state exclusively: projections, criteria,
//! joins, grouping, ordering, and pagination accumulate in call order. A
//! builder is meant for one logical query — construct a fresh one per
//! terminal operation rather than reusing the state.

use crate::database::Database;
use crate::model::ModelDescriptor;

use super::types::{CriteriaGroup, JoinSpec, OrderDirection, SelectField};

/// Fluent query builder bound to one table (or model) and one [`Database`]
/// context
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    pub(crate) db: &'a Database,
    pub(crate) descriptor: ModelDescriptor,
    pub(crate) select_fields: Vec<SelectField>,
    pub(crate) criteria_groups: Vec<CriteriaGroup>,
    pub(crate) joins: Vec<JoinSpec>,
    /// Descriptors of joined tables, in join order; bridges for `join_through`
    pub(crate) joined: Vec<ModelDescriptor>,
    /// Joined tables excluded from the default projection
    pub(crate) hidden_joins: Vec<String>,
    pub(crate) group_by: Vec<String>,
    pub(crate) order_by: Vec<(String, OrderDirection)>,
    pub(crate) limit: Option<i64>,
    pub(crate) offset: Option<i64>,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(db: &'a Database, descriptor: ModelDescriptor) -> Self {
        Self {
            db,
            descriptor,
            select_fields: Vec::new(),
            criteria_groups: Vec::new(),
            joins: Vec::new(),
            joined: Vec::new(),
            hidden_joins: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// The table this builder queries.
    pub fn table_name(&self) -> &str {
        self.descriptor.table()
    }

    /// The descriptor this builder was constructed with.
    pub fn descriptor(&self) -> &ModelDescriptor {
        &self.descriptor
    }
}
