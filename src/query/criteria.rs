//! Criteria accumulation
//!
//! Criteria chain with AND by default; an `or_criterias` group renders as one
//! parenthesized OR chain. Accumulation order is rendering order. Operator
//! text is parsed fail-fast — nothing reaches the engine on a bad operator.

use super::builder::QueryBuilder;
use super::types::{CriteriaGroup, Criterion, Operand};
use crate::error::OrmResult;

impl QueryBuilder<'_> {
    /// Append one filter condition, AND-combined with what came before.
    ///
    /// The operand may be a scalar (bound), a list (for `IN` / `NOT IN`),
    /// a column name (for `#=#`), `()` (for `NULL` / `NOT NULL`), or a
    /// [`raw`](crate::raw) expression rendered verbatim.
    pub fn criteria(
        &mut self,
        field: &str,
        operator: &str,
        operand: impl Into<Operand>,
    ) -> OrmResult<&mut Self> {
        let criterion = Criterion::new(field, operator, operand)?;
        self.criteria_groups.push(CriteriaGroup {
            any: false,
            items: vec![criterion],
        });
        Ok(self)
    }

    /// Append several conditions, all AND-combined.
    pub fn criterias(&mut self, items: impl IntoIterator<Item = Criterion>) -> &mut Self {
        for criterion in items {
            self.criteria_groups.push(CriteriaGroup {
                any: false,
                items: vec![criterion],
            });
        }
        self
    }

    /// Append one group of conditions, OR-combined with each other and
    /// AND-combined with the rest of the WHERE clause.
    pub fn or_criterias(&mut self, items: impl IntoIterator<Item = Criterion>) -> &mut Self {
        let items: Vec<Criterion> = items.into_iter().collect();
        if !items.is_empty() {
            self.criteria_groups.push(CriteriaGroup { any: true, items });
        }
        self
    }
}
