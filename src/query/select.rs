//! Projection, grouping, ordering, and pagination

use super::builder::QueryBuilder;
use super::types::{OrderDirection, SelectField};

impl QueryBuilder<'_> {
    /// Add projected columns; repeated calls append.
    ///
    /// Accepts bare column names and `(column, alias)` pairs; aliases carry
    /// through to the mapped record fields.
    pub fn select<I>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<SelectField>,
    {
        self.select_fields
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// Add one aliased column to the projection.
    pub fn select_as(&mut self, column: &str, alias: &str) -> &mut Self {
        self.select_fields.push(SelectField::from((column, alias)));
        self
    }

    /// Add a GROUP BY column; repeated calls append.
    pub fn group_by(&mut self, column: &str) -> &mut Self {
        self.group_by.push(column.to_string());
        self
    }

    /// Add an ORDER BY column; repeated calls append.
    pub fn order_by(&mut self, column: &str, direction: OrderDirection) -> &mut Self {
        self.order_by.push((column.to_string(), direction));
        self
    }

    /// Set the LIMIT; repeated calls replace.
    pub fn limit(&mut self, count: i64) -> &mut Self {
        self.limit = Some(count);
        self
    }

    /// Set the OFFSET; repeated calls replace.
    pub fn offset(&mut self, count: i64) -> &mut Self {
        self.offset = Some(count);
        self
    }
}
