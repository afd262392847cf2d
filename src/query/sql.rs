//! SQL rendering
//!
//! Renders the accumulated builder state into statement text plus its
//! positionally-bound parameters. Identifiers are backtick-quoted part by
//! part (`users.id` → `` `users`.`id` ``); raw expressions pass through
//! verbatim and are never bound.

use serde_json::Value;

use super::builder::QueryBuilder;
use super::types::{CriteriaGroup, Criterion, JoinSpec, Operand, Operator};

/// Backtick-quote an identifier, handling `table.column` qualification and
/// leaving `*` bare.
pub(crate) fn quote_identifier(identifier: &str) -> String {
    identifier
        .split('.')
        .map(|part| {
            if part == "*" {
                part.to_string()
            } else {
                format!("`{part}`")
            }
        })
        .collect::<Vec<String>>()
        .join(".")
}

impl QueryBuilder<'_> {
    /// Render the SELECT for the current state. A `limit_override` applies
    /// at render time only, leaving the builder state untouched.
    pub(crate) fn render_select(&self, limit_override: Option<i64>) -> (String, Vec<Value>) {
        let mut sql = String::from("SELECT ");
        sql.push_str(&self.render_projection());
        sql.push_str(" FROM ");
        sql.push_str(&quote_identifier(self.descriptor.table()));
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&render_join(join));
        }

        let mut params = Vec::new();
        self.render_where(&mut sql, &mut params);

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            let columns: Vec<String> = self
                .group_by
                .iter()
                .map(|column| quote_identifier(column))
                .collect();
            sql.push_str(&columns.join(", "));
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            let columns: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, direction)| format!("{} {direction}", quote_identifier(column)))
                .collect();
            sql.push_str(&columns.join(", "));
        }

        if let Some(limit) = limit_override.or(self.limit) {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        (sql, params)
    }

    /// Render `SELECT COUNT(*)` over the same FROM/JOIN/WHERE context.
    pub(crate) fn render_count(&self) -> (String, Vec<Value>) {
        let mut sql = String::from("SELECT COUNT(*) AS `count` FROM ");
        sql.push_str(&quote_identifier(self.descriptor.table()));
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&render_join(join));
        }
        let mut params = Vec::new();
        self.render_where(&mut sql, &mut params);
        (sql, params)
    }

    /// Render a DELETE scoped by the accumulated WHERE context.
    pub(crate) fn render_delete(&self) -> (String, Vec<Value>) {
        let mut sql = String::from("DELETE FROM ");
        sql.push_str(&quote_identifier(self.descriptor.table()));
        let mut params = Vec::new();
        self.render_where(&mut sql, &mut params);
        (sql, params)
    }

    fn render_projection(&self) -> String {
        if !self.select_fields.is_empty() {
            let fields: Vec<String> = self
                .select_fields
                .iter()
                .map(|field| match &field.alias {
                    Some(alias) => {
                        format!("{} AS `{alias}`", quote_identifier(&field.column))
                    }
                    None => quote_identifier(&field.column),
                })
                .collect();
            return fields.join(", ");
        }

        if self.hidden_joins.is_empty() {
            return "*".to_string();
        }

        // Some joined tables are excluded from the default projection:
        // project the base table plus the visible joins explicitly.
        let mut parts = vec![quote_identifier(&format!("{}.*", self.descriptor.table()))];
        for joined in &self.joined {
            if !self.hidden_joins.iter().any(|t| t == joined.table()) {
                parts.push(quote_identifier(&format!("{}.*", joined.table())));
            }
        }
        parts.join(", ")
    }

    fn render_where(&self, sql: &mut String, params: &mut Vec<Value>) {
        if self.criteria_groups.is_empty() {
            return;
        }
        sql.push_str(" WHERE ");
        for (i, group) in self.criteria_groups.iter().enumerate() {
            if i > 0 {
                sql.push_str(" AND ");
            }
            sql.push_str(&render_group(group, params));
        }
    }
}

fn render_group(group: &CriteriaGroup, params: &mut Vec<Value>) -> String {
    let rendered: Vec<String> = group
        .items
        .iter()
        .map(|criterion| render_criterion(criterion, params))
        .collect();
    if group.any && rendered.len() > 1 {
        format!("({})", rendered.join(" OR "))
    } else {
        rendered.join(" AND ")
    }
}

fn render_criterion(criterion: &Criterion, params: &mut Vec<Value>) -> String {
    let field = quote_identifier(&criterion.field);
    match (criterion.operator, &criterion.operand) {
        (Operator::Null, _) => format!("{field} IS NULL"),
        (Operator::NotNull, _) => format!("{field} IS NOT NULL"),
        (Operator::In | Operator::NotIn, Operand::List(values)) => {
            let placeholders = vec!["?"; values.len()].join(", ");
            params.extend(values.iter().cloned());
            format!("{field} {} ({placeholders})", criterion.operator)
        }
        (Operator::ColumnsEqual, Operand::Value(Value::String(other))) => {
            format!("{field} = {}", quote_identifier(other))
        }
        (operator, Operand::Raw(expr)) => format!("{field} {operator} {expr}"),
        (operator, Operand::Value(value)) => {
            params.push(value.clone());
            format!("{field} {operator} ?")
        }
        // Remaining shapes are rejected by Criterion::new
        (operator, _) => format!("{field} {operator} NULL"),
    }
}

fn render_join(join: &JoinSpec) -> String {
    format!(
        "{} {} ON {} {} {}",
        join.kind,
        quote_identifier(&join.table),
        quote_identifier(&join.left),
        join.operator,
        quote_identifier(&join.right),
    )
}
