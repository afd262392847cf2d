//! JOIN accumulation and relation-based join resolution
//!
//! Manual joins take an explicit column-pair predicate. `join_to` and
//! `join_through` synthesize the predicate from declared
//! [`ModelDescriptor`] relation maps instead, so callers never spell out key
//! columns for declared relations.

use crate::error::{OrmError, OrmResult};
use crate::model::ModelDescriptor;

use super::builder::QueryBuilder;
use super::types::{JoinKind, JoinSpec, Operator};

impl QueryBuilder<'_> {
    /// Add an INNER JOIN with an explicit `(left, operator, right)` column
    /// predicate.
    pub fn join(&mut self, table: &str, on: (&str, &str, &str)) -> OrmResult<&mut Self> {
        self.push_join(JoinKind::Inner, table, on)
    }

    /// Alias of [`join`](Self::join).
    pub fn inner_join(&mut self, table: &str, on: (&str, &str, &str)) -> OrmResult<&mut Self> {
        self.push_join(JoinKind::Inner, table, on)
    }

    pub fn left_join(&mut self, table: &str, on: (&str, &str, &str)) -> OrmResult<&mut Self> {
        self.push_join(JoinKind::Left, table, on)
    }

    pub fn right_join(&mut self, table: &str, on: (&str, &str, &str)) -> OrmResult<&mut Self> {
        self.push_join(JoinKind::Right, table, on)
    }

    fn push_join(
        &mut self,
        kind: JoinKind,
        table: &str,
        (left, operator, right): (&str, &str, &str),
    ) -> OrmResult<&mut Self> {
        let operator = Operator::parse(operator)?;
        if !operator.is_comparison() {
            return Err(OrmError::QueryBuild(format!(
                "`{operator}` is not a valid join predicate operator"
            )));
        }
        self.joins.push(JoinSpec {
            kind,
            table: table.to_string(),
            left: left.to_string(),
            operator,
            right: right.to_string(),
        });
        self.joined.push(ModelDescriptor::new(table));
        Ok(self)
    }

    /// Join `other` using the relation declared between it and this
    /// builder's model.
    ///
    /// Prefers the key `other` declares for the base table (`ON other.key =
    /// base.pk`), then the key the base model declares for `other`. With
    /// `include_in_select = false` the joined table's columns are left out
    /// of the default projection while the join still filters rows.
    pub fn join_to(
        &mut self,
        other: &ModelDescriptor,
        include_in_select: bool,
    ) -> OrmResult<&mut Self> {
        let spec = direct_join(&self.descriptor, other).ok_or_else(|| {
            OrmError::RelationNotFound {
                from: self.descriptor.table().to_string(),
                to: other.table().to_string(),
            }
        })?;
        if !include_in_select {
            self.hidden_joins.push(other.table().to_string());
        }
        self.joins.push(spec);
        self.joined.push(other.clone());
        Ok(self)
    }

    /// Join `target` through an already-joined intermediate table.
    ///
    /// A direct relation on the base model wins; only when none exists are
    /// the joined tables scanned, in declaration order, for one whose
    /// relation map (or the target's) bridges to `target`.
    pub fn join_through(&mut self, target: &ModelDescriptor) -> OrmResult<&mut Self> {
        if let Some(spec) = direct_join(&self.descriptor, target) {
            self.joins.push(spec);
            self.joined.push(target.clone());
            return Ok(self);
        }

        let mut resolved = None;
        for bridge in &self.joined {
            if let Some(spec) = bridge_join(bridge, target) {
                resolved = Some(spec);
                break;
            }
        }
        match resolved {
            Some(spec) => {
                self.joins.push(spec);
                self.joined.push(target.clone());
                Ok(self)
            }
            None => Err(OrmError::RelationNotFound {
                from: self.descriptor.table().to_string(),
                to: target.table().to_string(),
            }),
        }
    }
}

/// Resolve a direct relation between `base` and `other`, in either declared
/// direction.
fn direct_join(base: &ModelDescriptor, other: &ModelDescriptor) -> Option<JoinSpec> {
    if let Some(key) = other.relation_key(base.table()) {
        // key column lives on the joined table, pointing at the base pk
        return Some(join_spec(
            other.table(),
            format!("{}.{}", other.table(), key),
            format!("{}.{}", base.table(), base.primary_key_name()),
        ));
    }
    if let Some(key) = base.relation_key(other.table()) {
        // base declares the pointer at the other table's pk
        return Some(join_spec(
            other.table(),
            format!("{}.{}", base.table(), key),
            format!("{}.{}", other.table(), other.primary_key_name()),
        ));
    }
    None
}

/// Resolve a two-hop relation: the key column lives on the bridge, pointing
/// at the target's primary key, whichever side declared it.
fn bridge_join(bridge: &ModelDescriptor, target: &ModelDescriptor) -> Option<JoinSpec> {
    let key = bridge
        .relation_key(target.table())
        .or_else(|| target.relation_key(bridge.table()))?;
    Some(join_spec(
        target.table(),
        format!("{}.{}", bridge.table(), key),
        format!("{}.{}", target.table(), target.primary_key_name()),
    ))
}

fn join_spec(table: &str, left: String, right: String) -> JoinSpec {
    JoinSpec {
        kind: JoinKind::Inner,
        table: table.to_string(),
        left,
        operator: Operator::Eq,
        right,
    }
}
