//! Core types and enums for query building

use std::fmt;

use serde_json::Value;

use crate::error::{OrmError, OrmResult};

/// Filter operators accepted by `criteria`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Like,
    NotLike,
    Null,
    NotNull,
    /// `#=#` — compares two columns; neither side is bound
    ColumnsEqual,
}

impl Operator {
    /// Parse the textual operator form; unknown text fails fast.
    pub fn parse(text: &str) -> OrmResult<Self> {
        Ok(match text {
            "=" => Operator::Eq,
            "!=" | "<>" => Operator::Ne,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            "IN" => Operator::In,
            "NOT IN" => Operator::NotIn,
            "LIKE" => Operator::Like,
            "NOT LIKE" => Operator::NotLike,
            "NULL" => Operator::Null,
            "NOT NULL" => Operator::NotNull,
            "#=#" => Operator::ColumnsEqual,
            other => {
                return Err(OrmError::QueryBuild(format!(
                    "unsupported operator `{other}`"
                )))
            }
        })
    }

    pub(crate) fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::Eq
                | Operator::Ne
                | Operator::Gt
                | Operator::Gte
                | Operator::Lt
                | Operator::Lte
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq | Operator::ColumnsEqual => write!(f, "="),
            Operator::Ne => write!(f, "!="),
            Operator::Gt => write!(f, ">"),
            Operator::Gte => write!(f, ">="),
            Operator::Lt => write!(f, "<"),
            Operator::Lte => write!(f, "<="),
            Operator::In => write!(f, "IN"),
            Operator::NotIn => write!(f, "NOT IN"),
            Operator::Like => write!(f, "LIKE"),
            Operator::NotLike => write!(f, "NOT LIKE"),
            Operator::Null => write!(f, "IS NULL"),
            Operator::NotNull => write!(f, "IS NOT NULL"),
        }
    }
}

/// A verbatim SQL fragment used as a criterion operand.
///
/// Rendered unquoted and unbound — the caller owns its safety. Build one
/// with [`raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExpr(pub(crate) String);

/// Tag a literal SQL expression, e.g. `raw("date('now')")`.
pub fn raw(expr: impl Into<String>) -> RawExpr {
    RawExpr(expr.into())
}

/// Criterion operand: bound scalar, bound list, raw expression, or nothing
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Value),
    List(Vec<Value>),
    Raw(String),
    None,
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Operand::Value(Value::from(value))
    }
}

impl From<()> for Operand {
    fn from((): ()) -> Self {
        Operand::None
    }
}

impl From<RawExpr> for Operand {
    fn from(expr: RawExpr) -> Self {
        Operand::Raw(expr.0)
    }
}

impl<T> From<Vec<T>> for Operand
where
    Value: From<T>,
{
    fn from(values: Vec<T>) -> Self {
        Operand::List(values.into_iter().map(Value::from).collect())
    }
}

/// One filter condition: field, operator, operand
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub(crate) field: String,
    pub(crate) operator: Operator,
    pub(crate) operand: Operand,
}

impl Criterion {
    /// Build a criterion, validating the operator text and the operand shape
    /// it requires.
    pub fn new(field: &str, operator: &str, operand: impl Into<Operand>) -> OrmResult<Self> {
        let operator = Operator::parse(operator)?;
        let operand = operand.into();
        match (operator, &operand) {
            (Operator::In | Operator::NotIn, Operand::List(values)) => {
                if values.is_empty() {
                    return Err(OrmError::QueryBuild(format!(
                        "`{operator}` requires a non-empty list operand"
                    )));
                }
            }
            (Operator::In | Operator::NotIn, _) => {
                return Err(OrmError::QueryBuild(format!(
                    "`{operator}` requires a list operand"
                )))
            }
            (Operator::ColumnsEqual, Operand::Value(Value::String(_))) => {}
            (Operator::ColumnsEqual, _) => {
                return Err(OrmError::QueryBuild(
                    "`#=#` compares two columns; the operand must name a column".to_string(),
                ))
            }
            // Unary null checks ignore whatever operand was passed
            (Operator::Null | Operator::NotNull, _) => {}
            (_, Operand::List(_)) => {
                return Err(OrmError::QueryBuild(
                    "a list operand is only valid with `IN` / `NOT IN`".to_string(),
                ))
            }
            (_, Operand::None) => {
                return Err(OrmError::QueryBuild(format!(
                    "operator `{operator}` requires an operand"
                )))
            }
            _ => {}
        }
        Ok(Self {
            field: field.to_string(),
            operator,
            operand,
        })
    }
}

/// A rendering unit in the WHERE clause: one AND-linked criterion, or a
/// parenthesized OR group
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CriteriaGroup {
    pub(crate) any: bool,
    pub(crate) items: Vec<Criterion>,
}

/// Join kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKind::Inner => write!(f, "INNER JOIN"),
            JoinKind::Left => write!(f, "LEFT JOIN"),
            JoinKind::Right => write!(f, "RIGHT JOIN"),
        }
    }
}

/// One join: target table plus a column-pair predicate
#[derive(Debug, Clone, PartialEq)]
pub struct JoinSpec {
    pub(crate) kind: JoinKind,
    pub(crate) table: String,
    pub(crate) left: String,
    pub(crate) operator: Operator,
    pub(crate) right: String,
}

/// Sort direction for `order_by`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// A projected column with an optional alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub(crate) column: String,
    pub(crate) alias: Option<String>,
}

impl From<&str> for SelectField {
    fn from(column: &str) -> Self {
        Self {
            column: column.to_string(),
            alias: None,
        }
    }
}

impl From<String> for SelectField {
    fn from(column: String) -> Self {
        Self {
            column,
            alias: None,
        }
    }
}

impl From<(&str, &str)> for SelectField {
    fn from((column, alias): (&str, &str)) -> Self {
        Self {
            column: column.to_string(),
            alias: Some(alias.to_string()),
        }
    }
}
