//! Query log for diagnostics
//!
//! Active only while the connect-time debug flag is set. Entries are kept in
//! execution order and carry both a display rendering (literals inlined) and
//! the prepared statement text with its bound parameters. The log lives with
//! the connection and is cleared on disconnect.

use serde_json::Value;

/// One executed statement, as recorded by the query log
#[derive(Debug, Clone, PartialEq)]
pub struct QueryLogEntry {
    /// Rendered SQL with literals inlined, for display
    pub query: String,
    /// Prepared statement text, placeholders intact
    pub statement: String,
    /// Parameters bound to the statement, in binding order
    pub params: Vec<Value>,
}

#[derive(Debug, Default)]
pub(crate) struct QueryLog {
    enabled: bool,
    entries: Vec<QueryLogEntry>,
}

impl QueryLog {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Vec::new(),
        }
    }

    /// Record a positionally-bound statement.
    pub(crate) fn record(&mut self, statement: &str, params: &[Value]) {
        if !self.enabled {
            return;
        }
        self.entries.push(QueryLogEntry {
            query: inline_positional(statement, params),
            statement: statement.to_string(),
            params: params.to_vec(),
        });
    }

    /// Record a statement bound with named parameters.
    pub(crate) fn record_named(&mut self, statement: &str, params: &[(&str, Value)]) {
        if !self.enabled {
            return;
        }
        self.entries.push(QueryLogEntry {
            query: inline_named(statement, params),
            statement: statement.to_string(),
            params: params.iter().map(|(_, v)| v.clone()).collect(),
        });
    }

    pub(crate) fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    pub(crate) fn last(&self) -> Option<&QueryLogEntry> {
        self.entries.last()
    }
}

/// Format a bound value as a SQL literal for display.
pub(crate) fn format_literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => i64::from(*b).to_string(),
        other => other.to_string(),
    }
}

fn inline_positional(statement: &str, params: &[Value]) -> String {
    // Placeholders rendered by this crate never appear inside string
    // literals, so a plain left-to-right scan is enough.
    let mut out = String::with_capacity(statement.len());
    let mut remaining = params.iter();
    for ch in statement.chars() {
        if ch == '?' {
            if let Some(value) = remaining.next() {
                out.push_str(&format_literal(value));
                continue;
            }
        }
        out.push(ch);
    }
    out
}

fn inline_named(statement: &str, params: &[(&str, Value)]) -> String {
    let mut display = statement.to_string();
    // Longest names first, so `:id` never clobbers a prefix of `:id_from`
    let mut ordered: Vec<&(&str, Value)> = params.iter().collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    for (name, value) in ordered {
        let token = if name.starts_with(':') {
            (*name).to_string()
        } else {
            format!(":{name}")
        };
        display = display.replace(&token, &format_literal(value));
    }
    display
}
