//! Result assembly: tables keyed by sanitized record identifiers and flat
//! variable lists
//!
//! Both shapes are built up during one collection invocation and returned
//! from it; nothing persists between invocations. The identifier
//! sanitization rule is reproduced exactly so that history keyed by record
//! id stays stable across releases.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

static RESERVED_RE: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

/// Sanitize a natural key (interface name, IP address, username) into a
/// record identifier.
///
/// Single pass: remove the reserved substrings `?`, `*`, `%`, `table`,
/// `column`, `history` (case-sensitive, anywhere), truncate to the first 50
/// characters, collapse whitespace runs to single hyphens, lowercase.
pub fn sanitize_record_id(raw: &str) -> String {
    let reserved = RESERVED_RE
        .get_or_init(|| Regex::new(r"\?|\*|%|table|column|history").expect("valid pattern"));
    let whitespace = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("valid pattern"));

    let stripped = reserved.replace_all(raw, "");
    let truncated: String = stripped.chars().take(50).collect();
    whitespace.replace_all(&truncated, "-").to_lowercase()
}

/// Column value annotation for downstream presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Text,
    Number,
    Datetime,
}

/// A labeled table column with optional unit
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub value_type: ValueType,
}

impl Column {
    /// Plain text column
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            unit: None,
            value_type: ValueType::Text,
        }
    }

    /// Numeric column
    pub fn number(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            unit: None,
            value_type: ValueType::Number,
        }
    }

    /// Timestamp column
    pub fn datetime(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            unit: None,
            value_type: ValueType::Datetime,
        }
    }

    /// Attach a unit annotation
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// One table row: sanitized identifier plus one value per column
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub id: String,
    pub values: Vec<String>,
}

/// Ordered mapping from sanitized record identifier to a row of values
///
/// Identifiers are unique within one collection run; inserting an existing
/// identifier silently overwrites that row's values in place, keeping its
/// original position.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub title: String,
    pub columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(title: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Insert a record, sanitizing the identifier
    pub fn insert_record(&mut self, id: &str, values: Vec<String>) {
        let id = sanitize_record_id(id);
        if let Some(existing) = self.rows.iter_mut().find(|row| row.id == id) {
            existing.values = values;
        } else {
            self.rows.push(Row { id, values });
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single labeled scalar output, used for fixed small sets of facts
#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    pub uid: String,
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub value_type: ValueType,
}

impl Variable {
    pub fn new(uid: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            label: label.into(),
            value: value.into(),
            unit: None,
            value_type: ValueType::Text,
        }
    }

    /// Attach a unit annotation
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Drop variables whose value is empty before final output
pub fn drop_empty(variables: Vec<Variable>) -> Vec<Variable> {
    variables
        .into_iter()
        .filter(|v| !v.value.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_reserved_substrings() {
        assert_eq!(sanitize_record_id("if?table*1"), "if1");
        assert_eq!(sanitize_record_id("column-history-%"), "--");
        // Removal is case-sensitive
        assert_eq!(sanitize_record_id("Table1"), "table1");
    }

    #[test]
    fn test_sanitize_single_pass() {
        // One alternation pass: removing '%' must not expose a new reserved
        // word to a second scan
        assert_eq!(sanitize_record_id("ta%ble"), "table");
    }

    #[test]
    fn test_sanitize_truncates_to_fifty() {
        let long = "x".repeat(80);
        assert_eq!(sanitize_record_id(&long).len(), 50);
    }

    #[test]
    fn test_sanitize_collapses_whitespace_and_lowercases() {
        assert_eq!(sanitize_record_id("WAN  Uplink\t1"), "wan-uplink-1");
    }

    #[test]
    fn test_sanitize_truncates_before_collapsing() {
        // 49 chars then whitespace: the space survives truncation and then
        // collapses to a hyphen
        let raw = format!("{}  x", "a".repeat(49));
        let id = sanitize_record_id(&raw);
        assert_eq!(id, format!("{}-", "a".repeat(49)));
        assert!(id.len() <= 50);
    }

    #[test]
    fn test_insert_record_overwrites_in_place() {
        let mut table = Table::new("t", vec![Column::text("v")]);
        table.insert_record("eth0", vec!["1".into()]);
        table.insert_record("eth1", vec!["2".into()]);
        table.insert_record("eth0", vec!["3".into()]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].id, "eth0");
        assert_eq!(table.rows()[0].values, vec!["3".to_string()]);
        assert_eq!(table.rows()[1].id, "eth1");
    }

    #[test]
    fn test_insert_record_sanitizes_identifier() {
        let mut table = Table::new("t", vec![Column::text("v")]);
        table.insert_record("WAN Uplink", vec!["1".into()]);
        assert_eq!(table.rows()[0].id, "wan-uplink");
    }

    #[test]
    fn test_drop_empty_keeps_truthy_values() {
        let vars = vec![
            Variable::new("a", "A", "Active"),
            Variable::new("b", "B", ""),
            Variable::new("c", "C", "Not active"),
        ];
        let kept = drop_empty(vars);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].uid, "a");
        assert_eq!(kept[1].uid, "c");
    }
}
