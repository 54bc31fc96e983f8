use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// CellValue – a single field of a log record
// ---------------------------------------------------------------------------

/// A dynamically-typed field value as it appears in one JSON log line.
///
/// A key that is absent from a record is not a `CellValue` at all; it is
/// `None` at the lookup site. `Null` is an explicit JSON `null`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Bool(bool),
    /// Wide enough for every JSON integer (`i64` and `u64` range).
    Integer(i128),
    Float(f64),
    Text(String),
    /// Nested array or object, kept as compact JSON text.
    Json(String),
}

impl CellValue {
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => CellValue::Null,
            JsonValue::Bool(b) => CellValue::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i.into())
                } else if let Some(u) = n.as_u64() {
                    CellValue::Integer(u.into())
                } else if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
                    CellValue::Float(f)
                } else {
                    CellValue::Text(n.to_string())
                }
            }
            JsonValue::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Json(other.to_string()),
        }
    }

    /// Numeric view used for ordering integers against floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// Display text for a possibly-missing cell. Missing renders as "".
pub fn cell_text(value: Option<&CellValue>) -> String {
    value.map(CellValue::to_string).unwrap_or_default()
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Text(s) | CellValue::Json(s) => write!(f, "{s}"),
        }
    }
}

// -- Manual Eq/Ord: numbers compare numerically, floats by total order --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                Text(_) => 3,
                Json(_) => 4,
            }
        }
        let (ra, rb) = (rank(self), rank(other));
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            // Mixed numbers: by value, integer first on a tie.
            (Integer(_), Float(_)) | (Float(_), Integer(_)) => {
                let (a, b) = (self.as_f64().unwrap_or(0.0), other.as_f64().unwrap_or(0.0));
                a.total_cmp(&b).then_with(|| {
                    if matches!(self, Integer(_)) {
                        Ordering::Less
                    } else {
                        Ordering::Greater
                    }
                })
            }
            (Text(a), Text(b)) | (Json(a), Json(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one parsed log line
// ---------------------------------------------------------------------------

/// One log line: field name → value, in the order the keys appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    /// Build a record from ordered fields. A repeated key keeps its first
    /// position and its last value.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, CellValue)>,
    {
        let mut record = Record::default();
        for (key, value) in fields {
            record.insert(key, value);
        }
        record
    }

    pub fn insert(&mut self, key: String, value: CellValue) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }
}

// ---------------------------------------------------------------------------
// LogTable – an immutable, ordered set of records
// ---------------------------------------------------------------------------

/// Loaded (or derived) records plus their column list.
///
/// Row order is the source order. Columns are the union of record keys in
/// first-seen order. Tables are never mutated after construction; filtering
/// and sorting build new tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    records: Vec<Record>,
    column_names: Vec<String>,
}

impl LogTable {
    /// Build a table, deriving the column list from the records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut column_names: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !column_names.iter().any(|c| c == key) {
                    column_names.push(key.to_string());
                }
            }
        }
        LogTable {
            records,
            column_names,
        }
    }

    /// Derive a table over a row subset/permutation of `self`, keeping the
    /// source column list unchanged.
    pub fn derive<I>(&self, rows: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        LogTable {
            records: rows
                .into_iter()
                .filter_map(|i| self.records.get(i).cloned())
                .collect(),
            column_names: self.column_names.clone(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    /// Sorted set of the values present in `column` (missing keys skipped).
    pub fn distinct_values(&self, column: &str) -> BTreeSet<CellValue> {
        self.records
            .iter()
            .filter_map(|r| r.get(column).cloned())
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
