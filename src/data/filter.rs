use super::model::{cell_text, LogTable, Record};

/// Column matched by [`LogFilter::level`].
pub const LEVEL_COLUMN: &str = "levelname";
/// Column matched by [`LogFilter::name`].
pub const NAME_COLUMN: &str = "name";

// ---------------------------------------------------------------------------
// Filter predicate: case-insensitive substrings per field
// ---------------------------------------------------------------------------

/// Substring predicates on the level and logger-name columns.
///
/// An empty value places no constraint on its column. Any other value,
/// whitespace included, must appear verbatim (ignoring case).
/// Active predicates are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub level: String,
    pub name: String,
}

impl LogFilter {
    #[cfg(test)]
    pub fn new(level: impl Into<String>, name: impl Into<String>) -> Self {
        LogFilter {
            level: level.into(),
            name: name.into(),
        }
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.level.is_empty() && self.name.is_empty()
    }

    /// (column, lower-cased needle) for each active predicate.
    fn active(&self) -> Vec<(&'static str, String)> {
        [(LEVEL_COLUMN, &self.level), (NAME_COLUMN, &self.name)]
            .into_iter()
            .filter(|(_, needle)| !needle.is_empty())
            .map(|(col, needle)| (col, needle.to_lowercase()))
            .collect()
    }
}

/// Return indices of records that pass all active predicates.
///
/// A record passes a predicate when the display text of its value in the
/// predicate's column, lower-cased, contains the needle. A record without
/// that column is treated as having "" and so never passes.
pub fn matching_indices(table: &LogTable, filter: &LogFilter) -> Vec<usize> {
    let active = filter.active();
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| record_matches(record, &active))
        .map(|(i, _)| i)
        .collect()
}

fn record_matches(record: &Record, active: &[(&'static str, String)]) -> bool {
    active.iter().all(|(column, needle)| {
        cell_text(record.get(column))
            .to_lowercase()
            .contains(needle.as_str())
    })
}

/// Build a new table holding only the matching records, in source order.
/// `table` itself is left untouched.
pub fn filter_table(table: &LogTable, filter: &LogFilter) -> LogTable {
    if filter.is_empty() {
        return table.clone();
    }
    let filtered = table.derive(matching_indices(table, filter));
    log::debug!(
        "Filter {:?}: {} of {} records match",
        filter,
        filtered.len(),
        table.len()
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use serde_json::{json, Value};

    fn table(rows: Vec<Value>) -> LogTable {
        LogTable::from_records(
            rows.iter()
                .map(|row| {
                    let obj = row.as_object().cloned().unwrap_or_default();
                    Record::from_fields(
                        obj.iter().map(|(k, v)| (k.clone(), CellValue::from_json(v))),
                    )
                })
                .collect(),
        )
    }

    fn sample() -> LogTable {
        table(vec![
            json!({"levelname": "INFO", "name": "core", "message": "start"}),
            json!({"levelname": "ERROR", "name": "io", "message": "fail"}),
            json!({"levelname": "WARNING", "name": "core.io", "message": "slow"}),
            json!({"name": "core", "message": "no level"}),
            json!({"levelname": "error", "name": "net", "message": "reset"}),
        ])
    }

    fn messages(table: &LogTable) -> Vec<String> {
        table
            .records()
            .iter()
            .map(|r| cell_text(r.get("message")))
            .collect()
    }

    #[test]
    fn test_level_substring_case_insensitive() {
        let t = sample();
        let upper = filter_table(&t, &LogFilter::new("ERROR", ""));
        let lower = filter_table(&t, &LogFilter::new("error", ""));
        assert_eq!(messages(&upper), ["fail", "reset"]);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_two_row_scenario() {
        let t = table(vec![
            json!({"levelname": "INFO", "name": "core", "message": "start"}),
            json!({"levelname": "ERROR", "name": "io", "message": "fail"}),
        ]);
        let filtered = filter_table(&t, &LogFilter::new("err", ""));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0], t.records()[1]);
    }

    #[test]
    fn test_missing_column_excluded() {
        let t = sample();
        let filtered = filter_table(&t, &LogFilter::new("info", ""));
        assert_eq!(messages(&filtered), ["start"]);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let t = sample();
        let name_only = filter_table(&t, &LogFilter::new("", "io"));
        assert_eq!(messages(&name_only), ["fail", "slow"]);
        let both = filter_table(&t, &LogFilter::new("warn", "io"));
        assert_eq!(messages(&both), ["slow"]);
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let t = sample();
        assert!(LogFilter::default().is_empty());
        assert_eq!(filter_table(&t, &LogFilter::default()), t);
        assert_eq!(matching_indices(&t, &LogFilter::new("", "")), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_whitespace_is_part_of_the_needle() {
        let t = table(vec![
            json!({"name": "core", "message": "plain"}),
            json!({"name": "core db", "message": "spaced"}),
        ]);
        assert!(!LogFilter::new("", " ").is_empty());
        let trailing = filter_table(&t, &LogFilter::new("", "core "));
        assert_eq!(messages(&trailing), ["spaced"]);
        let space = filter_table(&t, &LogFilter::new("", " "));
        assert_eq!(messages(&space), ["spaced"]);
    }

    #[test]
    fn test_refilter_with_empty_is_identity() {
        let t = sample();
        let once = filter_table(&t, &LogFilter::new("", "core"));
        let again = filter_table(&once, &LogFilter::default());
        assert_eq!(once, again);
    }

    #[test]
    fn test_adding_a_predicate_narrows() {
        let t = sample();
        let wide = matching_indices(&t, &LogFilter::new("", "core"));
        let narrow = matching_indices(&t, &LogFilter::new("info", "core"));
        assert!(narrow.iter().all(|i| wide.contains(i)));
        assert!(narrow.len() <= wide.len());
    }

    #[test]
    fn test_table_without_columns_filters_everything_out() {
        let t = table(vec![json!({"message": "a"}), json!({"message": "b"})]);
        let filtered = filter_table(&t, &LogFilter::new("", "x"));
        assert!(filtered.is_empty());
        assert_eq!(filtered.column_names(), t.column_names());
    }

    #[test]
    fn test_source_is_not_mutated() {
        let t = sample();
        let before = t.clone();
        let _ = filter_table(&t, &LogFilter::new("error", "io"));
        assert_eq!(t, before);
    }

    #[test]
    fn test_output_is_ordered_subsequence() {
        let t = sample();
        let idx = matching_indices(&t, &LogFilter::new("", "o"));
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
    }
}
