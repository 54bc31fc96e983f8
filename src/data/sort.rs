use std::cmp::Ordering;

use super::model::LogTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// User-chosen sort on one column, by name so it survives re-filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(column: impl Into<String>) -> Self {
        SortKey {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Header-click cycle: ascending → descending → unsorted.
    pub fn cycle(current: Option<&SortKey>, column: &str) -> Option<SortKey> {
        match current {
            Some(key) if key.column == column => match key.direction {
                SortDirection::Ascending => Some(SortKey {
                    column: column.to_string(),
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortKey::ascending(column)),
        }
    }
}

/// Stable sort of `table` into a new table. Missing values order like
/// `null`, before everything else when ascending.
pub fn sort_table(table: &LogTable, key: &SortKey) -> LogTable {
    let records = table.records();
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = match (records[a].get(&key.column), records[b].get(&key.column)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(va), Some(vb)) => va.cmp(vb),
        };
        match key.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    log::debug!("Sorted {} records by {:?}", records.len(), key);
    table.derive(order)
}
