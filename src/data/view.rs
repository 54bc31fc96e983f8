use super::error::{Axis, IndexOutOfRange};
use super::model::{cell_text, CellValue, LogTable};

// ---------------------------------------------------------------------------
// TableView – row/column addressing for a grid
// ---------------------------------------------------------------------------

/// Read-only grid view over a [`LogTable`].
///
/// Holds nothing but the table reference, so switching to a filtered or
/// sorted table means building a new view. Callers must re-query
/// [`column_count`](Self::column_count) and
/// [`column_name`](Self::column_name) whenever the table changes.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    table: &'a LogTable,
}

impl<'a> TableView<'a> {
    pub fn new(table: &'a LogTable) -> Self {
        TableView { table }
    }

    pub fn table(&self) -> &'a LogTable {
        self.table
    }

    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    pub fn column_count(&self) -> usize {
        self.table.column_names().len()
    }

    pub fn column_name(&self, column: usize) -> Result<&'a str, IndexOutOfRange> {
        let names = self.table.column_names();
        let column = IndexOutOfRange::check(Axis::Column, column, names.len())?;
        Ok(names[column].as_str())
    }

    /// Raw value at (row, column); `Ok(None)` when the record lacks the key.
    pub fn raw_value(
        &self,
        row: usize,
        column: usize,
    ) -> Result<Option<&'a CellValue>, IndexOutOfRange> {
        let records = self.table.records();
        let row = IndexOutOfRange::check(Axis::Row, row, records.len())?;
        let name = self.column_name(column)?;
        Ok(records[row].get(name))
    }

    /// Display string for (row, column).
    ///
    /// Floats show two decimals, missing values and JSON `null` show "",
    /// everything else uses its natural text.
    pub fn cell_value(&self, row: usize, column: usize) -> Result<String, IndexOutOfRange> {
        self.raw_value(row, column).map(cell_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn three_rows() -> LogTable {
        LogTable::from_records(vec![
            Record::from_fields([
                ("levelname".to_string(), CellValue::Text("INFO".into())),
                ("elapsed".to_string(), CellValue::Float(3.14159)),
            ]),
            Record::from_fields([("levelname".to_string(), CellValue::Text("ERROR".into()))]),
            Record::from_fields([
                ("elapsed".to_string(), CellValue::Integer(12)),
                ("ok".to_string(), CellValue::Null),
            ]),
        ])
    }

    #[test]
    fn test_counts_and_names() {
        let table = three_rows();
        let view = TableView::new(&table);
        assert_eq!(view.row_count(), 3);
        assert_eq!(view.column_count(), 3);
        assert_eq!(view.column_name(0), Ok("levelname"));
        assert_eq!(view.column_name(2), Ok("ok"));
    }

    #[test]
    fn test_cell_formatting() {
        let table = three_rows();
        let view = TableView::new(&table);
        assert_eq!(view.cell_value(0, 1).unwrap(), "3.14");
        assert_eq!(view.cell_value(2, 1).unwrap(), "12");
        assert_eq!(view.cell_value(1, 1).unwrap(), "");
        assert_eq!(view.cell_value(2, 2).unwrap(), "");
        assert_eq!(view.raw_value(1, 1), Ok(None));
    }

    #[test]
    fn test_out_of_range() {
        let table = three_rows();
        let view = TableView::new(&table);
        assert_eq!(
            view.cell_value(5, 0),
            Err(IndexOutOfRange {
                axis: Axis::Row,
                index: 5,
                len: 3
            })
        );
        assert_eq!(
            view.column_name(3).unwrap_err().to_string(),
            "column 3 out of range [0, 3)"
        );
        assert!(view.cell_value(0, 9).is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = LogTable::default();
        let view = TableView::new(&table);
        assert_eq!(view.row_count(), 0);
        assert_eq!(view.column_count(), 0);
        assert!(view.cell_value(0, 0).is_err());
    }
}
