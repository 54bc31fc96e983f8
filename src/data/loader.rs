use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{CellValue, LogTable, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a JSON Lines log file: one JSON object per line.
///
/// Blank lines are skipped. Any other line that is not a JSON object aborts
/// the load; there is no partial result.
pub fn load_file(path: &Path) -> Result<LogTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_table(BufReader::new(file), path)?;
    log::info!(
        "Loaded {} records with columns {:?} from {}",
        table.len(),
        table.column_names(),
        path.display()
    );
    Ok(table)
}

/// Parse JSON Lines from any buffered reader. `path` is only used in errors.
pub fn read_table<R: BufRead>(reader: R, path: &Path) -> Result<LogTable, LoadError> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| LoadError::MalformedInput {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_record(&line, line_no)?);
    }

    Ok(LogTable::from_records(records))
}

fn parse_record(line: &str, line_no: usize) -> Result<Record, LoadError> {
    let value: JsonValue = serde_json::from_str(line).map_err(|source| LoadError::Parse {
        line: line_no,
        source,
    })?;

    let obj = match value {
        JsonValue::Object(obj) => obj,
        other => {
            return Err(LoadError::NotAnObject {
                line: line_no,
                found: json_kind(&other),
            })
        }
    };

    Ok(Record::from_fields(
        obj.iter()
            .map(|(key, val)| (key.clone(), CellValue::from_json(val))),
    ))
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_log(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_two_records() {
        let file = write_log(concat!(
            r#"{"levelname":"INFO","name":"core","message":"start"}"#,
            "\n",
            r#"{"levelname":"ERROR","name":"io","message":"fail"}"#,
            "\n",
        ));
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names(), ["levelname", "name", "message"]);
        assert_eq!(
            table.records()[1].get("message"),
            Some(&CellValue::Text("fail".into()))
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let file = write_log("{\"a\":1}\n\n   \n{\"a\":2}");
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_key_order_follows_source() {
        let file = write_log("{\"zeta\":1,\"alpha\":2}\n{\"mid\":3,\"alpha\":4}\n");
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.column_names(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_missing_file_is_malformed_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.jsonl")).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { .. }));
        assert!(err.to_string().contains("absent.jsonl"));
    }

    #[test]
    fn test_bad_line_aborts_load() {
        let file = write_log("{\"a\":1}\n{not json}\n{\"a\":3}\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_non_object_line_is_rejected() {
        let err = read_table("[1,2,3]\n".as_bytes(), Path::new("mem")).unwrap_err();
        match err {
            LoadError::NotAnObject { line, found } => {
                assert_eq!(line, 1);
                assert_eq!(found, "an array");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsigned_integer_renders_exactly() {
        let table = read_table(
            "{\"id\":18446744073709551615}\n".as_bytes(),
            Path::new("mem"),
        )
        .unwrap();
        let view = crate::data::view::TableView::new(&table);
        assert_eq!(view.cell_value(0, 0).unwrap(), "18446744073709551615");
    }

    #[test]
    fn test_invalid_utf8_is_malformed_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"a\":\"\xff\"}\n").unwrap();
        file.flush().unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { .. }));
    }
}
