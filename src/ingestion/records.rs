//! Raw record parsing for delimited-text and JSON sources

use crate::error::{Error, Result};
use crate::types::RawRecord;

/// Parse the decoded content of a source file into raw records,
/// dispatching on the file extension.
///
/// `.csv` expects a header row and yields one mapping per data row with
/// surrounding whitespace stripped; `.json` expects an array of string
/// mappings. Any other extension fails with [`Error::UnsupportedFormat`].
pub fn parse_records(blob_name: &str, content: &str) -> Result<Vec<RawRecord>> {
    let extension = blob_name.rsplit('.').next().unwrap_or("").to_lowercase();

    match extension.as_str() {
        "csv" => parse_csv(blob_name, content),
        "json" => parse_json(blob_name, content),
        _ => Err(Error::UnsupportedFormat(blob_name.to_string())),
    }
}

fn parse_csv(blob_name: &str, content: &str) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for row in reader.deserialize::<RawRecord>() {
        records.push(row.map_err(|e| Error::file_parse(blob_name, e.to_string()))?);
    }

    Ok(records)
}

fn parse_json(blob_name: &str, content: &str) -> Result<Vec<RawRecord>> {
    serde_json::from_str(content).map_err(|e| Error::file_parse(blob_name, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_rows_become_records() {
        let content = "name,parent_id\nWidget, p1\nGadget,p2\n";
        let records = parse_records("products.csv", content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "Widget");
        // Surrounding whitespace is stripped
        assert_eq!(records[0]["parent_id"], "p1");
        assert_eq!(records[1]["name"], "Gadget");
    }

    #[test]
    fn test_json_array_becomes_records() {
        let content = r#"[
            {"name": "Widget", "parent_id": "p1"},
            {"name": "Gadget", "parent_id": "p2"},
            {"name": "Gizmo", "parent_id": ""}
        ]"#;
        let records = parse_records("products.json", content).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[2]["parent_id"], "");
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = parse_records("products.parquet", "").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(name) if name == "products.parquet"));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = parse_records("products.json", "{not an array}").unwrap_err();
        assert!(matches!(err, Error::FileParse { .. }));
    }
}
