//! Loading records from JSON.
//!
//! Input is a JSON array of flat objects. Object fields must be booleans,
//! numbers or strings; `null`, arrays and nested objects are rejected since
//! records only hold scalars.

use crate::value::{Context, Value};
use anyhow::{bail, Context as _, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read records from any JSON source
pub fn load_records<R: Read>(reader: R) -> Result<Vec<Context>> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_reader(reader).context("Expected a JSON array of records")?;

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(index, item)| record_from_json(index, item))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Loaded {} records", records.len());
    Ok(records)
}

/// Read records from a JSON file
pub fn load_records_from_path(path: &Path) -> Result<Vec<Context>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open records file {}", path.display()))?;
    load_records(BufReader::new(file))
        .with_context(|| format!("Failed to read records from {}", path.display()))
}

fn record_from_json(index: usize, item: serde_json::Value) -> Result<Context> {
    let serde_json::Value::Object(fields) = item else {
        bail!("Record {} is not a JSON object", index);
    };

    let mut context = Context::with_capacity(fields.len());
    for (name, field) in fields {
        let value = scalar_from_json(&field)
            .with_context(|| format!("Record {} field '{}'", index, name))?;
        context.insert(name, value);
    }
    Ok(context)
}

fn scalar_from_json(field: &serde_json::Value) -> Result<Value> {
    match field {
        serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if let Some(x) = n.as_f64() {
                Ok(Value::Float(x))
            } else {
                bail!("Number {} is out of range", n)
            }
        }
        serde_json::Value::String(s) => Ok(Value::String(s.clone())),
        serde_json::Value::Null => bail!("null is not a supported value"),
        serde_json::Value::Array(_) => bail!("arrays are not supported values"),
        serde_json::Value::Object(_) => bail!("nested objects are not supported values"),
    }
}

/// Serialize records as a pretty-printed JSON array, fields sorted by name
pub fn records_to_json(records: &[&Context]) -> Result<String> {
    let sorted: Vec<BTreeMap<&str, &Value>> = records
        .iter()
        .map(|record| record.iter().map(|(k, v)| (k.as_str(), v)).collect())
        .collect();
    serde_json::to_string_pretty(&sorted).context("Failed to serialize records")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_records() -> Result<()> {
        let json = r#"[
            {"name": "John", "age": 34, "salary": 85000.5, "active": true},
            {"name": "Sarah", "age": 29}
        ]"#;
        let records = load_records(json.as_bytes())?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], Value::from("John"));
        assert_eq!(records[0]["age"], Value::Integer(34));
        assert_eq!(records[0]["salary"], Value::Float(85000.5));
        assert_eq!(records[0]["active"], Value::Boolean(true));
        assert!(!records[1].contains_key("active"));
        Ok(())
    }

    #[test]
    fn test_load_records_rejects_non_scalars() {
        let err = load_records(r#"[{"a": 1}, {"tags": ["x"]}]"#.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("Record 1 field 'tags'"));

        let err = load_records(r#"[{"a": null}]"#.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("null"));

        let err = load_records(r#"[1, 2]"#.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Record 0 is not a JSON object"));

        assert!(load_records(r#"{"a": 1}"#.as_bytes()).is_err());
    }

    #[test]
    fn test_load_records_from_path() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"[{{"department": "HR", "age": 27}}]"#)?;
        let records = load_records_from_path(file.path())?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["department"], Value::from("HR"));

        let missing = file.path().with_extension("missing");
        assert!(load_records_from_path(&missing).is_err());
        Ok(())
    }

    #[test]
    fn test_records_to_json() -> Result<()> {
        let mut record = Context::new();
        record.insert("age".to_string(), Value::Integer(29));
        let json = records_to_json(&[&record])?;
        let parsed: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(parsed, serde_json::json!([{"age": 29}]));
        Ok(())
    }

    #[test]
    fn test_records_to_json_sorts_fields() -> Result<()> {
        let record: Context = ["salary", "name", "age", "department", "active"]
            .iter()
            .map(|k| (k.to_string(), Value::Integer(1)))
            .collect();
        let json = records_to_json(&[&record, &record])?;

        let positions: Vec<usize> = ["active", "age", "department", "name", "salary"]
            .iter()
            .filter_map(|k| json.find(&format!("\"{}\"", k)))
            .collect();
        assert_eq!(positions.len(), 5);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(json, records_to_json(&[&record.clone(), &record])?);
        Ok(())
    }
}
