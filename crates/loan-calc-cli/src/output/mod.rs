pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod summary;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
        OutputFormat::Summary => summary::print_summary(value),
    }
}

/// Split a result object into its scalar fields (nested objects flattened
/// as `parent.child`) and its first array field, e.g. schedule periods.
pub(crate) fn split_result(result: &Map<String, Value>) -> (Vec<(String, Value)>, Option<&[Value]>) {
    let mut fields = Vec::new();
    let mut rows = None;
    for (key, val) in result {
        match val {
            Value::Object(inner) => {
                for (k, v) in inner {
                    fields.push((format!("{key}.{k}"), v.clone()));
                }
            }
            Value::Array(arr) if rows.is_none() => rows = Some(arr.as_slice()),
            _ => fields.push((key.clone(), val.clone())),
        }
    }
    (fields, rows)
}
