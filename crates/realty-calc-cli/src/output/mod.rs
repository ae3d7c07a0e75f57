pub mod csv_out;
pub mod json;
pub mod minimal;
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
    }
}

/// Scalar fields of a result and its row-shaped arrays (schedules,
/// distributions, shares), split for formatters that print them apart.
pub(crate) fn split_rows(
    result: &Map<String, Value>,
) -> (Vec<(&str, &Value)>, Vec<(&str, &[Value])>) {
    let mut scalars = Vec::new();
    let mut rows = Vec::new();
    for (key, val) in result {
        match val {
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                rows.push((key.as_str(), items.as_slice()))
            }
            _ => scalars.push((key.as_str(), val)),
        }
    }
    (scalars, rows)
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_rows_separates_schedules() {
        let result = json!({
            "monthly_payment": "1000",
            "schedule": [{ "period": 1 }, { "period": 2 }],
            "tags": ["a", "b"]
        });
        let (scalars, rows) = split_rows(result.as_object().unwrap());
        assert_eq!(scalars.len(), 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "schedule");
        assert_eq!(rows[0].1.len(), 2);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("1200000")), "1200000");
        assert_eq!(format_value(&json!(["a", "b"])), "a, b");
        assert_eq!(format_value(&Value::Null), "");
    }
}
