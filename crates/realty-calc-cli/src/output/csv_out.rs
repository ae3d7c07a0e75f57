use serde_json::Value;
use std::io;

use super::{format_value, split_rows};

/// Write output as CSV to stdout. A result carrying a schedule or other
/// row-shaped array is written as those rows; otherwise as field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value.get("result") {
        Some(Value::Object(result)) => {
            let (scalars, rows) = split_rows(result);
            match rows.first() {
                Some((_, items)) => write_rows(&mut wtr, items),
                None => {
                    let _ = wtr.write_record(["field", "value"]);
                    for (key, val) in scalars {
                        let _ = wtr.write_record([key, &format_value(val)]);
                    }
                }
            }
        }
        Some(Value::Array(items)) => write_rows(&mut wtr, items),
        _ => {
            if let Value::Object(map) = value {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_value(val)]);
                }
            } else {
                let _ = wtr.write_record([&format_value(value)]);
            }
        }
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, items: &[Value]) {
    let Some(Value::Object(first)) = items.first() else {
        for item in items {
            let _ = wtr.write_record([&format_value(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for item in items {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
