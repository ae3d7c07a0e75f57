use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_value, split_rows};

/// Format output as tables: the result fields first, then one table per
/// row-shaped array, then warnings and methodology.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result(result, map),
            Some(Value::Array(rows)) => print_rows(rows),
            _ => print_fields(map.iter().map(|(k, v)| (k.as_str(), v))),
        },
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    let (scalars, rows) = split_rows(result);
    print_fields(scalars.into_iter());

    for (name, items) in rows {
        println!("\n{}", name.bold());
        print_rows(items);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_fields<'a>(fields: impl Iterator<Item = (&'a str, &'a Value)>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.to_string(), format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            println!("{}", format_value(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}
