use serde_json::Value;

use super::format_value;

/// Headline figure of each calculator family, most specific first.
const PRIORITY_KEYS: [&str; 16] = [
    "total_tax",
    "total_cost",
    "total_fee",
    "total_with_vat",
    "commission",
    "monthly_payment",
    "max_loan_amount",
    "max_loan",
    "dsr_rate",
    "dti_rate",
    "monthly_rent",
    "jeonse_equivalent",
    "new_rent",
    "new_deposit",
    "remaining_value",
    "roi",
];

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_value(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}
