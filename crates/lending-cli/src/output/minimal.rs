use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known lending result fields in order of
/// priority, checking the summary sub-object as well, then fall back
/// to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "effective_annual_rate_percent",
        "periodic_payment",
        "penalty",
        "total_due",
        "net_disbursement",
        "total_payable",
        "total_interest",
    ];

    if let Value::Object(map) = result {
        let summary = map.get("summary").and_then(|s| s.as_object());

        for key in &priority_keys {
            let hit = map
                .get(*key)
                .or_else(|| summary.and_then(|s| s.get(*key)));
            if let Some(val) = hit {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
