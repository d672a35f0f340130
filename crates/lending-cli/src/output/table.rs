use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Schedule-shaped results print their scalar fields first (nested
/// objects such as the summary flattened with dotted keys), then the
/// per-period entries as their own table.
pub fn print_table(value: &Value) {
    let Some(envelope) = value.as_object() else {
        println!("{}", value);
        return;
    };

    let result = envelope.get("result").unwrap_or(value);

    match result {
        Value::Object(fields) => {
            print_scalar_fields(fields);
            if let Some(Value::Array(entries)) = fields.get("entries") {
                println!("\nSchedule:");
                print_entries(entries);
            }
        }
        Value::Array(entries) => print_entries(entries),
        other => println!("{}", other),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for warning in warnings {
                if let Value::String(s) = warning {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_scalar_fields(fields: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);

    for (key, val) in fields {
        match val {
            // The entries table prints separately
            Value::Array(_) if key == "entries" => {}
            Value::Object(inner) => {
                for (inner_key, inner_val) in inner {
                    builder.push_record([format!("{key}.{inner_key}"), format_value(inner_val)]);
                }
            }
            other => {
                builder.push_record([key.as_str(), &format_value(other)]);
            }
        }
    }

    println!("{}", Table::from(builder));
}

fn print_entries(entries: &[Value]) {
    if entries.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = entries.first() else {
        for entry in entries {
            println!("{}", format_value(entry));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for entry in entries {
        if let Value::Object(map) = entry {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
