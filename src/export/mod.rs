//! CSV export
//!
//! Renders a uniform record set to CSV text. Byte-exact reproducible: the
//! same input always serializes identically, and quote-doubling is the only
//! escape mechanism, so common CSV parsers reconstruct the original values.

use serde_json::{Map, Value};

use crate::core::AppResult;
use crate::models::Order;

/// Serialize rows to CSV.
///
/// The header row is the keys of the first record in their iteration order.
/// Empty input yields an empty string, not a header-only file. A field is
/// wrapped in quotes when it contains a comma, a quote, or a newline;
/// embedded quotes are doubled.
pub fn to_csv(rows: &[Map<String, Value>]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in rows {
        let line: Vec<String> = headers
            .iter()
            .map(|h| field(row.get(*h).unwrap_or(&Value::Null)))
            .collect();
        lines.push(line.join(","));
    }
    lines.join("\n")
}

/// Convert orders into CSV-ready rows, preserving Order field order
pub fn order_rows<'a>(orders: impl IntoIterator<Item = &'a Order>) -> AppResult<Vec<Map<String, Value>>> {
    orders
        .into_iter()
        .map(|order| {
            let value = serde_json::to_value(order)?;
            Ok(value.as_object().cloned().unwrap_or_default())
        })
        .collect()
}

fn field(value: &Value) -> String {
    let text = stringify(value);
    let escaped = text.replace('"', "\"\"");
    if escaped.contains(',') || escaped.contains('"') || escaped.contains('\n') {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Flatten a JSON value to field text. `null` is empty, arrays join their
/// elements with commas (the joined field then gets quoted), nested objects
/// serialize as JSON text.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Size;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn test_quoting_rules() {
        let rows = vec![row(json!({ "a": "x,y", "b": "he said \"hi\"" }))];
        assert_eq!(to_csv(&rows), "a,b\n\"x,y\",\"he said \"\"hi\"\"\"");
    }

    #[test]
    fn test_plain_fields_stay_unquoted() {
        let rows = vec![row(json!({ "a": "plain", "n": 3, "t": true, "z": null }))];
        assert_eq!(to_csv(&rows), "a,n,t,z\nplain,3,true,");
    }

    #[test]
    fn test_newline_forces_quoting() {
        let rows = vec![row(json!({ "notes": "line one\nline two" }))];
        assert_eq!(to_csv(&rows), "notes\n\"line one\nline two\"");
    }

    #[test]
    fn test_arrays_join_and_quote() {
        let rows = vec![row(json!({ "mockups": ["data:a", "data:b"] }))];
        assert_eq!(to_csv(&rows), "mockups\n\"data:a,data:b\"");
    }

    #[test]
    fn test_deterministic() {
        let rows = vec![row(json!({ "a": "1", "b": "2" })), row(json!({ "a": "3", "b": "4" }))];
        assert_eq!(to_csv(&rows), to_csv(&rows));
    }

    #[test]
    fn test_order_rows_preserve_field_order() {
        let order = Order {
            id: "o1".into(),
            ts: "2024-06-01T10:00:00Z".into(),
            client: "Bolos Crew".into(),
            model: "Classic Tee - Black".into(),
            model_image: String::new(),
            size: Size::M,
            qty: 2,
            name: "Jane".into(),
            email: "jane@example.com".into(),
            phone: String::new(),
            address: String::new(),
            notes: String::new(),
            mockups: vec![],
        };
        let rows = order_rows([&order]).unwrap();
        let csv = to_csv(&rows);
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "id,ts,client,model,modelImage,size,qty,name,email,phone,address,notes,mockups"
        );
        assert!(csv.lines().nth(1).unwrap().starts_with("o1,2024-06-01T10:00:00Z,Bolos Crew"));
    }
}
