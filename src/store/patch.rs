//! Schema patcher
//!
//! Persisted schemas evolve across versions without a migration mechanism;
//! this module *is* the migration mechanism, applied on every load. Both
//! functions are total and idempotent: any raw JSON (missing fields, wrong
//! types, `null`, legacy shapes) normalizes to complete records, and
//! patching an already-patched collection changes nothing.

use serde_json::Value;

use crate::models::{Model, Order, Size};
use crate::utils::now_rfc3339;

/// Normalize a raw persisted model list into complete [`Model`] records.
///
/// Missing input is an empty list. Per entry: `id` is generated when absent,
/// `name` defaults to `"Model"`, `available` to `true`, `image` to empty.
pub fn patch_models(raw: Option<&Value>) -> Vec<Model> {
    let entries = match raw.and_then(Value::as_array) {
        Some(list) => list.as_slice(),
        None => &[],
    };

    entries
        .iter()
        .map(|entry| Model {
            id: string_field(entry, "id").unwrap_or_else(new_id),
            name: string_field(entry, "name").unwrap_or_else(|| "Model".to_string()),
            available: entry
                .get("available")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            image: string_field(entry, "image").unwrap_or_default(),
        })
        .collect()
}

/// Normalize a raw persisted order list into complete [`Order`] records.
///
/// `models` supplies the image lookup for legacy orders that predate the
/// `modelImage` snapshot field; `tenant` fills a missing `client`. Non-array
/// `mockups` are discarded, not errored.
pub fn patch_orders(raw: Option<&Value>, models: &[Model], tenant: &str) -> Vec<Order> {
    let entries = match raw.and_then(Value::as_array) {
        Some(list) => list.as_slice(),
        None => &[],
    };

    entries
        .iter()
        .map(|entry| {
            let model = string_field(entry, "model").unwrap_or_default();
            let model_image = string_field(entry, "modelImage").unwrap_or_else(|| {
                models
                    .iter()
                    .find(|m| m.name == model)
                    .map(|m| m.image.clone())
                    .unwrap_or_default()
            });
            Order {
                id: string_field(entry, "id").unwrap_or_else(new_id),
                ts: string_field(entry, "ts").unwrap_or_else(now_rfc3339),
                client: string_field(entry, "client").unwrap_or_else(|| tenant.to_string()),
                model,
                model_image,
                size: string_field(entry, "size")
                    .map(|s| Size::parse_or_default(&s))
                    .unwrap_or_default(),
                qty: coerce_qty(entry.get("qty")),
                name: string_field(entry, "name").unwrap_or_default(),
                email: string_field(entry, "email").unwrap_or_default(),
                phone: string_field(entry, "phone").unwrap_or_default(),
                address: string_field(entry, "address").unwrap_or_default(),
                notes: string_field(entry, "notes").unwrap_or_default(),
                mockups: entry
                    .get("mockups")
                    .and_then(Value::as_array)
                    .map(|list| {
                        list.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            }
        })
        .collect()
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn string_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key)?.as_str().map(str::to_string)
}

/// Coerce a raw quantity to an integer >= 1. Accepts numbers and numeric
/// strings; anything else (including zero and negatives) becomes 1.
fn coerce_qty(raw: Option<&Value>) -> u32 {
    let n = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() && n >= 1.0 => n as u32,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_models_fills_defaults() {
        let raw = json!([{}, { "name": "Hoodie", "available": false }]);
        let models = patch_models(Some(&raw));

        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "Model");
        assert!(models[0].available);
        assert!(!models[0].id.is_empty());
        assert_eq!(models[1].name, "Hoodie");
        assert!(!models[1].available);
    }

    #[test]
    fn test_patch_models_tolerates_garbage() {
        assert!(patch_models(None).is_empty());
        assert!(patch_models(Some(&Value::Null)).is_empty());
        assert!(patch_models(Some(&json!("not a list"))).is_empty());

        // Non-object entries become fully-defaulted records
        let models = patch_models(Some(&json!([42, "x", null])));
        assert_eq!(models.len(), 3);
        assert!(models.iter().all(|m| m.name == "Model" && m.available));
    }

    #[test]
    fn test_patch_models_idempotent() {
        let raw = json!([{ "name": "Hoodie" }, { "available": false, "image": "data:x" }]);
        let once = patch_models(Some(&raw));
        let twice = patch_models(Some(&serde_json::to_value(&once).unwrap()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_patch_orders_fills_defaults() {
        let orders = patch_orders(Some(&json!([{}])), &[], "Bolos Crew");

        assert_eq!(orders.len(), 1);
        let o = &orders[0];
        assert!(!o.id.is_empty());
        assert!(!o.ts.is_empty());
        assert_eq!(o.client, "Bolos Crew");
        assert_eq!(o.model, "");
        assert_eq!(o.size, Size::M);
        assert_eq!(o.qty, 1);
        assert!(o.mockups.is_empty());
    }

    #[test]
    fn test_patch_orders_looks_up_model_image() {
        let mut model = Model::new("Classic Tee - Black", true);
        model.image = "data:image/png;base64,AAAA".to_string();

        let raw = json!([
            { "model": "Classic Tee - Black" },
            { "model": "Unknown" },
            { "model": "Classic Tee - Black", "modelImage": "data:already-set" },
        ]);
        let orders = patch_orders(Some(&raw), &[model], "t");

        assert_eq!(orders[0].model_image, "data:image/png;base64,AAAA");
        assert_eq!(orders[1].model_image, "");
        // An existing snapshot is never overwritten by the lookup
        assert_eq!(orders[2].model_image, "data:already-set");
    }

    #[test]
    fn test_patch_orders_coerces_qty() {
        let raw = json!([
            { "qty": 3 },
            { "qty": 0 },
            { "qty": -2 },
            { "qty": "4" },
            { "qty": "junk" },
            { "qty": 2.9 },
        ]);
        let orders = patch_orders(Some(&raw), &[], "t");
        let qtys: Vec<u32> = orders.iter().map(|o| o.qty).collect();
        assert_eq!(qtys, vec![3, 1, 1, 4, 1, 2]);
    }

    #[test]
    fn test_patch_orders_discards_non_array_mockups() {
        let raw = json!([
            { "mockups": "data:not-a-list" },
            { "mockups": ["data:a", 7, "data:b"] },
        ]);
        let orders = patch_orders(Some(&raw), &[], "t");
        assert!(orders[0].mockups.is_empty());
        assert_eq!(orders[1].mockups, vec!["data:a", "data:b"]);
    }

    #[test]
    fn test_patch_orders_idempotent() {
        let raw = json!([
            { "model": "Tee", "size": "XL", "qty": 2, "name": "Jane" },
            { "size": "bogus" },
        ]);
        let once = patch_orders(Some(&raw), &[], "t");
        let twice = patch_orders(Some(&serde_json::to_value(&once).unwrap()), &[], "t");
        assert_eq!(once, twice);
        assert_eq!(once[1].size, Size::M);
    }
}
