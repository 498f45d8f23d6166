//! Property-based tests for report validity
#![cfg(feature = "json")]

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use sluice::prelude::*;

/// One leaf per entry: the field is present when `Some`, and its value is
/// non-empty when the flag is set.
fn tree_and_payload(fields: &[Option<bool>]) -> (Validations, Value) {
    let mut validations = Validations::new();
    let mut payload = Map::new();
    for (index, field) in fields.iter().enumerate() {
        let key = format!("f{}", index);
        validations.add(key.as_str(), !string::empty());
        if let Some(filled) = field {
            let value = if *filled { "x" } else { "" };
            payload.insert(key, json!(value));
        }
    }
    (validations, Value::Object(payload))
}

proptest! {
    #[test]
    fn prop_valid_iff_every_leaf_passes(
        fields in prop::collection::vec(prop::option::of(any::<bool>()), 0..16)
    ) {
        let (validations, payload) = tree_and_payload(&fields);
        let report = validations.validate_json(&payload.to_string()).unwrap();

        let expected = fields.iter().all(|field| *field == Some(true));
        prop_assert_eq!(report.is_valid(), expected);
        prop_assert_eq!(report.len(), fields.len());

        let failing = fields.iter().filter(|field| **field != Some(true)).count();
        prop_assert_eq!(report.failures().len(), failing);
    }

    #[test]
    fn prop_evaluation_is_repeatable(
        fields in prop::collection::vec(prop::option::of(any::<bool>()), 0..16)
    ) {
        let (validations, payload) = tree_and_payload(&fields);
        let body = payload.to_string();
        let first = validations.validate_json(&body).unwrap();
        let second = validations.validate_json(&body).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_each_reports_one_tree_per_element(
        names in prop::collection::vec("[a-z]{0,4}", 0..12)
    ) {
        let mut validations = Validations::new();
        validations.add_each("items", |_, item| {
            item.add("name", !string::empty());
        });
        let items: Vec<Value> = names.iter().map(|name| json!({"name": name})).collect();
        let body = json!({"items": items}).to_string();

        let report = validations.validate_json(&body).unwrap();
        let elements = report
            .get("items")
            .and_then(sluice::ResultNode::as_sequence)
            .map(<[_]>::len);
        prop_assert_eq!(elements, Some(names.len()));

        let empty: Vec<String> = names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.is_empty())
            .map(|(index, _)| format!("items[{}].name is empty", index))
            .collect();
        let rendered: Vec<String> = report.failures().iter().map(ToString::to_string).collect();
        prop_assert_eq!(rendered, empty);
    }

    #[test]
    fn prop_and_fails_when_either_side_fails(value in -100_i64..100, a in -50_i64..50, b in -50_i64..50) {
        let combined = number::min(a).and(number::max(b));
        let expected = value >= a && value <= b;
        prop_assert_eq!(combined.validate(&value).is_pass(), expected);

        let either = number::min(a).or(number::max(b));
        prop_assert_eq!(either.validate(&value).is_pass(), value >= a || value <= b);

        prop_assert_eq!((!number::min(a)).validate(&value).is_pass(), value < a);
    }
}
