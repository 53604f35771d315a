//! Property tests for attribute coercion

use proptest::prelude::*;
use sdlschema::{coerce, ItemKind, Value, ValueKind};

fn finite() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO
}

proptest! {
    #[test]
    fn numbers_survive_formatting(n in finite()) {
        prop_assert_eq!(coerce(&n.to_string(), ValueKind::Number), Ok(Value::Number(n)));
    }

    #[test]
    fn tuples_need_exact_arity(components in prop::collection::vec(finite(), 1..6)) {
        let text = components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let arity = components.len();

        prop_assert_eq!(coerce(&text, ValueKind::Tuple(arity)), Ok(Value::Tuple(components)));
        prop_assert!(coerce(&text, ValueKind::Tuple(arity + 1)).is_err());
        if arity > 1 {
            prop_assert!(coerce(&text, ValueKind::Tuple(arity - 1)).is_err());
        }
    }

    #[test]
    fn array_items_are_trimmed(
        items in prop::collection::vec(any::<i64>(), 0..20),
        pad in "[ \t]{0,3}",
    ) {
        let text = items
            .iter()
            .map(|i| format!("{}{}{}", pad, i, pad))
            .collect::<Vec<_>>()
            .join(",");
        let expected = Value::Array(items.into_iter().map(Value::Integer).collect());

        prop_assert_eq!(coerce(&text, ValueKind::Array(ItemKind::Integer)), Ok(expected));
    }

    #[test]
    fn booleans_are_strict(text in "\\PC*") {
        let result = coerce(&text, ValueKind::Boolean);
        match text.as_str() {
            "true" => prop_assert_eq!(result, Ok(Value::Boolean(true))),
            "false" => prop_assert_eq!(result, Ok(Value::Boolean(false))),
            _ => prop_assert!(result.is_err()),
        }
    }

    #[test]
    fn formatted_arrays_coerce_back(
        points in prop::collection::vec(prop::array::uniform3(finite()), 0..10),
    ) {
        let kind = ValueKind::Array(ItemKind::Tuple(3));
        let value = Value::Array(points.iter().map(|p| Value::Tuple(p.to_vec())).collect());

        prop_assert_eq!(coerce(&value.to_string(), kind), Ok(value));
    }

    #[test]
    fn text_is_taken_verbatim(text in "\\PC*") {
        prop_assert_eq!(coerce(&text, ValueKind::Text), Ok(Value::Text(text.clone())));
        prop_assert_eq!(coerce(&text, ValueKind::Reference), Ok(Value::Reference(text.clone())));
    }
}
