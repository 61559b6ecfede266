//! Shape predicates
//!
//! Each function answers "does this value have shape S?" for one shape of
//! the vocabulary. They are total: a wrong shape yields `false`, never a
//! panic. Nested failures are opaque; no predicate reports which inner
//! element was wrong.
//!
//! Copyright (c) 2025 Shapetag Team
//! Licensed under the Apache-2.0 license

use crate::value::Value;

/// A shape predicate
pub type Predicate = fn(&Value) -> bool;

pub fn is_str(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Integers only; booleans and floats do not qualify
pub fn is_int(value: &Value) -> bool {
    matches!(value, Value::Int(_))
}

/// Floats only; integral numbers do not qualify
pub fn is_float(value: &Value) -> bool {
    matches!(value, Value::Float(_))
}

/// Sequence whose every element satisfies `elem`; empty sequences pass
pub fn is_list_of(value: &Value, elem: Predicate) -> bool {
    match value {
        Value::Seq(items) => items.iter().all(elem),
        _ => false,
    }
}

/// Mapping whose keys are all strings and whose values all satisfy `val`
pub fn is_str_keyed_map_of(value: &Value, val: Predicate) -> bool {
    match value {
        Value::Map(map) => map.iter().all(|(k, v)| is_str(k) && val(v)),
        _ => false,
    }
}

pub fn is_list_of_str(value: &Value) -> bool {
    is_list_of(value, is_str)
}

pub fn is_list_of_int(value: &Value) -> bool {
    is_list_of(value, is_int)
}

pub fn is_list_of_float(value: &Value) -> bool {
    is_list_of(value, is_float)
}

/// The only shape with an optional counterpart: null, or a list of strings
pub fn is_none_or_list_of_str(value: &Value) -> bool {
    value.is_null() || is_list_of_str(value)
}

/// `{str: dict}`; inner mappings are not inspected
pub fn is_dict_str_dict(value: &Value) -> bool {
    is_str_keyed_map_of(value, |v| matches!(v, Value::Map(_)))
}

pub fn is_dict_str_list_of_str(value: &Value) -> bool {
    is_str_keyed_map_of(value, is_list_of_str)
}

pub fn is_dict_str_list_of_float(value: &Value) -> bool {
    is_str_keyed_map_of(value, is_list_of_float)
}

/// `{str: str}`: keys and values together are all strings
pub fn is_dict_str_str(value: &Value) -> bool {
    is_str_keyed_map_of(value, is_str)
}

pub fn is_two_level_dict_str_str_str(value: &Value) -> bool {
    is_str_keyed_map_of(value, is_dict_str_str)
}

pub fn is_two_level_dict_str_str_list_of_str(value: &Value) -> bool {
    is_str_keyed_map_of(value, is_dict_str_list_of_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Map;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_scalars_do_not_coerce() {
        assert!(is_str(&v(json!("3"))));
        assert!(!is_str(&v(json!(3))));
        assert!(is_int(&v(json!(3))));
        assert!(!is_int(&v(json!("3"))));
        assert!(!is_int(&v(json!(true))));
        assert!(!is_int(&v(json!(3.0))));
        assert!(is_float(&v(json!(3.0))));
        assert!(!is_float(&v(json!(3))));
    }

    #[test]
    fn test_lists_are_vacuously_true_when_empty() {
        let empty = v(json!([]));
        assert!(is_list_of_str(&empty));
        assert!(is_list_of_int(&empty));
        assert!(is_list_of_float(&empty));
    }

    #[test]
    fn test_lists_reject_mixed_and_non_sequences() {
        assert!(is_list_of_str(&v(json!(["a", "b"]))));
        assert!(!is_list_of_str(&v(json!(["a", 1]))));
        assert!(!is_list_of_str(&v(json!("ab"))));
        assert!(!is_list_of_int(&v(json!([1, false]))));
        assert!(is_list_of_float(&v(json!([1.5, 2.0]))));
        assert!(!is_list_of_float(&v(json!([1.5, 2]))));
        assert!(!is_list_of_int(&v(json!({"a": 1}))));
    }

    #[test]
    fn test_none_or_list_of_str() {
        assert!(is_none_or_list_of_str(&Value::Null));
        assert!(is_none_or_list_of_str(&v(json!(["x"]))));
        assert!(!is_none_or_list_of_str(&v(json!([1, 2]))));
        assert!(!is_none_or_list_of_str(&v(json!("x"))));
    }

    #[test]
    fn test_dict_str_dict_does_not_recurse() {
        assert!(is_dict_str_dict(&v(json!({}))));
        assert!(is_dict_str_dict(&v(json!({"a": {"x": 1}, "b": {}}))));
        assert!(!is_dict_str_dict(&v(json!({"a": 5}))));
        assert!(!is_dict_str_dict(&v(json!([{}]))));
    }

    #[test]
    fn test_dict_str_str() {
        assert!(is_dict_str_str(&v(json!({"a": "b"}))));
        assert!(!is_dict_str_str(&v(json!({"a": 1}))));
        let mut map = Map::new();
        map.insert(1, "b");
        assert!(!is_dict_str_str(&Value::Map(map)));
    }

    #[test]
    fn test_dict_str_lists() {
        assert!(is_dict_str_list_of_str(&v(json!({"a": ["x"], "b": []}))));
        assert!(!is_dict_str_list_of_str(&v(json!({"a": "x"}))));
        assert!(is_dict_str_list_of_float(&v(json!({"a": [0.5]}))));
        assert!(!is_dict_str_list_of_float(&v(json!({"a": [1]}))));
    }

    #[test]
    fn test_two_level_dicts() {
        assert!(is_two_level_dict_str_str_str(&v(json!({"fr": {"a": "b"}}))));
        assert!(!is_two_level_dict_str_str_str(&v(json!({"fr": {"a": 1}}))));
        assert!(!is_two_level_dict_str_str_str(&v(json!({"fr": "a"}))));
        assert!(is_two_level_dict_str_str_list_of_str(&v(json!({"fr": {"a": ["b"]}}))));
        assert!(!is_two_level_dict_str_str_list_of_str(&v(json!({"fr": {"a": "b"}}))));
    }
}
