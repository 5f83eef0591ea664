//! Conversions between Value and serde types.

use serde::de::DeserializeOwned;
use serde::Serialize;
use structconf_core::{Error, Format, Value};

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    let json = value_to_json(value);
    serde_json::from_value(json).map_err(|e| Error::decode(Format::VALUE, e.to_string()))
}

/// Convert a Rust type to a Value via serde.
///
/// Fails with `Error::Encode` on integers outside the `i64` range, which
/// `Value` cannot hold. Non-finite floats serialize as `Value::Null`.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Error> {
    let json =
        serde_json::to_value(data).map_err(|e| Error::encode(Format::VALUE, e.to_string()))?;
    if let Some(n) = find_wide_integer(&json) {
        return Err(Error::encode(
            Format::VALUE,
            format!("integer {} does not fit in i64", n),
        ));
    }
    Ok(json_to_value(json))
}

fn find_wide_integer(json: &serde_json::Value) -> Option<&serde_json::Number> {
    match json {
        serde_json::Value::Number(n) if n.is_u64() && n.as_i64().is_none() => Some(n),
        serde_json::Value::Array(arr) => arr.iter().find_map(find_wide_integer),
        serde_json::Value::Object(map) => map.values().find_map(find_wide_integer),
        _ => None,
    }
}

/// Convert our Value to serde_json::Value.
pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
///
/// Integers above `i64::MAX` are kept as their decimal string.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // u64 beyond i64::MAX
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Adam {
        #[serde(rename = "type")]
        kind: String,
        lr: f64,
        beta: f64,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Optimizer {
        optimizer: Adam,
    }

    #[test]
    fn roundtrip_nested_struct() {
        let original = Optimizer {
            optimizer: Adam {
                kind: "adam".to_string(),
                lr: 0.1,
                beta: 0.01,
            },
        };

        let value = to_value(&original).unwrap();
        let recovered: Optimizer = from_value(value).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn struct_becomes_map() {
        #[derive(Serialize)]
        struct ConfigWithoutGroup {
            group: bool,
        }

        let value = to_value(&ConfigWithoutGroup { group: false }).unwrap();
        let expected: Value = [("group", false)].into_iter().collect();
        assert_eq!(value, expected);
    }

    #[test]
    fn json_to_value_numbers() {
        let json = serde_json::json!({
            "integer": 42,
            "float": 2.75,
            "negative": -100
        });

        match json_to_value(json) {
            Value::Map(map) => {
                assert_eq!(map.get("integer"), Some(&Value::Integer(42)));
                assert_eq!(map.get("negative"), Some(&Value::Integer(-100)));
                if let Some(Value::Float(f)) = map.get("float") {
                    assert!((f - 2.75).abs() < 0.001);
                } else {
                    panic!("expected float");
                }
            }
            _ => panic!("expected map"),
        }
    }

    #[test]
    fn value_to_json_nan_becomes_null() {
        assert_eq!(value_to_json(Value::Float(f64::NAN)), serde_json::Value::Null);
    }

    #[test]
    fn value_to_json_map() {
        let value: Value = [("key", Value::from("value")), ("num", Value::from(42i64))]
            .into_iter()
            .collect();
        assert_eq!(
            value_to_json(value),
            serde_json::json!({"key": "value", "num": 42})
        );
    }

    #[test]
    fn from_value_error() {
        let value = Value::String("not a struct".to_string());
        let result: Result<Optimizer, _> = from_value(value);
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[test]
    fn to_value_rejects_wide_integers() {
        #[derive(Serialize)]
        struct Counter {
            count: u64,
        }

        let err = to_value(&Counter { count: u64::MAX }).unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
        assert!(err.to_string().contains(&u64::MAX.to_string()));
        assert_eq!(
            to_value(&vec![i64::MAX as u64]).unwrap(),
            Value::Array(vec![Value::Integer(i64::MAX)])
        );
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert_eq!(to_value(&f64::NAN).unwrap(), Value::Null);
    }

    #[test]
    fn json_to_value_keeps_wide_integers_as_text() {
        assert_eq!(
            json_to_value(serde_json::json!(u64::MAX)),
            Value::String(u64::MAX.to_string())
        );
    }

    #[test]
    fn to_value_primitives() {
        assert_eq!(to_value(&42i32).unwrap(), Value::Integer(42));
        assert_eq!(to_value(&"hello").unwrap(), Value::from("hello"));
        assert_eq!(to_value(&Option::<i32>::None).unwrap(), Value::Null);
    }
}
