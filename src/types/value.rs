use std::ops::{Index, IndexMut};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

pub type Map = IndexMap<String, Value>;

/// A parsed JSON datum. Object keys are unique and keep the position of their
/// first occurrence; a repeated key overwrites the earlier value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The number as an integer, when it has no fractional part and fits.
    /// Negative zero stays a float.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) if *n == 0.0 && n.is_sign_negative() => None,
            Value::Number(n) if n.fract() == 0.0 => {
                let i = *n as i64;
                (i as f64 == *n && i != i64::MAX).then_some(i)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(obj) => obj.get(key),
            _ => None,
        }
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Value::Array(arr) => arr.get(index).unwrap_or_else(|| {
                panic!(
                    "index {index} out of bounds for array of length {}",
                    arr.len()
                )
            }),
            _ => panic!(
                "cannot index into non-array value of type {}",
                self.type_name()
            ),
        }
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self {
            Value::Array(arr) => {
                let len = arr.len();
                arr.get_mut(index).unwrap_or_else(|| {
                    panic!("index {index} out of bounds for array of length {len}")
                })
            }
            _ => panic!(
                "cannot index into non-array value of type {}",
                self.type_name()
            ),
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        match self {
            Value::Object(obj) => obj.get(key).unwrap_or_else(|| {
                panic!("key '{key}' not found in object with {} entries", obj.len())
            }),
            _ => panic!(
                "cannot index into non-object value of type {}",
                self.type_name()
            ),
        }
    }
}

impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        match self {
            Value::Object(obj) => {
                let len = obj.len();
                obj.get_mut(key)
                    .unwrap_or_else(|| panic!("key '{key}' not found in object with {len} entries"))
            }
            _ => panic!(
                "cannot index into non-object value of type {}",
                self.type_name()
            ),
        }
    }
}

impl Index<String> for Value {
    type Output = Value;

    fn index(&self, key: String) -> &Self::Output {
        self.index(key.as_str())
    }
}

impl IndexMut<String> for Value {
    fn index_mut(&mut self, key: String) -> &mut Self::Output {
        self.index_mut(key.as_str())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match self.as_i64() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (key, value) in obj {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => match Value::Number(n).as_i64() {
                Some(i) => serde_json::Value::Number(i.into()),
                None => serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(Into::into).collect())
            }
            Value::Object(obj) => {
                let mut new_obj = serde_json::Map::new();
                for (k, v) in obj {
                    new_obj.insert(k, v.into());
                }
                serde_json::Value::Object(new_obj)
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        value.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use serde_json::json;

    use super::{Map, Value};

    #[rstest::rstest]
    fn test_integer_checks() {
        assert_eq!(Value::Number(42.0).as_i64(), Some(42));
        assert_eq!(Value::Number(-3.0).as_i64(), Some(-3));
        assert_eq!(Value::Number(42.5).as_i64(), None);
        assert_eq!(Value::Number(1e300).as_i64(), None);
        assert_eq!(Value::String("1".into()).as_i64(), None);
    }

    #[rstest::rstest]
    fn test_accessors_and_take() {
        let mut obj = Map::new();
        obj.insert("a".to_string(), Value::Number(1.0));

        let mut value = Value::Object(obj);
        assert!(value.is_object());
        assert_eq!(value.type_name(), "object");
        assert_eq!(value.get("a").and_then(Value::as_f64), Some(1.0));

        value
            .as_object_mut()
            .unwrap()
            .insert("b".to_string(), Value::String("hi".to_string()));
        assert_eq!(value.get("b").and_then(Value::as_str), Some("hi"));

        let mut arr = Value::Array(vec![Value::Bool(true)]);
        assert!(arr.is_array());
        arr.as_array_mut().unwrap().push(Value::Null);
        assert_eq!(arr.as_array().unwrap().len(), 2);
        assert!(arr.get_index(1).is_some_and(Value::is_null));

        let mut taken = Value::String("take".to_string());
        let prior = taken.take();
        assert!(taken.is_null());
        assert_eq!(prior.as_str(), Some("take"));
    }

    #[rstest::rstest]
    fn test_indexing_success() {
        let mut arr = Value::Array(vec![Value::Number(1.0), Value::Null]);
        assert_eq!(arr[0].as_f64(), Some(1.0));
        arr[1] = Value::Bool(true);
        assert_eq!(arr[1].as_bool(), Some(true));

        let mut obj = Map::new();
        obj.insert("key".to_string(), Value::Bool(false));
        let mut value = Value::Object(obj);

        assert_eq!(value["key"].as_bool(), Some(false));
        value["key"] = Value::Bool(true);
        assert_eq!(value["key"].as_bool(), Some(true));

        let owned_key = "key".to_string();
        assert_eq!(value[owned_key].as_bool(), Some(true));
    }

    #[rstest::rstest]
    fn test_indexing_panics() {
        let value = Value::Null;
        let err = catch_unwind(AssertUnwindSafe(|| {
            let _ = &value["missing"];
        }));
        assert!(err.is_err());

        let empty_array = Value::Array(Vec::new());
        let err = catch_unwind(AssertUnwindSafe(|| {
            let _ = &empty_array[1];
        }));
        assert!(err.is_err());

        let mut not_array = Value::Null;
        let err = catch_unwind(AssertUnwindSafe(|| {
            not_array[0] = Value::Null;
        }));
        assert!(err.is_err());
    }

    #[rstest::rstest]
    fn test_serde_json_conversions() {
        let json_value = json!({"a": [1, 2.5, "x"], "b": {"c": true, "d": null}});
        let value = Value::from(json_value.clone());
        assert_eq!(value["a"][1].as_f64(), Some(2.5));
        let roundtrip: serde_json::Value = value.into();
        assert_eq!(roundtrip, json_value);
    }

    #[rstest::rstest]
    fn test_serialize_prefers_integers() {
        let value = Value::Array(vec![Value::Number(3.0), Value::Number(0.25)]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[3,0.25]");
    }

    #[rstest::rstest]
    fn test_negative_zero_keeps_its_sign() {
        let value = Value::Number(-0.0);
        assert_eq!(value.as_i64(), None);
        assert_eq!(Value::Number(0.0).as_i64(), Some(0));
        assert_eq!(serde_json::to_string(&value).unwrap(), "-0.0");

        let converted = serde_json::Value::from(value);
        assert_eq!(converted.to_string(), "-0.0");
        assert!(converted.as_f64().is_some_and(|n| n.is_sign_negative()));
    }

    #[rstest::rstest]
    fn test_serialize_keeps_key_order() {
        let mut obj = Map::new();
        obj.insert("z".to_string(), Value::Null);
        obj.insert("a".to_string(), Value::String("q\"".to_string()));
        let text = serde_json::to_string(&Value::Object(obj)).unwrap();
        assert_eq!(text, r#"{"z":null,"a":"q\""}"#);
    }
}
