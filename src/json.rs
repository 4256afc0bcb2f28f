//! Type-checked access to loosely structured JSON documents.
//!
//! The sensor endpoint is untrusted: any key may be missing, hold the wrong
//! type, or sit inside something that is not an object at all. Every
//! accessor here answers "not found" in all of those cases instead of
//! failing, so callers can fall back to a default with a single `?` or
//! `unwrap_or`.
//!
//! # Example
//!
//! ```
//! use hwpanel::json::{value_of_key_if_type, JsonType, JsonValue};
//!
//! let doc = JsonValue::parse(r#"{"name": "GPU temperature", "data": 61.0}"#).unwrap();
//!
//! let data = value_of_key_if_type(&doc, "data", JsonType::Double);
//! assert_eq!(data.and_then(JsonValue::as_double), Some(61.0));
//!
//! // Present, but not a string
//! assert!(value_of_key_if_type(&doc, "data", JsonType::String).is_none());
//! ```

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::Error;

/// A parsed JSON value.
///
/// Objects keep their members in document order and keep duplicate keys;
/// lookups return the first member with a matching key.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Object(Vec<(String, JsonValue)>),
    Array(Vec<JsonValue>),
    String(String),
    /// A number written with a fraction or exponent (`75.0`, `1e3`)
    Double(f64),
    /// An integral number literal (`75`, `-3`)
    Integer(i64),
    Boolean(bool),
    Null,
}

/// The runtime tag of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Object,
    Array,
    String,
    Double,
    Integer,
    Boolean,
    Null,
}

impl JsonValue {
    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `text` is not valid JSON.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    /// Get the runtime tag of this value.
    pub fn json_type(&self) -> JsonType {
        match self {
            JsonValue::Object(_) => JsonType::Object,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Double(_) => JsonType::Double,
            JsonValue::Integer(_) => JsonType::Integer,
            JsonValue::Boolean(_) => JsonType::Boolean,
            JsonValue::Null => JsonType::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Floating point payload. Integers are not coerced.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            JsonValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Check that a lookup produced a value of the expected type.
///
/// `None` (nothing found) never has a type.
pub fn has_type(value: Option<&JsonValue>, expected: JsonType) -> bool {
    value.is_some_and(|v| v.json_type() == expected)
}

/// Find the first member of `object` whose key equals `key`.
///
/// Returns `None` if there is no such member or `object` is not an object.
pub fn value_of_key<'a>(object: &'a JsonValue, key: &str) -> Option<&'a JsonValue> {
    match object {
        JsonValue::Object(members) => members
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value),
        _ => None,
    }
}

/// [`value_of_key`], additionally requiring the found value to be `expected`.
pub fn value_of_key_if_type<'a>(
    object: &'a JsonValue,
    key: &str,
    expected: JsonType,
) -> Option<&'a JsonValue> {
    let value = value_of_key(object, key);
    if has_type(value, expected) {
        value
    } else {
        None
    }
}

// =============================================================================
// Deserialization
// =============================================================================

struct JsonValueVisitor;

impl<'de> Visitor<'de> for JsonValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<JsonValue, E> {
        Ok(JsonValue::Boolean(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<JsonValue, E> {
        Ok(JsonValue::Integer(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<JsonValue, E> {
        // Too large for i64: keep the magnitude rather than reject the document
        Ok(i64::try_from(v)
            .map(JsonValue::Integer)
            .unwrap_or(JsonValue::Double(v as f64)))
    }

    fn visit_f64<E>(self, v: f64) -> Result<JsonValue, E> {
        Ok(JsonValue::Double(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v))
    }

    fn visit_unit<E>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<JsonValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<JsonValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(JsonValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<JsonValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
            members.push((key, value));
        }
        Ok(JsonValue::Object(members))
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(JsonValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JsonValue {
        JsonValue::parse(
            r#"{
                "name": "GPU temperature",
                "data": 75.0,
                "count": 3,
                "flag": true,
                "nothing": null,
                "items": [1, 2.5, "x"],
                "nested": {"inner": "value"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_number_classification() {
        let doc = JsonValue::parse(r#"[75, 75.0, -3, 1e3, 18446744073709551615]"#).unwrap();
        let items = doc.as_array().unwrap();
        assert_eq!(items[0], JsonValue::Integer(75));
        assert_eq!(items[1], JsonValue::Double(75.0));
        assert_eq!(items[2], JsonValue::Integer(-3));
        assert_eq!(items[3], JsonValue::Double(1000.0));
        assert_eq!(items[4].json_type(), JsonType::Double);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            JsonValue::parse("{\"entries\": ["),
            Err(Error::Serialization(_))
        ));
        assert!(JsonValue::parse("").is_err());
    }

    #[test]
    fn test_json_type() {
        let doc = sample();
        let expected = [
            ("name", JsonType::String),
            ("data", JsonType::Double),
            ("count", JsonType::Integer),
            ("flag", JsonType::Boolean),
            ("nothing", JsonType::Null),
            ("items", JsonType::Array),
            ("nested", JsonType::Object),
        ];
        for (key, ty) in expected {
            assert_eq!(value_of_key(&doc, key).unwrap().json_type(), ty, "{key}");
        }
    }

    #[test]
    fn test_has_type() {
        let value = JsonValue::Double(1.0);
        assert!(has_type(Some(&value), JsonType::Double));
        assert!(!has_type(Some(&value), JsonType::Integer));
        assert!(!has_type(Some(&value), JsonType::String));

        for ty in [JsonType::Object, JsonType::Null, JsonType::Double] {
            assert!(!has_type(None, ty));
        }
    }

    #[test]
    fn test_value_of_key_missing() {
        let doc = sample();
        assert!(value_of_key(&doc, "absent").is_none());
        for ty in [JsonType::Object, JsonType::Double, JsonType::Null] {
            assert!(value_of_key_if_type(&doc, "absent", ty).is_none());
        }
    }

    #[test]
    fn test_value_of_key_empty_object() {
        let doc = JsonValue::parse("{}").unwrap();
        assert!(value_of_key(&doc, "name").is_none());
    }

    #[test]
    fn test_value_of_key_on_non_object() {
        let array = JsonValue::parse(r#"[{"name": "x"}]"#).unwrap();
        assert!(value_of_key(&array, "name").is_none());
        assert!(value_of_key(&JsonValue::Null, "name").is_none());
        assert!(value_of_key(&JsonValue::String("name".into()), "name").is_none());
    }

    #[test]
    fn test_value_of_key_first_match_wins() {
        let doc = JsonValue::parse(r#"{"data": 1.0, "data": 2.0}"#).unwrap();
        assert_eq!(value_of_key(&doc, "data"), Some(&JsonValue::Double(1.0)));
    }

    #[test]
    fn test_value_of_key_is_case_sensitive() {
        let doc = sample();
        assert!(value_of_key(&doc, "Name").is_none());
        assert!(value_of_key(&doc, "name ").is_none());
    }

    #[test]
    fn test_value_of_key_if_type() {
        let doc = sample();
        assert_eq!(
            value_of_key_if_type(&doc, "data", JsonType::Double).and_then(JsonValue::as_double),
            Some(75.0)
        );
        assert!(value_of_key_if_type(&doc, "count", JsonType::Double).is_none());
        assert_eq!(
            value_of_key_if_type(&doc, "count", JsonType::Integer).and_then(JsonValue::as_integer),
            Some(3)
        );
        assert!(value_of_key_if_type(&doc, "nothing", JsonType::Null).is_some());
    }

    #[test]
    fn test_typed_accessors_do_not_coerce() {
        assert_eq!(JsonValue::Integer(5).as_double(), None);
        assert_eq!(JsonValue::Double(5.0).as_integer(), None);
        assert_eq!(JsonValue::Boolean(true).as_str(), None);
        assert!(JsonValue::Null.as_array().is_none());
    }
}
