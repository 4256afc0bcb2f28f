//! MSI Afterburner readings.
//!
//! The `"afterburner"` section is flat: one `"entries"` array whose elements
//! carry a `"name"` and a floating point `"data"` field.
//!
//! ```json
//! { "entries": [ { "name": "GPU temperature", "data": 61.0 } ] }
//! ```

use crate::json::{value_of_key_if_type, JsonType, JsonValue};

/// Key of the section inside the combined document.
pub const SECTION_KEY: &str = "afterburner";

/// Lookup view over an Afterburner section.
#[derive(Debug, Clone, Copy)]
pub struct Afterburner<'a> {
    section: &'a JsonValue,
}

impl<'a> Afterburner<'a> {
    /// Wrap an Afterburner section. Any value is accepted; lookups on a
    /// non-object simply find nothing.
    pub fn new(section: &'a JsonValue) -> Self {
        Self { section }
    }

    /// Take the `"afterburner"` object out of the combined document.
    pub fn from_document(document: &'a JsonValue) -> Option<Self> {
        value_of_key_if_type(document, SECTION_KEY, JsonType::Object).map(Self::new)
    }

    fn entries(&self) -> Option<&'a [JsonValue]> {
        value_of_key_if_type(self.section, "entries", JsonType::Array).and_then(JsonValue::as_array)
    }

    /// Find the first entry whose `"name"` is exactly `name`.
    pub fn entry(&self, name: &str) -> Option<&'a JsonValue> {
        self.entries()?
            .iter()
            .find(|entry| entry_has_name(entry, name))
    }

    /// The `"data"` value of the entry called `name`, if it resolves.
    pub fn reading(&self, name: &str) -> Option<f64> {
        let entry = self.entry(name)?;
        value_of_key_if_type(entry, "data", JsonType::Double).and_then(JsonValue::as_double)
    }

    /// Like [`reading`](Self::reading) but `0.0` when it does not resolve.
    pub fn value(&self, name: &str) -> f64 {
        self.reading(name).unwrap_or(0.0)
    }
}

fn entry_has_name(entry: &JsonValue, name: &str) -> bool {
    value_of_key_if_type(entry, "name", JsonType::String).and_then(JsonValue::as_str) == Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(json: &str) -> JsonValue {
        JsonValue::parse(json).unwrap()
    }

    #[test]
    fn test_value_found() {
        let root = section(r#"{"entries": [{"name": "GPU temperature", "data": 75.0}]}"#);
        let afterburner = Afterburner::new(&root);
        assert_eq!(afterburner.value("GPU temperature"), 75.0);
        assert_eq!(afterburner.reading("GPU temperature"), Some(75.0));
    }

    #[test]
    fn test_value_missing_name() {
        let root = section(r#"{"entries": [{"name": "GPU temperature", "data": 75.0}]}"#);
        let afterburner = Afterburner::new(&root);
        assert_eq!(afterburner.value("CPU temperature"), 0.0);
        assert_eq!(afterburner.reading("CPU temperature"), None);
    }

    #[test]
    fn test_name_is_case_sensitive() {
        let root = section(r#"{"entries": [{"name": "GPU temperature", "data": 75.0}]}"#);
        let afterburner = Afterburner::new(&root);
        assert!(afterburner.entry("gpu temperature").is_none());
        assert_eq!(afterburner.value("gpu temperature"), 0.0);
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let root = section(
            r#"{"entries": [
                {"name": "Framerate", "data": 144.0},
                {"name": "Framerate", "data": 30.0}
            ]}"#,
        );
        assert_eq!(Afterburner::new(&root).value("Framerate"), 144.0);
    }

    #[test]
    fn test_skips_malformed_entries() {
        let root = section(
            r#"{"entries": [
                42,
                {"name": 7, "data": 1.0},
                {"data": 2.0},
                {"name": "Fan speed", "data": 55.0}
            ]}"#,
        );
        assert_eq!(Afterburner::new(&root).value("Fan speed"), 55.0);
    }

    #[test]
    fn test_entries_not_an_array() {
        let root = section(r#"{"entries": {"name": "GPU usage", "data": 50.0}}"#);
        assert_eq!(Afterburner::new(&root).value("GPU usage"), 0.0);

        let root = section(r#"{"other": []}"#);
        assert_eq!(Afterburner::new(&root).value("GPU usage"), 0.0);
    }

    #[test]
    fn test_data_with_wrong_type() {
        let root = section(
            r#"{"entries": [
                {"name": "Integral", "data": 75},
                {"name": "Text", "data": "75.0"},
                {"name": "Missing"}
            ]}"#,
        );
        let afterburner = Afterburner::new(&root);
        assert!(afterburner.entry("Integral").is_some());
        assert_eq!(afterburner.reading("Integral"), None);
        assert_eq!(afterburner.value("Text"), 0.0);
        assert_eq!(afterburner.value("Missing"), 0.0);
    }

    #[test]
    fn test_section_not_an_object() {
        let root = section(r#"[{"name": "GPU usage", "data": 50.0}]"#);
        assert_eq!(Afterburner::new(&root).value("GPU usage"), 0.0);
    }

    #[test]
    fn test_from_document() {
        let doc = section(r#"{"afterburner": {"entries": [{"name": "CPU usage", "data": 12.0}]}}"#);
        let afterburner = Afterburner::from_document(&doc).unwrap();
        assert_eq!(afterburner.value("CPU usage"), 12.0);

        let doc = section(r#"{"afterburner": null}"#);
        assert!(Afterburner::from_document(&doc).is_none());
        assert!(Afterburner::from_document(&section("{}")).is_none());
    }

    #[test]
    fn test_repeated_lookups_are_stable() {
        let root = section(r#"{"entries": [{"name": "Core clock", "data": 1905.0}]}"#);
        let snapshot = root.clone();
        let afterburner = Afterburner::new(&root);
        let first = afterburner.value("Core clock");
        let second = afterburner.value("Core clock");
        assert_eq!(first, second);
        assert_eq!(root, snapshot);
    }
}
