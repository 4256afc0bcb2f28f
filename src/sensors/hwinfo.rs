//! HWiNFO readings, as exported by the RemoteHWInfo web server.
//!
//! The `"hwinfo"` section is two parallel arrays. `"sensors"` lists the
//! sensor groups (one per chip or device) and `"readings"` lists every
//! individual value. Readings point back at their group through an index:
//!
//! ```json
//! {
//!   "sensors":  [ { "sensorNameOriginal": "System", "entryIndex": 1 } ],
//!   "readings": [ { "labelOriginal": "Physical Memory Used", "sensorIndex": 1, "value": 8192.0 } ]
//! }
//! ```
//!
//! Labels repeat across groups ("Temperature", "CPU2", ...), so a reading is
//! addressed by its label *and* the name of its group.

use serde::Deserialize;

use crate::json::{value_of_key_if_type, JsonType, JsonValue};

/// Key of the section inside the combined document.
pub const SECTION_KEY: &str = "hwinfo";

/// How a reading is tied to the group it was requested from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPolicy {
    /// The group must exist and carry an integer `"entryIndex"`; the first
    /// reading with a matching label is taken regardless of its
    /// `"sensorIndex"`.
    #[default]
    NameOnly,
    /// The reading's `"sensorIndex"` must also equal the group's
    /// `"entryIndex"`. Disambiguates labels shared by several groups.
    MatchIndex,
}

/// Lookup view over a HWiNFO section.
#[derive(Debug, Clone, Copy)]
pub struct Hwinfo<'a> {
    section: &'a JsonValue,
    policy: IndexPolicy,
}

impl<'a> Hwinfo<'a> {
    /// Wrap a HWiNFO section using [`IndexPolicy::NameOnly`].
    pub fn new(section: &'a JsonValue) -> Self {
        Self {
            section,
            policy: IndexPolicy::default(),
        }
    }

    /// Take the `"hwinfo"` object out of the combined document.
    pub fn from_document(document: &'a JsonValue) -> Option<Self> {
        value_of_key_if_type(document, SECTION_KEY, JsonType::Object).map(Self::new)
    }

    /// Set how readings are matched to groups.
    #[must_use]
    pub fn with_policy(mut self, policy: IndexPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    fn groups(&self) -> Option<&'a [JsonValue]> {
        value_of_key_if_type(self.section, "sensors", JsonType::Array).and_then(JsonValue::as_array)
    }

    fn readings(&self) -> Option<&'a [JsonValue]> {
        value_of_key_if_type(self.section, "readings", JsonType::Array).and_then(JsonValue::as_array)
    }

    /// Find the first group whose `"sensorNameOriginal"` is exactly `name`.
    pub fn group(&self, name: &str) -> Option<&'a JsonValue> {
        self.groups()?
            .iter()
            .find(|group| string_field_equals(group, "sensorNameOriginal", name))
    }

    /// Find the first reading whose `"labelOriginal"` is exactly `label`,
    /// in any group.
    pub fn entry(&self, label: &str) -> Option<&'a JsonValue> {
        self.readings()?
            .iter()
            .find(|entry| string_field_equals(entry, "labelOriginal", label))
    }

    /// Find the reading labelled `label` that belongs to `group`, according
    /// to the view's [`IndexPolicy`].
    pub fn entry_in_group(&self, label: &str, group: &JsonValue) -> Option<&'a JsonValue> {
        let readings = self.readings()?;
        let group_index = group_index(group)?;
        readings.iter().find(|entry| {
            string_field_equals(entry, "labelOriginal", label)
                && match self.policy {
                    IndexPolicy::NameOnly => true,
                    IndexPolicy::MatchIndex => sensor_index(entry) == Some(group_index),
                }
        })
    }

    /// The `"value"` of reading `label` in group `group_name`, if it resolves.
    pub fn reading(&self, label: &str, group_name: &str) -> Option<f64> {
        let group = self.group(group_name)?;
        let entry = self.entry_in_group(label, group)?;
        value_of_key_if_type(entry, "value", JsonType::Double).and_then(JsonValue::as_double)
    }

    /// Like [`reading`](Self::reading) but `0.0` when it does not resolve.
    pub fn value(&self, label: &str, group_name: &str) -> f64 {
        self.reading(label, group_name).unwrap_or(0.0)
    }
}

/// Whether `entry`'s `"sensorIndex"` refers to `group`'s `"entryIndex"`.
///
/// Both indices must be present as integers.
pub fn is_entry_in_group(entry: &JsonValue, group: &JsonValue) -> bool {
    match (sensor_index(entry), group_index(group)) {
        (Some(entry_group), Some(group)) => entry_group == group,
        _ => false,
    }
}

fn group_index(group: &JsonValue) -> Option<i64> {
    value_of_key_if_type(group, "entryIndex", JsonType::Integer).and_then(JsonValue::as_integer)
}

fn sensor_index(entry: &JsonValue) -> Option<i64> {
    value_of_key_if_type(entry, "sensorIndex", JsonType::Integer).and_then(JsonValue::as_integer)
}

fn string_field_equals(object: &JsonValue, key: &str, expected: &str) -> bool {
    value_of_key_if_type(object, key, JsonType::String).and_then(JsonValue::as_str)
        == Some(expected)
}
