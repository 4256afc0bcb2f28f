//! Sensor resolution on top of the JSON access layer.
//!
//! The polled document combines two independent sources, each optional:
//!
//! | Key | Source | Addressing |
//! |-----|--------|------------|
//! | `afterburner` | MSI Afterburner | entry name |
//! | `hwinfo` | HWiNFO (RemoteHWInfo) | group name + reading label |
//!
//! Resolution never fails. Anything that cannot be found, for whatever
//! reason, reads as `0.0`, and every reading is clamped to the digit budget
//! of the display field it is shown in.

pub mod afterburner;
pub mod hwinfo;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::json::{has_type, JsonType, JsonValue};

pub use afterburner::Afterburner;
pub use hwinfo::{is_entry_in_group, Hwinfo, IndexPolicy};

/// Bound `value` from above. There is no lower bound, and NaN is passed
/// through unchanged.
///
/// # Example
///
/// ```
/// use hwpanel::sensors::clamp_upper;
///
/// assert_eq!(clamp_upper(150.0, 99.0), 99.0);
/// assert_eq!(clamp_upper(-5.0, 99.0), -5.0);
/// ```
pub fn clamp_upper(value: f64, limit: f64) -> f64 {
    if value > limit {
        limit
    } else {
        value
    }
}

/// Names of the HWiNFO groups and readings shown on the panel.
///
/// Group names are hardware specific (motherboard controller, network
/// adapter), so they come from configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SensorNames {
    pub memory_group: String,
    pub memory_used: String,
    pub memory_available: String,
    pub pump_group: String,
    pub pump_entry: String,
    pub network_group: String,
    pub upload_entry: String,
    pub download_entry: String,
}

impl Default for SensorNames {
    fn default() -> Self {
        Self {
            memory_group: "System".to_string(),
            memory_used: "Physical Memory Used".to_string(),
            memory_available: "Physical Memory Available".to_string(),
            pump_group: "ASRock X570 Steel Legend (Nuvoton NCT6796D)".to_string(),
            pump_entry: "CPU2".to_string(),
            network_group: "Network: Broadcom 802.11ac Wireless PCIE Full Dongle Adapter"
                .to_string(),
            upload_entry: "Current UP rate".to_string(),
            download_entry: "Current DL rate".to_string(),
        }
    }
}

/// Every reading the panel displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sensor {
    GpuTemperature,
    GpuUsage,
    Framerate,
    CpuTemperature,
    CpuUsage,
    FanSpeed,
    MemoryUsed,
    MemoryAvailable,
    /// Used + available, summed before clamping
    MemoryTotal,
    CoreClock,
    MemoryClock,
    PumpSpeed,
    CpuClock,
    UploadRate,
    DownloadRate,
}

/// Where a [`Sensor`] is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Afterburner(&'static str),
    Hwinfo { entry: &'a str, group: &'a str },
    Derived,
}

impl Sensor {
    pub const ALL: [Sensor; 15] = [
        Sensor::GpuTemperature,
        Sensor::GpuUsage,
        Sensor::Framerate,
        Sensor::CpuTemperature,
        Sensor::CpuUsage,
        Sensor::FanSpeed,
        Sensor::MemoryUsed,
        Sensor::MemoryAvailable,
        Sensor::MemoryTotal,
        Sensor::CoreClock,
        Sensor::MemoryClock,
        Sensor::PumpSpeed,
        Sensor::CpuClock,
        Sensor::UploadRate,
        Sensor::DownloadRate,
    ];

    /// Human readable identifier.
    pub fn label(self) -> &'static str {
        match self {
            Sensor::GpuTemperature => "GPU temperature",
            Sensor::GpuUsage => "GPU usage",
            Sensor::Framerate => "Framerate",
            Sensor::CpuTemperature => "CPU temperature",
            Sensor::CpuUsage => "CPU usage",
            Sensor::FanSpeed => "Fan speed",
            Sensor::MemoryUsed => "Physical Memory Used",
            Sensor::MemoryAvailable => "Physical Memory Available",
            Sensor::MemoryTotal => "Physical Memory Total",
            Sensor::CoreClock => "Core clock",
            Sensor::MemoryClock => "Memory clock",
            Sensor::PumpSpeed => "Pump speed",
            Sensor::CpuClock => "CPU clock",
            Sensor::UploadRate => "Upload rate",
            Sensor::DownloadRate => "Download rate",
        }
    }

    /// Largest value the sensor's display field can hold.
    pub fn limit(self) -> f64 {
        match self {
            Sensor::GpuTemperature
            | Sensor::GpuUsage
            | Sensor::CpuTemperature
            | Sensor::CpuUsage => 99.0,
            Sensor::FanSpeed => 999.0,
            Sensor::Framerate
            | Sensor::CoreClock
            | Sensor::MemoryClock
            | Sensor::PumpSpeed
            | Sensor::CpuClock => 9999.0,
            Sensor::UploadRate | Sensor::DownloadRate => 99999.0,
            Sensor::MemoryUsed | Sensor::MemoryAvailable | Sensor::MemoryTotal => 999999.0,
        }
    }

    pub fn source(self, names: &SensorNames) -> Source<'_> {
        match self {
            Sensor::GpuTemperature
            | Sensor::GpuUsage
            | Sensor::Framerate
            | Sensor::CpuTemperature
            | Sensor::CpuUsage
            | Sensor::FanSpeed
            | Sensor::CoreClock
            | Sensor::MemoryClock
            | Sensor::CpuClock => Source::Afterburner(self.label()),
            Sensor::MemoryUsed => Source::Hwinfo {
                entry: &names.memory_used,
                group: &names.memory_group,
            },
            Sensor::MemoryAvailable => Source::Hwinfo {
                entry: &names.memory_available,
                group: &names.memory_group,
            },
            Sensor::PumpSpeed => Source::Hwinfo {
                entry: &names.pump_entry,
                group: &names.pump_group,
            },
            Sensor::UploadRate => Source::Hwinfo {
                entry: &names.upload_entry,
                group: &names.network_group,
            },
            Sensor::DownloadRate => Source::Hwinfo {
                entry: &names.download_entry,
                group: &names.network_group,
            },
            Sensor::MemoryTotal => Source::Derived,
        }
    }
}

/// Clamped readings resolved from one polled document.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReadings {
    values: BTreeMap<Sensor, f64>,
    /// The document root was an object
    pub is_object: bool,
    /// The document had an `"afterburner"` object
    pub has_afterburner: bool,
    /// The document had a `"hwinfo"` object
    pub has_hwinfo: bool,
}

impl SensorReadings {
    /// Resolve every [`Sensor`] from a combined document.
    ///
    /// Sensors of a missing section read as `0.0`.
    pub fn resolve(document: &JsonValue, names: &SensorNames, policy: IndexPolicy) -> Self {
        let afterburner = Afterburner::from_document(document);
        let hwinfo = Hwinfo::from_document(document).map(|h| h.with_policy(policy));

        let mut raw = BTreeMap::new();
        for sensor in Sensor::ALL {
            let value = match sensor.source(names) {
                Source::Afterburner(name) => afterburner.map_or(0.0, |a| a.value(name)),
                Source::Hwinfo { entry, group } => hwinfo.map_or(0.0, |h| h.value(entry, group)),
                Source::Derived => continue,
            };
            raw.insert(sensor, value);
        }

        let total = raw[&Sensor::MemoryUsed] + raw[&Sensor::MemoryAvailable];
        raw.insert(Sensor::MemoryTotal, total);

        let values = raw
            .into_iter()
            .map(|(sensor, value)| (sensor, clamp_upper(value, sensor.limit())))
            .collect();

        let readings = Self {
            values,
            is_object: has_type(Some(document), JsonType::Object),
            has_afterburner: afterburner.is_some(),
            has_hwinfo: hwinfo.is_some(),
        };
        tracing::debug!(
            "Resolved sensors (afterburner={}, hwinfo={})",
            readings.has_afterburner,
            readings.has_hwinfo
        );
        readings
    }

    /// Clamped value of `sensor`.
    pub fn get(&self, sensor: Sensor) -> f64 {
        self.values.get(&sensor).copied().unwrap_or(0.0)
    }

    /// Iterate over `(sensor, clamped value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Sensor, f64)> + '_ {
        self.values.iter().map(|(sensor, value)| (*sensor, *value))
    }

    /// Whether both sections were present.
    pub fn is_complete(&self) -> bool {
        self.is_object && self.has_afterburner && self.has_hwinfo
    }
}
