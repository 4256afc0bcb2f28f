//! # hwpanel
//!
//! Mirrors PC sensor readings onto a small serial character display.
//!
//! The host polls a local [RemoteHWInfo](https://github.com/Demion/remotehwinfo)
//! server, which publishes one JSON document combining two sources:
//! - **MSI Afterburner**: GPU/CPU temperatures, load, clocks, framerate
//! - **HWiNFO**: everything else (memory, pump, network rates, ...)
//!
//! Readings are resolved with a lookup layer that tolerates any shape of
//! document, clamped to the width of their display field, formatted into
//! fixed-width frames and written to the display over a serial link.
//!
//! ## Quick Start
//!
//! ```
//! use hwpanel::json::JsonValue;
//! use hwpanel::sensors::{IndexPolicy, Sensor, SensorNames, SensorReadings};
//! use hwpanel::Screen;
//!
//! let document = JsonValue::parse(r#"{
//!     "afterburner": {"entries": [{"name": "GPU temperature", "data": 61.0}]},
//!     "hwinfo": {"sensors": [], "readings": []}
//! }"#).unwrap();
//!
//! let readings = SensorReadings::resolve(&document, &SensorNames::default(), IndexPolicy::NameOnly);
//! assert_eq!(readings.get(Sensor::GpuTemperature), 61.0);
//! assert_eq!(readings.get(Sensor::CpuTemperature), 0.0);
//!
//! let frame = Screen::Performance.render(&readings);
//! assert!(frame.to_string().starts_with("SCNGPU 61°"));
//! ```
//!
//! ## Document Shape
//!
//! | Path | Fields |
//! |------|--------|
//! | `afterburner.entries[]` | `name` (string), `data` (number) |
//! | `hwinfo.sensors[]` | `sensorNameOriginal` (string), `entryIndex` (integer) |
//! | `hwinfo.readings[]` | `labelOriginal` (string), `sensorIndex` (integer), `value` (number) |
//!
//! Either section may be missing. Its sensors then read as zero and the
//! ticker line reports which program is not running.
//!
//! ## Feature Flags
//!
//! - `host` (default) - HTTP client, serial link and the driver loop

pub mod config;
mod error;
pub mod json;
pub mod link;
pub mod screens;
pub mod sensors;
pub mod ticker;

pub use config::Config;
pub use error::Error;
pub use link::DisplayLink;
pub use screens::{Frame, Screen};
pub use sensors::{clamp_upper, Sensor, SensorReadings};

/// Length of every frame sent to the display, command prefix included
pub const SCREEN_TEXT_LENGTH: usize = 63;

/// The display's code page byte for `°`
pub const DEGREE_SYMBOL: u8 = 0xB2;

/// Default RemoteHWInfo port
pub const DEFAULT_HWINFO_PORT: u16 = 27008;

/// Default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

// Host I/O
#[cfg(feature = "host")]
mod client;
#[cfg(feature = "host")]
pub use client::Client;

#[cfg(feature = "host")]
pub mod driver;
#[cfg(feature = "host")]
pub use driver::{CycleOutcome, Panel, Rotation};
#[cfg(feature = "host")]
pub use link::SerialLink;
