//! Fixed-width frames for the character display.
//!
//! The display shows three 20 character rows. A frame is the 3 byte command
//! prefix followed by the rows back to back, [`SCREEN_TEXT_LENGTH`] bytes in
//! total:
//!
//! ```text
//! SCN GPU 61° 97% FPS 144 | CPU 48° 23% FAN  45% | RAM 10422MB/32768MB
//! SCN CORE 1905   MEM 7000 | PUMP 2710   CPU 4650 | UP    12K  DN  2500K
//! ```
//!
//! (Separators added for readability; the wire format has none.)

use std::fmt;

use crate::sensors::{Sensor, SensorReadings};
use crate::{DEGREE_SYMBOL, SCREEN_TEXT_LENGTH};

/// Status shown when everything resolved.
pub const DEFAULT_IDLE_MESSAGE: &str = "Happy gaming!";

/// A frame of exactly [`SCREEN_TEXT_LENGTH`] bytes.
///
/// Frames are bytes rather than `str`: the degree sign is the display's own
/// code page byte ([`DEGREE_SYMBOL`]), which is not valid UTF-8 on its own.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame(Vec<u8>);

impl Frame {
    /// Encode `text`, mapping `°` to [`DEGREE_SYMBOL`], then truncate or
    /// pad with spaces to [`SCREEN_TEXT_LENGTH`].
    pub fn new(text: &str) -> Self {
        Self::from_bytes(encode(text))
    }

    /// Truncate or pad raw bytes to [`SCREEN_TEXT_LENGTH`].
    pub fn from_bytes(mut bytes: Vec<u8>) -> Self {
        bytes.truncate(SCREEN_TEXT_LENGTH);
        bytes.resize(SCREEN_TEXT_LENGTH, b' ');
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Map `°` to the display's degree byte; everything else is UTF-8.
pub(crate) fn encode(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        if c == '°' {
            bytes.push(DEGREE_SYMBOL);
        } else {
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }
    bytes
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            match byte {
                DEGREE_SYMBOL => f.write_str("°")?,
                b'\n' => f.write_str("\\n")?,
                b if b.is_ascii() => write!(f, "{}", b as char)?,
                _ => f.write_str("?")?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame(\"{}\")", self)
    }
}

/// Clears the display before switching screens.
pub fn blank_screen() -> Frame {
    Frame::new("SCN")
}

/// The screens the panel rotates through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Temperatures, load, framerate and memory
    #[default]
    Performance,
    /// Clock speeds, pump speed and network rates
    Clocks,
}

impl Screen {
    /// The screen shown after this one.
    pub fn next(self) -> Self {
        match self {
            Screen::Performance => Screen::Clocks,
            Screen::Clocks => Screen::Performance,
        }
    }

    /// Frame shown when there is nothing to display.
    pub fn placeholder(self) -> Frame {
        match self {
            Screen::Performance => {
                Frame::new("SCNGPU --° --% FPS ----CPU --° --% FAN ---%RAM -----MB/-----MB ")
            }
            Screen::Clocks => {
                Frame::new("SCNCORE ----   MEM ----PUMP ----   CPU ----UP -----K  DN -----K")
            }
        }
    }

    /// Format `readings` for this screen.
    ///
    /// Falls back to the [placeholder](Self::placeholder) unless the
    /// document was an object with both sections present.
    pub fn render(self, readings: &SensorReadings) -> Frame {
        if !readings.is_complete() {
            return self.placeholder();
        }
        let r = |sensor| readings.get(sensor);
        let text = match self {
            Screen::Performance => format!(
                "SCNGPU {:2.0}° {:2.0}% FPS {:<4.0}CPU {:2.0}° {:2.0}% FAN {:3.0}%RAM {:5.0}MB/{:5.0}MB ",
                r(Sensor::GpuTemperature),
                r(Sensor::GpuUsage),
                r(Sensor::Framerate),
                r(Sensor::CpuTemperature),
                r(Sensor::CpuUsage),
                r(Sensor::FanSpeed),
                r(Sensor::MemoryUsed),
                r(Sensor::MemoryTotal),
            ),
            Screen::Clocks => format!(
                "SCNCORE {:4.0}   MEM {:4.0}PUMP {:4.0}   CPU {:4.0}UP {:5.0}K  DN {:5.0}K",
                r(Sensor::CoreClock),
                r(Sensor::MemoryClock),
                r(Sensor::PumpSpeed),
                r(Sensor::CpuClock),
                r(Sensor::UploadRate),
                r(Sensor::DownloadRate),
            ),
        };
        Frame::new(&text)
    }
}

/// Problem worth telling the user about, if any.
///
/// Only whole missing sections are reported; individual fields that fail to
/// resolve just read as zero.
pub fn status_message(readings: &SensorReadings) -> Option<&'static str> {
    if !readings.is_object {
        Some("Error: Failed to parse JSON")
    } else if !readings.has_afterburner {
        Some("Error: Afterburner is not running")
    } else if !readings.has_hwinfo {
        Some("Error: HWInfo is not running")
    } else {
        None
    }
}
