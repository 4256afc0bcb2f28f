//! Transport between the host and the display.
//!
//! The display is a dumb terminal on a serial line: the host writes whole
//! frames and the device may echo debug text back.

use crate::error::Error;
use crate::screens::Frame;

/// Something frames can be written to.
pub trait DisplayLink {
    /// Write `bytes` to the display.
    fn send(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Collect whatever the device has written back since the last call.
    fn drain(&mut self) -> Result<Vec<u8>, Error>;

    /// Whether the link is still usable.
    fn is_connected(&self) -> bool;

    /// Write a frame.
    fn send_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        self.send(frame.as_bytes())
    }
}

#[cfg(feature = "host")]
pub use serial::SerialLink;

#[cfg(feature = "host")]
mod serial {
    use std::io::{ErrorKind, Read, Write};
    use std::time::Duration;

    use super::DisplayLink;
    use crate::error::Error;

    /// [`DisplayLink`] over a serial port.
    ///
    /// A failed write closes the link; later sends return
    /// [`Error::Serial`] without touching the port.
    pub struct SerialLink {
        port: Option<Box<dyn serialport::SerialPort>>,
        name: String,
    }

    impl SerialLink {
        /// Open `path` (e.g. "COM5", "/dev/ttyUSB0") at `baud_rate`.
        pub fn open(path: &str, baud_rate: u32, timeout: Duration) -> Result<Self, Error> {
            let port = serialport::new(path, baud_rate)
                .timeout(timeout)
                .open()
                .map_err(|e| Error::Serial(format!("Failed to open {}: {}", path, e)))?;

            tracing::info!("Opened serial port {} at {} baud", path, baud_rate);
            Ok(Self {
                port: Some(port),
                name: path.to_string(),
            })
        }

        pub fn name(&self) -> &str {
            &self.name
        }

        fn close(&mut self) {
            if self.port.take().is_some() {
                tracing::warn!("Closed serial port {}", self.name);
            }
        }
    }

    impl DisplayLink for SerialLink {
        fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
            let port = self
                .port
                .as_mut()
                .ok_or_else(|| Error::Serial(format!("{} is closed", self.name)))?;

            let result = port.write_all(bytes).and_then(|_| port.flush());
            if let Err(e) = result {
                self.close();
                return Err(Error::Serial(format!("Write to {} failed: {}", self.name, e)));
            }
            Ok(())
        }

        fn drain(&mut self) -> Result<Vec<u8>, Error> {
            let Some(port) = self.port.as_mut() else {
                return Ok(Vec::new());
            };

            let pending = port.bytes_to_read()? as usize;
            let mut output = vec![0u8; pending];
            if pending > 0 {
                match port.read(&mut output) {
                    Ok(n) => output.truncate(n),
                    Err(e) if e.kind() == ErrorKind::TimedOut => output.clear(),
                    Err(e) => return Err(Error::Serial(e.to_string())),
                }
            }
            Ok(output)
        }

        fn is_connected(&self) -> bool {
            self.port.is_some()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory link recording every write.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingLink {
        pub sent: Vec<Vec<u8>>,
        pub echo: Vec<u8>,
        pub fail_after: Option<usize>,
        pub connected: bool,
    }

    impl RecordingLink {
        pub fn new() -> Self {
            Self {
                connected: true,
                ..Default::default()
            }
        }
    }

    impl DisplayLink for RecordingLink {
        fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
            if !self.connected {
                return Err(Error::Serial("closed".to_string()));
            }
            if self.fail_after == Some(self.sent.len()) {
                self.connected = false;
                return Err(Error::Serial("write failed".to_string()));
            }
            self.sent.push(bytes.to_vec());
            Ok(())
        }

        fn drain(&mut self) -> Result<Vec<u8>, Error> {
            Ok(std::mem::take(&mut self.echo))
        }

        fn is_connected(&self) -> bool {
            self.connected
        }
    }

    #[test]
    fn test_send_frame_writes_bytes() {
        let mut link = RecordingLink::new();
        let frame = Frame::new("SCNhello");
        link.send_frame(&frame).unwrap();
        assert_eq!(link.sent, vec![frame.as_bytes().to_vec()]);
    }

    #[test]
    fn test_recording_link_failure_disconnects() {
        let mut link = RecordingLink {
            fail_after: Some(0),
            ..RecordingLink::new()
        };
        assert!(link.send(b"x").is_err());
        assert!(!link.is_connected());
        assert!(matches!(link.send(b"x"), Err(Error::Serial(_))));
    }

    #[cfg(feature = "host")]
    #[test]
    fn test_open_missing_port() {
        let err = SerialLink::open("/dev/hwpanel-does-not-exist", 9600, std::time::Duration::from_millis(10))
            .err()
            .unwrap();
        assert!(err.to_string().contains("/dev/hwpanel-does-not-exist"));
    }
}
