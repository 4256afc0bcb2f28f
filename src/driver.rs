//! The poll, format, transmit loop.
//!
//! One cycle runs start to finish before the next begins; nothing overlaps.
//!
//! ```rust,ignore
//! use hwpanel::{Client, Config, Panel, SerialLink};
//!
//! let config = Config::from_env()?;
//! let link = SerialLink::open(&config.serial_port, config.baud_rate, config.serial_timeout())?;
//! let client = Client::with_timeout(config.hwinfo_url(), config.request_timeout());
//!
//! Panel::new(config, client, link).run().await?;
//! ```

use crate::client::Client;
use crate::config::Config;
use crate::error::Error;
use crate::json::JsonValue;
use crate::link::DisplayLink;
use crate::screens::{blank_screen, status_message, Frame, Screen};
use crate::sensors::SensorReadings;
use crate::ticker::scroll_text;

/// Which screen is showing and how many times it has been sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rotation {
    pub screen: Screen,
    pub frames_sent: u32,
}

impl Rotation {
    /// Switch to the next screen if the current one has been sent
    /// `frames_per_screen` times. Returns whether it switched.
    pub fn advance(&mut self, frames_per_screen: u32) -> bool {
        if self.frames_sent < frames_per_screen {
            return false;
        }
        self.frames_sent = 0;
        self.screen = self.screen.next();
        true
    }

    pub fn record_sent(&mut self) {
        self.frames_sent += 1;
    }
}

/// What a single [`Panel::cycle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A sensor frame and the ticker were sent
    Sent(Screen),
    /// The sensor document could not be fetched or parsed
    Skipped,
    /// The link is closed; nothing was done
    Disconnected,
}

/// Drives a display from the sensor endpoint.
pub struct Panel<L> {
    config: Config,
    client: Client,
    link: L,
    rotation: Rotation,
}

impl<L: DisplayLink> Panel<L> {
    pub fn new(config: Config, client: Client, link: L) -> Self {
        Self {
            config,
            client,
            link,
            rotation: Rotation::default(),
        }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    /// Run one poll, format, transmit cycle.
    ///
    /// Fetch and parse failures are logged and skip the cycle. Link
    /// failures are returned.
    pub async fn cycle(&mut self) -> Result<CycleOutcome, Error> {
        if !self.link.is_connected() {
            return Ok(CycleOutcome::Disconnected);
        }

        let echo = self.link.drain()?;
        if !echo.is_empty() {
            tracing::info!("Display: {}", String::from_utf8_lossy(&echo).trim_end());
        }

        if self.rotation.advance(self.config.frames_per_screen) {
            tracing::debug!("Switching to {:?} screen", self.rotation.screen);
            self.link.send_frame(&blank_screen())?;
            tokio::time::sleep(self.config.blank_delay()).await;
        }

        let started = std::time::Instant::now();

        let document = match self.client.fetch_document().await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!("Failed to read sensors from {}: {}", self.client.url(), e);
                tokio::time::sleep(self.config.frame_delay()).await;
                return Ok(CycleOutcome::Skipped);
            }
        };

        let screen = self.rotation.screen;
        let (frame, message) = self.render(screen, &document);

        tracing::info!("{}", frame);
        self.link.send_frame(&frame)?;
        self.rotation.record_sent();
        tracing::debug!("Completed in {:?}", started.elapsed());

        tokio::time::sleep(self.config.frame_delay()).await;
        let now = chrono::Local::now();
        self.link.send_frame(&scroll_text(&now, &message))?;
        tokio::time::sleep(self.config.frame_delay()).await;

        Ok(CycleOutcome::Sent(screen))
    }

    fn render(&self, screen: Screen, document: &JsonValue) -> (Frame, String) {
        let readings =
            SensorReadings::resolve(document, &self.config.sensors, self.config.index_policy);
        let message = match status_message(&readings) {
            Some(problem) => {
                tracing::warn!("{}", problem);
                problem.to_string()
            }
            None => self.config.idle_message.clone(),
        };
        (screen.render(&readings), message)
    }

    /// Cycle until Ctrl-C or a link failure.
    pub async fn run(&mut self) -> Result<(), Error> {
        tracing::info!("Polling {}", self.client.url());
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down");
                    return Ok(());
                }
                outcome = self.cycle() => {
                    if outcome? == CycleOutcome::Disconnected {
                        return Err(Error::Serial("display link closed".to_string()));
                    }
                }
            }
        }
    }
}
