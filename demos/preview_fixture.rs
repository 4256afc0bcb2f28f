//! Render both screens for a captured sensor document.
//!
//! Run with:
//! ```sh
//! cargo run --example preview_fixture
//! ```

use chrono::NaiveTime;
use hwpanel::json::JsonValue;
use hwpanel::screens::status_message;
use hwpanel::sensors::{IndexPolicy, SensorNames};
use hwpanel::ticker::scroll_text;
use hwpanel::{Screen, SensorReadings};

fn main() -> Result<(), hwpanel::Error> {
    let document = JsonValue::parse(include_str!("fixture.json"))?;

    let readings = SensorReadings::resolve(&document, &SensorNames::default(), IndexPolicy::NameOnly);
    for (sensor, value) in readings.iter() {
        println!("{:<28}{}", sensor.label(), value);
    }
    println!();

    println!("{}", Screen::Performance.render(&readings));
    println!("{}", Screen::Clocks.render(&readings));

    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
    let message = status_message(&readings).unwrap_or("Happy gaming!");
    println!("{}", scroll_text(&noon, message));
    Ok(())
}
