//! The scrolling status line shown under the sensor screen.

use chrono::Timelike;

use crate::screens::{encode, Frame};
use crate::SCREEN_TEXT_LENGTH;

/// Greeting for the given hour of the day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "morning",
        12..=17 => "afternoon",
        _ => "evening",
    }
}

/// Build the scroll frame: greeting, wall clock time and a status message.
///
/// Short text is terminated with a newline before padding so the display
/// knows where the message ends.
///
/// # Example
///
/// ```
/// use chrono::NaiveTime;
/// use hwpanel::ticker::scroll_text;
///
/// let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
/// let frame = scroll_text(&time, "Happy gaming!");
/// assert!(frame.to_string().starts_with("SCLGood morning! It is 09:05  |  Happy gaming!"));
/// ```
pub fn scroll_text<T: Timelike>(time: &T, message: &str) -> Frame {
    let text = format!(
        "SCLGood {}! It is {:02}:{:02}  |  {}",
        greeting(time.hour()),
        time.hour(),
        time.minute(),
        message
    );
    let mut bytes = encode(&text);
    if bytes.len() < SCREEN_TEXT_LENGTH {
        bytes.push(b'\n');
    }
    Frame::from_bytes(bytes)
}
