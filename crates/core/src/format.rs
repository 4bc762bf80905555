//! Display formatting for transport values

use std::time::Duration;

/// Formats a playback time as `m:ss`.
///
/// Minutes are not wrapped into hours, so a 75 minute chapter shows `75:00`.
pub fn format_countdown(time: Duration) -> String {
    let total_seconds = time.as_secs();
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Formats a speed multiplier with the fewest digits that represent it.
///
/// Whole numbers have no decimals, halves one decimal, anything else two.
pub fn format_speed(speed: f32) -> String {
    if speed.fract() == 0.0 {
        format!("{}x", speed as i64)
    } else if (speed.fract() - 0.5).abs() < f32::EPSILON {
        format!("{:.1}x", speed)
    } else {
        format!("{:.2}x", speed)
    }
}
