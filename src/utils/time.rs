//! Time and timestamp utilities

use chrono::Utc;

/// Current Unix timestamp in milliseconds (the unit stored on log entries)
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}
