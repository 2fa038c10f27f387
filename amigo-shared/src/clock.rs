use chrono::{Local, Utc};

/// Wall-clock time formatted the way the chat wire expects it (24h "HH:MM").
/// The backend echoes this string verbatim; it is never parsed on receive.
pub fn now_hh_mm() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Current unix timestamp in milliseconds.
pub fn unix_millis_now() -> i64 {
    Utc::now().timestamp_millis()
}
