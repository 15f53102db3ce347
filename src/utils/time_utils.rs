use chrono::{DateTime, Local};

pub const MS_IN_S: i64 = 1000;
pub const MS_IN_MIN: i64 = MS_IN_S * 60;
pub const MS_IN_D: i64 = MS_IN_MIN * 60 * 24;

pub fn now_timestamp_ms() -> i64 {
    Local::now().timestamp_millis()
}

/// Epoch-ms to a short UTC time string, for display purposes.
pub fn epoch_ms_to_time_string(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "invalid".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch_ms() {
        assert_eq!(epoch_ms_to_time_string(0), "00:00:00");
    }

    #[test]
    fn invalid_timestamp_does_not_panic() {
        assert_eq!(epoch_ms_to_time_string(i64::MAX), "invalid");
    }
}
